//! [`Property`]-related REST handlers.
//!
//! [`Property`]: service::domain::Property

use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    response::{IntoResponse, Response},
    Extension, Json,
};
use common::{datetime, pagination, Money};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use service::{
    command::{
        attach_property_features, attach_property_images, toggle_favorite,
        update_property, AttachPropertyFeatures, AttachPropertyImages,
        CreateProperty, DeleteProperty, ToggleFavorite, UpdateProperty,
    },
    domain::{lookup, property, Category, Location, PropertyImage},
    query,
    read::{self, property::list, property::Listing},
    Command as _, Query as _,
};
use uuid::Uuid;

use crate::{AsError, Context, Error};

use super::Done;

/// Default number of listings on a page.
const DEFAULT_PAGE_SIZE: usize = 12;

/// Default number of featured listings.
const DEFAULT_FEATURED_LIMIT: usize = 6;

/// Query parameters of [`index`].
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// ID of a single listing to fetch.
    id: Option<Uuid>,

    /// Slug of a single published listing to visit.
    slug: Option<String>,

    /// Free-text needle.
    search: Option<String>,

    /// Kind of property to filter by.
    property_type: Option<property::Kind>,

    /// Minimum price to filter by.
    min_price: Option<f64>,

    /// Maximum price to filter by.
    max_price: Option<f64>,

    /// Location to filter by.
    location_id: Option<Uuid>,

    /// Exact number of bedrooms to filter by.
    bedrooms: Option<u16>,

    /// Exact number of bathrooms to filter by.
    bathrooms: Option<u16>,

    /// Sort order of the page.
    sort_by: Option<list::Sort>,

    /// 1-based page number.
    page: Option<usize>,

    /// Page size.
    limit: Option<usize>,
}

/// `GET /api/properties` handler.
///
/// Serves a single listing when `id` or `slug` is given, or a filtered page
/// of published listings otherwise. Page results are cached per filter set;
/// a fresh cache hit never touches the database.
///
/// # Errors
///
/// - 404 when the requested single listing doesn't exist;
/// - 400 on malformed filter values;
/// - 500 on a storage failure.
pub async fn index(
    Extension(ctx): Extension<Context>,
    Query(params): Query<ListParams>,
) -> Result<Response, Error> {
    if let Some(id) = params.id {
        let listing = ctx
            .service()
            .execute(query::property::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)?
            .ok_or_else(|| Error::not_found("Propriété non trouvée"))?;
        return Ok(Json(SingleResponse::of(listing)).into_response());
    }

    if let Some(slug) = params.slug {
        let slug = slug
            .parse::<property::Slug>()
            .map_err(|_| Error::not_found("Propriété non trouvée"))?;
        let listing = ctx
            .service()
            .execute(query::property::VisitBySlug::by(slug))
            .await
            .map_err(AsError::into_error)?
            .ok_or_else(|| Error::not_found("Propriété non trouvée"))?;
        return Ok(Json(SingleResponse::of(listing)).into_response());
    }

    let arguments = pagination::Arguments::new(
        params.page,
        params.limit,
        DEFAULT_PAGE_SIZE,
    );
    let filter = list::Filter {
        search: params.search.filter(|s| !s.is_empty()),
        kind: params.property_type,
        min_price: decimal_price(params.min_price)?,
        max_price: decimal_price(params.max_price)?,
        location_id: params.location_id.map(Into::into),
        bedrooms: params.bedrooms,
        bathrooms: params.bathrooms,
    };
    let selector = list::Selector {
        arguments,
        filter,
        sort: params.sort_by.unwrap_or_default(),
    };

    let page = if let Some(page) = ctx.listings().get(&selector) {
        page
    } else {
        let page = ctx
            .service()
            .execute(query::properties::List::by(selector.clone()))
            .await
            .map_err(AsError::into_error)?;
        ctx.listings().insert(selector, page.clone());
        page
    };

    Ok(Json(ListResponse::of(page)).into_response())
}

/// Query parameters of [`featured`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct FeaturedParams {
    /// Maximum number of featured listings to return.
    limit: Option<usize>,
}

/// `GET /api/properties/featured` handler.
///
/// Cached with the same TTL as listing pages. On a storage failure an
/// expired selection is served anyway, in preference to surfacing the error.
///
/// # Errors
///
/// - 500 on a storage failure with nothing cached to fall back to.
pub async fn featured(
    Extension(ctx): Extension<Context>,
    Query(params): Query<FeaturedParams>,
) -> Result<Json<FeaturedResponse>, Error> {
    let limit = params.limit.unwrap_or(DEFAULT_FEATURED_LIMIT);

    if let Some(listings) = ctx.featured().get(&limit) {
        return Ok(Json(FeaturedResponse::of(listings)));
    }

    let selection = ctx
        .service()
        .execute(query::properties::Featured::by(read::property::Featured {
            limit,
        }))
        .await;
    match selection {
        Ok(listings) => {
            ctx.featured().insert(limit, listings.clone());
            Ok(Json(FeaturedResponse::of(listings)))
        }
        Err(e) => {
            if let Some(stale) = ctx.featured().get_stale(&limit) {
                tracing::warn!("serving stale featured selection: {e}");
                Ok(Json(FeaturedResponse::of(stale)))
            } else {
                Err(e.into_error())
            }
        }
    }
}

/// Body of [`mutate`].
///
/// Explicitly tagged: which mutation runs is never inferred from which
/// fields happen to be present.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MutationRequest {
    /// Creates a new listing.
    Create {
        /// Title of the listing.
        title: String,

        /// Description of the listing.
        description: Option<String>,

        /// Price of the listing.
        price: f64,

        /// Currency of the price, XAF by default.
        currency: Option<common::money::Currency>,

        /// Pricing model.
        price_type: Option<property::PriceType>,

        /// Kind of the property.
        property_type: property::Kind,

        /// Availability status.
        status: Option<property::Status>,

        /// Number of bedrooms.
        bedrooms: Option<u16>,

        /// Number of bathrooms.
        bathrooms: Option<u16>,

        /// Living surface in square meters.
        surface_area: Option<f64>,

        /// Land size in square meters.
        land_size: Option<f64>,

        /// Address of the property.
        address: Option<String>,

        /// Location reference.
        location_id: Option<Uuid>,

        /// Category reference.
        category_id: Option<Uuid>,

        /// Agent reference.
        agent_id: Option<Uuid>,

        /// Visibility in the public catalog.
        is_published: Option<bool>,

        /// Featured flag.
        is_featured: Option<bool>,

        /// Gallery to attach.
        images: Option<Vec<ImageRequest>>,

        /// Features to attach.
        features: Option<Vec<Uuid>>,
    },

    /// Updates an existing listing.
    Update {
        /// ID of the listing to update.
        id: Uuid,

        /// New title.
        title: Option<String>,

        /// New description.
        description: Option<String>,

        /// New price.
        price: Option<f64>,

        /// New currency of the price.
        currency: Option<common::money::Currency>,

        /// New pricing model.
        price_type: Option<property::PriceType>,

        /// New kind of the property.
        property_type: Option<property::Kind>,

        /// New availability status.
        status: Option<property::Status>,

        /// New number of bedrooms.
        bedrooms: Option<u16>,

        /// New number of bathrooms.
        bathrooms: Option<u16>,

        /// New living surface in square meters.
        surface_area: Option<f64>,

        /// New land size in square meters.
        land_size: Option<f64>,

        /// New address.
        address: Option<String>,

        /// New location reference.
        location_id: Option<Uuid>,

        /// New category reference.
        category_id: Option<Uuid>,

        /// New agent reference.
        agent_id: Option<Uuid>,

        /// New visibility.
        is_published: Option<bool>,

        /// New featured flag.
        is_featured: Option<bool>,
    },

    /// Replaces the gallery of a listing.
    AttachImages {
        /// ID of the listing.
        id: Uuid,

        /// Replacement gallery.
        images: Vec<ImageRequest>,
    },

    /// Replaces the feature set of a listing.
    AttachFeatures {
        /// ID of the listing.
        id: Uuid,

        /// Replacement feature set.
        features: Vec<Uuid>,
    },
}

/// Image of a [`MutationRequest`].
#[derive(Debug, Deserialize)]
pub struct ImageRequest {
    /// URL of the image.
    url: String,

    /// Alternative text of the image.
    alt_text: Option<String>,

    /// Indicator whether the image is the primary one.
    #[serde(default)]
    is_primary: bool,
}

impl From<ImageRequest> for property::NewImage {
    fn from(value: ImageRequest) -> Self {
        let ImageRequest {
            url,
            alt_text,
            is_primary,
        } = value;
        Self {
            url,
            alt_text,
            is_primary,
        }
    }
}

/// `POST /api/properties` handler.
///
/// # Errors
///
/// - 400 on a malformed or invalid body;
/// - 404 when the targeted listing doesn't exist;
/// - 500 on a storage failure.
pub async fn mutate(
    Extension(ctx): Extension<Context>,
    payload: Result<Json<MutationRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = payload.map_err(|e| Error::bad_request(e.body_text()))?;

    match request {
        MutationRequest::Create {
            title,
            description,
            price,
            currency,
            price_type,
            property_type,
            status,
            bedrooms,
            bathrooms,
            surface_area,
            land_size,
            address,
            location_id,
            category_id,
            agent_id,
            is_published,
            is_featured,
            images,
            features,
        } => {
            let title = property::Title::new(title)
                .ok_or_else(|| Error::bad_request("Le titre est requis"))?;
            let command = CreateProperty {
                title,
                description,
                price: Money {
                    amount: decimal(price)?,
                    currency: currency
                        .unwrap_or(common::money::Currency::Xaf),
                },
                price_type: price_type
                    .unwrap_or(property::PriceType::Fixed),
                kind: property_type,
                status: status.unwrap_or(property::Status::Available),
                bedrooms,
                bathrooms,
                surface_area: decimal_price(surface_area)?,
                land_size: decimal_price(land_size)?,
                address: parse_address(address)?,
                location_id: location_id.map(Into::into),
                category_id: category_id.map(Into::into),
                agent_id: agent_id.map(Into::into),
                is_published: is_published.unwrap_or(false),
                is_featured: is_featured.unwrap_or(false),
                images: images
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
                features: features
                    .unwrap_or_default()
                    .into_iter()
                    .map(Into::into)
                    .collect(),
            };
            let created = ctx
                .service()
                .execute(command)
                .await
                .map_err(AsError::into_error)?;
            single(&ctx, created.id).await
        }

        MutationRequest::Update {
            id,
            title,
            description,
            price,
            currency,
            price_type,
            property_type,
            status,
            bedrooms,
            bathrooms,
            surface_area,
            land_size,
            address,
            location_id,
            category_id,
            agent_id,
            is_published,
            is_featured,
        } => {
            let title = title
                .map(|t| {
                    property::Title::new(t).ok_or_else(|| {
                        Error::bad_request("Le titre est requis")
                    })
                })
                .transpose()?;
            let price = price
                .map(|p| {
                    Ok::<_, Error>(Money {
                        amount: decimal(p)?,
                        currency: currency
                            .unwrap_or(common::money::Currency::Xaf),
                    })
                })
                .transpose()?;
            let command = UpdateProperty {
                id: id.into(),
                title,
                description,
                price,
                price_type,
                kind: property_type,
                status,
                bedrooms,
                bathrooms,
                surface_area: decimal_price(surface_area)?,
                land_size: decimal_price(land_size)?,
                address: parse_address(address)?,
                location_id: location_id.map(Into::into),
                category_id: category_id.map(Into::into),
                agent_id: agent_id.map(Into::into),
                is_published,
                is_featured,
            };
            let updated = ctx
                .service()
                .execute(command)
                .await
                .map_err(AsError::into_error)?;
            single(&ctx, updated.id).await
        }

        MutationRequest::AttachImages { id, images } => {
            let command = AttachPropertyImages {
                property_id: id.into(),
                images: images.into_iter().map(Into::into).collect(),
            };
            ctx.service()
                .execute(command)
                .await
                .map_err(AsError::into_error)?;
            Ok(Json(Done::OK).into_response())
        }

        MutationRequest::AttachFeatures { id, features } => {
            let command = AttachPropertyFeatures {
                property_id: id.into(),
                features: features.into_iter().map(Into::into).collect(),
            };
            ctx.service()
                .execute(command)
                .await
                .map_err(AsError::into_error)?;
            Ok(Json(Done::OK).into_response())
        }
    }
}

/// `DELETE /api/properties/{id}` handler.
///
/// # Errors
///
/// - 500 on a storage failure.
pub async fn destroy(
    Extension(ctx): Extension<Context>,
    Path(id): Path<Uuid>,
) -> Result<Json<Done>, Error> {
    ctx.service()
        .execute(DeleteProperty { id: id.into() })
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(Done::OK))
}

/// `GET /api/properties/{id}/likes` handler.
///
/// # Errors
///
/// - 500 on a storage failure.
pub async fn likes(
    Extension(ctx): Extension<Context>,
    Path(id): Path<Uuid>,
) -> Result<Json<LikesResponse>, Error> {
    let count = ctx
        .service()
        .execute(query::favorites::LikesCount::by(id.into()))
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(LikesResponse {
        success: true,
        likes: count.into(),
    }))
}

/// Body of [`toggle_like`].
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct LikeRequest {
    /// User toggling or checking the like.
    user_id: Option<Uuid>,

    /// When set, only reports the current state without mutating it.
    #[serde(default)]
    check_only: bool,
}

/// `POST /api/properties/{id}/likes` handler.
///
/// # Errors
///
/// - 400 without a `user_id`;
/// - 500 on a storage failure.
pub async fn toggle_like(
    Extension(ctx): Extension<Context>,
    Path(id): Path<Uuid>,
    payload: Result<Json<LikeRequest>, JsonRejection>,
) -> Result<Response, Error> {
    let Json(request) = payload.map_err(|e| Error::bad_request(e.body_text()))?;

    let Some(user_id) = request.user_id else {
        return Err(Error::bad_request("user_id requis"));
    };

    if request.check_only {
        let is_liked = ctx
            .service()
            .execute(query::favorites::IsLiked::by(read::favorite::Pair {
                user_id: user_id.into(),
                property_id: id.into(),
            }))
            .await
            .map_err(AsError::into_error)?;
        return Ok(Json(LikeCheckResponse {
            success: true,
            is_liked: *is_liked,
        })
        .into_response());
    }

    let action = ctx
        .service()
        .execute(ToggleFavorite {
            user_id: user_id.into(),
            property_id: id.into(),
        })
        .await
        .map_err(AsError::into_error)?;
    let (action, message) = match action {
        toggle_favorite::Action::Liked => ("liked", "Like ajouté"),
        toggle_favorite::Action::Unliked => ("unliked", "Like supprimé"),
    };
    Ok(Json(LikeToggleResponse {
        success: true,
        action,
        message,
    })
    .into_response())
}

/// `GET /api/properties/{id}/shares` handler.
pub async fn shares(
    Extension(ctx): Extension<Context>,
    Path(_id): Path<Uuid>,
) -> Json<SharesResponse> {
    Json(SharesResponse {
        success: true,
        shares: 0,
        shares_supported: ctx.capabilities().shares_supported,
        message: None,
    })
}

/// `POST /api/properties/{id}/shares` handler.
///
/// A placeholder until the share counter column lands: the response carries
/// the capability flag instead of faking a counter.
pub async fn record_share(
    Extension(ctx): Extension<Context>,
    Path(_id): Path<Uuid>,
) -> Json<SharesResponse> {
    Json(SharesResponse {
        success: true,
        shares: 0,
        shares_supported: ctx.capabilities().shares_supported,
        message: Some("Share non comptabilisé (colonne non disponible)"),
    })
}

/// Fetches the listing of the provided ID and wraps it into a
/// [`SingleResponse`].
async fn single(ctx: &Context, id: property::Id) -> Result<Response, Error> {
    let listing = ctx
        .service()
        .execute(query::property::ById::by(id))
        .await
        .map_err(AsError::into_error)?
        .ok_or_else(|| Error::not_found("Propriété non trouvée"))?;
    Ok(Json(SingleResponse::of(listing)).into_response())
}

/// Parses a price-like number into a [`Decimal`].
fn decimal(value: f64) -> Result<Decimal, Error> {
    Decimal::try_from(value).map_err(|_| Error::bad_request("Prix invalide"))
}

/// Parses an optional price-like number into an optional [`Decimal`].
fn decimal_price(value: Option<f64>) -> Result<Option<Decimal>, Error> {
    value.map(decimal).transpose()
}

/// Parses an optional address, treating the empty string as absence.
fn parse_address(
    value: Option<String>,
) -> Result<Option<property::Address>, Error> {
    value
        .filter(|a| !a.is_empty())
        .map(|a| {
            property::Address::new(a)
                .ok_or_else(|| Error::bad_request("Adresse invalide"))
        })
        .transpose()
}

/// Envelope of a single listing.
#[derive(Debug, Serialize)]
pub struct SingleResponse {
    /// Always `true`.
    success: bool,

    /// The listing itself.
    data: ListingPayload,
}

impl SingleResponse {
    /// Wraps the provided [`Listing`].
    fn of(listing: Listing) -> Self {
        Self {
            success: true,
            data: listing.into(),
        }
    }
}

/// Envelope of a listing page.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Always `true`.
    success: bool,

    /// Listings of the page.
    data: Vec<ListingPayload>,

    /// Total count of listings matching the filter.
    total: usize,

    /// 1-based number of the page.
    page: usize,

    /// Page size.
    limit: usize,

    /// Total count of pages.
    #[serde(rename = "totalPages")]
    total_pages: usize,
}

impl ListResponse {
    /// Wraps the provided page of [`Listing`]s.
    fn of(page: list::Page) -> Self {
        let total_pages = page.total_pages();
        Self {
            success: true,
            data: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            limit: page.limit,
            total_pages,
        }
    }
}

/// Envelope of the featured selection.
#[derive(Debug, Serialize)]
pub struct FeaturedResponse {
    /// Always `true`.
    success: bool,

    /// Featured listings, newest first.
    data: Vec<ListingPayload>,
}

impl FeaturedResponse {
    /// Wraps the provided [`Listing`]s.
    fn of(listings: Vec<Listing>) -> Self {
        Self {
            success: true,
            data: listings.into_iter().map(Into::into).collect(),
        }
    }
}

/// Envelope of a like counter.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LikesResponse {
    /// Always `true`.
    success: bool,

    /// Number of likes of the listing.
    likes: usize,
}

/// Envelope of a like state check.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LikeCheckResponse {
    /// Always `true`.
    success: bool,

    /// Whether the user currently likes the listing.
    is_liked: bool,
}

/// Envelope of a like toggle.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct LikeToggleResponse {
    /// Always `true`.
    success: bool,

    /// Either `liked` or `unliked`.
    action: &'static str,

    /// Human-readable outcome.
    message: &'static str,
}

/// Envelope of the share counter placeholder.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SharesResponse {
    /// Always `true`.
    success: bool,

    /// Share counter; constantly 0 while unsupported.
    shares: u64,

    /// Whether share counting is backed by storage.
    #[serde(rename = "sharesSupported")]
    shares_supported: bool,

    /// Optional human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// JSON shape of a [`Listing`].
#[derive(Debug, Serialize)]
pub struct ListingPayload {
    /// ID of the listing.
    id: property::Id,

    /// Title of the listing.
    title: String,

    /// Slug of the listing.
    slug: String,

    /// Description of the listing.
    description: Option<String>,

    /// Price of the listing.
    price: Decimal,

    /// Currency of the price.
    currency: common::money::Currency,

    /// Pricing model.
    price_type: property::PriceType,

    /// Kind of the property, in the canonical vocabulary.
    property_type: property::Kind,

    /// Availability status.
    status: property::Status,

    /// Number of bedrooms.
    bedrooms: Option<u16>,

    /// Number of bathrooms.
    bathrooms: Option<u16>,

    /// Living surface in square meters.
    surface_area: Option<Decimal>,

    /// Land size in square meters.
    land_size: Option<Decimal>,

    /// Address of the property.
    address: Option<String>,

    /// Location reference.
    location_id: Option<lookup::LocationId>,

    /// Category reference.
    category_id: Option<lookup::CategoryId>,

    /// Agent reference.
    agent_id: Option<service::domain::user::Id>,

    /// Visibility in the public catalog.
    is_published: bool,

    /// Featured flag.
    is_featured: bool,

    /// Number of visits of the public page.
    views_count: u32,

    /// Creation timestamp.
    #[serde(with = "datetime::serde::rfc3339")]
    created_at: property::CreationDateTime,

    /// Last update timestamp.
    #[serde(with = "datetime::serde::rfc3339")]
    updated_at: property::UpdateDateTime,

    /// Location of the property, if referenced.
    location: Option<LocationPayload>,

    /// Category of the property, if referenced.
    category: Option<CategoryPayload>,

    /// Gallery of the property.
    images: Vec<ImagePayload>,
}

impl From<Listing> for ListingPayload {
    fn from(listing: Listing) -> Self {
        let Listing {
            property,
            location,
            category,
            images,
        } = listing;
        Self {
            id: property.id,
            title: property.title.to_string(),
            slug: property.slug.to_string(),
            description: property.description,
            price: property.price.amount,
            currency: property.price.currency,
            price_type: property.price_type,
            property_type: property.kind,
            status: property.status,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            surface_area: property.surface_area,
            land_size: property.land_size,
            address: property.address.map(|a| a.to_string()),
            location_id: property.location_id,
            category_id: property.category_id,
            agent_id: property.agent_id,
            is_published: property.is_published,
            is_featured: property.is_featured,
            views_count: property.views_count,
            created_at: property.created_at,
            updated_at: property.updated_at,
            location: location.map(Into::into),
            category: category.map(Into::into),
            images: images.into_iter().map(Into::into).collect(),
        }
    }
}

/// JSON shape of a [`Location`].
#[derive(Debug, Serialize)]
pub struct LocationPayload {
    /// ID of the location.
    id: lookup::LocationId,

    /// Name of the location.
    name: String,

    /// Slug of the location.
    slug: String,

    /// City of the location.
    city: String,

    /// Region of the location.
    region: Option<String>,
}

impl From<Location> for LocationPayload {
    fn from(location: Location) -> Self {
        Self {
            id: location.id,
            name: location.name,
            slug: location.slug,
            city: location.city,
            region: location.region,
        }
    }
}

/// JSON shape of a [`Category`].
#[derive(Debug, Serialize)]
pub struct CategoryPayload {
    /// ID of the category.
    id: lookup::CategoryId,

    /// Name of the category.
    name: String,

    /// Slug of the category.
    slug: String,
}

impl From<Category> for CategoryPayload {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            slug: category.slug,
        }
    }
}

/// JSON shape of a [`PropertyImage`].
#[derive(Debug, Serialize)]
pub struct ImagePayload {
    /// ID of the property the image belongs to.
    property_id: property::Id,

    /// URL of the image.
    url: String,

    /// Alternative text of the image.
    alt_text: String,

    /// Whether the image is the primary one.
    is_primary: bool,

    /// Position of the image in the gallery.
    sort_order: i32,
}

impl From<PropertyImage> for ImagePayload {
    fn from(image: PropertyImage) -> Self {
        Self {
            property_id: image.property_id,
            url: image.url,
            alt_text: image.alt_text,
            is_primary: image.is_primary,
            sort_order: image.sort_order,
        }
    }
}

impl AsError for update_property::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => {
                Some(Error::not_found("Propriété non trouvée"))
            }
        }
    }
}

impl AsError for attach_property_images::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => {
                Some(Error::not_found("Propriété non trouvée"))
            }
        }
    }
}

impl AsError for attach_property_features::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => {
                Some(Error::not_found("Propriété non trouvée"))
            }
        }
    }
}

#[cfg(test)]
mod spec {
    use super::MutationRequest;

    #[test]
    fn mutation_requests_are_explicitly_tagged() {
        let request: MutationRequest = serde_json::from_value(serde_json::json!({
            "kind": "create",
            "title": "Villa moderne à Bastos",
            "price": 250_000_000.0,
            "property_type": "house",
        }))
        .unwrap();
        assert!(matches!(request, MutationRequest::Create { .. }));

        let request: MutationRequest = serde_json::from_value(serde_json::json!({
            "kind": "attach_images",
            "id": "8c2e6a46-9f5c-4b9a-bb09-0f4ad3f4b0a1",
            "images": [{"url": "https://cdn.example.cm/1.jpg"}],
        }))
        .unwrap();
        assert!(matches!(request, MutationRequest::AttachImages { .. }));

        // A body without the tag is rejected, not shape-sniffed.
        let untagged = serde_json::from_value::<MutationRequest>(
            serde_json::json!({
                "property": {"id": "8c2e6a46-9f5c-4b9a-bb09-0f4ad3f4b0a1"},
                "images": [],
            }),
        );
        assert!(untagged.is_err());
    }

    #[test]
    fn update_requires_an_id() {
        let missing_id = serde_json::from_value::<MutationRequest>(
            serde_json::json!({"kind": "update", "title": "Nouveau titre"}),
        );
        assert!(missing_id.is_err());
    }
}
