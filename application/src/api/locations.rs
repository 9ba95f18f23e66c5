//! [`Location`]-related REST handlers.
//!
//! [`Location`]: service::domain::Location

use axum::{Extension, Json};
use serde::Serialize;
use service::{domain::{lookup, Location}, query, Query as _};

use crate::{AsError, Context, Error};

/// `GET /api/locations` handler.
///
/// # Errors
///
/// - 500 on a storage failure.
pub async fn index(
    Extension(ctx): Extension<Context>,
) -> Result<Json<ListResponse>, Error> {
    let locations = ctx
        .service()
        .execute(query::locations::List::by(()))
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(ListResponse {
        success: true,
        data: locations.into_iter().map(Into::into).collect(),
    }))
}

/// Envelope of the location list.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Always `true`.
    success: bool,

    /// Every location, ordered by name.
    data: Vec<LocationPayload>,
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
