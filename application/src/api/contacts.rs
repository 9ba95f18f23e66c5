//! [`Contact`]-related REST handlers.
//!
//! [`Contact`]: service::domain::Contact

use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    Extension, Json,
};
use common::{datetime, pagination};
use serde::{Deserialize, Serialize};
use service::{
    command::{
        create_contact, update_contact, CreateContact, DeleteContact,
        UpdateContact,
    },
    domain::{contact, property},
    query,
    read::contact::{list, Item, PropertySummary, Stats},
    Command as _, Query as _,
};
use uuid::Uuid;

use crate::{AsError, Context, Error};

use super::Done;

/// Default number of contacts on a page.
const DEFAULT_PAGE_SIZE: usize = 20;

/// Query parameters of [`index`].
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// Workflow status to filter by; `all` (or nothing) disables the filter.
    status: Option<String>,

    /// 1-based page number.
    page: Option<usize>,

    /// Page size.
    limit: Option<usize>,
}

/// `GET /api/contacts` handler.
///
/// # Errors
///
/// - 400 on an unknown status filter;
/// - 500 on a storage failure.
pub async fn index(
    Extension(ctx): Extension<Context>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, Error> {
    let status = parse_status_filter(params.status.as_deref())?;

    let selector = list::Selector {
        arguments: pagination::Arguments::new(
            params.page,
            params.limit,
            DEFAULT_PAGE_SIZE,
        ),
        filter: list::Filter { status },
    };
    let page = ctx
        .service()
        .execute(query::contacts::List::by(selector))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(ListResponse::of(page)))
}

/// Body of [`create`].
///
/// Accepts both the current snake_case field spelling and the legacy
/// camelCase one.
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// First name of the sender.
    #[serde(alias = "firstName")]
    first_name: Option<String>,

    /// Last name of the sender.
    #[serde(alias = "lastName")]
    last_name: Option<String>,

    /// Email address of the sender.
    email: Option<String>,

    /// Phone number of the sender.
    phone: Option<String>,

    /// Subject of the message.
    subject: Option<String>,

    /// Body of the message.
    message: Option<String>,

    /// Property the message is about.
    property_id: Option<Uuid>,
}

/// `POST /api/contacts` handler.
///
/// # Errors
///
/// - 400 with every validation failure joined into one message;
/// - 500 on a storage failure.
pub async fn create(
    Extension(ctx): Extension<Context>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<Json<SingleResponse>, Error> {
    let Json(request) = payload.map_err(|e| Error::bad_request(e.body_text()))?;
    let CreateRequest {
        first_name,
        last_name,
        email,
        phone,
        subject,
        message,
        property_id,
    } = request;

    let contact = ctx
        .service()
        .execute(CreateContact {
            form: contact::Form {
                first_name,
                last_name,
                email,
                phone,
                subject,
                message,
                property_id: property_id.map(Into::into),
            },
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(SingleResponse {
        success: true,
        data: Item {
            contact,
            property: None,
        }
        .into(),
    }))
}

/// Body of [`update`].
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New workflow status.
    status: Option<String>,

    /// New notes; `admin_notes` is the legacy spelling.
    #[serde(alias = "admin_notes")]
    notes: Option<String>,
}

/// `PATCH /api/contacts/{id}` handler.
///
/// The status is overwritten directly; no transition is guarded.
///
/// # Errors
///
/// - 400 on an unknown status;
/// - 404 when the contact doesn't exist;
/// - 500 on a storage failure.
pub async fn update(
    Extension(ctx): Extension<Context>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<SingleResponse>, Error> {
    let Json(request) = payload.map_err(|e| Error::bad_request(e.body_text()))?;

    let status = request
        .status
        .map(|s| {
            s.parse::<contact::Status>()
                .map_err(|_| Error::bad_request("Statut invalide"))
        })
        .transpose()?;

    let updated = ctx
        .service()
        .execute(UpdateContact {
            id: id.into(),
            status,
            notes: request.notes,
        })
        .await
        .map_err(AsError::into_error)?;

    // Refetch with the property summary for the back-office screen.
    let item = ctx
        .service()
        .execute(query::contacts::ById::by(updated.id))
        .await
        .map_err(AsError::into_error)?
        .unwrap_or(Item {
            contact: updated,
            property: None,
        });

    Ok(Json(SingleResponse {
        success: true,
        data: item.into(),
    }))
}

/// `DELETE /api/contacts/{id}` handler.
///
/// # Errors
///
/// - 500 on a storage failure.
pub async fn destroy(
    Extension(ctx): Extension<Context>,
    Path(id): Path<Uuid>,
) -> Result<Json<Done>, Error> {
    ctx.service()
        .execute(DeleteContact { id: id.into() })
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(Done::OK))
}

/// `GET /api/contacts/stats` handler.
///
/// # Errors
///
/// - 500 on a storage failure.
pub async fn stats(
    Extension(ctx): Extension<Context>,
) -> Result<Json<StatsResponse>, Error> {
    let stats = ctx
        .service()
        .execute(query::contacts::Stats::by(()))
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(StatsResponse {
        success: true,
        data: stats.into(),
    }))
}

/// Parses the status filter of [`ListParams`].
fn parse_status_filter(
    raw: Option<&str>,
) -> Result<Option<contact::Status>, Error> {
    match raw {
        None | Some("all") => Ok(None),
        Some(s) => s
            .parse::<contact::Status>()
            .map(Some)
            .map_err(|_| Error::bad_request("Statut invalide")),
    }
}

/// Envelope of a contact page.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Always `true`.
    success: bool,

    /// Contacts of the page, newest first.
    data: Vec<ContactPayload>,

    /// Total count of contacts matching the filter.
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
    /// Wraps the provided page of contacts.
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

/// Envelope of a single contact.
#[derive(Debug, Serialize)]
pub struct SingleResponse {
    /// Always `true`.
    success: bool,

    /// The contact itself.
    data: ContactPayload,
}

/// Envelope of the contact statistics.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StatsResponse {
    /// Always `true`.
    success: bool,

    /// The counters themselves.
    data: StatsPayload,
}

/// JSON shape of the contact statistics.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct StatsPayload {
    /// Total number of contacts.
    total: usize,

    /// Number of contacts in the `new` status.
    new: usize,

    /// Number of contacts in the `in_progress` status.
    in_progress: usize,

    /// Number of contacts in the `completed` status.
    completed: usize,

    /// Number of contacts in the `cancelled` status.
    cancelled: usize,

    /// Number of contacts received within the last 24 hours.
    recent_24h: usize,
}

impl From<Stats> for StatsPayload {
    fn from(stats: Stats) -> Self {
        let Stats {
            total,
            new,
            in_progress,
            completed,
            cancelled,
            recent_24h,
        } = stats;
        Self {
            total,
            new,
            in_progress,
            completed,
            cancelled,
            recent_24h,
        }
    }
}

/// JSON shape of a contact.
#[derive(Debug, Serialize)]
pub struct ContactPayload {
    /// ID of the contact.
    id: contact::Id,

    /// First name of the sender.
    first_name: String,

    /// Last name of the sender.
    last_name: String,

    /// Email address of the sender.
    email: String,

    /// Phone number of the sender.
    phone: Option<String>,

    /// Subject of the message.
    subject: Option<String>,

    /// Body of the message.
    message: String,

    /// Property reference.
    property_id: Option<property::Id>,

    /// Workflow status.
    status: contact::Status,

    /// Back-office notes.
    notes: Option<String>,

    /// Creation timestamp.
    #[serde(with = "datetime::serde::rfc3339")]
    created_at: contact::CreationDateTime,

    /// Last update timestamp.
    #[serde(with = "datetime::serde::rfc3339")]
    updated_at: contact::UpdateDateTime,

    /// Summary of the referenced property, if any.
    property: Option<PropertySummaryPayload>,
}

impl From<Item> for ContactPayload {
    fn from(item: Item) -> Self {
        let Item { contact, property } = item;
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
            subject: contact.subject,
            message: contact.message,
            property_id: contact.property_id,
            status: contact.status,
            notes: contact.notes,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
            property: property.map(Into::into),
        }
    }
}

/// JSON summary of a property referenced by a contact.
#[derive(Debug, Serialize)]
pub struct PropertySummaryPayload {
    /// ID of the property.
    id: property::Id,

    /// Title of the property.
    title: String,

    /// Slug of the property.
    slug: String,
}

impl From<PropertySummary> for PropertySummaryPayload {
    fn from(summary: PropertySummary) -> Self {
        Self {
            id: summary.id,
            title: summary.title.to_string(),
            slug: summary.slug.to_string(),
        }
    }
}

impl AsError for create_contact::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::Invalid(violations) => {
                Some(Error::bad_request(violations.to_string()))
            }
        }
    }
}

impl AsError for update_contact::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => Some(Error::not_found("Contact non trouvé")),
        }
    }
}
