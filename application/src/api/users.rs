//! [`User`]-related REST handlers.
//!
//! [`User`]: service::domain::User

use axum::{
    extract::{rejection::JsonRejection, Path, Query},
    Extension, Json,
};
use common::{datetime, pagination};
use serde::{Deserialize, Serialize};
use service::{
    command::{
        create_user, delete_user, update_user, CreateUser, DeleteUser,
        UpdateUser,
    },
    domain::{user, User},
    query,
    read::user::list,
    Command as _, Query as _,
};
use uuid::Uuid;

use crate::{AsError, Context, Error};

/// Default number of users on a page.
const DEFAULT_PAGE_SIZE: usize = 10;

/// Query parameters of [`index`].
#[derive(Debug, Deserialize)]
pub struct ListParams {
    /// 1-based page number.
    page: Option<usize>,

    /// Page size.
    limit: Option<usize>,

    /// Free-text needle over names and email.
    search: Option<String>,

    /// Role to filter by; `all` (or nothing) disables the filter.
    role: Option<String>,
}

/// `GET /api/users` handler.
///
/// # Errors
///
/// - 400 on an unknown role filter;
/// - 500 on a storage failure.
pub async fn index(
    Extension(ctx): Extension<Context>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, Error> {
    let role = parse_role_filter(params.role.as_deref())?;

    let selector = list::Selector {
        arguments: pagination::Arguments::new(
            params.page,
            params.limit,
            DEFAULT_PAGE_SIZE,
        ),
        filter: list::Filter {
            search: params.search.filter(|s| !s.is_empty()),
            role,
        },
    };
    let page = ctx
        .service()
        .execute(query::users::List::by(selector))
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(ListResponse::of(page)))
}

/// Body of [`create`].
#[derive(Debug, Deserialize)]
pub struct CreateRequest {
    /// Email of the new user.
    email: Option<String>,

    /// First name of the new user.
    first_name: Option<String>,

    /// Last name of the new user.
    last_name: Option<String>,

    /// Role of the new user, `client` by default.
    role: Option<String>,

    /// Phone of the new user.
    phone: Option<String>,
}

/// `POST /api/users` handler.
///
/// # Errors
///
/// - 400 on missing or invalid fields, or an already-taken email;
/// - 500 on a storage failure.
pub async fn create(
    Extension(ctx): Extension<Context>,
    payload: Result<Json<CreateRequest>, JsonRejection>,
) -> Result<Json<SingleResponse>, Error> {
    let Json(request) = payload.map_err(|e| Error::bad_request(e.body_text()))?;
    let CreateRequest {
        email,
        first_name,
        last_name,
        role,
        phone,
    } = request;

    let (Some(email), Some(first_name), Some(last_name)) =
        (email, first_name, last_name)
    else {
        return Err(Error::bad_request("Email, prénom et nom sont requis"));
    };
    if email.is_empty() || first_name.is_empty() || last_name.is_empty() {
        return Err(Error::bad_request("Email, prénom et nom sont requis"));
    }

    let email = user::Email::new(email)
        .ok_or_else(|| Error::bad_request("L'email n'est pas valide"))?;
    let role = role
        .map(|r| parse_role(&r))
        .transpose()?
        .unwrap_or(user::Role::Client);
    let phone = parse_phone(phone)?;

    let created = ctx
        .service()
        .execute(CreateUser {
            email,
            first_name: Some(first_name),
            last_name: Some(last_name),
            role,
            phone,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(SingleResponse {
        success: true,
        data: created.into(),
        message: None,
    }))
}

/// Body of [`update`].
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    /// New email.
    email: Option<String>,

    /// New first name.
    first_name: Option<String>,

    /// New last name.
    last_name: Option<String>,

    /// New role.
    role: Option<String>,

    /// New phone.
    phone: Option<String>,

    /// New activity flag; `active` is the legacy spelling.
    #[serde(alias = "active")]
    is_active: Option<bool>,
}

/// `PATCH /api/users/{id}` handler.
///
/// # Errors
///
/// - 400 on invalid fields or an email taken by another user;
/// - 404 when the user doesn't exist;
/// - 500 on a storage failure.
pub async fn update(
    Extension(ctx): Extension<Context>,
    Path(id): Path<Uuid>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> Result<Json<SingleResponse>, Error> {
    let Json(request) = payload.map_err(|e| Error::bad_request(e.body_text()))?;
    let UpdateRequest {
        email,
        first_name,
        last_name,
        role,
        phone,
        is_active,
    } = request;

    let email = email
        .map(|e| {
            user::Email::new(e)
                .ok_or_else(|| Error::bad_request("L'email n'est pas valide"))
        })
        .transpose()?;
    let role = role.map(|r| parse_role(&r)).transpose()?;
    let phone = parse_phone(phone)?;

    let updated = ctx
        .service()
        .execute(UpdateUser {
            id: id.into(),
            email,
            first_name,
            last_name,
            role,
            phone,
            is_active,
        })
        .await
        .map_err(AsError::into_error)?;

    Ok(Json(SingleResponse {
        success: true,
        data: updated.into(),
        message: None,
    }))
}

/// `DELETE /api/users/{id}` handler.
///
/// The last remaining admin cannot be deleted.
///
/// # Errors
///
/// - 400 when the user is the last remaining admin;
/// - 404 when the user doesn't exist;
/// - 500 on a storage failure.
pub async fn destroy(
    Extension(ctx): Extension<Context>,
    Path(id): Path<Uuid>,
) -> Result<Json<DeletedResponse>, Error> {
    ctx.service()
        .execute(DeleteUser { id: id.into() })
        .await
        .map_err(AsError::into_error)?;
    Ok(Json(DeletedResponse {
        success: true,
        message: "Utilisateur supprimé avec succès",
    }))
}

/// Parses a role filter value; `all` disables the filter.
fn parse_role_filter(raw: Option<&str>) -> Result<Option<user::Role>, Error> {
    match raw {
        None | Some("all") => Ok(None),
        Some(r) => parse_role(r).map(Some),
    }
}

/// Parses a role value.
fn parse_role(raw: &str) -> Result<user::Role, Error> {
    raw.parse::<user::Role>()
        .map_err(|_| Error::bad_request("Rôle invalide"))
}

/// Parses an optional phone, treating the empty string as absence.
fn parse_phone(raw: Option<String>) -> Result<Option<user::Phone>, Error> {
    raw.filter(|p| !p.is_empty())
        .map(|p| {
            user::Phone::new(p).ok_or_else(|| {
                Error::bad_request("Le numéro de téléphone n'est pas valide")
            })
        })
        .transpose()
}

/// Envelope of a user page.
///
/// Unlike the other list endpoints, the counters are nested under
/// `pagination`.
#[derive(Debug, Serialize)]
pub struct ListResponse {
    /// Always `true`.
    success: bool,

    /// Users of the page, newest first.
    data: Vec<UserPayload>,

    /// Pagination counters.
    pagination: Pagination,
}

impl ListResponse {
    /// Wraps the provided page of users.
    fn of(page: list::Page) -> Self {
        let total_pages = page.total_pages();
        Self {
            success: true,
            pagination: Pagination {
                page: page.page,
                limit: page.limit,
                total: page.total,
                total_pages,
            },
            data: page.items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Pagination counters of a [`ListResponse`].
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Pagination {
    /// 1-based number of the page.
    page: usize,

    /// Page size.
    limit: usize,

    /// Total count of users matching the filter.
    total: usize,

    /// Total count of pages.
    #[serde(rename = "totalPages")]
    total_pages: usize,
}

/// Envelope of a single user.
#[derive(Debug, Serialize)]
pub struct SingleResponse {
    /// Always `true`.
    success: bool,

    /// The user itself.
    data: UserPayload,

    /// Optional human-readable note.
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<&'static str>,
}

/// Envelope of a user deletion.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct DeletedResponse {
    /// Always `true`.
    success: bool,

    /// Human-readable outcome.
    message: &'static str,
}

/// JSON shape of a user.
#[derive(Debug, Serialize)]
pub struct UserPayload {
    /// ID of the user.
    id: user::Id,

    /// Email of the user.
    email: String,

    /// First name of the user.
    first_name: Option<String>,

    /// Last name of the user.
    last_name: Option<String>,

    /// Role of the user.
    role: user::Role,

    /// Activity flag of the user.
    is_active: bool,

    /// Phone of the user.
    phone: Option<String>,

    /// Creation timestamp.
    #[serde(with = "datetime::serde::rfc3339")]
    created_at: user::CreationDateTime,

    /// Last update timestamp.
    #[serde(with = "datetime::serde::rfc3339")]
    updated_at: user::UpdateDateTime,
}

impl From<User> for UserPayload {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_active: user.is_active,
            phone: user.phone.map(|p| p.to_string()),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

impl AsError for create_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::bad_request(
                "Un utilisateur avec cet email existe déjà",
            )),
        }
    }
}

impl AsError for update_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => {
                Some(Error::not_found("Utilisateur non trouvé"))
            }
            Self::EmailOccupied(_) => Some(Error::bad_request(
                "Un autre utilisateur avec cet email existe déjà",
            )),
        }
    }
}

impl AsError for delete_user::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NotExists => {
                Some(Error::not_found("Utilisateur non trouvé"))
            }
            Self::LastAdmin => Some(Error::bad_request(
                "Impossible de supprimer le dernier administrateur",
            )),
        }
    }
}
