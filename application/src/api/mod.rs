//! REST API definitions.

pub mod analytics;
pub mod contacts;
pub mod dashboard;
pub mod locations;
pub mod properties;
pub mod users;

use axum::{
    routing::{delete, get, patch},
    Router,
};
use serde::Serialize;

/// Bare success envelope of mutations with nothing else to report.
#[derive(Clone, Copy, Debug, Serialize)]
pub(crate) struct Done {
    /// Always `true`.
    pub(crate) success: bool,
}

impl Done {
    /// The only [`Done`] value there is.
    pub(crate) const OK: Self = Self { success: true };
}

/// Builds the [`Router`] of the REST API.
///
/// The [`Context`] is expected to be provided as an [`Extension`] layer.
///
/// [`Context`]: crate::Context
/// [`Extension`]: axum::Extension
pub fn router() -> Router {
    Router::new()
        .route(
            "/api/properties",
            get(properties::index).post(properties::mutate),
        )
        .route("/api/properties/featured", get(properties::featured))
        .route("/api/properties/:id", delete(properties::destroy))
        .route(
            "/api/properties/:id/likes",
            get(properties::likes).post(properties::toggle_like),
        )
        .route(
            "/api/properties/:id/shares",
            get(properties::shares).post(properties::record_share),
        )
        .route("/api/contacts", get(contacts::index).post(contacts::create))
        .route("/api/contacts/stats", get(contacts::stats))
        .route(
            "/api/contacts/:id",
            patch(contacts::update).delete(contacts::destroy),
        )
        .route("/api/users", get(users::index).post(users::create))
        .route("/api/users/:id", patch(users::update).delete(users::destroy))
        .route("/api/locations", get(locations::index))
        .route("/api/dashboard/activity", get(dashboard::activity))
        .route("/api/analytics", get(analytics::index))
}
