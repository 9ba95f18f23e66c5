//! [`Error`]-related definitions.

use std::fmt;

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use derive_more::Error as StdError;
use itertools::Itertools as _;
use serde::Serialize;
use service::infra::database;
use tracerr::{Trace, Traced};

/// REST API [`Error`].
#[derive(Clone, Debug, StdError)]
pub struct Error {
    /// [`http::StatusCode`] of this [`Error`].
    pub status_code: http::StatusCode,

    /// Human-readable message of this [`Error`].
    pub message: String,

    /// Backtrace of this [`Error`].
    #[error(not(backtrace))]
    pub backtrace: Option<Trace>,
}

impl Error {
    /// Creates a new [`Error`] rejecting a malformed or invalid request.
    #[must_use]
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status_code: http::StatusCode::BAD_REQUEST,
            message: msg.into(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] reporting a missing entity.
    #[must_use]
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status_code: http::StatusCode::NOT_FOUND,
            message: msg.into(),
            backtrace: None,
        }
    }

    /// Creates a new [`Error`] representing an internal server error.
    #[must_use]
    pub fn internal(msg: &impl ToString) -> Self {
        Self {
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: msg.to_string(),
            backtrace: None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            status_code,
            message,
            backtrace,
        } = self;

        write!(
            f,
            "[{status_code}]: {message}{}",
            backtrace
                .iter()
                .format_with("\n", |trace, f| f(&format_args!("{trace}"))),
        )
    }
}

/// Uniform failure envelope of the REST API.
#[derive(Debug, Serialize)]
struct Failure {
    /// Always `false`.
    success: bool,

    /// Human-readable error message.
    error: String,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        if self.status_code.is_server_error() {
            tracing::error!("{self}");
        } else {
            tracing::debug!("{self}");
        }

        (
            self.status_code,
            Json(Failure {
                success: false,
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// Helper trait for converting types into [`Error`]s.
pub trait AsError {
    /// Tries to convert the type into an [`Error`].
    ///
    /// [`None`] is returned if the type cannot be converted into an [`Error`].
    fn try_as_error(&self) -> Option<Error>;

    /// Converts the type into an [`Error`].
    fn as_error(&self) -> Error
    where
        Self: fmt::Display,
    {
        self.try_as_error()
            .unwrap_or_else(|| Error::internal(&self))
    }

    /// Converts the type into an [`Error`] by consuming it.
    fn into_error(self) -> Error
    where
        Self: fmt::Display + Sized,
    {
        self.as_error()
    }
}

impl<E: AsError> AsError for Traced<E> {
    fn try_as_error(&self) -> Option<Error> {
        let mut error = self.as_ref().try_as_error()?;
        error.backtrace = Some(self.trace().clone());
        Some(error)
    }
}

impl AsError for database::Error {
    fn try_as_error(&self) -> Option<Error> {
        // Storage failures are generic towards the outside; the details stay
        // in the logs.
        tracing::error!("database failure: {self}");
        Some(Error {
            status_code: http::StatusCode::INTERNAL_SERVER_ERROR,
            message: "Erreur serveur".to_owned(),
            backtrace: None,
        })
    }
}
