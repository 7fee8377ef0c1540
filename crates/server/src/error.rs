//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, AppError>`. Errors render as a JSON body
//! `{"error": "...", "fields": {...}}`, where `fields` only appears for form
//! validation failures. Store failures are captured to Sentry before the
//! response is built.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use rolodex_core::{FieldErrors, ListingError, ValidationError};

use crate::db::RepositoryError;

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum AppError {
    /// A submitted form failed validation.
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Malformed request: bad JSON, query string, or path parameter.
    #[error("{0}")]
    BadRequest(String),

    /// Another customer already uses the phone number.
    #[error("Phone number already exists")]
    DuplicatePhone,

    /// Resource not found.
    #[error("{0}")]
    NotFound(&'static str),

    /// The store rejected the operation.
    #[error("{0}")]
    Store(String),
}

impl AppError {
    /// Map a repository error, reporting `NotFound` with `message`.
    pub fn not_found_as(message: &'static str) -> impl FnOnce(RepositoryError) -> Self {
        move |err| match err {
            RepositoryError::NotFound => Self::NotFound(message),
            other => other.into(),
        }
    }

    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::BadRequest(_) | Self::DuplicatePhone | Self::Store(_) => {
                StatusCode::BAD_REQUEST
            }
        }
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(_) => Self::DuplicatePhone,
            RepositoryError::NotFound => Self::NotFound("Not found"),
            err @ RepositoryError::Database(_) => Self::Store(err.store_message()),
        }
    }
}

impl From<ListingError> for AppError {
    fn from(err: ListingError) -> Self {
        Self::BadRequest(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a FieldErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture store failures to Sentry
        if matches!(self, Self::Store(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Store error"
            );
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let fields = match &self {
            Self::Validation(err) => Some(err.fields()),
            _ => None,
        };
        let body = ErrorBody {
            error: self.to_string(),
            fields,
        };

        (self.status(), Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
