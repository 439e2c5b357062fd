//! Error taxonomy for the HTTP API.
//!
//! Every handler returns `Result<_, ApiError>`. The [`IntoResponse`] impl
//! is the one place failures become status codes and JSON bodies, and the
//! one place they are logged.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use integrations::IntegrationError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// Failures a request can surface, each mapped to a single status code.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required fields were missing or malformed.
    #[error("{0}")]
    InvalidPayload(String),

    /// No supplier matched the searched name.
    #[error("no supplier found with name '{name}'")]
    SupplierNotFound { name: String },

    /// More than one supplier matched the searched name.
    #[error("multiple suppliers found with name '{name}'")]
    AmbiguousSupplier { name: String },

    /// An external service failed or could not be reached.
    #[error("upstream call failed: {0}")]
    Upstream(#[from] IntegrationError),

    /// Anything else.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status code this error maps to.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload(_) | Self::AmbiguousSupplier { .. } => StatusCode::BAD_REQUEST,
            Self::SupplierNotFound { .. } => StatusCode::NOT_FOUND,
            Self::Upstream(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        } else {
            warn!(status = status.as_u16(), error = %self, "Request rejected");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
