//! API Error Type
//!
//! Gateways return `ApiError`; handlers hand it straight to axum, which renders it as a JSON
//! body of the form `{"detail": "..."}`.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// No record or relationship matched the lookup key.
    #[error("{0}")]
    NotFound(String),

    /// The identifier does not parse into the store's identifier encoding.
    #[error("Movie with ID {0} not found: malformed identifier")]
    InvalidId(String),

    /// The request collides with an existing record.
    #[error("{0}")]
    Conflict(String),

    /// A store connection or query failed.
    #[error("upstream store failure: {0:#}")]
    Upstream(#[from] anyhow::Error),
}

impl ApiError {
    pub fn movie_not_found(id: &str) -> Self {
        Self::NotFound(format!("Movie with ID {} not found", id))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) | Self::InvalidId(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::Upstream(e) => tracing::error!("Store failure: {:#}", e),
            other => tracing::debug!("Request rejected: {}", other),
        }
        (status, Json(ErrorBody { detail: self.to_string() })).into_response()
    }
}
