//! Error envelope shaping for gateway-manufactured responses
//!
//! The envelope is the only structured payload the gateway itself
//! produces; every upstream payload is passed through untouched.

use crate::gateway::types::GatewayError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

/// Structured error payload: `{"error": "...", "detail": "..."}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    /// Fixed, machine-matchable error label
    pub error: String,
    /// Human-readable failure description, when one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, Json(self)).into_response()
    }
}

/// Error conversion for Axum responses
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self {
            GatewayError::MissingSymbol => ErrorEnvelope::new("missing symbol")
                .into_response_with_status(StatusCode::BAD_REQUEST),
            GatewayError::UpstreamUnavailable { label, detail } => ErrorEnvelope::new(label)
                .with_detail(detail)
                .into_response_with_status(StatusCode::BAD_GATEWAY),
        }
    }
}
