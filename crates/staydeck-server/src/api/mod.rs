pub mod approvals;
pub mod listings;
pub mod params;
pub mod reviews;
pub mod server;

pub use server::AppContext;

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Envelope returned whenever a request cannot be served.
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub status: &'static str,
    pub message: String,
}

pub type ApiError = (StatusCode, Json<ErrorEnvelope>);

pub fn error_response(code: StatusCode, message: impl Into<String>) -> ApiError {
    (
        code,
        Json(ErrorEnvelope {
            status: "error",
            message: message.into(),
        }),
    )
}
