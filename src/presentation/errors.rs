//! HTTP error mapping
//!
//! Quota rejections are business outcomes with structured, readable bodies.
//! Store and upstream faults return generic messages; the cause is logged
//! server-side and never leaks storage or provider detail to the client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::application::generation::GenerationError;
use crate::presentation::models::ErrorResponse;

/// API-level request failure
#[derive(Debug)]
pub enum ApiError {
    /// Malformed or oversized input, rejected before any quota consultation
    Validation(String),
    /// The global monthly cap is spent
    GlobalCapReached { count: i64 },
    /// The calling identity already generated this month
    AlreadyUsed { count: i64 },
    /// The generative service failed; no usage was recorded
    Upstream,
    /// Store access or other internal failure; the request fails closed
    Internal,
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::GlobalCapReached { count } => ApiError::GlobalCapReached { count },
            GenerationError::AlreadyUsed { count } => ApiError::AlreadyUsed { count },
            GenerationError::Quota(e) => {
                tracing::error!("Quota store failure during generation: {}", e);
                ApiError::Internal
            }
            GenerationError::Provider(e) => {
                tracing::error!("Generative provider failure: {}", e);
                ApiError::Upstream
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "invalid_request".to_string(),
                    message,
                    count: None,
                },
            ),
            ApiError::GlobalCapReached { count } => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse {
                    error: "global_cap_reached".to_string(),
                    message: "The monthly generation limit has been reached. Try again next month."
                        .to_string(),
                    count: Some(count),
                },
            ),
            ApiError::AlreadyUsed { count } => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorResponse {
                    error: "already_used".to_string(),
                    message: "This address already used its free generation this month."
                        .to_string(),
                    count: Some(count),
                },
            ),
            ApiError::Upstream => (
                StatusCode::BAD_GATEWAY,
                ErrorResponse {
                    error: "upstream_failure".to_string(),
                    message: "The design service is currently unavailable. Please retry shortly."
                        .to_string(),
                    count: None,
                },
            ),
            ApiError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    error: "internal_error".to_string(),
                    message: "Something went wrong on our side.".to_string(),
                    count: None,
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}
