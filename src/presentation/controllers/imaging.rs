//! Logo background removal controller
//!
//! Serves the same pure routine the card editor uses; never touches the
//! quota store.

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};

use crate::imaging::{RemovalOptions, remove_background};
use crate::presentation::controllers::AppState;
use crate::presentation::errors::ApiError;
use crate::presentation::models::{ErrorResponse, RemovalParams};

/// POST /api/v1/logo/remove-background - Strip a solid background from a logo
#[utoipa::path(
    post,
    path = "/api/v1/logo/remove-background",
    params(RemovalParams),
    request_body(content = Vec<u8>, content_type = "application/octet-stream", description = "Encoded image bytes"),
    responses(
        (status = 200, description = "Processed image", body = Vec<u8>, content_type = "image/png"),
        (status = 400, description = "Undecodable or oversized image", body = ErrorResponse)
    ),
    tag = "imaging"
)]
pub async fn remove_logo_background(
    State(state): State<AppState>,
    Query(params): Query<RemovalParams>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let max_bytes = state.config.quota.max_logo_bytes;
    if body.len() > max_bytes {
        return Err(ApiError::Validation(format!(
            "image exceeds the {} byte limit",
            max_bytes
        )));
    }

    let defaults = RemovalOptions::default();
    let options = RemovalOptions {
        tolerance: params.tolerance.unwrap_or(defaults.tolerance),
        fade: params.fade.unwrap_or(defaults.fade),
        keep_internal: params.keep_internal.unwrap_or(defaults.keep_internal),
        fade_exponent: defaults.fade_exponent,
    };

    match remove_background(&body, &options) {
        Some(png) => Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response()),
        None => Err(ApiError::Validation(
            "image failed to decode".to_string(),
        )),
    }
}
