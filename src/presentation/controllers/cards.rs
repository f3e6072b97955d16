//! Card generation and quota status controllers

use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use image::ImageFormat;

use crate::application::quota::QuotaGuard;
use crate::domain::design::DesignBrief;
use crate::presentation::controllers::AppState;
use crate::presentation::errors::ApiError;
use crate::presentation::middleware::client_address;
use crate::presentation::models::{
    ErrorResponse, GenerateCardRequest, GenerateCardResponse, QuotaStatusResponse,
};

const MAX_DISPLAY_NAME_CHARS: usize = 64;

/// Decode and validate the uploaded logo before any quota consultation.
fn validate_logo(encoded: &str, max_bytes: usize) -> Result<(Vec<u8>, &'static str), ApiError> {
    let logo = BASE64
        .decode(encoded.as_bytes())
        .map_err(|_| ApiError::Validation("logo must be base64-encoded image data".to_string()))?;

    if logo.len() > max_bytes {
        return Err(ApiError::Validation(format!(
            "logo exceeds the {} byte limit",
            max_bytes
        )));
    }

    let mime = match image::guess_format(&logo) {
        Ok(ImageFormat::Png) => "image/png",
        Ok(ImageFormat::Jpeg) => "image/jpeg",
        _ => {
            return Err(ApiError::Validation(
                "logo must be a PNG or JPEG image".to_string(),
            ));
        }
    };

    // Reject images that pass the magic-byte check but fail to decode
    image::load_from_memory(&logo)
        .map_err(|_| ApiError::Validation("logo image failed to decode".to_string()))?;

    Ok((logo, mime))
}

/// POST /api/v1/cards/generate - Generate a card design from a logo
#[utoipa::path(
    post,
    path = "/api/v1/cards/generate",
    request_body = GenerateCardRequest,
    responses(
        (status = 200, description = "Design generated", body = GenerateCardResponse),
        (status = 400, description = "Malformed or oversized logo", body = ErrorResponse),
        (status = 429, description = "Global cap reached or identity already used", body = ErrorResponse),
        (status = 502, description = "Design service unavailable", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "cards"
)]
pub async fn generate_card(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<GenerateCardRequest>,
) -> Result<Json<GenerateCardResponse>, ApiError> {
    let (logo, mime) = validate_logo(&request.logo, state.config.quota.max_logo_bytes)?;

    if let Some(name) = &request.display_name {
        if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
            return Err(ApiError::Validation(format!(
                "display_name exceeds {} characters",
                MAX_DISPLAY_NAME_CHARS
            )));
        }
    }

    let identity = QuotaGuard::hash_identity(client_address(&headers).as_deref());

    let brief = DesignBrief {
        logo,
        logo_mime: mime.to_string(),
        display_name: request.display_name,
    };

    let outcome = state
        .generate_card_use_case
        .execute(&identity, brief)
        .await?;

    Ok(Json(GenerateCardResponse {
        design: outcome.design.into(),
        remaining: outcome.remaining,
        warning: outcome.warning,
    }))
}

/// GET /api/v1/cards/status - Read-only quota status for the calling identity
#[utoipa::path(
    get,
    path = "/api/v1/cards/status",
    responses(
        (status = 200, description = "Current quota status", body = QuotaStatusResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "cards"
)]
pub async fn quota_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<QuotaStatusResponse>, ApiError> {
    let identity = QuotaGuard::hash_identity(client_address(&headers).as_deref());

    let status = state.quota_guard.status(&identity).await.map_err(|e| {
        tracing::error!("Quota store failure during status check: {}", e);
        ApiError::Internal
    })?;

    Ok(Json(status.into()))
}
