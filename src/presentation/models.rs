//! API request and response models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::quota::QuotaStatus;
use crate::domain::design::{BackgroundKind, CardDesign};

/// Request model for card design generation
#[derive(Deserialize, ToSchema)]
pub struct GenerateCardRequest {
    /// Base64-encoded logo image (PNG or JPEG)
    #[schema(example = "iVBORw0KGgoAAAANSUhEUg...")]
    pub logo: String,

    /// Optional cardholder display name rendered on the card
    #[schema(example = "Ada Lovelace")]
    pub display_name: Option<String>,
}

/// Background fill of a generated design
#[derive(Serialize, ToSchema)]
pub struct CardBackgroundDto {
    /// One of `solid`, `linear_gradient`, `radial_gradient`
    #[schema(example = "linear_gradient")]
    pub kind: String,
    /// Hex colors, one for solid fills, two or more for gradients
    #[schema(example = json!(["#101020", "#3040A0"]))]
    pub colors: Vec<String>,
    pub angle_degrees: Option<f32>,
}

/// Logo placement in fractional card coordinates
#[derive(Serialize, ToSchema)]
pub struct LogoPlacementDto {
    pub x: f32,
    pub y: f32,
    pub scale: f32,
}

/// A generated card design
#[derive(Serialize, ToSchema)]
pub struct CardDesignDto {
    #[schema(example = "Midnight")]
    pub name: String,
    pub background: CardBackgroundDto,
    #[schema(example = "#FFFFFF")]
    pub text_color: String,
    #[schema(example = "#D0A040")]
    pub accent_color: String,
    pub logo_placement: LogoPlacementDto,
    pub style_notes: Option<String>,
}

impl From<CardDesign> for CardDesignDto {
    fn from(design: CardDesign) -> Self {
        let kind = match design.background.kind {
            BackgroundKind::Solid => "solid",
            BackgroundKind::LinearGradient => "linear_gradient",
            BackgroundKind::RadialGradient => "radial_gradient",
        };
        Self {
            name: design.name,
            background: CardBackgroundDto {
                kind: kind.to_string(),
                colors: design.background.colors,
                angle_degrees: design.background.angle_degrees,
            },
            text_color: design.text_color,
            accent_color: design.accent_color,
            logo_placement: LogoPlacementDto {
                x: design.logo_placement.x,
                y: design.logo_placement.y,
                scale: design.logo_placement.scale,
            },
            style_notes: design.style_notes,
        }
    }
}

/// Response model for a successful generation
#[derive(Serialize, ToSchema)]
pub struct GenerateCardResponse {
    pub design: CardDesignDto,
    /// Generations left under the global monthly cap
    #[schema(example = 999)]
    pub remaining: i64,
    /// Present once the month's remaining budget runs low
    pub warning: Option<String>,
}

/// Response model for the read-only quota status check
#[derive(Serialize, ToSchema)]
pub struct QuotaStatusResponse {
    pub can_generate: bool,
    pub already_used: bool,
    /// Successful generations recorded this month
    pub count: i64,
    /// Global monthly cap
    #[schema(example = 1000)]
    pub cap: i64,
    pub remaining: i64,
}

impl From<QuotaStatus> for QuotaStatusResponse {
    fn from(status: QuotaStatus) -> Self {
        Self {
            can_generate: status.can_generate,
            already_used: status.already_used,
            count: status.count,
            cap: status.cap,
            remaining: status.remaining,
        }
    }
}

/// Query parameters for background removal
#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RemovalParams {
    /// Fraction of the color space treated as background, in [0, 0.5]
    pub tolerance: Option<f32>,
    /// Fraction of the color space forming the soft edge, in [0, 0.5]
    pub fade: Option<f32>,
    /// Only remove background reachable from the image border
    pub keep_internal: Option<bool>,
}

/// Error response model
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error code
    #[schema(example = "already_used")]
    pub error: String,
    /// Human-readable explanation
    pub message: String,
    /// Current global generation count, present on quota rejections
    pub count: Option<i64>,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}
