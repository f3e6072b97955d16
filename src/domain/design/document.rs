//! Generated card design document
//!
//! The generative model returns free-form text; whatever structured payload is
//! recovered from it must satisfy this schema exactly. Anything else is an
//! upstream contract violation, not a parse error to bubble up raw.

use serde::{Deserialize, Serialize};

/// Background fill of a card face
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackgroundKind {
    Solid,
    LinearGradient,
    RadialGradient,
}

/// Card background specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardBackground {
    pub kind: BackgroundKind,
    /// One color for solid fills, two or more for gradients, as `#RRGGBB`
    pub colors: Vec<String>,
    /// Gradient direction in degrees; meaningless for solid fills
    pub angle_degrees: Option<f32>,
}

/// Logo placement in fractional card coordinates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoPlacement {
    /// Horizontal position of the logo center, 0.0 = left edge, 1.0 = right edge
    pub x: f32,
    /// Vertical position of the logo center, 0.0 = top edge, 1.0 = bottom edge
    pub y: f32,
    /// Logo width as a fraction of card width
    pub scale: f32,
}

/// A complete generated card design
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDesign {
    /// Short human-readable name for the design
    pub name: String,
    pub background: CardBackground,
    /// Primary text color as `#RRGGBB`
    pub text_color: String,
    /// Accent color for chip/network marks as `#RRGGBB`
    pub accent_color: String,
    pub logo_placement: LogoPlacement,
    /// Free-text styling notes from the model, if any
    #[serde(default)]
    pub style_notes: Option<String>,
}

impl CardDesign {
    /// Check every field against the schema's constraints.
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("design name is empty".to_string());
        }

        let required_colors = match self.background.kind {
            BackgroundKind::Solid => 1,
            BackgroundKind::LinearGradient | BackgroundKind::RadialGradient => 2,
        };
        if self.background.colors.len() < required_colors {
            return Err(format!(
                "background kind requires at least {} color(s), got {}",
                required_colors,
                self.background.colors.len()
            ));
        }

        for color in self
            .background
            .colors
            .iter()
            .chain([&self.text_color, &self.accent_color])
        {
            if !is_hex_color(color) {
                return Err(format!("invalid hex color: {}", color));
            }
        }

        let placement = &self.logo_placement;
        for (label, value) in [("x", placement.x), ("y", placement.y)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("logo_placement.{} out of range: {}", label, value));
            }
        }
        if !(0.0..=1.0).contains(&placement.scale) || placement.scale == 0.0 {
            return Err(format!(
                "logo_placement.scale out of range: {}",
                placement.scale
            ));
        }

        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}
