//! Design provider trait

use async_trait::async_trait;

use super::document::CardDesign;
use super::error::GenerativeError;

/// Input to one design generation: the uploaded logo plus optional branding text.
#[derive(Debug, Clone)]
pub struct DesignBrief {
    /// Decoded logo image bytes (PNG or JPEG)
    pub logo: Vec<u8>,
    /// MIME type of the logo bytes
    pub logo_mime: String,
    /// Name to render on the card, if the caller supplied one
    pub display_name: Option<String>,
}

/// Core trait for generative design backends.
///
/// Object-safe; injected as `Arc<dyn DesignProvider>` so endpoints and tests
/// can substitute implementations.
#[async_trait]
pub trait DesignProvider: Send + Sync {
    /// Synthesize one card design from a brief.
    ///
    /// Implementations own their transport timeout; callers impose none.
    async fn generate_design(&self, brief: &DesignBrief) -> Result<CardDesign, GenerativeError>;
}
