//! Card design domain: the generative provider seam and its strict output schema

pub mod document;
pub mod error;
pub mod provider;

pub use document::{BackgroundKind, CardBackground, CardDesign, LogoPlacement};
pub use error::GenerativeError;
pub use provider::{DesignBrief, DesignProvider};
