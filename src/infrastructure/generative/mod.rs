//! Generative design provider implementations

pub mod gemini;
pub mod json_extract;

pub use gemini::GeminiDesignProvider;
