//! Use cases and application services

pub mod generation;
pub mod quota;

pub use generation::{GenerateCardUseCase, GenerationError, GenerationOutcome};
pub use quota::{GlobalUsage, QuotaGuard, QuotaStatus};
