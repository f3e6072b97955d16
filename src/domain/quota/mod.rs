//! Quota domain: usage ledger, monthly counters, and the persistence seam

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod value_objects;

pub use entities::{MonthlyCounter, UsageRecord};
pub use errors::QuotaError;
pub use repositories::QuotaRepository;
pub use value_objects::{IdentityHash, MonthKey};
