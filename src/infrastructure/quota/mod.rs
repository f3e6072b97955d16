//! Quota repository implementations

pub mod memory;
pub mod sqlx_repository;

pub use memory::InMemoryQuotaRepository;
pub use sqlx_repository::SqlxQuotaRepository;
