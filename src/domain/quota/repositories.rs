//! Quota repository trait

use async_trait::async_trait;

use super::entities::{MonthlyCounter, UsageRecord};
use super::errors::QuotaError;
use super::value_objects::{IdentityHash, MonthKey};

/// Persistence seam for the usage ledger and monthly counters.
///
/// Implementations must not swallow store failures; every error surfaces as
/// `QuotaError::Store` so admission can fail closed.
#[async_trait]
pub trait QuotaRepository: Send + Sync {
    /// Find one usage record for (identity, month), if any exists.
    async fn find_usage(
        &self,
        identity: &IdentityHash,
        month: &MonthKey,
    ) -> Result<Option<UsageRecord>, QuotaError>;

    /// Append one usage record to the ledger.
    async fn insert_usage(&self, record: &UsageRecord) -> Result<(), QuotaError>;

    /// Count all ledger rows for a month (fallback when the counter is absent).
    async fn count_usage(&self, month: &MonthKey) -> Result<i64, QuotaError>;

    /// Read the monthly counter aggregate, if it has been materialized.
    async fn get_counter(&self, month: &MonthKey) -> Result<Option<MonthlyCounter>, QuotaError>;

    /// Increment the monthly counter, creating it at 1 if absent.
    async fn increment_counter(&self, month: &MonthKey) -> Result<(), QuotaError>;
}
