//! Quota guard service
//!
//! Gates the metered generation resource with two independent limits: one
//! credit per identity per calendar month, and a global monthly cap. Owns no
//! in-memory state; every check re-reads the store through the injected
//! repository.

use std::sync::Arc;

use crate::domain::quota::{IdentityHash, MonthKey, QuotaError, QuotaRepository, UsageRecord};

/// Aggregate view of the current month's consumption against the global cap
#[derive(Debug, Clone, Copy)]
pub struct GlobalUsage {
    pub reached: bool,
    pub count: i64,
}

/// Read-only admission status for one identity
#[derive(Debug, Clone, Copy)]
pub struct QuotaStatus {
    pub can_generate: bool,
    pub already_used: bool,
    pub count: i64,
    pub cap: i64,
    pub remaining: i64,
}

/// Stateless guard over the usage ledger and monthly counter.
pub struct QuotaGuard {
    repository: Arc<dyn QuotaRepository>,
    monthly_cap: i64,
}

impl QuotaGuard {
    pub fn new(repository: Arc<dyn QuotaRepository>, monthly_cap: i64) -> Self {
        Self {
            repository,
            monthly_cap,
        }
    }

    pub fn monthly_cap(&self) -> i64 {
        self.monthly_cap
    }

    /// Derive the persisted identity token for a caller-supplied address.
    pub fn hash_identity(raw_address: Option<&str>) -> IdentityHash {
        IdentityHash::from_raw(raw_address)
    }

    /// Whether the identity has already consumed its credit this month.
    ///
    /// Store errors propagate; they are never collapsed into `false`.
    pub async fn has_used_this_month(&self, identity: &IdentityHash) -> Result<bool, QuotaError> {
        let month = MonthKey::current();
        let existing = self.repository.find_usage(identity, &month).await?;
        Ok(existing.is_some())
    }

    /// Current month's global consumption against the cap.
    ///
    /// Prefers the counter aggregate; when it has not been materialized yet,
    /// falls back to counting ledger rows. A fresh month with no data at all
    /// reports zero.
    pub async fn global_usage(&self) -> Result<GlobalUsage, QuotaError> {
        let month = MonthKey::current();

        let count = match self.repository.get_counter(&month).await? {
            Some(counter) => counter.count,
            None => self.repository.count_usage(&month).await?,
        };

        Ok(GlobalUsage {
            reached: count >= self.monthly_cap,
            count,
        })
    }

    /// Record one consumed credit: ledger insert, then counter increment.
    ///
    /// The two writes are deliberately separate and non-atomic. An insert
    /// failure propagates. An increment failure after a successful insert is
    /// logged and swallowed: the generation already succeeded for the user,
    /// and the counter can be reconciled against the ledger later.
    pub async fn record_usage(&self, identity: &IdentityHash) -> Result<(), QuotaError> {
        let month = MonthKey::current();
        let record = UsageRecord::new(identity.clone(), month.clone());

        self.repository.insert_usage(&record).await?;

        if let Err(e) = self.repository.increment_counter(&month).await {
            tracing::error!(
                month = %month,
                usage_id = %record.id,
                "Monthly counter increment failed after ledger insert; counter now lags the ledger: {}",
                e
            );
        }

        Ok(())
    }

    /// Both admission checks, taking no action.
    pub async fn status(&self, identity: &IdentityHash) -> Result<QuotaStatus, QuotaError> {
        let global = self.global_usage().await?;
        let already_used = self.has_used_this_month(identity).await?;

        Ok(QuotaStatus {
            can_generate: !global.reached && !already_used,
            already_used,
            count: global.count,
            cap: self.monthly_cap,
            remaining: (self.monthly_cap - global.count).max(0),
        })
    }
}
