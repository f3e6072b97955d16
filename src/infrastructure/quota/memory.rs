//! In-memory quota repository for development and single-instance use

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::domain::quota::{
    IdentityHash, MonthKey, MonthlyCounter, QuotaError, QuotaRepository, UsageRecord,
};

/// Keeps the ledger and counters in process memory behind the same trait as
/// the PostgreSQL store, so tests and local development need no database.
pub struct InMemoryQuotaRepository {
    usages: Arc<RwLock<Vec<UsageRecord>>>,
    counters: Arc<RwLock<HashMap<String, (i64, DateTime<Utc>)>>>,
}

impl InMemoryQuotaRepository {
    pub fn new() -> Self {
        Self {
            usages: Arc::new(RwLock::new(Vec::new())),
            counters: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryQuotaRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuotaRepository for InMemoryQuotaRepository {
    async fn find_usage(
        &self,
        identity: &IdentityHash,
        month: &MonthKey,
    ) -> Result<Option<UsageRecord>, QuotaError> {
        let usages = self.usages.read().await;
        Ok(usages
            .iter()
            .find(|u| &u.identity == identity && &u.month == month)
            .cloned())
    }

    async fn insert_usage(&self, record: &UsageRecord) -> Result<(), QuotaError> {
        let mut usages = self.usages.write().await;
        usages.push(record.clone());
        Ok(())
    }

    async fn count_usage(&self, month: &MonthKey) -> Result<i64, QuotaError> {
        let usages = self.usages.read().await;
        Ok(usages.iter().filter(|u| &u.month == month).count() as i64)
    }

    async fn get_counter(&self, month: &MonthKey) -> Result<Option<MonthlyCounter>, QuotaError> {
        let counters = self.counters.read().await;
        Ok(counters
            .get(month.as_str())
            .map(|(count, updated_at)| MonthlyCounter {
                month: month.clone(),
                count: *count,
                updated_at: *updated_at,
            }))
    }

    async fn increment_counter(&self, month: &MonthKey) -> Result<(), QuotaError> {
        let mut counters = self.counters.write().await;
        let entry = counters
            .entry(month.as_str().to_string())
            .or_insert((0, Utc::now()));
        entry.0 += 1;
        entry.1 = Utc::now();
        Ok(())
    }
}
