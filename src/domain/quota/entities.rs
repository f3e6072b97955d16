//! Quota domain entities

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::value_objects::{IdentityHash, MonthKey};

/// One identity's consumption of one generation credit in one calendar month.
///
/// Created once per successful generation; never updated or deleted.
#[derive(Debug, Clone)]
pub struct UsageRecord {
    pub id: Uuid,
    pub identity: IdentityHash,
    pub month: MonthKey,
    pub created_at: DateTime<Utc>,
}

impl UsageRecord {
    pub fn new(identity: IdentityHash, month: MonthKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
            month,
            created_at: Utc::now(),
        }
    }
}

/// Running count of all successful generations in one calendar month.
///
/// Created lazily on a month's first recorded usage. Must equal the number of
/// usage records for its month unless a concurrent writer raced past the
/// admission check or a counter increment was lost after a ledger insert.
#[derive(Debug, Clone)]
pub struct MonthlyCounter {
    pub month: MonthKey,
    pub count: i64,
    pub updated_at: DateTime<Utc>,
}
