//! SQLx implementation of the quota repository

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::sync::Arc;

use crate::domain::quota::{
    IdentityHash, MonthKey, MonthlyCounter, QuotaError, QuotaRepository, UsageRecord,
};

/// PostgreSQL-backed usage ledger and monthly counter store
pub struct SqlxQuotaRepository {
    pool: Arc<PgPool>,
}

impl SqlxQuotaRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn usage_from_row(row: &PgRow) -> Result<UsageRecord, sqlx::Error> {
    Ok(UsageRecord {
        id: row.try_get("id")?,
        identity: IdentityHash::from_stored(row.try_get("identity_hash")?),
        month: MonthKey::from_stored(row.try_get("month_key")?),
        created_at: row.try_get("created_at")?,
    })
}

#[async_trait]
impl QuotaRepository for SqlxQuotaRepository {
    async fn find_usage(
        &self,
        identity: &IdentityHash,
        month: &MonthKey,
    ) -> Result<Option<UsageRecord>, QuotaError> {
        let row = sqlx::query(
            r#"
            SELECT id, identity_hash, month_key, created_at
            FROM card_usages
            WHERE identity_hash = $1 AND month_key = $2
            LIMIT 1
            "#,
        )
        .bind(identity.as_str())
        .bind(month.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error finding usage record: {}", e);
            QuotaError::store(e.to_string())
        })?;

        match row {
            Some(row) => {
                let record = usage_from_row(&row).map_err(|e| {
                    tracing::error!("Database error decoding usage record: {}", e);
                    QuotaError::store(e.to_string())
                })?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    async fn insert_usage(&self, record: &UsageRecord) -> Result<(), QuotaError> {
        sqlx::query(
            r#"
            INSERT INTO card_usages (id, identity_hash, month_key, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(record.id)
        .bind(record.identity.as_str())
        .bind(record.month.as_str())
        .bind(record.created_at)
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error inserting usage record: {}", e);
            QuotaError::store(e.to_string())
        })?;

        Ok(())
    }

    async fn count_usage(&self, month: &MonthKey) -> Result<i64, QuotaError> {
        let count: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM card_usages WHERE month_key = $1"#)
                .bind(month.as_str())
                .fetch_one(&*self.pool)
                .await
                .map_err(|e| {
                    tracing::error!("Database error counting usage records: {}", e);
                    QuotaError::store(e.to_string())
                })?;

        Ok(count)
    }

    async fn get_counter(&self, month: &MonthKey) -> Result<Option<MonthlyCounter>, QuotaError> {
        let row = sqlx::query(
            r#"
            SELECT month_key, generation_count, updated_at
            FROM monthly_counters
            WHERE month_key = $1
            "#,
        )
        .bind(month.as_str())
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error reading monthly counter: {}", e);
            QuotaError::store(e.to_string())
        })?;

        match row {
            Some(row) => {
                let counter = (|| -> Result<MonthlyCounter, sqlx::Error> {
                    Ok(MonthlyCounter {
                        month: MonthKey::from_stored(row.try_get("month_key")?),
                        count: row.try_get("generation_count")?,
                        updated_at: row.try_get("updated_at")?,
                    })
                })()
                .map_err(|e| {
                    tracing::error!("Database error decoding monthly counter: {}", e);
                    QuotaError::store(e.to_string())
                })?;
                Ok(Some(counter))
            }
            None => Ok(None),
        }
    }

    async fn increment_counter(&self, month: &MonthKey) -> Result<(), QuotaError> {
        sqlx::query(
            r#"
            INSERT INTO monthly_counters (month_key, generation_count, updated_at)
            VALUES ($1, 1, now())
            ON CONFLICT (month_key) DO UPDATE
            SET generation_count = monthly_counters.generation_count + 1,
                updated_at = now()
            "#,
        )
        .bind(month.as_str())
        .execute(&*self.pool)
        .await
        .map_err(|e| {
            tracing::error!("Database error incrementing monthly counter: {}", e);
            QuotaError::store(e.to_string())
        })?;

        Ok(())
    }
}
