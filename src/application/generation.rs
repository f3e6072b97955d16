//! Card generation use case
//!
//! Owns the admission sequence around the external generative call: global
//! cap check, per-identity check, provider invocation, usage recording, and
//! the updated remaining-count readout. The checks and the recording form a
//! check-then-act sequence with a non-atomic gap while the provider call
//! runs; two racing requests from one identity can both pass the checks.
//! That race is accepted here rather than closed (see DESIGN.md).

use std::sync::Arc;

use thiserror::Error;

use crate::application::quota::QuotaGuard;
use crate::domain::design::{CardDesign, DesignBrief, DesignProvider, GenerativeError};
use crate::domain::quota::{IdentityHash, QuotaError};

/// Why a generation request did not produce a design
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Business rejection: the month's global budget is spent
    #[error("Monthly generation limit reached")]
    GlobalCapReached { count: i64 },

    /// Business rejection: this identity already generated this month
    #[error("This identity already used its monthly generation")]
    AlreadyUsed { count: i64 },

    /// Store fault during a check or the recording step; fail closed
    #[error(transparent)]
    Quota(#[from] QuotaError),

    /// Upstream generative service fault; nothing was recorded
    #[error(transparent)]
    Provider(#[from] GenerativeError),
}

/// Successful generation plus quota transparency data
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub design: CardDesign,
    pub remaining: i64,
    /// Present once the month's remaining budget is at or under the threshold
    pub warning: Option<String>,
}

/// Admission-guarded card generation.
pub struct GenerateCardUseCase {
    quota_guard: Arc<QuotaGuard>,
    provider: Arc<dyn DesignProvider>,
    low_quota_threshold: i64,
}

impl GenerateCardUseCase {
    pub fn new(
        quota_guard: Arc<QuotaGuard>,
        provider: Arc<dyn DesignProvider>,
        low_quota_threshold: i64,
    ) -> Self {
        Self {
            quota_guard,
            provider,
            low_quota_threshold,
        }
    }

    pub async fn execute(
        &self,
        identity: &IdentityHash,
        brief: DesignBrief,
    ) -> Result<GenerationOutcome, GenerationError> {
        let global = self.quota_guard.global_usage().await?;
        if global.reached {
            return Err(GenerationError::GlobalCapReached {
                count: global.count,
            });
        }

        if self.quota_guard.has_used_this_month(identity).await? {
            return Err(GenerationError::AlreadyUsed {
                count: global.count,
            });
        }

        let design = self.provider.generate_design(&brief).await?;

        // Only a successful generation consumes the credit.
        self.quota_guard.record_usage(identity).await?;

        let updated = self.quota_guard.global_usage().await?;
        let remaining = (self.quota_guard.monthly_cap() - updated.count).max(0);
        let warning = (remaining <= self.low_quota_threshold).then(|| {
            format!(
                "Only {} generations left this month; the counter resets on the 1st.",
                remaining
            )
        });

        Ok(GenerationOutcome {
            design,
            remaining,
            warning,
        })
    }
}
