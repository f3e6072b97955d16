//! HTTP request handlers

pub mod cards;
pub mod health;
pub mod imaging;

use std::sync::Arc;

use crate::application::generation::GenerateCardUseCase;
use crate::application::quota::QuotaGuard;
use crate::config::Config;

/// Shared state injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub quota_guard: Arc<QuotaGuard>,
    pub generate_card_use_case: Arc<GenerateCardUseCase>,
    pub config: Arc<Config>,
}
