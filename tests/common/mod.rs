//! Shared fixtures for integration tests
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

use cardforge::application::generation::GenerateCardUseCase;
use cardforge::application::quota::QuotaGuard;
use cardforge::config::Config;
use cardforge::domain::design::{
    BackgroundKind, CardBackground, CardDesign, DesignBrief, DesignProvider, GenerativeError,
    LogoPlacement,
};
use cardforge::domain::quota::{
    IdentityHash, MonthKey, MonthlyCounter, QuotaError, QuotaRepository, UsageRecord,
};
use cardforge::infrastructure::quota::InMemoryQuotaRepository;
use cardforge::presentation::{AppState, create_router};

pub const TEST_CAP: i64 = 1000;

/// A fixed, schema-valid design for stub providers
pub fn sample_design() -> CardDesign {
    CardDesign {
        name: "Slate".to_string(),
        background: CardBackground {
            kind: BackgroundKind::Solid,
            colors: vec!["#202830".to_string()],
            angle_degrees: None,
        },
        text_color: "#F0F0F0".to_string(),
        accent_color: "#60A0D0".to_string(),
        logo_placement: LogoPlacement {
            x: 0.5,
            y: 0.2,
            scale: 0.25,
        },
        style_notes: None,
    }
}

/// Provider stub returning a fixed design, or a configured failure
pub struct StubDesignProvider {
    fail: AtomicBool,
}

impl StubDesignProvider {
    pub fn new() -> Self {
        Self {
            fail: AtomicBool::new(false),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: AtomicBool::new(true),
        }
    }
}

#[async_trait]
impl DesignProvider for StubDesignProvider {
    async fn generate_design(&self, _brief: &DesignBrief) -> Result<CardDesign, GenerativeError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(GenerativeError::ServiceUnavailable(
                "stub outage".to_string(),
            ))
        } else {
            Ok(sample_design())
        }
    }
}

/// Repository whose every operation fails, for fail-closed tests
pub struct FailingQuotaRepository;

#[async_trait]
impl QuotaRepository for FailingQuotaRepository {
    async fn find_usage(
        &self,
        _identity: &IdentityHash,
        _month: &MonthKey,
    ) -> Result<Option<UsageRecord>, QuotaError> {
        Err(QuotaError::store("connection refused"))
    }

    async fn insert_usage(&self, _record: &UsageRecord) -> Result<(), QuotaError> {
        Err(QuotaError::store("connection refused"))
    }

    async fn count_usage(&self, _month: &MonthKey) -> Result<i64, QuotaError> {
        Err(QuotaError::store("connection refused"))
    }

    async fn get_counter(&self, _month: &MonthKey) -> Result<Option<MonthlyCounter>, QuotaError> {
        Err(QuotaError::store("connection refused"))
    }

    async fn increment_counter(&self, _month: &MonthKey) -> Result<(), QuotaError> {
        Err(QuotaError::store("connection refused"))
    }
}

/// Delegating repository whose counter increments always fail, for
/// partial-write drift tests
pub struct BrokenCounterRepository {
    inner: InMemoryQuotaRepository,
}

impl BrokenCounterRepository {
    pub fn new() -> Self {
        Self {
            inner: InMemoryQuotaRepository::new(),
        }
    }
}

#[async_trait]
impl QuotaRepository for BrokenCounterRepository {
    async fn find_usage(
        &self,
        identity: &IdentityHash,
        month: &MonthKey,
    ) -> Result<Option<UsageRecord>, QuotaError> {
        self.inner.find_usage(identity, month).await
    }

    async fn insert_usage(&self, record: &UsageRecord) -> Result<(), QuotaError> {
        self.inner.insert_usage(record).await
    }

    async fn count_usage(&self, month: &MonthKey) -> Result<i64, QuotaError> {
        self.inner.count_usage(month).await
    }

    async fn get_counter(&self, month: &MonthKey) -> Result<Option<MonthlyCounter>, QuotaError> {
        self.inner.get_counter(month).await
    }

    async fn increment_counter(&self, _month: &MonthKey) -> Result<(), QuotaError> {
        Err(QuotaError::store("counter write failed"))
    }
}

/// Record `n` increments on the monthly counter
pub async fn seed_counter(repository: &dyn QuotaRepository, month: &MonthKey, n: i64) {
    for _ in 0..n {
        repository.increment_counter(month).await.unwrap();
    }
}

pub fn identity(addr: &str) -> IdentityHash {
    IdentityHash::from_raw(Some(addr))
}

/// Tiny white PNG with a colored center pixel
pub fn tiny_logo_png() -> Vec<u8> {
    let mut img = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));
    img.put_pixel(4, 4, Rgba([200, 30, 30, 255]));
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut out, ImageFormat::Png)
        .unwrap();
    out.into_inner()
}

/// Full application state over an in-memory store and a stub provider
pub fn test_state(
    repository: Arc<dyn QuotaRepository>,
    provider: Arc<dyn DesignProvider>,
) -> AppState {
    let config = Arc::new(Config::default());
    let quota_guard = Arc::new(QuotaGuard::new(repository, config.quota.monthly_cap));
    let generate_card_use_case = Arc::new(GenerateCardUseCase::new(
        quota_guard.clone(),
        provider,
        config.quota.low_quota_threshold,
    ));
    AppState {
        quota_guard,
        generate_card_use_case,
        config,
    }
}

/// Router over an in-memory store and a stub provider
pub fn test_router(
    repository: Arc<dyn QuotaRepository>,
    provider: Arc<dyn DesignProvider>,
) -> axum::Router {
    let state = test_state(repository, provider);
    let config = state.config.clone();
    create_router(state, config)
}
