//! Application setup and wiring

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use sqlx::postgres::PgPoolOptions;

use crate::application::generation::GenerateCardUseCase;
use crate::application::quota::QuotaGuard;
use crate::config::Config;
use crate::domain::design::DesignProvider;
use crate::domain::quota::QuotaRepository;
use crate::infrastructure::generative::GeminiDesignProvider;
use crate::infrastructure::quota::SqlxQuotaRepository;
use crate::presentation::{AppState, create_router};

/// Build the application router with all collaborators wired up.
pub async fn create_app(config: Config) -> Result<Router, anyhow::Error> {
    let config = Arc::new(config);

    let mut pool_options = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(Duration::from_secs(config.database.connect_timeout_seconds));
    if let Some(idle) = config.database.idle_timeout_seconds {
        pool_options = pool_options.idle_timeout(Duration::from_secs(idle));
    }

    let pool = pool_options.connect(&config.database.url).await?;

    if config.database.run_migrations {
        sqlx::migrate!("./migrations").run(&pool).await?;
        tracing::info!("Database migrations applied");
    }

    let repository: Arc<dyn QuotaRepository> = Arc::new(SqlxQuotaRepository::new(Arc::new(pool)));
    let quota_guard = Arc::new(QuotaGuard::new(repository, config.quota.monthly_cap));

    let provider: Arc<dyn DesignProvider> =
        Arc::new(GeminiDesignProvider::new(config.generative.clone()));
    let generate_card_use_case = Arc::new(GenerateCardUseCase::new(
        quota_guard.clone(),
        provider,
        config.quota.low_quota_threshold,
    ));

    let state = AppState {
        quota_guard,
        generate_card_use_case,
        config: config.clone(),
    };

    Ok(create_router(state, config))
}
