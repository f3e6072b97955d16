//! Route definitions and router assembly

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::Config;
use crate::presentation::controllers::{
    AppState,
    cards::{generate_card, quota_status},
    health::health_check,
    imaging::remove_logo_background,
};
use crate::presentation::middleware::logging_middleware;
use crate::presentation::models::*;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::controllers::cards::generate_card,
        crate::presentation::controllers::cards::quota_status,
        crate::presentation::controllers::imaging::remove_logo_background,
        crate::presentation::controllers::health::health_check
    ),
    components(
        schemas(
            GenerateCardRequest,
            GenerateCardResponse,
            CardDesignDto,
            CardBackgroundDto,
            LogoPlacementDto,
            QuotaStatusResponse,
            ErrorResponse,
            HealthResponse
        )
    ),
    tags(
        (name = "cards", description = "Quota-guarded card design generation"),
        (name = "imaging", description = "Logo background removal"),
        (name = "health", description = "Service health monitoring")
    ),
    info(
        title = "Cardforge API",
        version = "0.1.0",
        description = "Generates payment-card visual designs from uploaded logos via a multimodal model, limited to one free generation per caller per month under a global monthly cap."
    )
)]
pub struct ApiDoc;

/// Create the application router with the full middleware stack
pub fn create_router(state: AppState, config: Arc<Config>) -> Router {
    // The external model call can run for many seconds, so generation gets
    // its own timeout instead of the global one.
    let generation_routes = Router::new()
        .route("/cards/generate", post(generate_card))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.generation_timeout_seconds,
        )));

    let api_routes = Router::new()
        .route("/cards/status", get(quota_status))
        .route("/logo/remove-background", post(remove_logo_background))
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_seconds,
        )))
        .merge(generation_routes)
        // Raw uploads plus base64 inflation need headroom over the logo cap
        .layer(axum::extract::DefaultBodyLimit::max(
            config.quota.max_logo_bytes * 2,
        ));

    async fn root_handler() -> Response {
        axum::Json(serde_json::json!({
            "name": "Cardforge API",
            "version": env!("CARGO_PKG_VERSION"),
            "endpoints": {
                "health": "/health",
                "api": "/api/v1",
                "docs": "/docs"
            }
        }))
        .into_response()
    }

    let cors_layer = build_cors_layer(&config);

    let mut router = Router::new()
        .nest("/api/v1", api_routes)
        .route("/", get(root_handler))
        .route("/health", get(health_check));

    // Avoid leaking interactive docs in hardened production setups.
    if config.server.enable_docs {
        router =
            router.merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    }

    let service_builder = ServiceBuilder::new()
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .layer(middleware::from_fn(logging_middleware));

    router.layer(service_builder).with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    let origins = &config.server.allowed_origins;

    if origins.len() == 1 && origins[0] == "*" {
        tracing::warn!(
            "CORS: using wildcard origin (*) - restrict allowed_origins for production"
        );
        CorsLayer::new()
            .allow_origin(tower_http::cors::AllowOrigin::any())
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    } else {
        let origins: Vec<axum::http::HeaderValue> = origins
            .iter()
            .filter_map(|origin| {
                axum::http::HeaderValue::from_str(origin)
                    .map_err(|_| {
                        tracing::warn!(origin, "Invalid CORS origin in config; skipping");
                    })
                    .ok()
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([axum::http::Method::GET, axum::http::Method::POST])
            .allow_headers([axum::http::header::CONTENT_TYPE, axum::http::header::ACCEPT])
            .max_age(Duration::from_secs(3600))
    }
}
