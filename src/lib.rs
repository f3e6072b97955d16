//! Cardforge - AI-assisted payment-card design service
//!
//! # Modules
//!
//! - [`config`] — Strongly-typed configuration with TOML and environment variable support
//! - [`domain`] — Quota and design domain models, value objects, and seams
//! - [`application`] — The quota guard and the admission-guarded generation use case
//! - [`imaging`] — Pure background-removal routine for uploaded logos
//! - [`infrastructure`] — PostgreSQL quota store and the Gemini design provider
//! - [`presentation`] — axum controllers, models, middleware, and routing
//! - [`logging`] — Structured logging with tracing
//!
//! Environment variables use the `CARDFORGE__` prefix with double underscore
//! separators:
//!
//! ```bash
//! CARDFORGE__SERVER__PORT=3000
//! CARDFORGE__QUOTA__MONTHLY_CAP=1000
//! ```

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod imaging;
pub mod infrastructure;
pub mod logging;
pub mod presentation;

pub use app::create_app;
pub use config::Config;
pub use logging::init_tracing;
