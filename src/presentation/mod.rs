//! HTTP API: controllers, models, middleware, and routing

pub mod controllers;
pub mod errors;
pub mod middleware;
pub mod models;
pub mod routes;

pub use controllers::AppState;
pub use routes::create_router;
