//! HTTP API module for the translation, health, and metrics endpoints.

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, MessageResponse};
pub use handlers::AppState;
pub use routes::{cors_layer, create_router};
