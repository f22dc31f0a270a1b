//! Per-page, per-locale translation store served over HTTP.
//!
//! Clients store and fetch string translations grouped by page, and delete
//! pages. Each page holds a two-level map from translation key to locale to
//! string:
//!
//! ```text
//! home
//! ├── welcome   { en: "Welcome",    es: "Bienvenido" }
//! └── cta       { en: "Contact Us" }
//! ```
//!
//! Writes merge at locale granularity: updating `welcome.en` leaves
//! `welcome.es` and `cta` untouched.
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from environment
//! - [`error`]: Unified error types
//! - [`page`]: Page model and translation service
//! - [`store`]: Page store trait, MongoDB and in-memory stores
//! - [`api`]: HTTP API for translations, health and metrics
//! - [`metrics`]: Prometheus metrics
//! - [`utils`]: Utility functions

pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod page;
pub mod store;
pub mod utils;

pub use config::Config;
pub use error::{Result, ServiceError};
