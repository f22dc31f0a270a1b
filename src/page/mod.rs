//! Pages of translations and the service that reads and merges them.

pub mod service;
pub mod types;

pub use service::TranslationService;
pub use types::{missing_translation, LocaleMap, Page, Translations};
