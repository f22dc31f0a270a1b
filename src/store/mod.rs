//! Durable persistence of pages, keyed by page name.
//!
//! This module handles:
//! - The [`PageStore`] seam the translation service depends on
//! - MongoDB-backed storage
//! - A concurrent in-memory store for local runs and tests

pub mod memory;
pub mod mongo;

use std::fmt::Debug;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::{Config, StoreBackend};
use crate::error::{AppError, StoreError};
use crate::page::Page;

pub use memory::{MemoryPageStore, MemoryStoreConfig};
pub use mongo::MongoPageStore;

/// Page persistence operations.
///
/// Every call goes to the backing store; implementations keep no cache.
#[async_trait]
pub trait PageStore: Debug + Send + Sync {
    /// Look up a page by name.
    async fn find_by_name(&self, name: &str) -> Result<Option<Page>, StoreError>;

    /// Insert the page, or replace the whole record if the name exists.
    async fn save(&self, page: &Page) -> Result<(), StoreError>;

    /// Delete a page by name, returning how many records were removed (0 or 1).
    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError>;

    /// Check the store is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Build the store selected by `config`.
pub async fn connect(config: &Config) -> Result<Arc<dyn PageStore>, AppError> {
    match config.store_backend {
        StoreBackend::Memory => {
            info!("Using in-memory page store (data is not persisted)");
            Ok(Arc::new(MemoryPageStore::new()))
        }
        StoreBackend::Mongo => {
            let uri = config.mongodb_connect_uri.as_deref().ok_or_else(|| {
                AppError::InvalidConfig("MONGODB_CONNECT_URI is required".to_string())
            })?;
            let store = MongoPageStore::connect(
                uri,
                config.database_name(),
                &config.mongodb_collection,
            )
            .await?;
            Ok(Arc::new(store))
        }
    }
}
