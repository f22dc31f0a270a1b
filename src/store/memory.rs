//! In-memory page store.
//!
//! Backs local runs with `STORE_BACKEND=memory` and the HTTP tests, which can
//! switch on failures to exercise the storage error paths.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;

use crate::error::StoreError;
use crate::page::Page;

use super::PageStore;

/// Configuration for in-memory store behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryStoreConfig {
    /// Whether lookups and pings fail.
    pub fail_reads: bool,
    /// Whether saves and deletes fail.
    pub fail_writes: bool,
}

/// Concurrent page map keyed by page name.
#[derive(Debug, Clone, Default)]
pub struct MemoryPageStore {
    pages: Arc<DashMap<String, Page>>,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
}

impl MemoryPageStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty store with custom failure behavior.
    pub fn with_config(config: MemoryStoreConfig) -> Self {
        let store = Self::new();
        store.set_fail_reads(config.fail_reads);
        store.set_fail_writes(config.fail_writes);
        store
    }

    /// Toggle read failures.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Toggle write failures.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Number of stored pages.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the store holds no pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    fn check_reads(&self) -> Result<(), StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("read failure injected".to_string()));
        }
        Ok(())
    }

    fn check_writes(&self) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("write failure injected".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl PageStore for MemoryPageStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Page>, StoreError> {
        self.check_reads()?;
        Ok(self.pages.get(name).map(|entry| entry.value().clone()))
    }

    async fn save(&self, page: &Page) -> Result<(), StoreError> {
        self.check_writes()?;
        self.pages.insert(page.page.clone(), page.clone());
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError> {
        self.check_writes()?;
        Ok(u64::from(self.pages.remove(name).is_some()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.check_reads()
    }
}
