//! Locale projection and merge-on-write over a [`PageStore`].
//!
//! Upsert is read, merge, then save. Two concurrent upserts to the same page
//! can both read the old record; the later save wins at record level and the
//! other request's keys are lost.

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{Result, ServiceError};
use crate::metrics::timer_store;
use crate::store::PageStore;

use super::types::{Page, Translations};

/// Business logic for fetching, merging and deleting pages.
#[derive(Debug, Clone)]
pub struct TranslationService {
    store: Arc<dyn PageStore>,
}

impl TranslationService {
    /// Create a service over the given store.
    pub fn new(store: Arc<dyn PageStore>) -> Self {
        Self { store }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<dyn PageStore> {
        &self.store
    }

    /// Key -> string view of a page for one locale.
    ///
    /// Every key of the page is present; keys lacking `locale`, or holding an
    /// empty string for it, carry the missing-translation placeholder.
    pub async fn fetch_for_locale(
        &self,
        page_name: &str,
        locale: &str,
    ) -> Result<BTreeMap<String, String>> {
        let page = {
            let _timer = timer_store("find");
            self.store.find_by_name(page_name).await?
        };
        let page = page.ok_or_else(|| {
            ServiceError::NotFound(format!("No translations found for page: {page_name}"))
        })?;

        debug!(page = page_name, locale, keys = page.translations.len(), "Fetched page");
        Ok(page.for_locale(locale))
    }

    /// Merge `incoming` into the named page, creating it if absent, and return the saved record.
    pub async fn upsert(&self, page_name: &str, incoming: Translations) -> Result<Page> {
        let existing = {
            let _timer = timer_store("find");
            self.store.find_by_name(page_name).await?
        };

        let page = match existing {
            Some(mut page) => {
                debug!(page = page_name, keys = incoming.len(), "Merging into existing page");
                page.apply(incoming);
                page
            }
            None => {
                info!(page = page_name, keys = incoming.len(), "Creating page");
                Page::new(page_name, incoming)
            }
        };

        {
            let _timer = timer_store("save");
            self.store.save(&page).await?;
        }
        Ok(page)
    }

    /// Delete the named page. Returns whether a record was removed.
    pub async fn delete(&self, page_name: &str) -> Result<bool> {
        let removed = {
            let _timer = timer_store("delete");
            self.store.delete_by_name(page_name).await?
        };
        if removed > 0 {
            info!(page = page_name, "Deleted page");
        }
        Ok(removed > 0)
    }
}
