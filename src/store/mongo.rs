//! MongoDB-backed page store.

use async_trait::async_trait;
use mongodb::bson::{doc, DateTime as BsonDateTime};
use mongodb::options::IndexOptions;
use mongodb::{Client, Collection, Database, IndexModel};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::page::{Page, Translations};

use super::PageStore;

/// Database used when neither the configuration nor the URI names one.
pub const DEFAULT_DATABASE: &str = "translations";

/// Stored shape of a page. `_id` is left to the server and ignored on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PageDocument {
    page: String,
    translations: Translations,
    #[serde(rename = "updatedAt")]
    updated_at: BsonDateTime,
}

impl From<&Page> for PageDocument {
    fn from(page: &Page) -> Self {
        let millis = page.updated_at.unix_timestamp_nanos() / 1_000_000;
        Self {
            page: page.page.clone(),
            translations: page.translations.clone(),
            updated_at: BsonDateTime::from_millis(millis as i64),
        }
    }
}

impl TryFrom<PageDocument> for Page {
    type Error = StoreError;

    fn try_from(document: PageDocument) -> Result<Self, Self::Error> {
        let nanos = i128::from(document.updated_at.timestamp_millis()) * 1_000_000;
        let updated_at = OffsetDateTime::from_unix_timestamp_nanos(nanos).map_err(|e| {
            StoreError::Corrupt(format!("page {}: updatedAt out of range: {}", document.page, e))
        })?;
        Ok(Page {
            page: document.page,
            translations: document.translations,
            updated_at,
        })
    }
}

/// Page store over a single MongoDB collection.
#[derive(Debug, Clone)]
pub struct MongoPageStore {
    database: Database,
    pages: Collection<PageDocument>,
}

impl MongoPageStore {
    /// Connect, select the database and collection, and ensure the unique `page` index.
    ///
    /// Database resolution: `database` if given, then the URI's default, then
    /// [`DEFAULT_DATABASE`].
    pub async fn connect(
        uri: &str,
        database: Option<&str>,
        collection: &str,
    ) -> Result<Self, StoreError> {
        let client = Client::with_uri_str(uri).await?;
        let database = match database {
            Some(name) => client.database(name),
            None => client
                .default_database()
                .unwrap_or_else(|| client.database(DEFAULT_DATABASE)),
        };
        info!(
            "Connected to MongoDB (database: {}, collection: {})",
            database.name(),
            collection
        );

        let store = Self {
            pages: database.collection(collection),
            database,
        };
        store.ensure_indexes().await?;
        Ok(store)
    }

    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "page": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.pages.create_index(index).await?;
        debug!("Unique index on page ensured");
        Ok(())
    }
}

#[async_trait]
impl PageStore for MongoPageStore {
    async fn find_by_name(&self, name: &str) -> Result<Option<Page>, StoreError> {
        self.pages
            .find_one(doc! { "page": name })
            .await?
            .map(Page::try_from)
            .transpose()
    }

    async fn save(&self, page: &Page) -> Result<(), StoreError> {
        let document = PageDocument::from(page);
        let result = self
            .pages
            .replace_one(doc! { "page": page.page.as_str() }, &document)
            .upsert(true)
            .await?;
        debug!(
            page = %page.page,
            matched = result.matched_count,
            inserted = result.upserted_id.is_some(),
            "Page saved"
        );
        Ok(())
    }

    async fn delete_by_name(&self, name: &str) -> Result<u64, StoreError> {
        let result = self.pages.delete_one(doc! { "page": name }).await?;
        Ok(result.deleted_count)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        self.database.run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
