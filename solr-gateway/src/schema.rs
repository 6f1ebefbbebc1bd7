//! In-memory cache of collection schemas.
//!
//! Keyed by collection name. Entries never expire: a collection's `cui`
//! type is looked up once and reused for the lifetime of the gateway.
//! Uses [`moka`] so a single gateway can be shared between tasks.

use moka::future::Cache;

use crate::error::SearchError;
use crate::http::SolrClient;
use crate::types::CollectionSchema;

/// Write-once-per-key memo of collection schemas.
#[derive(Clone)]
pub struct SchemaCache {
    entries: Cache<String, CollectionSchema>,
}

impl Default for SchemaCache {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder().build(),
        }
    }

    /// Cached schema for `collection`, if present.
    pub async fn get(&self, collection: &str) -> Option<CollectionSchema> {
        self.entries.get(collection).await
    }

    /// Store `schema` for `collection`, replacing any earlier entry.
    pub async fn insert(&self, collection: &str, schema: CollectionSchema) {
        self.entries.insert(collection.to_owned(), schema).await;
    }

    /// Fetch `collection`'s schema from Solr and store it, even if cached.
    ///
    /// # Errors
    ///
    /// Propagates any fetch or parse failure; the cache is left untouched.
    pub async fn refresh(
        &self,
        client: &SolrClient,
        collection: &str,
    ) -> Result<CollectionSchema, SearchError> {
        let schema = client.fetch_schema(collection).await?;
        tracing::debug!(
            collection,
            cui_type = %schema.identifier_field_type,
            "cached collection schema"
        );
        self.insert(collection, schema.clone()).await;
        Ok(schema)
    }

    /// Return the cached schema, fetching it first on a miss.
    ///
    /// # Errors
    ///
    /// Same as [`SchemaCache::refresh`].
    pub async fn ensure(
        &self,
        client: &SolrClient,
        collection: &str,
    ) -> Result<CollectionSchema, SearchError> {
        match self.get(collection).await {
            Some(schema) => Ok(schema),
            None => self.refresh(client, collection).await,
        }
    }
}
