//! The search gateway: collection availability and multi-collection search.
//!
//! [`SearchGateway`] resolves concept database ids to Solr collections,
//! translates the user's text into a Solr query per collection, and merges
//! the per-collection hits into a single deduplicated, length-ordered list.

pub mod merge;

use std::collections::HashSet;

use crate::config::{DispatchMode, SolrConfig};
use crate::directory::ConceptDbDirectory;
use crate::error::SearchError;
use crate::http::{CollectionList, SelectOutcome, SolrClient, SolrDoc};
use crate::query::ConceptQuery;
use crate::response::{index_unavailable_message, GatewayResponse, COLLECTION_LIST_FAILED};
use crate::schema::SchemaCache;
use crate::types::{
    collection_id_suffix, AvailabilityResponse, CollectionSchema, ConceptDbId, SearchResponse,
};

use merge::ResultMerger;

/// Why a per-collection query stopped the whole dispatch.
enum Abort {
    /// Solr reported an error for this collection.
    IndexUnavailable(String),
    Failed(SearchError),
}

impl From<SearchError> for Abort {
    fn from(err: SearchError) -> Self {
        Self::Failed(err)
    }
}

/// Query translation and aggregation layer over a Solr instance.
pub struct SearchGateway<D> {
    client: SolrClient,
    schemas: SchemaCache,
    directory: D,
    dispatch: DispatchMode,
}

impl<D: ConceptDbDirectory> SearchGateway<D> {
    /// Build a gateway for the Solr instance in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if the configuration is invalid and
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SolrConfig, directory: D) -> Result<Self, SearchError> {
        config.validate()?;
        Ok(Self {
            client: SolrClient::new(config)?,
            schemas: SchemaCache::new(),
            directory,
            dispatch: config.dispatch,
        })
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// Schema cached for `collection`, if it has been loaded.
    pub async fn cached_schema(&self, collection: &str) -> Option<CollectionSchema> {
        self.schemas.get(collection).await
    }

    /// Report which of `ids` have a Solr collection.
    ///
    /// Every listed collection has its schema (re)loaded into the cache
    /// along the way.
    ///
    /// # Errors
    ///
    /// Transport failures, malformed bodies and schema fetch failures are
    /// returned as errors. A non-success status on the collection list is a
    /// [`GatewayResponse::ServerError`].
    pub async fn collections_available(
        &self,
        ids: &[ConceptDbId],
    ) -> Result<GatewayResponse<AvailabilityResponse>, SearchError> {
        let collections = match self.client.list_collections().await? {
            CollectionList::Listed(collections) => collections,
            CollectionList::Unavailable(status) => {
                tracing::warn!(status, "solr collection list request failed");
                return Ok(GatewayResponse::ServerError(COLLECTION_LIST_FAILED.into()));
            }
        };

        for collection in &collections {
            self.schemas.refresh(&self.client, collection).await?;
        }

        let present: HashSet<&str> = collections
            .iter()
            .map(|c| collection_id_suffix(c))
            .collect();
        let results = ids
            .iter()
            .map(|id| (*id, present.contains(id.to_string().as_str())))
            .collect();

        Ok(GatewayResponse::Ok(AvailabilityResponse { results }))
    }

    /// Search the collections for `ids` with free text `query`.
    ///
    /// An empty query or id list answers `{"results": []}` without
    /// contacting Solr. If any collection reports an error the whole call
    /// answers with a [`GatewayResponse::ServerError`] naming it, and
    /// results gathered so far are discarded.
    ///
    /// # Errors
    ///
    /// Unknown concept databases, transport failures, malformed Solr
    /// bodies and schema fetch failures are returned as errors.
    pub async fn search_collection(
        &self,
        ids: &[ConceptDbId],
        query: &str,
    ) -> Result<GatewayResponse<SearchResponse>, SearchError> {
        let Some(query) = ConceptQuery::parse(query) else {
            return Ok(GatewayResponse::Ok(SearchResponse::default()));
        };
        if ids.is_empty() {
            return Ok(GatewayResponse::Ok(SearchResponse::default()));
        }

        let per_collection = match self.dispatch {
            DispatchMode::Sequential => self.dispatch_sequential(ids, &query).await,
            DispatchMode::Concurrent => self.dispatch_concurrent(ids, &query).await,
        };

        let per_collection = match per_collection {
            Ok(docs) => docs,
            Err(Abort::IndexUnavailable(collection)) => {
                tracing::warn!(%collection, "solr reported an error, aborting search");
                return Ok(GatewayResponse::ServerError(index_unavailable_message(
                    &collection,
                )));
            }
            Err(Abort::Failed(err)) => return Err(err),
        };

        let mut merger = ResultMerger::new();
        for docs in &per_collection {
            merger.extend(docs)?;
        }
        tracing::debug!(unique = merger.len(), "merged concept search results");

        Ok(GatewayResponse::Ok(SearchResponse {
            results: merger.into_sorted(),
        }))
    }

    async fn dispatch_sequential(
        &self,
        ids: &[ConceptDbId],
        query: &ConceptQuery,
    ) -> Result<Vec<Vec<SolrDoc>>, Abort> {
        let mut per_collection = Vec::with_capacity(ids.len());
        for id in ids {
            per_collection.push(self.query_collection(*id, query).await?);
        }
        Ok(per_collection)
    }

    /// Fan out to every collection; the first failure drops the others.
    async fn dispatch_concurrent(
        &self,
        ids: &[ConceptDbId],
        query: &ConceptQuery,
    ) -> Result<Vec<Vec<SolrDoc>>, Abort> {
        let futures = ids.iter().map(|id| self.query_collection(*id, query));
        futures::future::try_join_all(futures).await
    }

    async fn query_collection(
        &self,
        id: ConceptDbId,
        query: &ConceptQuery,
    ) -> Result<Vec<SolrDoc>, Abort> {
        let collection = self.directory.collection_for(id).await?;
        let schema = self.schemas.ensure(&self.client, &collection).await?;
        let q = query.to_solr(&schema);

        match self.client.select(&collection, &q).await? {
            SelectOutcome::Docs(docs) => {
                tracing::debug!(%collection, count = docs.len(), "collection returned documents");
                Ok(docs)
            }
            SelectOutcome::IndexError => Err(Abort::IndexUnavailable(collection)),
        }
    }
}
