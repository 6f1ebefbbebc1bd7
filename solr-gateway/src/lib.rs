//! # solr-gateway
//!
//! Concept search over Solr, one collection per concept database.
//!
//! This crate turns free text into Solr queries, runs them against the
//! collection of each requested concept database, and merges the hits into
//! a single list. Retrieval and ranking stay in Solr; this crate only builds
//! queries and reshapes responses.
//!
//! ## Design
//!
//! - Collections are named `<concept db name>_id_<concept db id>`
//! - Each collection's `cui` field type is fetched once and cached
//! - Single-token queries may match the `cui` field; multi-token queries
//!   match names only
//! - Results are deduplicated by `cui` (first seen wins) and ordered by
//!   display name length
//! - Any collection error fails the whole search; there are no partial
//!   results
//!
//! ## Errors
//!
//! Upstream refusals are returned as [`GatewayResponse::ServerError`] so the
//! web layer can render a 500. Malformed Solr payloads, transport failures
//! and unknown concept databases are returned as [`SearchError`].

pub mod config;
pub mod directory;
pub mod error;
pub mod gateway;
pub mod http;
pub mod query;
pub mod response;
pub mod schema;
pub mod types;

pub use config::{DispatchMode, SolrConfig};
pub use directory::{ConceptDbDirectory, StaticDirectory};
pub use error::{Result, SearchError};
pub use gateway::SearchGateway;
pub use response::GatewayResponse;
pub use types::{AvailabilityResponse, ConceptDbId, ConceptMatch, Cui, SearchResponse};

/// Report which concept databases have a Solr collection.
///
/// Convenience wrapper that builds a one-off [`SearchGateway`]. Long-lived
/// callers should keep a gateway so the schema cache is reused.
///
/// # Errors
///
/// Same as [`SearchGateway::collections_available`], plus configuration
/// errors.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> solr_gateway::Result<()> {
/// use solr_gateway::{ConceptDbId, SolrConfig};
///
/// let resp = solr_gateway::collections_available(
///     &SolrConfig::default(),
///     &[ConceptDbId(5), ConceptDbId(9)],
/// )
/// .await?;
/// println!("{}", resp.status());
/// # Ok(())
/// # }
/// ```
pub async fn collections_available(
    config: &SolrConfig,
    ids: &[ConceptDbId],
) -> Result<GatewayResponse<AvailabilityResponse>> {
    let gateway = SearchGateway::new(config, StaticDirectory::new())?;
    gateway.collections_available(ids).await
}

/// Search the collections of `ids` for `query`.
///
/// Convenience wrapper that builds a one-off [`SearchGateway`].
///
/// # Errors
///
/// Same as [`SearchGateway::search_collection`], plus configuration errors.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> solr_gateway::Result<()> {
/// use solr_gateway::{ConceptDbId, SolrConfig, StaticDirectory};
///
/// let directory = StaticDirectory::new().with(1u64, "snomed");
/// let resp = solr_gateway::search_collection(
///     &SolrConfig::default(),
///     directory,
///     &[ConceptDbId(1)],
///     "heart attack",
/// )
/// .await?;
/// if let Some(body) = resp.ok() {
///     for hit in &body.results {
///         println!("{}: {}", hit.cui, hit.pretty_name);
///     }
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search_collection<D: ConceptDbDirectory>(
    config: &SolrConfig,
    directory: D,
    ids: &[ConceptDbId],
    query: &str,
) -> Result<GatewayResponse<SearchResponse>> {
    let gateway = SearchGateway::new(config, directory)?;
    gateway.search_collection(ids, query).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn availability_validates_config() {
        let config = SolrConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = collections_available(&config, &[ConceptDbId(1)]).await;
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn search_validates_config() {
        let config = SolrConfig {
            host: String::new(),
            ..Default::default()
        };
        let result = search_collection(&config, StaticDirectory::new(), &[], "fever").await;
        assert!(result.unwrap_err().to_string().contains("host"));
    }
}
