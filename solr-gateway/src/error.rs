//! Error types for the solr-gateway crate.
//!
//! These cover failures the gateway cannot turn into a server-error
//! response: transport problems, malformed Solr payloads, bad
//! configuration and unknown concept databases.

use crate::types::ConceptDbId;

/// Errors that abort a gateway call.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to Solr failed, or the client could not be built.
    #[error("HTTP error: {0}")]
    Http(String),

    /// A Solr response was not valid JSON or lacked an expected field.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid gateway configuration.
    #[error("config error: {0}")]
    Config(String),

    /// The concept database directory has no entry for this id.
    #[error("unknown concept database: {0}")]
    UnknownConceptDb(ConceptDbId),
}

/// Convenience type alias for solr-gateway results.
pub type Result<T> = std::result::Result<T, SearchError>;
