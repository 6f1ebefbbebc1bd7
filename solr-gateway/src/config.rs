//! Gateway configuration with sensible defaults.
//!
//! [`SolrConfig`] says where Solr lives, how many rows each collection
//! returns, request timeouts and how collections are dispatched.

use serde::{Deserialize, Serialize};

use crate::error::SearchError;

/// How per-collection queries are issued.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchMode {
    /// One collection after another, in the order the ids were given.
    #[default]
    Sequential,
    /// All collections at once. The first failure cancels the rest.
    Concurrent,
}

/// Configuration for talking to a Solr instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolrConfig {
    /// Solr host name or address.
    pub host: String,
    /// Solr HTTP port.
    pub port: u16,
    /// `rows` parameter sent with every select query.
    pub rows: usize,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Sequential or concurrent collection dispatch.
    pub dispatch: DispatchMode,
    /// Custom User-Agent string. Defaults to `solr-gateway/<version>`.
    pub user_agent: Option<String>,
}

impl Default for SolrConfig {
    fn default() -> Self {
        Self {
            host: "localhost".into(),
            port: 8983,
            rows: 15,
            timeout_seconds: 10,
            dispatch: DispatchMode::Sequential,
            user_agent: None,
        }
    }
}

impl SolrConfig {
    /// Root URL of the Solr web app, e.g. `http://localhost:8983/solr/`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] if host and port do not form a valid URL.
    pub fn solr_root(&self) -> Result<url::Url, SearchError> {
        url::Url::parse(&format!("http://{}:{}/solr/", self.host, self.port))
            .map_err(|e| SearchError::Config(format!("invalid solr address: {e}")))
    }

    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `host` must not be empty
    /// - `port` must be greater than 0
    /// - `rows` must be greater than 0
    /// - `timeout_seconds` must be greater than 0
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.host.trim().is_empty() {
            return Err(SearchError::Config("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(SearchError::Config("port must be greater than 0".into()));
        }
        if self.rows == 0 {
            return Err(SearchError::Config("rows must be greater than 0".into()));
        }
        if self.timeout_seconds == 0 {
            return Err(SearchError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        self.solr_root().map(|_| ())
    }
}
