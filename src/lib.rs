//! Concept search: look up concepts across concept databases indexed in Solr.
//!
//! The heavy lifting lives in the [`solr_gateway`] crate. This crate adds
//! the application layer around it:
//! - **Configuration**: TOML file plus `SOLR_HOST` / `SOLR_PORT` overrides
//! - **Directory**: concept database names from the `[concept_dbs]` table
//! - **CLI**: the `concept-search` binary

pub mod config;
pub mod directory;
pub mod error;

pub use config::AppConfig;
pub use directory::ConfiguredDirectory;
pub use error::{ConfigError, Result};

use solr_gateway::SearchGateway;

/// Build a gateway from a loaded configuration.
///
/// # Errors
///
/// Returns an error if the directory table or the Solr settings are invalid.
pub fn gateway_from_config(config: &AppConfig) -> Result<SearchGateway<ConfiguredDirectory>> {
    let directory = config.directory()?;
    Ok(SearchGateway::new(&config.solr, directory)?)
}
