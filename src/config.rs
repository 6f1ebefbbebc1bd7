//! Application configuration loaded from TOML.
//!
//! ```toml
//! [solr]
//! host = "solr.internal"
//! port = 8983
//! rows = 15
//! dispatch = "sequential"
//!
//! [concept_dbs]
//! 1 = "snomed"
//! 2 = "umls"
//! ```

use serde::{Deserialize, Serialize};
use solr_gateway::{ConceptDbId, SolrConfig};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::directory::ConfiguredDirectory;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `solr.host`.
pub const SOLR_HOST_ENV: &str = "SOLR_HOST";
/// Environment variable overriding `solr.port`.
pub const SOLR_PORT_ENV: &str = "SOLR_PORT";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where Solr lives and how collections are queried.
    pub solr: SolrConfig,
    /// Concept database names keyed by id.
    pub concept_dbs: BTreeMap<String, String>,
}

impl AppConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path: `<config dir>/concept-search/config.toml`.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| std::env::temp_dir().join("concept-search-config"))
            .join("concept-search")
            .join("config.toml")
    }

    /// Resolve the effective configuration.
    ///
    /// Reads `path` if given, otherwise the default path when it exists,
    /// otherwise starts from defaults. `SOLR_HOST` and `SOLR_PORT` from
    /// the process environment are applied on top, then the result is
    /// validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded, an override is
    /// malformed, or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Self::default_config_path();
                if default_path.exists() {
                    Self::from_file(&default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SOLR_HOST` / `SOLR_PORT` overrides from `lookup`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if `SOLR_PORT` is not a port number.
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(SOLR_HOST_ENV) {
            self.solr.host = host;
        }
        if let Some(port) = lookup(SOLR_PORT_ENV) {
            self.solr.port = port
                .trim()
                .parse()
                .map_err(|e| ConfigError::Invalid(format!("{SOLR_PORT_ENV}={port}: {e}")))?;
        }
        Ok(())
    }

    /// Validate the Solr section and the concept database table.
    ///
    /// # Errors
    ///
    /// Returns an error for invalid Solr settings or non-numeric ids.
    pub fn validate(&self) -> Result<()> {
        self.solr.validate()?;
        self.concept_db_entries().map(|_| ())
    }

    /// Concept database table with parsed ids.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for keys that are not integers or
    /// names that are empty.
    pub fn concept_db_entries(&self) -> Result<Vec<(ConceptDbId, String)>> {
        self.concept_dbs
            .iter()
            .map(|(key, name)| {
                let id: ConceptDbId = key.parse().map_err(|_| {
                    ConfigError::Invalid(format!("concept_dbs key `{key}` is not an id"))
                })?;
                if name.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "concept_dbs entry {id} has an empty name"
                    )));
                }
                Ok((id, name.clone()))
            })
            .collect()
    }

    /// Build the concept database directory from `[concept_dbs]`.
    ///
    /// # Errors
    ///
    /// Same as [`AppConfig::concept_db_entries`].
    pub fn directory(&self) -> Result<ConfiguredDirectory> {
        Ok(self.concept_db_entries()?.into_iter().collect())
    }
}
