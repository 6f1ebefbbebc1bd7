//! Error types for the concept-search application layer.

/// Errors raised while loading or applying configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The config file is not valid TOML or has the wrong shape.
    #[error("config parse error: {0}")]
    Parse(String),

    /// A value was syntactically fine but unusable.
    #[error("config error: {0}")]
    Invalid(String),

    /// The Solr section failed validation.
    #[error(transparent)]
    Solr(#[from] solr_gateway::SearchError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, ConfigError>;
