//! Concept database lookup.
//!
//! The gateway does not own concept database records; it asks a
//! [`ConceptDbDirectory`] for the name behind each id so it can form the
//! collection name `<name>_id_<id>`.

use std::collections::HashMap;

use crate::error::SearchError;
use crate::types::{collection_name, ConceptDbId};

/// Resolves concept database ids to their names.
///
/// Implementations may hit a database or read static configuration.
/// All implementations must be `Send + Sync` so the gateway can be
/// shared between tasks.
pub trait ConceptDbDirectory: Send + Sync {
    /// Look up the name of concept database `id`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownConceptDb`] when no such database exists.
    fn name_of(
        &self,
        id: ConceptDbId,
    ) -> impl std::future::Future<Output = Result<String, SearchError>> + Send;

    /// Solr collection name for concept database `id`.
    fn collection_for(
        &self,
        id: ConceptDbId,
    ) -> impl std::future::Future<Output = Result<String, SearchError>> + Send {
        async move {
            let name = self.name_of(id).await?;
            Ok(collection_name(&name, id))
        }
    }
}

/// In-memory directory backed by a map.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    names: HashMap<ConceptDbId, String>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, builder style.
    pub fn with(mut self, id: impl Into<ConceptDbId>, name: impl Into<String>) -> Self {
        self.names.insert(id.into(), name.into());
        self
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(ConceptDbId, String)> for StaticDirectory {
    fn from_iter<I: IntoIterator<Item = (ConceptDbId, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl ConceptDbDirectory for StaticDirectory {
    async fn name_of(&self, id: ConceptDbId) -> Result<String, SearchError> {
        self.names
            .get(&id)
            .cloned()
            .ok_or(SearchError::UnknownConceptDb(id))
    }
}
