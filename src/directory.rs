//! Concept database directory backed by the `[concept_dbs]` config table.

use solr_gateway::{ConceptDbDirectory, ConceptDbId, SearchError};
use std::collections::BTreeMap;

/// Concept databases known from configuration, ordered by id.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredDirectory {
    names: BTreeMap<ConceptDbId, String>,
}

impl ConfiguredDirectory {
    /// All configured ids in ascending order.
    pub fn ids(&self) -> Vec<ConceptDbId> {
        self.names.keys().copied().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl FromIterator<(ConceptDbId, String)> for ConfiguredDirectory {
    fn from_iter<I: IntoIterator<Item = (ConceptDbId, String)>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().collect(),
        }
    }
}

impl ConceptDbDirectory for ConfiguredDirectory {
    async fn name_of(&self, id: ConceptDbId) -> Result<String, SearchError> {
        self.names
            .get(&id)
            .cloned()
            .ok_or(SearchError::UnknownConceptDb(id))
    }
}
