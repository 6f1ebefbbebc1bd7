//! Result merging by concept identifier.
//!
//! Documents from every queried collection are folded into one list.
//! The first document seen for a `cui` wins; later ones are dropped.
//! The final list is ordered by display name length, shortest first.

use std::collections::HashSet;

use crate::error::SearchError;
use crate::http::SolrDoc;
use crate::types::{ConceptMatch, Cui};

/// Accumulates unique concept matches in first-seen order.
#[derive(Debug, Default)]
pub struct ResultMerger {
    seen: HashSet<Cui>,
    matches: Vec<ConceptMatch>,
}

impl ResultMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one collection's documents into the merge.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if a document has an empty `cui` or
    /// `pretty_name`.
    pub fn extend(&mut self, docs: &[SolrDoc]) -> Result<(), SearchError> {
        for doc in docs {
            let (cui, name) = doc.first_values()?;
            if self.seen.insert(cui.clone()) {
                self.matches.push(ConceptMatch {
                    cui: cui.clone(),
                    pretty_name: name.to_owned(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Finish the merge, sorted by ascending display name length.
    /// Equal lengths keep first-seen order.
    pub fn into_sorted(self) -> Vec<ConceptMatch> {
        let mut matches = self.matches;
        matches.sort_by_key(|m| m.pretty_name.chars().count());
        matches
    }
}
