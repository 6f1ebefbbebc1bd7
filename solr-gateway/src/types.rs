//! Core types shared by the gateway: concept database ids, collection
//! schemas and the result payloads handed back to callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Separator between a concept database name and its id in a collection name.
pub const COLLECTION_ID_SEPARATOR: &str = "_id_";

/// Solr field type used for collections whose `cui` values are integers.
pub const NUMERIC_CUI_TYPE: &str = "plongs";

/// Identifier of a concept database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConceptDbId(pub u64);

impl fmt::Display for ConceptDbId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ConceptDbId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl From<u64> for ConceptDbId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Build the Solr collection name for a concept database: `<name>_id_<id>`.
pub fn collection_name(db_name: &str, id: ConceptDbId) -> String {
    format!("{db_name}{COLLECTION_ID_SEPARATOR}{id}")
}

/// Trailing id suffix of a collection name, i.e. the text after the last
/// `_id_`. Names without the separator are returned whole.
pub fn collection_id_suffix(collection: &str) -> &str {
    collection
        .rsplit(COLLECTION_ID_SEPARATOR)
        .next()
        .unwrap_or(collection)
}

/// Cached field metadata for one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectionSchema {
    /// Solr type name of the `cui` field, e.g. `plongs` or `string`.
    pub identifier_field_type: String,
}

impl CollectionSchema {
    /// Whether the collection stores integer concept identifiers.
    pub fn has_numeric_identifier(&self) -> bool {
        self.identifier_field_type == NUMERIC_CUI_TYPE
    }
}

/// A concept's unique code. Numeric or text depending on the collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cui {
    Numeric(i64),
    Text(String),
}

impl fmt::Display for Cui {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// One merged search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConceptMatch {
    pub cui: Cui,
    /// Human-readable concept label.
    pub pretty_name: String,
}

/// Body of a successful `search_collection` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<ConceptMatch>,
}

/// Body of a successful `collections_available` call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityResponse {
    pub results: BTreeMap<ConceptDbId, bool>,
}
