//! Free text to Solr query translation.
//!
//! A user query is split into tokens, every token but the last becomes a
//! fuzzy term (`~1`) and the last one a prefix term (`*`). Which fields
//! are matched depends on the token count, whether the text is an
//! integer, and the collection's `cui` field type.

use crate::types::CollectionSchema;

/// Suffix for fuzzy terms (edit distance 1).
pub const FUZZY_SUFFIX: &str = "~1";

/// Suffix for the trailing prefix term.
pub const WILDCARD_SUFFIX: &str = "*";

/// Literal escape sequence collapsed before splitting. This is the
/// two characters `\s+`, not a regex.
const WHITESPACE_ESCAPE: &str = r"\s+";
const WHITESPACE_ESCAPE_REPLACEMENT: &str = r"\s";

/// A tokenized, decorated user query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptQuery {
    raw: Vec<String>,
}

impl ConceptQuery {
    /// Tokenize `text`. Returns `None` when no tokens remain.
    pub fn parse(text: &str) -> Option<Self> {
        let raw: Vec<String> = text
            .trim()
            .replace(WHITESPACE_ESCAPE, WHITESPACE_ESCAPE_REPLACEMENT)
            .split(' ')
            .filter(|t| !t.is_empty())
            .map(str::to_owned)
            .collect();
        if raw.is_empty() {
            None
        } else {
            Some(Self { raw })
        }
    }

    /// Tokens as typed, without suffixes.
    pub fn tokens(&self) -> &[String] {
        &self.raw
    }

    /// Tokens with the fuzzy suffix on all but the last, which gets the
    /// wildcard suffix.
    pub fn decorated_terms(&self) -> Vec<String> {
        let last = self.raw.len() - 1;
        self.raw
            .iter()
            .enumerate()
            .map(|(i, t)| {
                if i < last {
                    format!("{t}{FUZZY_SUFFIX}")
                } else {
                    format!("{t}{WILDCARD_SUFFIX}")
                }
            })
            .collect()
    }

    /// The integer a single-token query spells, in canonical form (no `+`,
    /// no leading zeros), if any. There is no size limit. Multi-token
    /// queries are never treated as identifiers.
    pub fn numeric_identifier(&self) -> Option<String> {
        match self.raw.as_slice() {
            [only] => canonical_integer(only),
            _ => None,
        }
    }

    /// Build the Solr `q` parameter for a collection with `schema`.
    pub fn to_solr(&self, schema: &CollectionSchema) -> String {
        if let Some(cui) = self.numeric_identifier() {
            return format!("cui:{cui}");
        }

        let terms = self.decorated_terms();
        if terms.len() > 1 {
            return terms
                .iter()
                .map(|t| format!("name:{t}"))
                .collect::<Vec<_>>()
                .join(" ");
        }

        let raw = &self.raw[0];
        let prefix = &terms[0];
        if schema.has_numeric_identifier() {
            format!("name:{raw} OR name:{prefix}")
        } else {
            // single word could be an alphanumeric cui
            format!("cui:{raw} OR name:{raw} OR name:{prefix}")
        }
    }
}

/// Optional sign followed by ASCII digits, rendered without `+` or
/// leading zeros. `-0` renders as `0`.
fn canonical_integer(token: &str) -> Option<String> {
    let (negative, digits) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let trimmed = digits.trim_start_matches('0');
    Some(match (trimmed.is_empty(), negative) {
        (true, _) => "0".to_owned(),
        (false, true) => format!("-{trimmed}"),
        (false, false) => trimmed.to_owned(),
    })
}
