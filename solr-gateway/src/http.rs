//! Solr HTTP client.
//!
//! Wraps a configured [`reqwest::Client`] and exposes the three Solr
//! endpoints the gateway needs: the collection list, a collection's
//! schema and the select handler.

use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::config::SolrConfig;
use crate::error::SearchError;
use crate::types::{CollectionSchema, Cui};

/// Name of the field that holds a concept's unique code.
pub const IDENTIFIER_FIELD: &str = "cui";

/// Build a [`reqwest::Client`] configured for Solr requests.
///
/// The client has:
/// - Timeout from config
/// - `solr-gateway/<version>` User-Agent (or custom if configured)
///
/// # Errors
///
/// Returns [`SearchError::Http`] if the client cannot be constructed.
pub fn build_client(config: &SolrConfig) -> Result<reqwest::Client, SearchError> {
    let ua = match config.user_agent {
        Some(ref custom) => custom.clone(),
        None => default_user_agent(),
    };

    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_seconds))
        .user_agent(ua)
        .build()
        .map_err(|e| SearchError::Http(format!("failed to build HTTP client: {e}")))
}

fn default_user_agent() -> String {
    format!("solr-gateway/{}", env!("CARGO_PKG_VERSION"))
}

/// Result of asking Solr for its collection list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectionList {
    /// Solr answered with a success status.
    Listed(Vec<String>),
    /// Solr answered with a non-success status.
    Unavailable(u16),
}

/// Result of a select query against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectOutcome {
    /// The documents Solr returned, in rank order.
    Docs(Vec<SolrDoc>),
    /// Solr reported an error for the collection, usually because it does
    /// not exist yet.
    IndexError,
}

/// A concept document as stored in Solr. Both fields are multi-valued.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SolrDoc {
    pub cui: Vec<Cui>,
    pub pretty_name: Vec<String>,
}

impl SolrDoc {
    /// First `cui` and `pretty_name` values of the document.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if either field is empty.
    pub fn first_values(&self) -> Result<(&Cui, &str), SearchError> {
        let cui = self
            .cui
            .first()
            .ok_or_else(|| SearchError::Parse("document has an empty cui field".into()))?;
        let name = self
            .pretty_name
            .first()
            .ok_or_else(|| SearchError::Parse(format!("document {cui} has an empty pretty_name")))?;
        Ok((cui, name.as_str()))
    }
}

#[derive(Deserialize)]
struct ListBody {
    collections: Vec<String>,
}

#[derive(Deserialize)]
struct SchemaBody {
    schema: SchemaFields,
}

#[derive(Deserialize)]
struct SchemaFields {
    fields: Vec<SchemaField>,
}

#[derive(Deserialize)]
struct SchemaField {
    name: String,
    #[serde(rename = "type")]
    field_type: String,
}

#[derive(Deserialize)]
struct SelectDocs {
    docs: Vec<SolrDoc>,
}

/// Client for one Solr instance.
#[derive(Debug, Clone)]
pub struct SolrClient {
    http: reqwest::Client,
    root: Url,
    rows: usize,
}

impl SolrClient {
    /// Create a client from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Config`] for an invalid address and
    /// [`SearchError::Http`] if the HTTP client cannot be built.
    pub fn new(config: &SolrConfig) -> Result<Self, SearchError> {
        Ok(Self {
            http: build_client(config)?,
            root: config.solr_root()?,
            rows: config.rows,
        })
    }

    /// `GET /solr/admin/collections?action=LIST`.
    ///
    /// # Errors
    ///
    /// Transport failures and malformed success bodies are errors. A
    /// non-success status is reported as [`CollectionList::Unavailable`].
    pub async fn list_collections(&self) -> Result<CollectionList, SearchError> {
        let mut url = self.endpoint(&["admin", "collections"])?;
        url.query_pairs_mut().append_pair("action", "LIST");

        tracing::debug!(%url, "listing solr collections");
        let resp = self.get(url).await?;
        let status = resp.status();
        if !status.is_success() {
            return Ok(CollectionList::Unavailable(status.as_u16()));
        }
        let body: ListBody = read_json(resp, "collection list").await?;
        Ok(CollectionList::Listed(body.collections))
    }

    /// `GET /solr/<collection>/schema`, reduced to the `cui` field type.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the schema is malformed or has no
    /// `cui` field.
    pub async fn fetch_schema(&self, collection: &str) -> Result<CollectionSchema, SearchError> {
        let url = self.endpoint(&[collection, "schema"])?;
        tracing::info!(%url, "retrieving solr schema");

        let body: SchemaBody = read_json(self.get(url).await?, "schema").await?;
        body.schema
            .fields
            .into_iter()
            .find(|f| f.name == IDENTIFIER_FIELD)
            .map(|f| CollectionSchema {
                identifier_field_type: f.field_type,
            })
            .ok_or_else(|| {
                SearchError::Parse(format!(
                    "schema for {collection} has no {IDENTIFIER_FIELD} field"
                ))
            })
    }

    /// `GET /solr/<collection>/select?q.op=OR&q=<query>&rows=<rows>`.
    ///
    /// The body is inspected whatever the status code: Solr reports
    /// missing collections through an `error` member.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Parse`] if the body is not JSON or has
    /// neither `error` nor `response.docs`.
    pub async fn select(&self, collection: &str, query: &str) -> Result<SelectOutcome, SearchError> {
        let mut url = self.endpoint(&[collection, "select"])?;
        url.query_pairs_mut()
            .append_pair("q.op", "OR")
            .append_pair("q", query)
            .append_pair("rows", &self.rows.to_string());
        tracing::info!(%url, "searching solr collection");

        let body: serde_json::Map<String, serde_json::Value> =
            read_json(self.get(url).await?, "select").await?;
        parse_select(collection, body)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, SearchError> {
        let mut url = self.root.clone();
        url.path_segments_mut()
            .map_err(|()| SearchError::Config(format!("solr root {} cannot be a base", self.root)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<reqwest::Response, SearchError> {
        self.http
            .get(url)
            .send()
            .await
            .map_err(|e| SearchError::Http(e.to_string()))
    }
}

/// Interpret a select body. Any `error` member, even `null`, marks the
/// collection as unavailable.
fn parse_select(
    collection: &str,
    mut body: serde_json::Map<String, serde_json::Value>,
) -> Result<SelectOutcome, SearchError> {
    if body.contains_key("error") {
        return Ok(SelectOutcome::IndexError);
    }
    let response = body.remove("response").ok_or_else(|| {
        SearchError::Parse(format!("select response for {collection} has no response member"))
    })?;
    let docs: SelectDocs = serde_json::from_value(response)
        .map_err(|e| SearchError::Parse(format!("invalid select body for {collection}: {e}")))?;
    Ok(SelectOutcome::Docs(docs.docs))
}

async fn read_json<T: serde::de::DeserializeOwned>(
    resp: reqwest::Response,
    what: &str,
) -> Result<T, SearchError> {
    let text = resp
        .text()
        .await
        .map_err(|e| SearchError::Http(format!("failed to read {what} body: {e}")))?;
    serde_json::from_str(&text).map_err(|e| SearchError::Parse(format!("invalid {what} body: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SolrClient {
        SolrClient::new(&SolrConfig::default()).expect("client")
    }

    #[test]
    fn build_client_with_default_config() {
        assert!(build_client(&SolrConfig::default()).is_ok());
    }

    #[test]
    fn build_client_with_custom_ua() {
        let config = SolrConfig {
            user_agent: Some("ConceptBot/1.0".into()),
            ..Default::default()
        };
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn default_user_agent_names_crate() {
        assert!(default_user_agent().starts_with("solr-gateway/"));
    }

    #[test]
    fn endpoint_appends_segments_under_solr() {
        let url = client().endpoint(&["snomed_id_1", "select"]).expect("url");
        assert_eq!(url.as_str(), "http://localhost:8983/solr/snomed_id_1/select");
    }

    #[test]
    fn endpoint_escapes_collection_names() {
        let url = client().endpoint(&["a b/c", "schema"]).expect("url");
        assert_eq!(url.path(), "/solr/a%20b%2Fc/schema");
    }

    #[test]
    fn first_values_of_document() {
        let doc: SolrDoc =
            serde_json::from_str(r#"{"cui": ["C1", "C2"], "pretty_name": ["Kidney", "Renal"]}"#)
                .expect("deserialize");
        let (cui, name) = doc.first_values().expect("values");
        assert_eq!(cui, &Cui::Text("C1".into()));
        assert_eq!(name, "Kidney");
    }

    #[test]
    fn empty_cui_is_parse_error() {
        let doc = SolrDoc {
            cui: vec![],
            pretty_name: vec!["x".into()],
        };
        assert!(matches!(doc.first_values(), Err(SearchError::Parse(_))));
    }

    fn select_body(json: &str) -> serde_json::Map<String, serde_json::Value> {
        serde_json::from_str(json).expect("json object")
    }

    #[test]
    fn null_error_member_still_marks_index_unavailable() {
        let body = select_body(r#"{"error": null, "response": {"docs": []}}"#);
        assert_eq!(
            parse_select("umls_id_2", body).expect("outcome"),
            SelectOutcome::IndexError
        );
    }

    #[test]
    fn select_docs_are_returned_without_error_member() {
        let body = select_body(r#"{"response": {"docs": [{"cui": [1], "pretty_name": ["one"]}]}}"#);
        match parse_select("snomed_id_1", body).expect("outcome") {
            SelectOutcome::Docs(docs) => assert_eq!(docs.len(), 1),
            SelectOutcome::IndexError => panic!("expected documents"),
        }
    }

    #[test]
    fn select_without_response_member_is_parse_error() {
        let body = select_body(r#"{"responseHeader": {"status": 0}}"#);
        assert!(matches!(
            parse_select("snomed_id_1", body),
            Err(SearchError::Parse(_))
        ));
    }

    #[test]
    fn document_without_pretty_name_fails_to_parse() {
        let doc: Result<SolrDoc, _> = serde_json::from_str(r#"{"cui": [1]}"#);
        assert!(doc.is_err());
    }
}
