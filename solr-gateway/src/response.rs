//! HTTP-response-like envelope returned by the gateway entry points.

use serde::Serialize;

/// Message returned when Solr refuses to list its collections.
pub const COLLECTION_LIST_FAILED: &str = "Error requesting solr concept search collection list";

/// Message returned when a collection's select query reports an error.
pub fn index_unavailable_message(collection: &str) -> String {
    format!(
        "Concept Search Index {collection} not available, \
         import concept DB first before trying to search it."
    )
}

/// Outcome of a gateway call as the web layer should render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayResponse<T> {
    /// 200 with a JSON body.
    Ok(T),
    /// 500 with a plain text body.
    ServerError(String),
}

impl<T> GatewayResponse<T> {
    pub fn status(&self) -> u16 {
        match self {
            Self::Ok(_) => 200,
            Self::ServerError(_) => 500,
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok(_))
    }

    /// The success body, if any.
    pub fn ok(self) -> Option<T> {
        match self {
            Self::Ok(body) => Some(body),
            Self::ServerError(_) => None,
        }
    }

    /// The server error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Ok(_) => None,
            Self::ServerError(msg) => Some(msg),
        }
    }
}

impl<T: Serialize> GatewayResponse<T> {
    /// Render the response body: JSON for success, the message otherwise.
    ///
    /// # Errors
    ///
    /// Fails only if `T`'s `Serialize` implementation fails.
    pub fn body(&self) -> Result<String, serde_json::Error> {
        match self {
            Self::Ok(body) => serde_json::to_string(body),
            Self::ServerError(msg) => Ok(msg.clone()),
        }
    }
}
