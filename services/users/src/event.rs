//! Request/response contract of the serverless trigger
//!
//! These mirror the subset of the API Gateway proxy event the service reads,
//! and the envelope it returns.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use crate::error::{ApiError, ApiResult};

/// Inbound request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProxyRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub http_method: String,
    pub query_string_parameters: Option<HashMap<String, String>>,
    pub body: Option<String>,
}

impl ProxyRequest {
    /// Create a request with the given method and nothing else
    pub fn new(http_method: impl Into<String>) -> Self {
        Self {
            http_method: http_method.into(),
            ..Self::default()
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_string_parameters
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a query parameter; an absent parameter map behaves as empty
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query_string_parameters
            .as_ref()
            .and_then(|params| params.get(key))
            .map(String::as_str)
    }

    /// Parse the body as JSON
    ///
    /// An absent or empty body is `None`. A body that is not valid JSON is a
    /// bad request.
    pub fn json_body(&self) -> ApiResult<Option<Value>> {
        match self.body.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => serde_json::from_str(raw)
                .map(Some)
                .map_err(|_| ApiError::BadRequest("Invalid JSON body.".to_string())),
        }
    }
}

/// `null` deserializes like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Outbound response envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    /// JSON document encoded as a string
    pub body: String,
}

impl ProxyResponse {
    /// Decode the body back into JSON
    pub fn json(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.body)
    }
}
