/// Wire types for subgraph (GraphQL over HTTP) requests and responses
use crate::errors::{FeedKind, TagError, TagResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Request body: `{ "query": ..., "operationName": ..., "variables": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphRequest {
    pub query: String,
    #[serde(rename = "operationName")]
    pub operation_name: String,
    pub variables: Map<String, Value>,
}

impl GraphRequest {
    pub fn new(operation_name: &str, query: &str) -> Self {
        Self {
            query: query.to_string(),
            operation_name: operation_name.to_string(),
            variables: Map::new(),
        }
    }

    pub fn with_variable(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.variables.insert(name.to_string(), value.into());
        self
    }

    pub fn variable_str(&self, name: &str) -> Option<&str> {
        self.variables.get(name).and_then(Value::as_str)
    }

    pub fn variable_u64(&self, name: &str) -> Option<u64> {
        self.variables.get(name).and_then(Value::as_u64)
    }
}

/// One entry of the `errors` array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphErrorEntry {
    pub message: String,
}

/// Undecoded response envelope
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawGraphResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Option<Vec<GraphErrorEntry>>,
}

impl RawGraphResponse {
    pub fn from_data(data: Value) -> Self {
        Self {
            data: Some(data),
            errors: None,
        }
    }

    pub fn from_errors<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            data: None,
            errors: Some(
                messages
                    .into_iter()
                    .map(|message| GraphErrorEntry {
                        message: message.into(),
                    })
                    .collect(),
            ),
        }
    }

    /// `RemoteQuery` carrying every message of a non-empty `errors` array
    pub fn remote_error(&self, feed: FeedKind) -> Option<TagError> {
        let errors = self.errors.as_ref().filter(|errors| !errors.is_empty())?;
        let message = errors
            .iter()
            .map(|e| e.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        Some(TagError::RemoteQuery { feed, message })
    }

    /// Decode `data` into `T`, failing on any application-level error
    ///
    /// A response that carries both data and errors is treated as failed.
    pub fn into_data<T: DeserializeOwned>(self, feed: FeedKind) -> TagResult<T> {
        if let Some(err) = self.remote_error(feed) {
            return Err(err);
        }

        let data = self.data.filter(|data| !data.is_null()).ok_or_else(|| {
            TagError::Decode {
                feed,
                reason: "response contained no data".to_string(),
            }
        })?;

        serde_json::from_value(data).map_err(|e| TagError::Decode {
            feed,
            reason: e.to_string(),
        })
    }
}
