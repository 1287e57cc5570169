use serde::{Deserialize, Serialize};

/// Outcome reported by the server for a wrapped response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    Success,
    Failure,
    NoResponse,
}

/// The server's standard response wrapper.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    #[serde(rename = "type")]
    pub response_type: ResponseType,

    #[serde(default)]
    pub msg: Option<String>,

    pub result: Option<T>,
}

impl<T> ServiceResponse<T> {
    pub fn success(msg: impl Into<String>, result: T) -> Self {
        Self {
            response_type: ResponseType::Success,
            msg: Some(msg.into()),
            result: Some(result),
        }
    }

    pub fn failure(msg: impl Into<String>) -> Self {
        Self {
            response_type: ResponseType::Failure,
            msg: Some(msg.into()),
            result: None,
        }
    }

    pub fn is_success(&self) -> bool {
        self.response_type == ResponseType::Success
    }

    /// Transform the result, keeping type and message.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ServiceResponse<U> {
        ServiceResponse {
            response_type: self.response_type,
            msg: self.msg,
            result: self.result.map(f),
        }
    }
}

/// One `{key, value}` entry of an execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResultItem {
    pub key: String,
    pub value: serde_json::Value,
}

/// Results of a batch execution: out-identifier bindings and fact handles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExecutionResults {
    #[serde(default)]
    pub results: Vec<ExecutionResultItem>,

    #[serde(default)]
    pub facts: Vec<ExecutionResultItem>,
}

impl ExecutionResults {
    /// Value bound to an out identifier.
    pub fn value(&self, key: &str) -> Option<&serde_json::Value> {
        self.results
            .iter()
            .find(|item| item.key == key)
            .map(|item| &item.value)
    }
}

/// `{"execution-results": {...}}` wrapper used in the response payload.
#[derive(Debug, Deserialize)]
pub(crate) struct ExecutionResultsEnvelope {
    #[serde(rename = "execution-results", default)]
    pub execution_results: ExecutionResults,
}
