//! Error types for KIE Server calls.

use thiserror::Error;

use crate::marshalling::MarshallingFormat;

/// Errors returned by [`crate::KieServices`] implementations.
#[derive(Debug, Error)]
pub enum KieError {
    /// The request never produced an HTTP response.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("server returned {status}: {message}")]
    Api { status: u16, message: String },

    /// The server rejected the configured credentials.
    #[error("unauthorized: check the configured user and password")]
    Unauthorized,

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(String),

    /// No codec exists in this crate for the selected format.
    #[error("marshalling format {0} is not supported by this client")]
    UnsupportedMarshalling(MarshallingFormat),

    /// The client configuration is unusable.
    #[error("invalid client configuration: {0}")]
    InvalidConfig(String),
}

impl KieError {
    /// Create an API error from a status code and body text.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a 404 error for a missing remote resource.
    pub fn not_found(what: impl std::fmt::Display) -> Self {
        Self::api(404, format!("{what} not found"))
    }

    /// HTTP status carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Unauthorized => Some(401),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for KieError {
    fn from(err: serde_json::Error) -> Self {
        KieError::Decode(err.to_string())
    }
}
