//! Client configuration.

use std::fmt;
use std::time::Duration;

use crate::marshalling::MarshallingFormat;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for a KIE Server REST endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL, e.g. `http://localhost:8080/kie-server/services/rest/server`.
    pub server_url: String,
    pub user: String,
    pub password: String,
    pub marshalling_format: MarshallingFormat,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Create a REST configuration with the default format and timeout.
    pub fn rest(
        server_url: impl Into<String>,
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            server_url: server_url.into().trim_end_matches('/').to_string(),
            user: user.into(),
            password: password.into(),
            marshalling_format: MarshallingFormat::default(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_marshalling_format(mut self, format: MarshallingFormat) -> Self {
        self.marshalling_format = format;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("server_url", &self.server_url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("marshalling_format", &self.marshalling_format)
            .field("timeout", &self.timeout)
            .finish()
    }
}
