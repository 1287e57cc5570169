//! Harness settings.
//!
//! Each setting is read from an environment variable and falls back to a
//! fixed default when the variable is absent. Values are used verbatim.

use std::fmt;

use kie_client::{ClientConfig, MarshallingFormat};

pub const SERVER_URL_VAR: &str = "KIE_SERVER_ITEST_SERVER_URL";
pub const USER_VAR: &str = "KIE_SERVER_ITEST_USER";
pub const PASSWORD_VAR: &str = "KIE_SERVER_ITEST_PASSWORD";
pub const CONTAINER_VAR: &str = "KIE_SERVER_ITEST_CONTAINER";
pub const PROCESS_VAR: &str = "KIE_SERVER_ITEST_PROCESS";

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080/kie-server/services/rest/server";
pub const DEFAULT_USER: &str = "yoda";
pub const DEFAULT_PASSWORD: &str = "usetheforce123@";
pub const DEFAULT_CONTAINER_ID: &str = "evaluation";
pub const DEFAULT_PROCESS_ID: &str = "evaluation";

/// Connection and target settings for a harness run.
#[derive(Clone, PartialEq, Eq)]
pub struct HarnessSettings {
    pub server_url: String,
    pub user: String,
    pub password: String,
    pub container_id: String,
    pub process_id: String,
}

impl HarnessSettings {
    /// Resolve every setting through `lookup`, falling back to the defaults.
    pub fn resolve<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str, default: &str| lookup(var).unwrap_or_else(|| default.to_string());

        Self {
            server_url: get(SERVER_URL_VAR, DEFAULT_SERVER_URL),
            user: get(USER_VAR, DEFAULT_USER),
            password: get(PASSWORD_VAR, DEFAULT_PASSWORD),
            container_id: get(CONTAINER_VAR, DEFAULT_CONTAINER_ID),
            process_id: get(PROCESS_VAR, DEFAULT_PROCESS_ID),
        }
    }

    /// Resolve from the process environment.
    pub fn from_env() -> Self {
        Self::resolve(|var| std::env::var(var).ok())
    }

    /// REST client configuration for the given format.
    pub fn client_config(&self, format: MarshallingFormat) -> ClientConfig {
        ClientConfig::rest(&self.server_url, &self.user, &self.password)
            .with_marshalling_format(format)
    }
}

impl Default for HarnessSettings {
    fn default() -> Self {
        Self::resolve(|_| None)
    }
}

impl fmt::Debug for HarnessSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HarnessSettings")
            .field("server_url", &self.server_url)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("container_id", &self.container_id)
            .field("process_id", &self.process_id)
            .finish()
    }
}
