//! Harness failures.

use kie_client::KieError;
use thiserror::Error;

/// Why a harness run failed.
#[derive(Debug, Error)]
pub enum HarnessError {
    /// A remote call failed.
    #[error(transparent)]
    Client(#[from] KieError),

    /// A response did not have the expected shape.
    #[error("assertion failed: {0}")]
    Assertion(String),

    /// The task query came back empty.
    #[error("no tasks available for user {user}")]
    NoTasks { user: String },
}

/// Fail with an assertion error unless `condition` holds.
pub(crate) fn ensure(condition: bool, message: impl Into<String>) -> Result<(), HarnessError> {
    if condition {
        Ok(())
    } else {
        Err(HarnessError::Assertion(message.into()))
    }
}
