//! # kie-harness
//!
//! A very basic smoke harness for KIE Server. It verifies that a client can
//! reach a running server and drive one round trip through containers,
//! processes, tasks and rules. It is not a complete test suite.
//!
//! Settings come from the environment (see [`settings`]); the remote side is
//! any [`kie_client::KieServices`] implementation.

mod error;
pub mod scenario;
pub mod settings;

pub use error::HarnessError;
pub use scenario::{rule_batch, run_matrix, Harness, InteractionReport};
pub use settings::HarnessSettings;
