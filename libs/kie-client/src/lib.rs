//! # kie-client
//!
//! A small client for the KIE Server REST API, scoped to the operations the
//! smoke harness drives:
//!
//! - Container inventory (`GET /containers`)
//! - Process definitions and instances (query, start, abort)
//! - User tasks (query, start, complete)
//! - Rule execution via batch commands
//!
//! ## Seams
//!
//! The harness only sees the [`KieServices`] trait. Two implementations ship
//! with this crate:
//! - [`RestKieClient`] talks to a live server over HTTP.
//! - [`InMemoryKieServer`] is a stand-in for tests and dry runs.

pub mod command;
mod config;
mod error;
mod marshalling;
pub mod mock;
pub mod model;
mod rest;
mod services;

pub use command::{BatchExecutionCommand, Command, FireAllRulesCommand, InsertObjectCommand};
pub use config::ClientConfig;
pub use error::KieError;
pub use marshalling::MarshallingFormat;
pub use mock::InMemoryKieServer;
pub use rest::RestKieClient;
pub use services::{KieServices, Variables};
