//! Batch commands for rule execution.
//!
//! A [`BatchExecutionCommand`] is submitted atomically to the KIE session
//! named by its lookup. Commands run in the order they were pushed.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entry point used when none is given.
pub const DEFAULT_ENTRY_POINT: &str = "DEFAULT";

/// Ordered batch of commands bound to a KIE session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchExecutionCommand {
    /// Name of the KIE session the batch runs against.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup: Option<String>,

    #[serde(default)]
    pub commands: Vec<Command>,
}

impl BatchExecutionCommand {
    pub fn new(commands: Vec<Command>) -> Self {
        Self {
            lookup: None,
            commands,
        }
    }

    pub fn with_lookup(mut self, lookup: impl Into<String>) -> Self {
        self.lookup = Some(lookup.into());
        self
    }

    pub fn push(&mut self, command: impl Into<Command>) {
        self.commands.push(command.into());
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

/// A single rule-session command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    Insert(InsertObjectCommand),
    FireAllRules(FireAllRulesCommand),
}

impl Command {
    /// Wire name of the command.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Insert(_) => "insert",
            Command::FireAllRules(_) => "fire-all-rules",
        }
    }
}

/// Insert a fact into working memory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct InsertObjectCommand {
    pub object: Value,

    /// Binding the inserted object is returned under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_identifier: Option<String>,

    #[serde(default = "default_true")]
    pub return_object: bool,

    #[serde(default = "default_entry_point")]
    pub entry_point: String,
}

fn default_true() -> bool {
    true
}

fn default_entry_point() -> String {
    DEFAULT_ENTRY_POINT.to_string()
}

impl InsertObjectCommand {
    pub fn new(object: impl Into<Value>) -> Self {
        Self {
            object: object.into(),
            out_identifier: None,
            return_object: true,
            entry_point: default_entry_point(),
        }
    }

    pub fn with_out_identifier(mut self, out_identifier: impl Into<String>) -> Self {
        self.out_identifier = Some(out_identifier.into());
        self
    }
}

/// Fire all activated rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FireAllRulesCommand {
    /// Upper bound on rule firings; -1 means unbounded.
    #[serde(default = "unbounded")]
    pub max: i32,

    /// Binding the fired-rule count is returned under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub out_identifier: Option<String>,
}

fn unbounded() -> i32 {
    -1
}

impl Default for FireAllRulesCommand {
    fn default() -> Self {
        Self {
            max: unbounded(),
            out_identifier: None,
        }
    }
}

impl From<InsertObjectCommand> for Command {
    fn from(cmd: InsertObjectCommand) -> Self {
        Command::Insert(cmd)
    }
}

impl From<FireAllRulesCommand> for Command {
    fn from(cmd: FireAllRulesCommand) -> Self {
        Command::FireAllRules(cmd)
    }
}
