use serde::{Deserialize, Serialize};

use super::KieDate;

/// Process definition as reported by the query and process endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProcessDefinition {
    pub process_id: String,

    #[serde(default)]
    pub process_name: Option<String>,

    #[serde(default)]
    pub process_version: Option<String>,

    #[serde(default)]
    pub package: Option<String>,

    #[serde(default)]
    pub container_id: Option<String>,

    #[serde(default)]
    pub dynamic: bool,
}

impl ProcessDefinition {
    pub fn new(container_id: impl Into<String>, process_id: impl Into<String>) -> Self {
        let process_id = process_id.into();
        Self {
            process_name: Some(process_id.clone()),
            process_id,
            process_version: Some("1.0".to_string()),
            package: None,
            container_id: Some(container_id.into()),
            dynamic: false,
        }
    }
}

/// `{"processes": [...]}` page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessDefinitionList {
    #[serde(default)]
    pub processes: Vec<ProcessDefinition>,
}

/// Process instance state, numeric on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum ProcessInstanceState {
    Pending,
    Active,
    Completed,
    Aborted,
    Suspended,
    Other(i32),
}

impl ProcessInstanceState {
    /// Completed and aborted instances never change again.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Aborted)
    }
}

impl From<i32> for ProcessInstanceState {
    fn from(code: i32) -> Self {
        match code {
            0 => Self::Pending,
            1 => Self::Active,
            2 => Self::Completed,
            3 => Self::Aborted,
            4 => Self::Suspended,
            other => Self::Other(other),
        }
    }
}

impl From<ProcessInstanceState> for i32 {
    fn from(state: ProcessInstanceState) -> Self {
        match state {
            ProcessInstanceState::Pending => 0,
            ProcessInstanceState::Active => 1,
            ProcessInstanceState::Completed => 2,
            ProcessInstanceState::Aborted => 3,
            ProcessInstanceState::Suspended => 4,
            ProcessInstanceState::Other(code) => code,
        }
    }
}

/// A process instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ProcessInstance {
    #[serde(rename = "process-instance-id")]
    pub id: i64,

    pub process_id: String,

    #[serde(default)]
    pub process_name: Option<String>,

    #[serde(default)]
    pub process_version: Option<String>,

    #[serde(rename = "process-instance-state")]
    pub state: ProcessInstanceState,

    #[serde(default)]
    pub container_id: Option<String>,

    #[serde(default)]
    pub initiator: Option<String>,

    #[serde(default)]
    pub start_date: Option<KieDate>,

    #[serde(rename = "process-instance-desc", default)]
    pub description: Option<String>,

    #[serde(default)]
    pub correlation_key: Option<String>,

    #[serde(default)]
    pub parent_instance_id: Option<i64>,
}
