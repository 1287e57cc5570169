use serde::{Deserialize, Serialize};

use super::KieDate;

/// Human task status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskStatus {
    Created,
    Ready,
    Reserved,
    InProgress,
    Suspended,
    Completed,
    Failed,
    Error,
    Exited,
    Obsolete,
    #[serde(other)]
    Unknown,
}

/// Entry of a task query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskSummary {
    #[serde(rename = "task-id")]
    pub id: i64,

    #[serde(rename = "task-name", default)]
    pub name: Option<String>,

    #[serde(rename = "task-subject", default)]
    pub subject: Option<String>,

    #[serde(rename = "task-description", default)]
    pub description: Option<String>,

    #[serde(rename = "task-status")]
    pub status: TaskStatus,

    #[serde(rename = "task-priority", default)]
    pub priority: Option<i32>,

    #[serde(rename = "task-actual-owner", default)]
    pub actual_owner: Option<String>,

    #[serde(rename = "task-created-by", default)]
    pub created_by: Option<String>,

    #[serde(rename = "task-created-on", default)]
    pub created_on: Option<KieDate>,

    #[serde(rename = "task-proc-inst-id", default)]
    pub process_instance_id: Option<i64>,

    #[serde(rename = "task-proc-def-id", default)]
    pub process_id: Option<String>,

    #[serde(rename = "task-container-id", default)]
    pub container_id: Option<String>,
}

/// `{"task-summary": [...]}` page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskSummaryList {
    #[serde(rename = "task-summary", default)]
    pub tasks: Vec<TaskSummary>,
}
