//! Service interface the harness drives.

use std::collections::HashMap;

use async_trait::async_trait;
use serde_json::Value;

use crate::command::BatchExecutionCommand;
use crate::error::KieError;
use crate::model::{
    ExecutionResults, KieContainerResourceList, ProcessDefinition, ProcessInstance,
    ServiceResponse, TaskSummary,
};

/// Process or task variables, keyed by name.
pub type Variables = HashMap<String, Value>;

/// Remote KIE Server operations.
///
/// Container and rule operations return the server's [`ServiceResponse`]
/// wrapper untouched; process, task and query operations surface failures
/// as [`KieError`] and return the unwrapped payload.
#[async_trait]
pub trait KieServices: Send + Sync {
    /// List deployed containers.
    async fn list_containers(&self) -> Result<ServiceResponse<KieContainerResourceList>, KieError>;

    /// Page through process definitions across all containers.
    async fn find_processes(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ProcessDefinition>, KieError>;

    /// Fetch one process definition.
    async fn get_process_definition(
        &self,
        container_id: &str,
        process_id: &str,
    ) -> Result<ProcessDefinition, KieError>;

    /// Start a process instance and return its id.
    async fn start_process(
        &self,
        container_id: &str,
        process_id: &str,
        variables: &Variables,
    ) -> Result<i64, KieError>;

    /// Page through tasks the user is a potential owner of.
    async fn find_tasks(
        &self,
        user: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<TaskSummary>, KieError>;

    async fn start_task(&self, container_id: &str, task_id: i64, user: &str)
        -> Result<(), KieError>;

    /// Complete a task, optionally with output data.
    async fn complete_task(
        &self,
        container_id: &str,
        task_id: i64,
        user: &str,
        params: Option<&Variables>,
    ) -> Result<(), KieError>;

    /// Submit a batch to the container's KIE session.
    async fn execute_commands(
        &self,
        container_id: &str,
        batch: &BatchExecutionCommand,
    ) -> Result<ServiceResponse<ExecutionResults>, KieError>;

    async fn abort_process_instance(
        &self,
        container_id: &str,
        process_instance_id: i64,
    ) -> Result<(), KieError>;

    async fn find_process_instance_by_id(
        &self,
        process_instance_id: i64,
    ) -> Result<ProcessInstance, KieError>;
}
