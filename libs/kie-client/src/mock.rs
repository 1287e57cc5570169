//! In-memory stand-in for a KIE Server.
//!
//! Keeps just enough state to run the smoke scenario without a network:
//! containers, process definitions, instances, human tasks and the batches
//! submitted for rule execution.

use std::collections::BTreeMap;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::command::{BatchExecutionCommand, Command};
use crate::error::KieError;
use crate::model::{
    ExecutionResultItem, ExecutionResults, KieContainerResource, KieContainerResourceList,
    KieContainerStatus, KieDate, ProcessDefinition, ProcessInstance, ProcessInstanceState,
    ReleaseId, ServiceResponse, TaskStatus, TaskSummary,
};
use crate::services::{KieServices, Variables};

/// Process variable naming the user a started instance assigns its task to.
pub const TASK_OWNER_VARIABLE: &str = "employee";

/// Name given to tasks created by the stand-in.
pub const TASK_NAME: &str = "Self Evaluation";

#[derive(Debug, Default)]
struct ServerState {
    containers: Vec<KieContainerResource>,
    definitions: Vec<ProcessDefinition>,
    instances: BTreeMap<i64, ProcessInstance>,
    tasks: BTreeMap<i64, TaskSummary>,
    batches: Vec<(String, BatchExecutionCommand)>,
    completions: Vec<(i64, Option<Variables>)>,
    next_instance_id: i64,
    next_task_id: i64,
    next_fact_id: i64,
}

impl ServerState {
    fn container(&self, container_id: &str) -> Result<&KieContainerResource, KieError> {
        self.containers
            .iter()
            .find(|c| c.container_id == container_id)
            .ok_or_else(|| KieError::not_found(format!("container {container_id}")))
    }

    fn definition(
        &self,
        container_id: &str,
        process_id: &str,
    ) -> Result<&ProcessDefinition, KieError> {
        self.container(container_id)?;
        self.definitions
            .iter()
            .find(|d| d.process_id == process_id && d.container_id.as_deref() == Some(container_id))
            .ok_or_else(|| {
                KieError::not_found(format!(
                    "process definition {process_id} in container {container_id}"
                ))
            })
    }

    fn task_mut(&mut self, container_id: &str, task_id: i64) -> Result<&mut TaskSummary, KieError> {
        self.container(container_id)?;
        self.tasks
            .get_mut(&task_id)
            .filter(|t| t.container_id.as_deref() == Some(container_id))
            .ok_or_else(|| KieError::not_found(format!("task {task_id}")))
    }
}

/// A [`KieServices`] implementation that keeps all state in memory.
#[derive(Debug)]
pub struct InMemoryKieServer {
    state: Mutex<ServerState>,
    task_owner_variable: Option<String>,
}

impl InMemoryKieServer {
    /// Create an empty server with no containers.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(ServerState {
                next_instance_id: 1,
                next_task_id: 1,
                next_fact_id: 1,
                ..Default::default()
            }),
            task_owner_variable: Some(TASK_OWNER_VARIABLE.to_string()),
        }
    }

    /// Deploy a started container.
    pub fn with_container(mut self, container_id: &str) -> Self {
        let release = ReleaseId {
            group_id: "org.kie.smoke".to_string(),
            artifact_id: container_id.to_string(),
            version: "1.0.0".to_string(),
        };
        self.state
            .get_mut()
            .containers
            .push(KieContainerResource::started(container_id, release));
        self
    }

    /// Register a process definition, deploying its container if needed.
    pub fn with_process(mut self, container_id: &str, process_id: &str) -> Self {
        let known = self
            .state
            .get_mut()
            .containers
            .iter()
            .any(|c| c.container_id == container_id);
        if !known {
            self = self.with_container(container_id);
        }
        self.state
            .get_mut()
            .definitions
            .push(ProcessDefinition::new(container_id, process_id));
        self
    }

    /// Never create tasks when processes start.
    pub fn without_tasks(mut self) -> Self {
        self.task_owner_variable = None;
        self
    }

    /// Batches submitted so far, with the container they targeted.
    pub async fn submitted_batches(&self) -> Vec<(String, BatchExecutionCommand)> {
        self.state.lock().await.batches.clone()
    }

    /// Task completions so far, with the output data each one carried.
    pub async fn completed_tasks(&self) -> Vec<(i64, Option<Variables>)> {
        self.state.lock().await.completions.clone()
    }

    /// Current snapshot of a task.
    pub async fn task(&self, task_id: i64) -> Option<TaskSummary> {
        self.state.lock().await.tasks.get(&task_id).cloned()
    }
}

impl Default for InMemoryKieServer {
    fn default() -> Self {
        Self::new()
    }
}

fn is_open(status: TaskStatus) -> bool {
    matches!(
        status,
        TaskStatus::Created | TaskStatus::Ready | TaskStatus::Reserved | TaskStatus::InProgress
    )
}

fn paginate<T>(items: Vec<T>, page: u32, page_size: u32) -> Vec<T> {
    let skip = page as usize * page_size as usize;
    items.into_iter().skip(skip).take(page_size as usize).collect()
}

#[async_trait]
impl KieServices for InMemoryKieServer {
    async fn list_containers(&self) -> Result<ServiceResponse<KieContainerResourceList>, KieError> {
        let state = self.state.lock().await;
        debug!(count = state.containers.len(), "[MOCK] Listing containers");
        Ok(ServiceResponse::success(
            "List of created containers",
            KieContainerResourceList::new(state.containers.clone()),
        ))
    }

    async fn find_processes(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ProcessDefinition>, KieError> {
        let state = self.state.lock().await;
        Ok(paginate(state.definitions.clone(), page, page_size))
    }

    async fn get_process_definition(
        &self,
        container_id: &str,
        process_id: &str,
    ) -> Result<ProcessDefinition, KieError> {
        let state = self.state.lock().await;
        state.definition(container_id, process_id).cloned()
    }

    async fn start_process(
        &self,
        container_id: &str,
        process_id: &str,
        variables: &Variables,
    ) -> Result<i64, KieError> {
        let mut state = self.state.lock().await;
        let definition = state.definition(container_id, process_id)?.clone();

        let id = state.next_instance_id;
        state.next_instance_id += 1;
        state.instances.insert(
            id,
            ProcessInstance {
                id,
                process_id: definition.process_id.clone(),
                process_name: definition.process_name.clone(),
                process_version: definition.process_version.clone(),
                state: ProcessInstanceState::Active,
                container_id: Some(container_id.to_string()),
                initiator: None,
                start_date: Some(KieDate::now()),
                description: definition.process_name.clone(),
                correlation_key: Some(id.to_string()),
                parent_instance_id: Some(-1),
            },
        );
        info!(process_instance_id = id, process_id = %process_id, "[MOCK] Started process");

        let owner = self
            .task_owner_variable
            .as_deref()
            .and_then(|var| variables.get(var))
            .and_then(Value::as_str)
            .map(str::to_string);
        if let Some(owner) = owner {
            let task_id = state.next_task_id;
            state.next_task_id += 1;
            state.tasks.insert(
                task_id,
                TaskSummary {
                    id: task_id,
                    name: Some(TASK_NAME.to_string()),
                    subject: None,
                    description: Some(format!("Task for {owner}")),
                    status: TaskStatus::Ready,
                    priority: Some(0),
                    actual_owner: Some(owner.clone()),
                    created_by: Some(owner),
                    created_on: Some(KieDate::now()),
                    process_instance_id: Some(id),
                    process_id: Some(definition.process_id),
                    container_id: Some(container_id.to_string()),
                },
            );
            debug!(task_id, process_instance_id = id, "[MOCK] Created task");
        }

        Ok(id)
    }

    async fn find_tasks(
        &self,
        user: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<TaskSummary>, KieError> {
        let state = self.state.lock().await;
        let tasks = state
            .tasks
            .values()
            .filter(|t| t.actual_owner.as_deref() == Some(user) && is_open(t.status))
            .cloned()
            .collect();
        Ok(paginate(tasks, page, page_size))
    }

    async fn start_task(
        &self,
        container_id: &str,
        task_id: i64,
        user: &str,
    ) -> Result<(), KieError> {
        let mut state = self.state.lock().await;
        let task = state.task_mut(container_id, task_id)?;
        if task.actual_owner.as_deref() != Some(user) {
            return Err(KieError::api(
                403,
                format!("user {user} is not allowed to start task {task_id}"),
            ));
        }
        if !matches!(task.status, TaskStatus::Ready | TaskStatus::Reserved) {
            return Err(KieError::api(
                409,
                format!("task {task_id} cannot be started from {:?}", task.status),
            ));
        }
        task.status = TaskStatus::InProgress;
        info!(task_id, user = %user, "[MOCK] Started task");
        Ok(())
    }

    async fn complete_task(
        &self,
        container_id: &str,
        task_id: i64,
        user: &str,
        params: Option<&Variables>,
    ) -> Result<(), KieError> {
        let mut state = self.state.lock().await;
        let task = state.task_mut(container_id, task_id)?;
        if task.actual_owner.as_deref() != Some(user) {
            return Err(KieError::api(
                403,
                format!("user {user} is not allowed to complete task {task_id}"),
            ));
        }
        if task.status != TaskStatus::InProgress {
            return Err(KieError::api(
                409,
                format!("task {task_id} cannot be completed from {:?}", task.status),
            ));
        }
        task.status = TaskStatus::Completed;
        info!(
            task_id,
            user = %user,
            outputs = params.map(|p| p.len()).unwrap_or(0),
            "[MOCK] Completed task"
        );
        state.completions.push((task_id, params.cloned()));
        Ok(())
    }

    async fn execute_commands(
        &self,
        container_id: &str,
        batch: &BatchExecutionCommand,
    ) -> Result<ServiceResponse<ExecutionResults>, KieError> {
        let mut state = self.state.lock().await;
        let started = state
            .container(container_id)
            .map(|c| c.status == KieContainerStatus::Started)
            .unwrap_or(false);
        if !started {
            return Ok(ServiceResponse::failure(format!(
                "Container {container_id} is not instantiated."
            )));
        }

        state.batches.push((container_id.to_string(), batch.clone()));

        let mut results = ExecutionResults::default();
        let mut inserted = 0;
        for command in &batch.commands {
            match command {
                Command::Insert(insert) => {
                    let fact_id = state.next_fact_id;
                    state.next_fact_id += 1;
                    inserted += 1;
                    if let Some(key) = &insert.out_identifier {
                        if insert.return_object {
                            results.results.push(ExecutionResultItem {
                                key: key.clone(),
                                value: insert.object.clone(),
                            });
                        }
                        let external_form = format!(
                            "0:{fact_id}:{fact_id}:0:{fact_id}:null:NON_TRAIT:java.lang.String"
                        );
                        results.facts.push(ExecutionResultItem {
                            key: key.clone(),
                            value: json!({
                                "org.drools.core.common.DefaultFactHandle": {
                                    "external-form": external_form
                                }
                            }),
                        });
                    }
                }
                Command::FireAllRules(fire) => {
                    if let Some(key) = &fire.out_identifier {
                        results.results.push(ExecutionResultItem {
                            key: key.clone(),
                            value: json!(0),
                        });
                    }
                }
            }
        }
        info!(
            container_id = %container_id,
            commands = batch.len(),
            inserted,
            "[MOCK] Executed batch"
        );

        Ok(ServiceResponse::success("Container successfully called.", results))
    }

    async fn abort_process_instance(
        &self,
        container_id: &str,
        process_instance_id: i64,
    ) -> Result<(), KieError> {
        let mut state = self.state.lock().await;
        state.container(container_id)?;
        let instance = state
            .instances
            .get_mut(&process_instance_id)
            .filter(|i| i.container_id.as_deref() == Some(container_id) && !i.state.is_terminal())
            .ok_or_else(|| {
                KieError::not_found(format!("active process instance {process_instance_id}"))
            })?;
        instance.state = ProcessInstanceState::Aborted;

        for task in state
            .tasks
            .values_mut()
            .filter(|t| t.process_instance_id == Some(process_instance_id) && is_open(t.status))
        {
            task.status = TaskStatus::Exited;
        }
        info!(process_instance_id, "[MOCK] Aborted process instance");
        Ok(())
    }

    async fn find_process_instance_by_id(
        &self,
        process_instance_id: i64,
    ) -> Result<ProcessInstance, KieError> {
        let state = self.state.lock().await;
        state
            .instances
            .get(&process_instance_id)
            .cloned()
            .ok_or_else(|| KieError::not_found(format!("process instance {process_instance_id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{FireAllRulesCommand, InsertObjectCommand};

    fn server() -> InMemoryKieServer {
        InMemoryKieServer::new().with_process("evaluation", "evaluation")
    }

    fn employee(user: &str) -> Variables {
        let mut vars = Variables::new();
        vars.insert(TASK_OWNER_VARIABLE.to_string(), json!(user));
        vars
    }

    #[tokio::test]
    async fn test_with_process_deploys_container_once() {
        let server = server().with_process("evaluation", "other");
        let containers = server.list_containers().await.unwrap();
        assert!(containers.is_success());
        assert_eq!(containers.result.unwrap().containers().len(), 1);
        assert_eq!(server.find_processes(0, 10).await.unwrap().len(), 2);
        assert_eq!(server.find_processes(1, 1).await.unwrap()[0].process_id, "other");
    }

    #[tokio::test]
    async fn test_start_process_creates_task_for_employee() {
        let server = server();
        let id = server
            .start_process("evaluation", "evaluation", &employee("yoda"))
            .await
            .unwrap();

        let tasks = server.find_tasks("yoda", 0, 10).await.unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].process_instance_id, Some(id));
        assert!(server.find_tasks("luke", 0, 10).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_task_lifecycle_requires_start_before_complete() {
        let server = server();
        server
            .start_process("evaluation", "evaluation", &employee("yoda"))
            .await
            .unwrap();
        let task_id = server.find_tasks("yoda", 0, 10).await.unwrap()[0].id;

        let err = server
            .complete_task("evaluation", task_id, "yoda", None)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(409));

        let err = server
            .start_task("evaluation", task_id, "luke")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(403));

        server.start_task("evaluation", task_id, "yoda").await.unwrap();
        server
            .complete_task("evaluation", task_id, "yoda", None)
            .await
            .unwrap();
        assert_eq!(server.task(task_id).await.unwrap().status, TaskStatus::Completed);
        assert!(server.find_tasks("yoda", 0, 10).await.unwrap().is_empty());
        assert_eq!(server.completed_tasks().await, vec![(task_id, None)]);
    }

    #[tokio::test]
    async fn test_abort_marks_instance_and_exits_tasks() {
        let server = server();
        let id = server
            .start_process("evaluation", "evaluation", &employee("yoda"))
            .await
            .unwrap();

        server.abort_process_instance("evaluation", id).await.unwrap();

        let instance = server.find_process_instance_by_id(id).await.unwrap();
        assert_eq!(instance.state, ProcessInstanceState::Aborted);
        assert_eq!(server.task(1).await.unwrap().status, TaskStatus::Exited);

        let err = server
            .abort_process_instance("evaluation", id)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_execute_commands_echoes_inserted_objects() {
        let server = server();
        let mut batch = BatchExecutionCommand::default().with_lookup("defaultKieSession");
        batch.push(InsertObjectCommand::new("john").with_out_identifier("person"));
        batch.push(FireAllRulesCommand::default());

        let response = server.execute_commands("evaluation", &batch).await.unwrap();
        assert!(response.is_success());
        let results = response.result.unwrap();
        assert_eq!(results.value("person"), Some(&json!("john")));
        assert_eq!(results.facts.len(), 1);

        let batches = server.submitted_batches().await;
        assert_eq!(batches, vec![("evaluation".to_string(), batch)]);
    }

    #[tokio::test]
    async fn test_execute_commands_on_unknown_container_fails_in_response() {
        let server = server();
        let response = server
            .execute_commands("missing", &BatchExecutionCommand::default())
            .await
            .unwrap();
        assert!(!response.is_success());
        assert!(server.submitted_batches().await.is_empty());
    }

    #[tokio::test]
    async fn test_unknown_definition_is_not_found() {
        let err = server()
            .get_process_definition("evaluation", "missing")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }
}
