//! Harness scenarios.
//!
//! Two checks run against a [`KieServices`] handle:
//!
//! - [`Harness::list_containers_check`]: the server answers and has at least
//!   one container deployed.
//! - [`Harness::complete_interaction`]: one ordered pass through process,
//!   task and rule operations.
//!
//! Failures propagate immediately. Remote state created before a failure
//! (e.g. a started process instance) is left as is.

use kie_client::model::{
    ExecutionResults, KieContainerResource, ProcessDefinition, ProcessInstance, ServiceResponse,
};
use kie_client::{
    BatchExecutionCommand, ClientConfig, FireAllRulesCommand, InsertObjectCommand, KieError,
    KieServices, MarshallingFormat, RestKieClient, Variables,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::error::{ensure, HarnessError};
use crate::settings::HarnessSettings;

/// Page size for process and task queries.
pub const PAGE_SIZE: u32 = 10;

/// Process variable carrying the configured user.
pub const EMPLOYEE_VARIABLE: &str = "employee";

/// KIE session the rule batch is bound to.
pub const SESSION_LOOKUP: &str = "defaultKieSession";

/// Out identifier of the inserted fact.
pub const OUT_IDENTIFIER: &str = "person";

/// Fact inserted by the rule batch.
pub const INSERTED_OBJECT: &str = "john";

/// The rule batch: insert one fact, then fire all rules.
pub fn rule_batch() -> BatchExecutionCommand {
    let mut batch = BatchExecutionCommand::default().with_lookup(SESSION_LOOKUP);
    batch.push(InsertObjectCommand::new(INSERTED_OBJECT).with_out_identifier(OUT_IDENTIFIER));
    batch.push(FireAllRulesCommand::default());
    batch
}

/// What each step of [`Harness::complete_interaction`] observed.
#[derive(Debug, Clone, Serialize)]
pub struct InteractionReport {
    pub processes: Vec<ProcessDefinition>,
    pub definition: ProcessDefinition,
    pub process_instance_id: i64,
    pub task_id: i64,
    pub rules: ServiceResponse<ExecutionResults>,
    pub final_instance: ProcessInstance,
}

/// Runs the smoke checks against one service handle.
pub struct Harness<S> {
    settings: HarnessSettings,
    services: S,
}

impl Harness<RestKieClient> {
    /// Harness over a REST client for the given format.
    pub fn connect(
        settings: HarnessSettings,
        format: MarshallingFormat,
    ) -> Result<Self, HarnessError> {
        let client = RestKieClient::new(&settings.client_config(format))?;
        Ok(Self::new(settings, client))
    }
}

impl<S: KieServices> Harness<S> {
    pub fn new(settings: HarnessSettings, services: S) -> Self {
        Self { settings, services }
    }

    pub fn settings(&self) -> &HarnessSettings {
        &self.settings
    }

    pub fn services(&self) -> &S {
        &self.services
    }

    /// The server lists a non-empty set of containers.
    ///
    /// Needs at least one deployed container; an empty server fails.
    pub async fn list_containers_check(&self) -> Result<Vec<KieContainerResource>, HarnessError> {
        let response = self.services.list_containers().await?;

        ensure(
            response.is_success(),
            format!(
                "expected SUCCESS listing containers, got {:?}: {}",
                response.response_type,
                response.msg.as_deref().unwrap_or("")
            ),
        )?;
        let containers = response
            .result
            .ok_or_else(|| HarnessError::Assertion("container listing has no result".into()))?
            .into_containers();

        let ids: Vec<&str> = containers.iter().map(|c| c.container_id.as_str()).collect();
        info!(containers = ?ids, "Found containers");

        ensure(!containers.is_empty(), "expected at least one container")?;
        Ok(containers)
    }

    /// Query processes, start one, complete its first task, fire rules,
    /// abort the instance and read it back.
    pub async fn complete_interaction(&self) -> Result<InteractionReport, HarnessError> {
        let settings = &self.settings;
        let container_id = settings.container_id.as_str();
        let process_id = settings.process_id.as_str();
        let user = settings.user.as_str();

        let processes = self.services.find_processes(0, PAGE_SIZE).await?;
        info!(processes = ?processes, "Available processes");

        let definition = self
            .services
            .get_process_definition(container_id, process_id)
            .await?;
        info!(definition = ?definition, "Definition details");

        let mut variables = Variables::new();
        variables.insert(EMPLOYEE_VARIABLE.to_string(), Value::from(user));
        let process_instance_id = self
            .services
            .start_process(container_id, process_id, &variables)
            .await?;
        info!(process_instance_id, "Process instance started");

        let tasks = self.services.find_tasks(user, 0, PAGE_SIZE).await?;
        info!(tasks = ?tasks, "Tasks");

        // No ordering or filter: the first entry is the one worked on.
        let task_id = tasks
            .first()
            .map(|task| task.id)
            .ok_or_else(|| HarnessError::NoTasks {
                user: user.to_string(),
            })?;

        self.services.start_task(container_id, task_id, user).await?;
        self.services
            .complete_task(container_id, task_id, user, None)
            .await?;
        info!(task_id, "Task completed");

        let batch = rule_batch();
        let rules = self.services.execute_commands(container_id, &batch).await?;
        info!(response_type = ?rules.response_type, "Rules executed");

        self.services
            .abort_process_instance(container_id, process_instance_id)
            .await?;

        let final_instance = self
            .services
            .find_process_instance_by_id(process_instance_id)
            .await?;
        info!(process_instance = ?final_instance, "Process instance");

        Ok(InteractionReport {
            processes,
            definition,
            process_instance_id,
            task_id,
            rules,
            final_instance,
        })
    }
}

/// Run the list-containers check once per format.
///
/// `connect` builds the service handle for each format's client
/// configuration; the first failure stops the run.
pub async fn run_matrix<S, F>(
    settings: &HarnessSettings,
    formats: &[MarshallingFormat],
    connect: F,
) -> Result<Vec<(MarshallingFormat, Vec<KieContainerResource>)>, HarnessError>
where
    S: KieServices,
    F: Fn(&ClientConfig) -> Result<S, KieError>,
{
    let mut outcomes = Vec::with_capacity(formats.len());
    for &format in formats {
        info!(format = %format, "Listing containers");
        let services = connect(&settings.client_config(format))?;
        let harness = Harness::new(settings.clone(), services);
        outcomes.push((format, harness.list_containers_check().await?));
    }
    Ok(outcomes)
}
