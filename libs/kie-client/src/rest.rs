//! HTTP implementation of [`KieServices`].

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, warn};

use crate::command::BatchExecutionCommand;
use crate::config::ClientConfig;
use crate::error::KieError;
use crate::marshalling::CONTENT_TYPE_HEADER;
use crate::model::{
    ContainerListEnvelope, ExecutionResults, ExecutionResultsEnvelope, KieContainerResourceList,
    ProcessDefinition, ProcessDefinitionList, ProcessInstance, ServiceResponse, TaskSummary,
    TaskSummaryList,
};
use crate::services::{KieServices, Variables};

/// REST client for a KIE Server.
#[derive(Debug, Clone)]
pub struct RestKieClient {
    client: reqwest::Client,
    base_url: String,
    user: String,
    password: String,
}

impl RestKieClient {
    /// Create a client from configuration.
    ///
    /// Fails for marshalling formats without a codec in this crate.
    pub fn new(config: &ClientConfig) -> Result<Self, KieError> {
        let format = config.marshalling_format;
        if !format.has_codec() {
            return Err(KieError::UnsupportedMarshalling(format));
        }
        if config.server_url.is_empty() {
            return Err(KieError::InvalidConfig("server URL is empty".to_string()));
        }

        let mut headers = HeaderMap::new();
        let media_type = HeaderValue::from_static(format.media_type());
        headers.insert(ACCEPT, media_type.clone());
        headers.insert(CONTENT_TYPE, media_type);
        headers.insert(
            CONTENT_TYPE_HEADER,
            HeaderValue::from_static(format.wire_name()),
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: config.server_url.trim_end_matches('/').to_string(),
            user: config.user.clone(),
            password: config.password.clone(),
        })
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        debug!(method = %method, path = %path, "KIE Server request");
        self.client
            .request(method, self.url(path))
            .basic_auth(&self.user, Some(&self.password))
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, KieError> {
        let mut request = self.request(Method::GET, path);
        if !query.is_empty() {
            request = request.query(query);
        }
        let response = request.send().await?;
        self.handle_response(response).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, KieError> {
        let response = self.request(Method::POST, path).json(body).send().await?;
        self.handle_response(response).await
    }

    /// Decode a successful response body or map the error status.
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, KieError> {
        let response = self.check_status(response).await?;
        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(KieError::from)
    }

    async fn check_status(
        &self,
        response: reqwest::Response,
    ) -> Result<reqwest::Response, KieError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(status = %status, body = %body, "KIE Server returned an error");

        if status == StatusCode::UNAUTHORIZED {
            return Err(KieError::Unauthorized);
        }
        Err(KieError::api(status.as_u16(), body))
    }
}

#[async_trait]
impl KieServices for RestKieClient {
    async fn list_containers(&self) -> Result<ServiceResponse<KieContainerResourceList>, KieError> {
        let response: ServiceResponse<ContainerListEnvelope> = self.get("/containers", &[]).await?;
        Ok(response.map(|envelope| envelope.kie_containers))
    }

    async fn find_processes(
        &self,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<ProcessDefinition>, KieError> {
        let list: ProcessDefinitionList = self
            .get(
                "/queries/processes/definitions",
                &[("page", page.to_string()), ("pageSize", page_size.to_string())],
            )
            .await?;
        Ok(list.processes)
    }

    async fn get_process_definition(
        &self,
        container_id: &str,
        process_id: &str,
    ) -> Result<ProcessDefinition, KieError> {
        self.get(
            &format!("/containers/{container_id}/processes/definitions/{process_id}"),
            &[],
        )
        .await
    }

    async fn start_process(
        &self,
        container_id: &str,
        process_id: &str,
        variables: &Variables,
    ) -> Result<i64, KieError> {
        self.post(
            &format!("/containers/{container_id}/processes/{process_id}/instances"),
            variables,
        )
        .await
    }

    async fn find_tasks(
        &self,
        user: &str,
        page: u32,
        page_size: u32,
    ) -> Result<Vec<TaskSummary>, KieError> {
        let list: TaskSummaryList = self
            .get(
                "/queries/tasks/instances/pot-owners",
                &[
                    ("user", user.to_string()),
                    ("page", page.to_string()),
                    ("pageSize", page_size.to_string()),
                ],
            )
            .await?;
        Ok(list.tasks)
    }

    async fn start_task(
        &self,
        container_id: &str,
        task_id: i64,
        user: &str,
    ) -> Result<(), KieError> {
        let response = self
            .request(
                Method::PUT,
                &format!("/containers/{container_id}/tasks/{task_id}/states/started"),
            )
            .query(&[("user", user)])
            .send()
            .await?;
        self.check_status(response).await.map(|_| ())
    }

    async fn complete_task(
        &self,
        container_id: &str,
        task_id: i64,
        user: &str,
        params: Option<&Variables>,
    ) -> Result<(), KieError> {
        let mut request = self
            .request(
                Method::PUT,
                &format!("/containers/{container_id}/tasks/{task_id}/states/completed"),
            )
            .query(&[("user", user)]);
        if let Some(params) = params {
            request = request.json(params);
        }
        let response = request.send().await?;
        self.check_status(response).await.map(|_| ())
    }

    async fn execute_commands(
        &self,
        container_id: &str,
        batch: &BatchExecutionCommand,
    ) -> Result<ServiceResponse<ExecutionResults>, KieError> {
        let response: ServiceResponse<ExecutionResultsEnvelope> = self
            .post(&format!("/containers/instances/{container_id}"), batch)
            .await?;
        Ok(response.map(|envelope| envelope.execution_results))
    }

    async fn abort_process_instance(
        &self,
        container_id: &str,
        process_instance_id: i64,
    ) -> Result<(), KieError> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/containers/{container_id}/processes/instances/{process_instance_id}"),
            )
            .send()
            .await?;
        self.check_status(response).await.map(|_| ())
    }

    async fn find_process_instance_by_id(
        &self,
        process_instance_id: i64,
    ) -> Result<ProcessInstance, KieError> {
        self.get(
            &format!("/queries/processes/instances/{process_instance_id}"),
            &[],
        )
        .await
    }
}
