//! REST client tests against a mock HTTP server.

use std::time::Duration;

use kie_client::model::{KieContainerStatus, ProcessInstanceState, TaskStatus};
use kie_client::{
    BatchExecutionCommand, ClientConfig, FireAllRulesCommand, InsertObjectCommand, KieError,
    KieServices, RestKieClient, Variables,
};
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER: &str = "yoda";
const PASSWORD: &str = "usetheforce123@";

async fn client_for(server: &MockServer) -> RestKieClient {
    let config = ClientConfig::rest(format!("{}/server", server.uri()), USER, PASSWORD)
        .with_timeout(Duration::from_secs(5));
    RestKieClient::new(&config).expect("client")
}

#[tokio::test]
async fn list_containers_sends_auth_and_format_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/containers"))
        .and(basic_auth(USER, PASSWORD))
        .and(header("accept", "application/json"))
        .and(header("x-kie-contenttype", "JSON"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "SUCCESS",
            "msg": "List of created containers",
            "result": {
                "kie-containers": {
                    "kie-container": [{
                        "container-id": "evaluation",
                        "release-id": {
                            "group-id": "org.jbpm",
                            "artifact-id": "evaluation",
                            "version": "1.0"
                        },
                        "status": "STARTED"
                    }]
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let response = client.list_containers().await.unwrap();

    assert!(response.is_success());
    let list = response.result.expect("result");
    assert_eq!(list.containers().len(), 1);
    assert_eq!(list.containers()[0].status, KieContainerStatus::Started);
}

#[tokio::test]
async fn find_processes_passes_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/queries/processes/definitions"))
        .and(query_param("page", "0"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "processes": [
                { "process-id": "evaluation", "container-id": "evaluation", "dynamic": false },
                { "process-id": "hiring", "container-id": "hr" }
            ]
        })))
        .mount(&server)
        .await;

    let processes = client_for(&server).await.find_processes(0, 10).await.unwrap();
    let ids: Vec<_> = processes.iter().map(|p| p.process_id.as_str()).collect();
    assert_eq!(ids, ["evaluation", "hiring"]);
}

#[tokio::test]
async fn start_process_posts_variables_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/server/containers/evaluation/processes/evaluation/instances"))
        .and(body_json(json!({ "employee": "yoda" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!(42)))
        .expect(1)
        .mount(&server)
        .await;

    let mut variables = Variables::new();
    variables.insert("employee".to_string(), json!("yoda"));

    let id = client_for(&server)
        .await
        .start_process("evaluation", "evaluation", &variables)
        .await
        .unwrap();
    assert_eq!(id, 42);
}

#[tokio::test]
async fn find_tasks_queries_potential_owner() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/queries/tasks/instances/pot-owners"))
        .and(query_param("user", "yoda"))
        .and(query_param("page", "0"))
        .and(query_param("pageSize", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "task-summary": [
                { "task-id": 7, "task-name": "Self Evaluation", "task-status": "Reserved" },
                { "task-id": 3, "task-name": "PM Evaluation", "task-status": "Ready" }
            ]
        })))
        .mount(&server)
        .await;

    let tasks = client_for(&server).await.find_tasks("yoda", 0, 10).await.unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, 7);
    assert_eq!(tasks[1].status, TaskStatus::Ready);
}

#[tokio::test]
async fn task_transitions_use_put_with_user() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/server/containers/evaluation/tasks/7/states/started"))
        .and(query_param("user", "yoda"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/server/containers/evaluation/tasks/7/states/completed"))
        .and(query_param("user", "yoda"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.start_task("evaluation", 7, "yoda").await.unwrap();
    client.complete_task("evaluation", 7, "yoda", None).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let completed = requests
        .iter()
        .find(|r| r.url.path().ends_with("/states/completed"))
        .expect("completion request");
    assert!(completed.body.is_empty());
}

#[tokio::test]
async fn complete_task_sends_output_data() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/server/containers/evaluation/tasks/7/states/completed"))
        .and(query_param("user", "yoda"))
        .and(body_json(json!({ "approved": true })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = Variables::new();
    params.insert("approved".to_string(), json!(true));

    client_for(&server)
        .await
        .complete_task("evaluation", 7, "yoda", Some(&params))
        .await
        .unwrap();
}

#[tokio::test]
async fn execute_commands_posts_batch() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/server/containers/instances/evaluation"))
        .and(body_json(json!({
            "lookup": "defaultKieSession",
            "commands": [
                { "insert": {
                    "object": "john",
                    "out-identifier": "person",
                    "return-object": true,
                    "entry-point": "DEFAULT"
                } },
                { "fire-all-rules": { "max": -1 } }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "SUCCESS",
            "msg": "Container evaluation successfully called.",
            "result": {
                "execution-results": {
                    "results": [{ "key": "person", "value": "john" }],
                    "facts": []
                }
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut batch = BatchExecutionCommand::default().with_lookup("defaultKieSession");
    batch.push(InsertObjectCommand::new("john").with_out_identifier("person"));
    batch.push(FireAllRulesCommand::default());

    let response = client_for(&server)
        .await
        .execute_commands("evaluation", &batch)
        .await
        .unwrap();
    assert!(response.is_success());
    assert_eq!(response.result.unwrap().value("person"), Some(&json!("john")));
}

#[tokio::test]
async fn abort_then_query_instance() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/server/containers/evaluation/processes/instances/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/server/queries/processes/instances/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "process-instance-id": 42,
            "process-id": "evaluation",
            "process-instance-state": 3,
            "container-id": "evaluation"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    client.abort_process_instance("evaluation", 42).await.unwrap();
    let instance = client.find_process_instance_by_id(42).await.unwrap();
    assert_eq!(instance.state, ProcessInstanceState::Aborted);
}

#[rstest]
#[case(404, "Could not find process definition with id missing")]
#[case(500, "Unexpected error during processing: boom")]
#[tokio::test]
async fn error_statuses_map_to_api_errors(#[case] status: u16, #[case] body: &str) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/containers/evaluation/processes/definitions/missing"))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .get_process_definition("evaluation", "missing")
        .await
        .unwrap_err();
    match err {
        KieError::Api { status: got, message } => {
            assert_eq!(got, status);
            assert_eq!(message, body);
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn unauthorized_is_reported_distinctly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/containers"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).await.list_containers().await.unwrap_err();
    assert!(matches!(err, KieError::Unauthorized));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/server/queries/processes/instances/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<process-instance/>"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .await
        .find_process_instance_by_id(1)
        .await
        .unwrap_err();
    assert!(matches!(err, KieError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let config = ClientConfig::rest("http://127.0.0.1:9/server", USER, PASSWORD)
        .with_timeout(Duration::from_secs(2));
    let client = RestKieClient::new(&config).unwrap();
    let err = client.list_containers().await.unwrap_err();
    assert!(matches!(err, KieError::Transport(_)));
}
