//! Smoke tests against a live KIE Server.
//!
//! These verify that the client can talk to a running server. They are
//! ignored by default because they need one; settings come from the
//! `KIE_SERVER_ITEST_*` environment variables:
//!
//! - `KIE_SERVER_ITEST_SERVER_URL`
//! - `KIE_SERVER_ITEST_USER`
//! - `KIE_SERVER_ITEST_PASSWORD`
//! - `KIE_SERVER_ITEST_CONTAINER`
//! - `KIE_SERVER_ITEST_PROCESS`
//!
//! ## Running
//!
//! ```bash
//! cargo test -p kie-e2e --test live_server -- --ignored
//! ```
//!
//! The server needs at least one deployed container, and the configured
//! process must create a task for the configured user.

use kie_client::{MarshallingFormat, RestKieClient};
use kie_harness::{run_matrix, Harness, HarnessSettings};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,kie_client=debug".into()),
        )
        .with_test_writer()
        .try_init();
}

#[tokio::test]
#[ignore = "requires a running KIE Server"]
async fn live_list_containers_for_every_supported_format() {
    init_tracing();
    let settings = HarnessSettings::from_env();
    let formats: Vec<MarshallingFormat> = MarshallingFormat::supported().collect();

    let outcomes = run_matrix(&settings, &formats, RestKieClient::new)
        .await
        .expect("list containers");

    for (format, containers) in &outcomes {
        tracing::info!(format = %format, count = containers.len(), "Containers listed");
        // Depends on what is deployed on the server.
        assert!(!containers.is_empty());
    }
}

#[tokio::test]
#[ignore = "requires a running KIE Server"]
async fn live_complete_interaction_json() {
    init_tracing();
    let harness = Harness::connect(HarnessSettings::from_env(), MarshallingFormat::Json)
        .expect("client");

    let report = harness.complete_interaction().await.expect("interaction");

    assert_eq!(report.final_instance.id, report.process_instance_id);
    assert!(
        report.final_instance.state.is_terminal(),
        "expected aborted instance, got {:?}",
        report.final_instance.state
    );

    println!("Live interaction completed:");
    println!("  Process instance: {}", report.process_instance_id);
    println!("  Task: {}", report.task_id);
    println!("  Rules: {:?}", report.rules.response_type);
}
