// tests/http_client.rs

mod common;
use crate::common::{id, init_tracing};

use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskgraph_explorer::api::client::{
    fetch_snapshot, GraphSource, HttpGraphSource, ALL_VERSIONS_PATH, TASK_GRAPH_PATH,
};
use taskgraph_explorer::dag::TaskGraph;
use taskgraph_explorer::errors::ExplorerError;
use taskgraph_explorer::types::TaskType;

fn task_graph_body() -> serde_json::Value {
    json!({
        "root_tasks": [{"path": "exp", "name": "plots"}],
        "tasks": [
            {"identifier": {"path": "exp", "name": "bench"}, "deps": [], "task_type": "run_experiment"},
            {
                "identifier": {"path": "exp", "name": "plots"},
                "deps": [{"path": "exp", "name": "bench"}],
                "task_type": "combine"
            }
        ]
    })
}

fn versions_body() -> serde_json::Value {
    json!([
        {
            "identifier": {"path": "exp", "name": "bench"},
            "versions": [
                {"timestamp": 1700000000, "commit_hash": "abc123", "has_uncommitted_changes": false},
                {"timestamp": 1700000500, "commit_hash": null, "has_uncommitted_changes": true}
            ]
        }
    ])
}

async fn mount(server: &MockServer, route: &str, status: u16, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn snapshot_joins_both_endpoints() {
    init_tracing();
    let server = MockServer::start().await;
    mount(&server, TASK_GRAPH_PATH, 200, task_graph_body()).await;
    mount(&server, ALL_VERSIONS_PATH, 200, versions_body()).await;

    let source = HttpGraphSource::new(&server.uri()).unwrap();
    let snapshot = fetch_snapshot(&source).await.unwrap();

    assert_eq!(snapshot.task_graph.tasks.len(), 2);
    assert_eq!(snapshot.versions.len(), 1);
    assert_eq!(snapshot.versions[0].versions.len(), 2);
    assert_eq!(snapshot.versions[0].versions[1].commit_hash, None);

    let graph = TaskGraph::from_raw(&snapshot.task_graph).unwrap();
    let plots = graph.get(&"//exp:plots".parse().unwrap()).unwrap();
    assert_eq!(plots.task_type, TaskType::Combine);
    assert_eq!(graph.roots().len(), 1);
    assert!(!graph.contains(&id("plots")));
}

#[tokio::test]
async fn failing_versions_endpoint_fails_the_whole_fetch() {
    init_tracing();
    let server = MockServer::start().await;
    mount(&server, TASK_GRAPH_PATH, 200, task_graph_body()).await;
    mount(&server, ALL_VERSIONS_PATH, 500, json!({"error": "boom"})).await;

    let source = HttpGraphSource::new(&server.uri()).unwrap();
    let err = fetch_snapshot(&source).await.unwrap_err();

    match err {
        ExplorerError::Fetch(msg) => assert!(msg.contains("500"), "message: {msg}"),
        other => panic!("expected a fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_body_is_an_error() {
    init_tracing();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(TASK_GRAPH_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let source = HttpGraphSource::new(&server.uri()).unwrap();
    assert!(source.task_graph().await.is_err());
}

#[tokio::test]
async fn unreachable_server_is_an_error() {
    init_tracing();
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let source = HttpGraphSource::new(&uri).unwrap();
    assert!(matches!(
        source.task_graph().await,
        Err(ExplorerError::HttpError(_))
    ));
}
