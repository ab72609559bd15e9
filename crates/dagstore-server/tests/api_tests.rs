use std::sync::Arc;

use axum::{
    body::{self, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use chrono::Utc;
use mockall::predicate::*;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

use dagstore_core::{Graph, GraphId, GraphRepository, NodeRemoval};
use dagstore_server::{api::build_router, DagStoreServer, ServerConfig};
use dagstore_state_inmemory::InMemoryStateStoreProvider;
use dagstore_test_utils::data_generators::{
    bad_name_graph, cyclic_graph, dangling_edge_graph, duplicate_node_graph, graph_json,
    isolated_node_graph, rejected_graphs, sample_dag, sample_dag_json,
};
use dagstore_test_utils::mocks::create_unavailable_repository;
use dagstore_test_utils::MockGraphRepository;

fn app_with(repo: Arc<dyn GraphRepository>) -> Router {
    build_router(Arc::new(DagStoreServer::new(ServerConfig::default(), repo)))
}

fn app() -> Router {
    app_with(InMemoryStateStoreProvider::new().create_repository())
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn send_raw(app: &Router, uri: &str, content_type: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn create_sample(app: &Router) -> i64 {
    let (status, body) = send(app, Method::POST, "/api/graph", Some(sample_dag_json())).await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

fn error_code(body: &Value) -> &str {
    body["errorDetails"]["errorCode"].as_str().unwrap_or_default()
}

#[tokio::test]
async fn test_create_and_read_graph() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/graph", Some(sample_dag_json())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({ "id": 1 }));

    let (status, body) = send(&app, Method::GET, "/api/graph/1/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], json!(1));
    assert_eq!(body["nodes"], sample_dag_json()["nodes"]);
    assert_eq!(body["edges"], sample_dag_json()["edges"]);
    assert!(body["created_at"].is_string());

    let (status, without_slash) = send(&app, Method::GET, "/api/graph/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(without_slash, body);
}

#[tokio::test]
async fn test_create_with_trailing_slash() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/graph/", Some(sample_dag_json())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert!(body["id"].is_i64());
}

#[tokio::test]
async fn test_adjacency_lists() {
    let app = app();
    let id = create_sample(&app).await;

    let (status, body) = send(&app, Method::GET, &format!("/api/graph/{}/adjacency_list", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "adjacency_list": { "a": ["c"], "b": ["c"], "c": ["d"], "d": [] } })
    );

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/api/graph/{}/reverse_adjacency_list", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({ "adjacency_list": { "a": [], "b": [], "c": ["a", "b"], "d": ["c"] } })
    );
}

#[tokio::test]
async fn test_reverse_adjacency_lists_predecessors_in_edge_order() {
    let app = app();
    let submission = json!({
        "nodes": [{ "name": "c" }, { "name": "b" }, { "name": "a" }],
        "edges": [{ "source": "b", "target": "c" }, { "source": "a", "target": "c" }],
    });
    let (status, created) = send(&app, Method::POST, "/api/graph", Some(submission)).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_i64().unwrap();

    let (_, body) = send(&app, Method::GET, &format!("/api/graph/{}/reverse_adjacency_list", id), None).await;
    assert_eq!(body["adjacency_list"]["c"], json!(["b", "a"]));
}

#[tokio::test]
async fn test_invalid_node_name_is_rejected() {
    let app = app();
    let (status, body) = send(&app, Method::POST, "/api/graph", Some(graph_json(&bad_name_graph()))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "ERR_GRAPH_INVALID_NODE_NAME");
    assert_eq!(body["error"], body["errorDetails"]["errorMessage"]);
}

#[tokio::test]
async fn test_structural_errors_are_rejected() {
    let app = app();

    for graph in [dangling_edge_graph(), isolated_node_graph()] {
        let (status, body) = send(&app, Method::POST, "/api/graph", Some(graph_json(&graph))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{:?}", graph);
        assert_eq!(error_code(&body), "ERR_GRAPH_INVALID_STRUCTURE");
    }

    let (status, body) = send(&app, Method::POST, "/api/graph", Some(graph_json(&duplicate_node_graph()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "ERR_GRAPH_INVALID_NODE_NAME");

    let (status, body) = send(&app, Method::POST, "/api/graph", Some(json!({ "nodes": [], "edges": [] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "ERR_GRAPH_INVALID_STRUCTURE");
    assert!(body["error"].as_str().unwrap_or_default().contains("empty graphs are never stored"));
}

#[tokio::test]
async fn test_cycle_is_rejected_and_not_persisted() {
    let app = app();

    let (status, body) = send(&app, Method::POST, "/api/graph", Some(graph_json(&cyclic_graph()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_code(&body), "ERR_GRAPH_NOT_A_DAG");

    // The first id was never handed out
    let (status, _) = send(&app, Method::GET, "/api/graph/1/", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(create_sample(&app).await, 1);
}

#[tokio::test]
async fn test_malformed_requests_are_unprocessable() {
    let app = app();

    let bodies = [
        json!({ "nodes": [{ "name": "a" }] }),
        json!({ "nodes": [{ "name": 1 }], "edges": [] }),
        json!({ "nodes": "a,b", "edges": [] }),
        json!({ "nodes": [{ "label": "a" }], "edges": [] }),
        json!([1, 2, 3]),
    ];
    for body in bodies {
        let (status, response) = send(&app, Method::POST, "/api/graph", Some(body.clone())).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", body);
        assert_eq!(error_code(&response), "ERR_MALFORMED_REQUEST");
    }

    let (status, _) = send_raw(&app, "/api/graph", "application/json", "{\"nodes\": [").await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, _) = send_raw(&app, "/api/graph", "text/plain", &sample_dag_json().to_string()).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_non_integer_id_is_unprocessable() {
    let app = app();

    for uri in [
        "/api/graph/abc/",
        "/api/graph/1.5/adjacency_list",
        "/api/graph/x/reverse_adjacency_list",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{}", uri);
        assert_eq!(error_code(&body), "ERR_MALFORMED_REQUEST");
    }

    let (status, _) = send(&app, Method::DELETE, "/api/graph/abc/node/a", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_missing_graph_is_not_found() {
    let app = app();

    for uri in [
        "/api/graph/5/",
        "/api/graph/5/adjacency_list",
        "/api/graph/5/reverse_adjacency_list",
    ] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["error"], json!("Graph entity with id 5 not found"));
        assert_eq!(error_code(&body), "ERR_NOT_FOUND_GRAPH");
    }

    let (status, body) = send(&app, Method::DELETE, "/api/graph/-1/node/a", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], json!("Graph entity with id -1 not found"));
}

#[tokio::test]
async fn test_delete_node_cascades() {
    let app = app();
    let id = create_sample(&app).await;

    let (status, body) = send(&app, Method::DELETE, &format!("/api/graph/{}/node/b", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, graph) = send(&app, Method::GET, &format!("/api/graph/{}/", id), None).await;
    assert_eq!(graph["nodes"], json!([{ "name": "a" }, { "name": "c" }, { "name": "d" }]));
    assert_eq!(
        graph["edges"],
        json!([{ "source": "a", "target": "c" }, { "source": "c", "target": "d" }])
    );

    let (_, reverse) = send(&app, Method::GET, &format!("/api/graph/{}/reverse_adjacency_list", id), None).await;
    assert_eq!(reverse["adjacency_list"]["c"], json!(["a"]));

    let (status, body) = send(&app, Method::DELETE, &format!("/api/graph/{}/node/b", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body["error"],
        json!(format!("In graph with id {}, node with name b not found", id))
    );
    assert_eq!(error_code(&body), "ERR_NOT_FOUND_NODE");
}

#[tokio::test]
async fn test_deleting_last_node_removes_graph() {
    let app = app();
    let id = create_sample(&app).await;

    for name in ["a", "b", "c", "d"] {
        let (status, _) = send(&app, Method::DELETE, &format!("/api/graph/{}/node/{}/", id, name), None).await;
        assert_eq!(status, StatusCode::NO_CONTENT, "deleting {}", name);
    }

    let (status, _) = send(&app, Method::GET, &format!("/api/graph/{}/", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_health_check() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("UP"));
    assert_eq!(body["dependencies"]["storage"]["status"], json!("UP"));
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_storage_failure_maps_to_server_errors() {
    let app = app_with(Arc::new(create_unavailable_repository()));

    let (status, body) = send(&app, Method::POST, "/api/graph", Some(sample_dag_json())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error_code(&body), "ERR_STATE_STORE");

    let (status, _) = send(&app, Method::GET, "/api/graph/1/", None).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["dependencies"]["storage"]["status"], json!("DOWN"));
}

#[tokio::test]
async fn test_rejected_submission_never_reaches_repository() {
    let mut repo = MockGraphRepository::new();
    repo.expect_create_graph().times(0);

    let app = app_with(Arc::new(repo));
    for (label, graph) in rejected_graphs() {
        let (status, _) = send(&app, Method::POST, "/api/graph", Some(graph_json(&graph))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{} submission", label);
    }
}

#[tokio::test]
async fn test_unhealthy_storage_reports_down() {
    let mut repo = MockGraphRepository::new();
    repo.expect_health_check().times(1).returning(|| Ok(false));

    let app = app_with(Arc::new(repo));
    let (status, body) = send(&app, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], json!("DOWN"));
    assert_eq!(body["dependencies"]["storage"]["status"], json!("DOWN"));
}

#[tokio::test]
async fn test_node_vanishing_during_delete_is_not_found() {
    let sample = sample_dag();
    let mut repo = MockGraphRepository::new();
    repo.expect_find_by_id().with(eq(GraphId(3))).returning(move |id| {
        Ok(Some(Graph {
            id,
            nodes: sample.nodes.clone(),
            edges: sample.edges.clone(),
            created_at: Utc::now(),
        }))
    });
    repo.expect_remove_node()
        .times(1)
        .returning(|_, _| Ok(None::<NodeRemoval>));

    let app = app_with(Arc::new(repo));
    let (status, body) = send(&app, Method::DELETE, "/api/graph/3/node/a", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "ERR_NOT_FOUND_NODE");
}

#[tokio::test]
async fn test_unknown_route_uses_error_shape() {
    let app = app();
    let (status, body) = send(&app, Method::GET, "/api/graphs", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), "ERR_NOT_FOUND");
}
