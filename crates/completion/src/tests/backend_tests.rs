use super::*;
use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

#[derive(Clone, Default)]
struct BackendState {
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn handle_summarize(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.bodies.lock().await.push(body);
    Json(json!({ "summary": "short version" }))
}

async fn handle_questions(
    State(state): State<BackendState>,
    Json(body): Json<Value>,
) -> Json<Value> {
    state.bodies.lock().await.push(body);
    Json(json!({ "questions": "1. What is plasticity?" }))
}

async fn handle_explain_failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "code": "upstream", "message": "Failed to explain text" })),
    )
}

async fn spawn_backend() -> anyhow::Result<(String, BackendState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = BackendState::default();
    let app = Router::new()
        .route(SUMMARIZE_ROUTE, post(handle_summarize))
        .route(EXPLAIN_ROUTE, post(handle_explain_failure))
        .route(QUESTIONS_ROUTE, post(handle_questions))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/"), state))
}

#[tokio::test]
async fn summarize_posts_paragraph_and_context() {
    let (server_url, state) = spawn_backend().await.expect("spawn backend");
    let client = BackendCompletionClient::new(&server_url).expect("client");
    assert!(!client.server_url().ends_with('/'));

    let summary = client
        .summarize("Synapses adapt.", "")
        .await
        .expect("summary");
    assert_eq!(summary, "short version");

    let bodies = state.bodies.lock().await;
    assert_eq!(
        bodies[0],
        json!({ "paragraph": "Synapses adapt.", "context": "" })
    );
}

#[tokio::test]
async fn questions_posts_text_body() {
    let (server_url, state) = spawn_backend().await.expect("spawn backend");
    let client = BackendCompletionClient::new(&server_url).expect("client");

    let questions = client
        .generate_questions("whole article")
        .await
        .expect("questions");
    assert_eq!(questions, "1. What is plasticity?");
    assert_eq!(
        state.bodies.lock().await[0],
        json!({ "text": "whole article" })
    );
}

#[tokio::test]
async fn non_success_response_is_a_failure() {
    let (server_url, _state) = spawn_backend().await.expect("spawn backend");
    let client = BackendCompletionClient::new(&server_url).expect("client");

    let err = client.explain("hard words").await.expect_err("must fail");
    assert!(matches!(err, CompletionError::Transport(_)), "{err:?}");
}

#[test]
fn rejects_relative_server_url() {
    assert!(matches!(
        BackendCompletionClient::new("localhost-without-scheme"),
        Err(CompletionError::InvalidUrl(_))
    ));
}
