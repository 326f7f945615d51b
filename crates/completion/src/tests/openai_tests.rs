use super::*;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::Mutex};

type SeenRequests = Arc<Mutex<Vec<(Option<String>, Value)>>>;

#[derive(Clone)]
struct StubState {
    status: StatusCode,
    reply: Value,
    seen: SeenRequests,
}

async fn handle_chat(
    State(state): State<StubState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    state.seen.lock().await.push((auth, body));
    (state.status, Json(state.reply.clone()))
}

async fn spawn_chat_stub(status: StatusCode, reply: Value) -> anyhow::Result<(String, SeenRequests)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let seen = SeenRequests::default();
    let app = Router::new()
        .route("/v1/chat/completions", post(handle_chat))
        .with_state(StubState {
            status,
            reply,
            seen: seen.clone(),
        });
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}/v1"), seen))
}

fn reply_with(content: &str) -> Value {
    json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

fn service_for(base_url: String) -> OpenAiCompletionService {
    OpenAiCompletionService::new(OpenAiConfig {
        api_key: Some("test-key".into()),
        base_url,
        ..OpenAiConfig::default()
    })
    .expect("service")
}

#[tokio::test]
async fn summarize_sends_fixed_prompt_and_trims_reply() {
    let (base_url, seen) = spawn_chat_stub(StatusCode::OK, reply_with("  A short summary. \n"))
        .await
        .expect("spawn stub");
    let service = service_for(base_url);

    let summary = service
        .summarize("Neurons fire.", "intro")
        .await
        .expect("summary");
    assert_eq!(summary, "A short summary.");

    let seen = seen.lock().await;
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], "gpt-4.1-mini");
    assert_eq!(body["temperature"].as_f64(), Some(0.3));
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(
        body["messages"][0]["content"],
        AssistAction::Summarize.system_prompt()
    );
    let user = body["messages"][1]["content"].as_str().expect("user prompt");
    assert!(user.starts_with("Context (optional): intro\n\nParagraph:\nNeurons fire."));
    assert!(user.ends_with("Summarize this paragraph in 3–4 sentences."));
}

#[tokio::test]
async fn explain_and_questions_use_their_own_temperatures() {
    let (base_url, seen) = spawn_chat_stub(StatusCode::OK, reply_with("ok"))
        .await
        .expect("spawn stub");
    let service = service_for(base_url);

    service.explain("dense text").await.expect("explain");
    service
        .generate_questions("dense text")
        .await
        .expect("questions");

    let seen = seen.lock().await;
    assert_eq!(seen[0].1["temperature"].as_f64(), Some(0.4));
    assert_eq!(
        seen[0].1["messages"][1]["content"],
        "Explain this text in simpler language. Keep all important details:\n\ndense text"
    );
    assert_eq!(seen[1].1["temperature"].as_f64(), Some(0.5));
    let questions_prompt = seen[1].1["messages"][1]["content"]
        .as_str()
        .expect("prompt");
    assert!(questions_prompt.contains("Do not include the answers.\n\ndense text"));
}

#[tokio::test]
async fn non_success_status_is_reported() {
    let (base_url, _seen) = spawn_chat_stub(
        StatusCode::TOO_MANY_REQUESTS,
        json!({ "error": { "message": "slow down" } }),
    )
    .await
    .expect("spawn stub");
    let service = service_for(base_url);

    let err = service.explain("text").await.expect_err("must fail");
    match err {
        CompletionError::Status { status, body } => {
            assert_eq!(status, 429);
            assert!(body.contains("slow down"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn empty_choices_are_an_error() {
    let (base_url, _seen) = spawn_chat_stub(StatusCode::OK, json!({ "choices": [] }))
        .await
        .expect("spawn stub");
    let service = service_for(base_url);

    let err = service
        .generate_questions("text")
        .await
        .expect_err("must fail");
    assert!(matches!(err, CompletionError::EmptyResponse));
}

#[tokio::test]
async fn missing_api_key_fails_before_any_request() {
    let (base_url, seen) = spawn_chat_stub(StatusCode::OK, reply_with("unused"))
        .await
        .expect("spawn stub");
    let service = OpenAiCompletionService::new(OpenAiConfig {
        api_key: Some("   ".into()),
        base_url,
        ..OpenAiConfig::default()
    })
    .expect("service");
    assert!(!service.has_api_key());

    let err = service.summarize("p", "").await.expect_err("must fail");
    assert!(matches!(err, CompletionError::MissingApiKey));
    assert!(seen.lock().await.is_empty());
}

#[test]
fn rejects_unparseable_base_url() {
    let result = OpenAiCompletionService::new(OpenAiConfig {
        base_url: "not a url".into(),
        ..OpenAiConfig::default()
    });
    assert!(matches!(result, Err(CompletionError::InvalidUrl(_))));
}
