use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    routing::{get, post},
    Json, Router,
};
use completion::{CompletionError, OpenAiCompletionService, TextCompletionService};
use shared::{
    error::{ApiError, ApiException, ErrorCode},
    protocol::{
        ExplainResponse, QuestionsResponse, StatusResponse, SummarizeRequest, SummarizeResponse,
        TextRequest, EXPLAIN_ROUTE, QUESTIONS_ROUTE, SUMMARIZE_ROUTE,
    },
};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use config::load_settings;

const MAX_BODY_BYTES: usize = 100 * 1024;

struct AppState {
    completions: Arc<dyn TextCompletionService>,
}

type HandlerError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = load_settings();
    if settings.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; assist routes will fail until it is configured");
    }

    let service = OpenAiCompletionService::new(settings.openai_config())
        .context("invalid completion service settings")?;
    info!(model = service.model(), "completion service ready");

    let state = AppState {
        completions: Arc::new(service),
    };
    let app = build_router(Arc::new(state));

    let listener = tokio::net::TcpListener::bind((settings.bind_host.as_str(), settings.port))
        .await
        .with_context(|| format!("failed to bind {}:{}", settings.bind_host, settings.port))?;
    let addr = listener.local_addr()?;
    info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(root))
        .route("/healthz", get(healthz))
        .route(SUMMARIZE_ROUTE, post(summarize))
        .route(EXPLAIN_ROUTE, post(explain))
        .route(QUESTIONS_ROUTE, post(questions))
        .with_state(state)
        .layer(cors)
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
}

async fn root() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
        message: "Reading assist backend running".into(),
    })
}

async fn healthz() -> &'static str {
    "ok"
}

async fn summarize(
    State(state): State<Arc<AppState>>,
    body: Result<Json<SummarizeRequest>, JsonRejection>,
) -> Result<Json<SummarizeResponse>, HandlerError> {
    let Json(req) = body.map_err(invalid_body)?;
    let paragraph = required(req.paragraph, "paragraph")?;
    let context = req.context.unwrap_or_default();

    let summary = state
        .completions
        .summarize(&paragraph, &context)
        .await
        .map_err(|e| upstream_failure(SUMMARIZE_ROUTE, "Failed to summarize paragraph", e))?;

    Ok(Json(SummarizeResponse { summary }))
}

async fn explain(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<ExplainResponse>, HandlerError> {
    let Json(req) = body.map_err(invalid_body)?;
    let text = required(req.text, "text")?;

    let explanation = state
        .completions
        .explain(&text)
        .await
        .map_err(|e| upstream_failure(EXPLAIN_ROUTE, "Failed to explain text", e))?;

    Ok(Json(ExplainResponse { explanation }))
}

async fn questions(
    State(state): State<Arc<AppState>>,
    body: Result<Json<TextRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, HandlerError> {
    let Json(req) = body.map_err(invalid_body)?;
    let text = required(req.text, "text")?;

    let questions = state
        .completions
        .generate_questions(&text)
        .await
        .map_err(|e| upstream_failure(QUESTIONS_ROUTE, "Failed to generate questions", e))?;

    Ok(Json(QuestionsResponse { questions }))
}

/// Keeps axum's status (400, 413, 415 or 422) but answers with an `ApiError` body.
fn invalid_body(rejection: JsonRejection) -> HandlerError {
    (
        rejection.status(),
        Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
    )
}

/// Absent, empty and whitespace-only fields are all rejected.
fn required(value: Option<String>, field: &'static str) -> Result<String, HandlerError> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| reject(ApiError::missing(field).into()))
}

fn upstream_failure(route: &'static str, message: &'static str, e: CompletionError) -> HandlerError {
    let code = match &e {
        CompletionError::MissingApiKey => ErrorCode::Internal,
        _ => ErrorCode::Upstream,
    };
    error!(route, error = %e, "completion request failed");
    reject(ApiException::new(code, message))
}

fn reject(e: ApiException) -> HandlerError {
    let status = match e.code {
        ErrorCode::Validation => StatusCode::BAD_REQUEST,
        ErrorCode::Upstream | ErrorCode::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(e.into()))
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
