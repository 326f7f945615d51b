use async_trait::async_trait;
use thiserror::Error;

pub mod backend;
pub mod openai;
pub mod prompts;

pub use backend::BackendCompletionClient;
pub use openai::{OpenAiCompletionService, OpenAiConfig};
pub use prompts::AssistAction;

#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("OPENAI_API_KEY is not configured")]
    MissingApiKey,
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("completion service returned no content")]
    EmptyResponse,
    #[error("invalid completion service url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("completion service is unavailable")]
    Unavailable,
}

/// The three assist actions backed by a hosted language model.
#[async_trait]
pub trait TextCompletionService: Send + Sync {
    async fn summarize(&self, paragraph: &str, context: &str) -> Result<String, CompletionError>;
    async fn explain(&self, text: &str) -> Result<String, CompletionError>;
    async fn generate_questions(&self, text: &str) -> Result<String, CompletionError>;
}

pub struct MissingCompletionService;

#[async_trait]
impl TextCompletionService for MissingCompletionService {
    async fn summarize(&self, _paragraph: &str, _context: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable)
    }

    async fn explain(&self, _text: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable)
    }

    async fn generate_questions(&self, _text: &str) -> Result<String, CompletionError> {
        Err(CompletionError::Unavailable)
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
