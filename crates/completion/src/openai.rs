use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    prompts::{explain_prompt, questions_prompt, summarize_prompt, AssistAction},
    CompletionError, TextCompletionService,
};

pub const DEFAULT_MODEL: &str = "gpt-4.1-mini";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            base_url: DEFAULT_BASE_URL.into(),
            timeout: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion client for an OpenAI-compatible endpoint.
pub struct OpenAiCompletionService {
    http: Client,
    config: OpenAiConfig,
}

impl OpenAiCompletionService {
    pub fn new(config: OpenAiConfig) -> Result<Self, CompletionError> {
        url::Url::parse(&config.base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn api_key(&self) -> Option<&str> {
        self.config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    async fn complete(
        &self,
        action: AssistAction,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        let api_key = self.api_key().ok_or(CompletionError::MissingApiKey)?;
        let body = ChatCompletionRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: action.system_prompt(),
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: action.temperature(),
        };

        debug!(action = action.label(), model = %self.config.model, "requesting chat completion");
        let res = self
            .http
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(CompletionError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = res.json().await?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(CompletionError::EmptyResponse)?;
        Ok(content)
    }
}

#[async_trait]
impl TextCompletionService for OpenAiCompletionService {
    async fn summarize(&self, paragraph: &str, context: &str) -> Result<String, CompletionError> {
        self.complete(
            AssistAction::Summarize,
            &summarize_prompt(paragraph, context),
        )
        .await
    }

    async fn explain(&self, text: &str) -> Result<String, CompletionError> {
        self.complete(AssistAction::Explain, &explain_prompt(text))
            .await
    }

    async fn generate_questions(&self, text: &str) -> Result<String, CompletionError> {
        self.complete(AssistAction::Questions, &questions_prompt(text))
            .await
    }
}

#[cfg(test)]
#[path = "tests/openai_tests.rs"]
mod tests;
