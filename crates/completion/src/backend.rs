use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use shared::protocol::{
    ExplainResponse, QuestionsResponse, SummarizeRequest, SummarizeResponse, TextRequest,
    EXPLAIN_ROUTE, QUESTIONS_ROUTE, SUMMARIZE_ROUTE,
};
use url::Url;

use crate::{CompletionError, TextCompletionService};

/// Calls the reading-assist backend instead of the model provider directly.
pub struct BackendCompletionClient {
    http: Client,
    server_url: String,
}

impl BackendCompletionClient {
    pub fn new(server_url: &str) -> Result<Self, CompletionError> {
        Self::with_timeout(server_url, None)
    }

    pub fn with_timeout(
        server_url: &str,
        timeout: Option<Duration>,
    ) -> Result<Self, CompletionError> {
        let parsed = Url::parse(server_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            http: builder.build()?,
            server_url: parsed.as_str().trim_end_matches('/').to_string(),
        })
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn post_json<B, R>(&self, route: &str, body: &B) -> Result<R, CompletionError>
    where
        B: Serialize + Sync,
        R: DeserializeOwned,
    {
        let res = self
            .http
            .post(format!("{}{route}", self.server_url))
            .json(body)
            .send()
            .await?
            .error_for_status()?;
        Ok(res.json().await?)
    }
}

#[async_trait]
impl TextCompletionService for BackendCompletionClient {
    async fn summarize(&self, paragraph: &str, context: &str) -> Result<String, CompletionError> {
        let body = SummarizeRequest {
            paragraph: Some(paragraph.to_string()),
            context: Some(context.to_string()),
        };
        let res: SummarizeResponse = self.post_json(SUMMARIZE_ROUTE, &body).await?;
        Ok(res.summary)
    }

    async fn explain(&self, text: &str) -> Result<String, CompletionError> {
        let body = TextRequest {
            text: Some(text.to_string()),
        };
        let res: ExplainResponse = self.post_json(EXPLAIN_ROUTE, &body).await?;
        Ok(res.explanation)
    }

    async fn generate_questions(&self, text: &str) -> Result<String, CompletionError> {
        let body = TextRequest {
            text: Some(text.to_string()),
        };
        let res: QuestionsResponse = self.post_json(QUESTIONS_ROUTE, &body).await?;
        Ok(res.questions)
    }
}

#[cfg(test)]
#[path = "tests/backend_tests.rs"]
mod tests;
