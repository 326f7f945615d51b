use serde::{Deserialize, Serialize};

pub const SUMMARIZE_ROUTE: &str = "/api/summarize";
pub const EXPLAIN_ROUTE: &str = "/api/explain";
pub const QUESTIONS_ROUTE: &str = "/api/questions";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SummarizeRequest {
    #[serde(default)]
    pub paragraph: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

/// Body shared by `/api/explain` and `/api/questions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TextRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummarizeResponse {
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionsResponse {
    pub questions: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub message: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
