use super::*;
use crate::error::{ApiError, ErrorCode};

#[test]
fn summarize_request_tolerates_missing_fields() {
    let req: SummarizeRequest = serde_json::from_str("{}").expect("json");
    assert!(req.paragraph.is_none());
    assert!(req.context.is_none());

    let req: SummarizeRequest =
        serde_json::from_str(r#"{"paragraph":"Neurons fire.","context":""}"#).expect("json");
    assert_eq!(req.paragraph.as_deref(), Some("Neurons fire."));
    assert_eq!(req.context.as_deref(), Some(""));
}

#[test]
fn responses_use_the_frontend_field_names() {
    let value = serde_json::to_value(ExplainResponse {
        explanation: "simple".into(),
    })
    .expect("json");
    assert_eq!(value, serde_json::json!({ "explanation": "simple" }));

    let value = serde_json::to_value(QuestionsResponse {
        questions: "1. Why?".into(),
    })
    .expect("json");
    assert_eq!(value, serde_json::json!({ "questions": "1. Why?" }));
}

#[test]
fn api_error_serializes_snake_case_code() {
    let value = serde_json::to_value(ApiError::missing("paragraph")).expect("json");
    assert_eq!(
        value,
        serde_json::json!({ "code": "validation", "message": "Missing paragraph" })
    );
    assert!(matches!(
        ApiError::new(ErrorCode::Upstream, "x").code,
        ErrorCode::Upstream
    ));
}
