/*!
 * Tests for provider request builders and the mock provider
 */

use sheetwai::errors::ProviderError;
use sheetwai::providers::mock::{MOCK_PREFIX, MockProvider};
use sheetwai::providers::openai::{OpenAI, OpenAIRequest, OpenAIResponse};
use sheetwai::providers::{CompletionRequest, Provider};

#[test]
fn test_openaiRequest_fromCompletion_shouldSerializeSystemThenUser() {
    let request = CompletionRequest::new("Be a translator", "Translate this");
    let body = serde_json::to_value(OpenAIRequest::from_completion("gemini-2.0-flash-lite", &request)).unwrap();

    assert_eq!(body["model"], "gemini-2.0-flash-lite");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][0]["content"], "Be a translator");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["messages"][1]["content"], "Translate this");
}

#[test]
fn test_openaiResponse_extractText_shouldReadFirstChoice() {
    let response: OpenAIResponse = serde_json::from_str(
        r#"{ "choices": [ { "message": { "role": "assistant", "content": "こんにちは|||世界" } } ] }"#,
    )
    .unwrap();
    assert_eq!(OpenAI::extract_text(&response).as_deref(), Some("こんにちは|||世界"));
}

#[test]
fn test_openaiResponse_withNoChoicesOrNullContent_shouldYieldNone() {
    let empty: OpenAIResponse = serde_json::from_str(r#"{}"#).unwrap();
    assert_eq!(OpenAI::extract_text(&empty), None);

    let null_content: OpenAIResponse = serde_json::from_str(
        r#"{ "choices": [ { "message": { "role": "assistant", "content": null } } ] }"#,
    )
    .unwrap();
    assert_eq!(OpenAI::extract_text(&null_content), None);
}

#[test]
fn test_openai_completionsUrl_shouldJoinWithoutDoubleSlash() {
    let client = OpenAI::new("key", "https://generativelanguage.googleapis.com/v1beta/openai/", "m", 60);
    assert_eq!(
        client.completions_url(),
        "https://generativelanguage.googleapis.com/v1beta/openai/chat/completions"
    );
    let client = OpenAI::new("key", "http://localhost:1234/v1", "m", 60);
    assert_eq!(client.completions_url(), "http://localhost:1234/v1/chat/completions");
}

#[tokio::test]
async fn test_mock_working_shouldPrefixEverySegment() {
    let mock = MockProvider::working();
    let request = CompletionRequest::new("system", "Translate ...:\n\nXin chào||| Thế giới ");

    let text = mock.complete(request).await.unwrap();
    assert_eq!(text, format!("{p}Xin chào|||{p}Thế giới", p = MOCK_PREFIX));
    assert_eq!(mock.call_count(), 1);
}

#[tokio::test]
async fn test_mock_scripted_shouldReplayThenFallBackToWorking() {
    let mock = MockProvider::scripted(vec![Err(ProviderError::EmptyResponse), Ok("fixed".into())]);
    let request = CompletionRequest::new("s", "u\n\nx");

    assert_eq!(mock.complete(request.clone()).await, Err(ProviderError::EmptyResponse));
    assert_eq!(mock.complete(request.clone()).await.unwrap(), "fixed");
    assert_eq!(mock.complete(request).await.unwrap(), format!("{}x", MOCK_PREFIX));
    assert_eq!(mock.call_count(), 3);
}

#[tokio::test]
async fn test_mock_failing_shouldFailConnectionTest() {
    let mock = MockProvider::failing();
    assert!(mock.test_connection().await.is_err());
    assert!(MockProvider::working().test_connection().await.is_ok());
}

#[tokio::test]
async fn test_mock_clones_shouldShareRecordedCalls() {
    let mock = MockProvider::working();
    let clone = mock.clone();
    clone.complete(CompletionRequest::new("s", "u\n\nx")).await.unwrap();
    assert_eq!(mock.call_count(), 1);
    assert_eq!(mock.requests()[0].system, "s");
}
