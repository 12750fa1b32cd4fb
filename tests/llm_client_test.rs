//! Chat-completion client against a mock API.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use pf_cli::LlmError;
use pf_cli::llm::{CommitMessageGenerator, Credential, OpenAiClient};

const KEY: &str = "sk-test-0123456789";

fn client(server: &MockServer) -> OpenAiClient {
    OpenAiClient::new(
        reqwest::Client::new(),
        server.uri(),
        "gpt-3.5-turbo",
        Credential::parse(KEY),
    )
}

fn reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [
            {"index": 0, "message": {"role": "assistant", "content": content}, "finish_reason": "stop"}
        ]
    })
}

#[tokio::test]
async fn test_generate_returns_cleaned_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", format!("Bearer {}", KEY).as_str()))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 100
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("  \"🐛 Fix: null check\"\n")))
        .expect(1)
        .mount(&server)
        .await;

    let message = client(&server)
        .generate("M  src/lib.rs", "+if x.is_none() { return; }")
        .await
        .unwrap();

    assert_eq!(message, "🐛 Fix: null check");
}

#[tokio::test]
async fn test_request_carries_status_and_diff() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("📝 Docs: readme")))
        .mount(&server)
        .await;

    client(&server)
        .generate("M  README.md", "+new install steps")
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages[0]["role"], "system");
    let user = messages[1]["content"].as_str().unwrap();
    assert!(user.contains("M  README.md"));
    assert!(user.contains("+new install steps"));
}

#[tokio::test]
async fn test_quota_error_is_recognised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {
                "message": "You exceeded your current quota",
                "type": "insufficient_quota",
                "code": "insufficient_quota"
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate("M  a", "+a").await.unwrap_err();
    assert!(matches!(err, LlmError::QuotaExceeded));
}

#[tokio::test]
async fn test_invalid_key_is_recognised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .mount(&server)
        .await;

    let err = client(&server).generate("M  a", "+a").await.unwrap_err();
    assert!(matches!(err, LlmError::InvalidApiKey));
}

#[tokio::test]
async fn test_other_api_errors_keep_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream overloaded"))
        .mount(&server)
        .await;

    let err = client(&server).generate("M  a", "+a").await.unwrap_err();
    assert!(
        matches!(err, LlmError::Api { status: 503, ref message } if message == "upstream overloaded")
    );
}

#[tokio::test]
async fn test_empty_choices_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let err = client(&server).generate("M  a", "+a").await.unwrap_err();
    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn test_bad_credential_never_sends_a_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let client = OpenAiClient::new(
        reqwest::Client::new(),
        server.uri(),
        "gpt-3.5-turbo",
        Credential::parse("your-openai-api-key-here"),
    );

    let err = client.generate("M  a", "+a").await.unwrap_err();
    assert!(matches!(err, LlmError::Credential(_)));
}
