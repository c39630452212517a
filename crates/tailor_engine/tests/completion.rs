use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use tailor_engine::{
    ApiKey, CompletionClient, CompletionFailure, CompletionSettings, OpenAiCompletionClient,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings(server: &MockServer) -> CompletionSettings {
    let mut settings = CompletionSettings::new(ApiKey::new("sk-test").unwrap());
    settings.endpoint = format!("{}/v1/chat/completions", server.uri());
    settings
}

fn reply(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }]
    })
}

#[tokio::test]
async fn sends_prompt_with_model_and_bearer_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "messages": [{ "role": "user", "content": "Write skills" }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("  Languages: Rust\n")))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiCompletionClient::new(settings(&server)).unwrap();
    let text = client.complete("Write skills").await.unwrap();

    assert_eq!(text, "Languages: Rust");
}

#[tokio::test]
async fn rejected_key_reports_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(401).set_body_string(r#"{"error":{"message":"Incorrect API key"}}"#),
        )
        .mount(&server)
        .await;

    let client = OpenAiCompletionClient::new(settings(&server)).unwrap();
    let err = client.complete("prompt").await.unwrap_err();

    assert_eq!(err.kind, CompletionFailure::HttpStatus(401));
    assert!(err.message.contains("Incorrect API key"));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = OpenAiCompletionClient::new(settings(&server)).unwrap();
    let err = client.complete("prompt").await.unwrap_err();

    assert_eq!(err.kind, CompletionFailure::MalformedResponse);
}

#[tokio::test]
async fn missing_choices_or_blank_text_is_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "messages": [{ "content": "none" }] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "messages": [{ "content": "blank" }] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply("   ")))
        .mount(&server)
        .await;

    let client = OpenAiCompletionClient::new(settings(&server)).unwrap();

    let none = client.complete("none").await.unwrap_err();
    assert_eq!(none.kind, CompletionFailure::EmptyResponse);
    let blank = client.complete("blank").await.unwrap_err();
    assert_eq!(blank.kind, CompletionFailure::EmptyResponse);
}

#[tokio::test]
async fn slow_endpoint_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(reply("late"))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let mut settings = settings(&server);
    settings.request_timeout = Duration::from_millis(100);
    let client = OpenAiCompletionClient::new(settings).unwrap();
    let err = client.complete("prompt").await.unwrap_err();

    assert_eq!(err.kind, CompletionFailure::Timeout);
}

#[tokio::test]
async fn unreachable_endpoint_is_a_network_error() {
    let mut settings = CompletionSettings::new(ApiKey::new("sk-test").unwrap());
    settings.endpoint = "http://127.0.0.1:9/v1/chat/completions".to_string();
    settings.connect_timeout = Duration::from_secs(2);
    let client = OpenAiCompletionClient::new(settings).unwrap();

    let err = client.complete("prompt").await.unwrap_err();

    assert!(matches!(
        err.kind,
        CompletionFailure::Network | CompletionFailure::Timeout
    ));
}
