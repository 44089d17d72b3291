use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use rn_config::{ModelConfig, ReleaseConfig};
use rn_core::{PromptKind, Summarizer};
use rn_llm::{ChatClient, LlmError};
use serde_json::json;

fn client_for(server: &MockServer) -> ChatClient {
    ChatClient::new(
        &ModelConfig {
            base_url: format!("{}/v1", server.base_url()),
            model: "gpt-4o-mini".into(),
            api_key: "test-key".into(),
            timeout_secs: 5,
        },
        &ReleaseConfig {
            name: "Shop".into(),
            version: "1.4.0".into(),
            brief: "An online storefront.".into(),
        },
    )
    .expect("chat client should build")
}

#[tokio::test]
async fn item_summary_request_shape() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer test-key")
            .json_body_includes(
                json!({
                    "model": "gpt-4o-mini",
                    "messages": [
                        {"role": "system"},
                        {"role": "user", "content": "TITLE: Coupons"}
                    ]
                })
                .to_string(),
            );
        then.status(200).json_body(json!({
            "choices": [{
                "message": {"role": "assistant", "content": "  Added coupon codes at checkout.\n"},
                "finish_reason": "stop"
            }]
        }));
    });

    let summary = client_for(&server)
        .summarize(PromptKind::Item, "TITLE: Coupons")
        .await
        .expect("summary should succeed");

    mock.assert();
    assert_eq!(summary, "Added coupon codes at checkout.");
}

#[tokio::test]
async fn release_prompt_carries_software_name() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .body_includes("software project called Shop");
        then.status(200).json_body(json!({
            "choices": [{"message": {"content": "This release adds coupons."}}]
        }));
    });

    let overview = client_for(&server)
        .summarize(PromptKind::Release, "- Coupons\n")
        .await
        .unwrap();

    mock.assert();
    assert_eq!(overview, "This release adds coupons.");
}

#[tokio::test]
async fn empty_choices_is_an_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200).json_body(json!({"choices": []}));
    });

    let err = client_for(&server)
        .summarize(PromptKind::Item, "text")
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::EmptyResponse));
}

#[tokio::test]
async fn server_error_keeps_status_and_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(503).body("overloaded");
    });

    let err = client_for(&server)
        .summarize(PromptKind::Item, "text")
        .await
        .unwrap_err();

    match err {
        LlmError::Api { status, body } => {
            assert_eq!(status, 503);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {other}"),
    }
}
