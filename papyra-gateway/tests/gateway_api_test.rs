//! Boundary tests against a mock upstream.
//!
//! Each test assembles the axum app with adapters pointed at a wiremock
//! server, drives it through `tower::ServiceExt::oneshot`, and asserts on
//! the streamed or JSON response.

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use papyra_core::types::ProviderId;
use papyra_gateway::config::CredentialStore;
use papyra_gateway::providers::{Adapters, GeminiAdapter, OpenAiCompatAdapter};
use papyra_gateway::{AppState, app};
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header as header_matcher, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn mock_adapters(server: &MockServer) -> Adapters {
    Adapters {
        gemini: GeminiAdapter::default().with_base_url(server.uri()),
        deepseek: OpenAiCompatAdapter::deepseek().with_base_url(server.uri()),
        openai: OpenAiCompatAdapter::openai().with_base_url(server.uri()),
    }
}

fn post_process(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/process")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn ocr_body(llm: &str) -> Value {
    json!({
        "image": "aW1hZ2UtYnl0ZXM=",
        "mimeType": "image/png",
        "context": "receipt",
        "quality": "standard",
        "llm": llm
    })
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn sse_frames(frames: &[&str]) -> String {
    frames.iter().map(|f| format!("data: {f}\n\n")).collect()
}

#[tokio::test]
async fn openai_extraction_streams_concatenated_deltas() {
    let server = MockServer::start().await;
    let upstream_body = sse_frames(&[
        r#"{"choices":[{"delta":{"role":"assistant"}}]}"#,
        r#"{"choices":[{"delta":{"content":"<p>Total: "}}]}"#,
        r#"{"choices":[{"delta":{"content":"$12.50</p>"}}]}"#,
        "[DONE]",
    ]);

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header_matcher("Authorization", "Bearer sk-test"))
        .and(body_string_contains("Structure the output as an HTML table."))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream_body, "text/event-stream"))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::with_parts(
        CredentialStore::default().with_credential(ProviderId::OpenAi, "sk-test"),
        mock_adapters(&server),
    );

    let response = app(state).oneshot(post_process(ocr_body("openai"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );
    assert_eq!(body_text(response).await, "<p>Total: $12.50</p>");
}

#[tokio::test]
async fn a_malformed_upstream_frame_is_dropped_from_the_stream() {
    let server = MockServer::start().await;
    let upstream_body = sse_frames(&[
        r#"{"choices":[{"delta":{"content":"good "}}]}"#,
        "{broken frame",
        r#"{"choices":[{"delta":{"content":"still good"}}]}"#,
        "[DONE]",
    ]);

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream_body, "text/event-stream"))
        .mount(&server)
        .await;

    let state = AppState::with_parts(
        CredentialStore::default().with_credential(ProviderId::OpenAi, "sk-test"),
        mock_adapters(&server),
    );

    let response = app(state).oneshot(post_process(ocr_body("openai"))).await.unwrap();
    assert_eq!(body_text(response).await, "good still good");
}

#[tokio::test]
async fn gemini_extraction_reads_streamed_json_chunks() {
    let server = MockServer::start().await;
    let upstream_body = r#"[
        {"candidates":[{"content":{"parts":[{"text":"<h2>Notes"}],"role":"model"}}]},
        {"candidates":[{"content":{"parts":[{"text":"</h2>"}],"role":"model"}}]}
    ]"#;

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:streamGenerateContent"))
        .and(header_matcher("x-goog-api-key", "gm-test"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(upstream_body, "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::with_parts(
        CredentialStore::default().with_credential(ProviderId::Gemini, "gm-test"),
        mock_adapters(&server),
    );

    // No llm field: routing must default to Gemini.
    let mut body = ocr_body("gemini");
    body.as_object_mut().unwrap().remove("llm");

    let response = app(state).oneshot(post_process(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "<h2>Notes</h2>");
}

#[tokio::test]
async fn upstream_401_propagates_status_and_emits_no_fragments() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let state = AppState::with_parts(
        CredentialStore::default().with_credential(ProviderId::OpenAi, "sk-bad"),
        mock_adapters(&server),
    );

    let response = app(state).oneshot(post_process(ocr_body("openai"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let error: Value = serde_json::from_str(&body_text(response).await).unwrap();
    let message = error["error"].as_str().unwrap();
    assert!(message.contains("401"));
    assert!(message.contains("invalid api key"));
}

#[tokio::test]
async fn missing_credential_rejects_before_any_upstream_call() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    // No DeepSeek credential configured.
    let state = AppState::with_parts(CredentialStore::default(), mock_adapters(&server));

    let response = app(state).oneshot(post_process(ocr_body("deepseek"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let error: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(error["error"].as_str().unwrap().contains("deepseek"));

    assert!(
        server.received_requests().await.unwrap().is_empty(),
        "no upstream call may happen without a credential"
    );
}

#[tokio::test]
async fn text_task_returns_a_json_result() {
    let server = MockServer::start().await;
    let upstream = json!({
        "choices": [{ "message": { "role": "assistant", "content": " Grocery Receipt Summary " } }]
    });

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_string_contains("Summarize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::with_parts(
        CredentialStore::default().with_credential(ProviderId::DeepSeek, "ds-test"),
        mock_adapters(&server),
    );

    let body = json!({ "text": "long document text", "task": "summarize", "llm": "deepseek" });
    let response = app(state).oneshot(post_process(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(result["result"], "Grocery Receipt Summary");
}

#[tokio::test]
async fn gemini_text_task_uses_the_non_streaming_endpoint() {
    let server = MockServer::start().await;
    let upstream = json!({
        "candidates": [{
            "content": { "parts": [{ "text": "Five Word Title Here" }], "role": "model" }
        }]
    });

    Mock::given(method("POST"))
        .and(path("/models/gemini-2.0-flash:generateContent"))
        .and(header_matcher("x-goog-api-key", "gm-test"))
        .and(body_string_contains("five words or fewer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream))
        .expect(1)
        .mount(&server)
        .await;

    let state = AppState::with_parts(
        CredentialStore::default().with_credential(ProviderId::Gemini, "gm-test"),
        mock_adapters(&server),
    );

    let body = json!({ "text": "the captured document", "task": "title" });
    let response = app(state).oneshot(post_process(body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let result: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(result["result"], "Five Word Title Here");
}

#[tokio::test]
async fn structurally_invalid_body_is_a_400_with_json_error() {
    let state = AppState::new();
    let response = app(state)
        .oneshot(post_process(json!({ "quality": "enhanced" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let error: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert!(error["error"].as_str().unwrap().contains("invalid request"));
}
