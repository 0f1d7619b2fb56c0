//! Streams against a local mock of the chat-completion endpoint.
//!
//! Run with: cargo test -p renshu-llms --test huggingface_stream

use futures::StreamExt;
use mockito::Matcher;
use renshu_llms::providers::huggingface::HuggingFaceConfig;
use renshu_llms::{
    Error, FinishReason, GenerateRequest, HuggingFaceProvider, Message, Provider, StreamEvent,
};

fn provider_for(server: &mockito::ServerGuard) -> HuggingFaceProvider {
    let config = HuggingFaceConfig::new("hf_test").with_base_url(format!("{}/v1", server.url()));
    HuggingFaceProvider::new(config).expect("provider")
}

fn request() -> GenerateRequest {
    GenerateRequest::new(
        "Qwen/Qwen2.5-72B-Instruct",
        vec![Message::system("tutor"), Message::user("Hello")],
    )
    .with_max_tokens(512)
    .with_temperature(0.5)
    .with_top_p(0.5)
}

fn sse(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|p| format!("data: {}\n\n", p))
        .collect::<String>()
}

async fn collect(provider: &HuggingFaceProvider) -> Vec<Result<StreamEvent, Error>> {
    let stream = provider.stream(request()).await.expect("stream opens");
    stream.collect().await
}

#[tokio::test]
async fn test_streams_text_deltas_until_done() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer hf_test")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "Qwen/Qwen2.5-72B-Instruct",
            "stream": true,
            "max_tokens": 512,
            "messages": [
                {"role": "system", "content": "tutor"},
                {"role": "user", "content": "Hello"}
            ]
        })))
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&[
            r#"{"choices":[{"index":0,"delta":{"role":"assistant","content":""}}]}"#,
            r#"{"choices":[{"index":0,"delta":{"content":"Kon"}}]}"#,
            r#"{"choices":[{"index":0,"delta":{"content":"nichiwa!"}}]}"#,
            r#"{"choices":[{"index":0,"delta":{},"finish_reason":"stop"}],"usage":{"prompt_tokens":12,"completion_tokens":2}}"#,
            "[DONE]",
        ]))
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;
    mock.assert_async().await;

    let events: Vec<StreamEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], StreamEvent::text_delta("Kon"));
    assert_eq!(events[1], StreamEvent::text_delta("nichiwa!"));
    match &events[2] {
        StreamEvent::Finish { usage, reason } => {
            assert_eq!(usage.total(), 14);
            assert_eq!(*reason, FinishReason::Stop);
        }
        other => panic!("Expected Finish, got {:?}", other),
    }
}

#[tokio::test]
async fn test_error_status_becomes_provider_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(503)
        .with_header("content-type", "application/json")
        .with_body(r#"{"error":"Model is overloaded"}"#)
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;

    assert_eq!(events.len(), 1);
    match &events[0] {
        Err(Error::ProviderError(message)) => {
            assert!(message.contains("503"), "{}", message);
            assert!(message.contains("Model is overloaded"), "{}", message);
        }
        other => panic!("Expected provider error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_in_band_error_after_fragment() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&[
            r#"{"choices":[{"index":0,"delta":{"content":"Hi"}}]}"#,
            r#"{"error":"Input validation error","error_type":"validation"}"#,
        ]))
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].as_ref().unwrap(), &StreamEvent::text_delta("Hi"));
    assert_eq!(
        events[1].as_ref().unwrap(),
        &StreamEvent::error("Input validation error (validation)")
    );
}

#[tokio::test]
async fn test_malformed_chunk_ends_stream_with_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&["{not json", r#"{"choices":[{"delta":{"content":"late"}}]}"#]))
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;

    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Err(Error::StreamError(m)) if m.contains("Failed to parse")));
}

#[tokio::test]
async fn test_stream_without_done_marker_terminates() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&[r#"{"choices":[{"delta":{"content":"only"}}]}"#]))
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].as_ref().unwrap(), &StreamEvent::text_delta("only"));
}

#[tokio::test]
async fn test_usage_only_chunk_does_not_end_stream() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "text/event-stream")
        .with_body(sse(&[
            r#"{"choices":[{"index":0,"delta":{"content":"Hi"}}]}"#,
            r#"{"usage":{"prompt_tokens":1,"completion_tokens":1}}"#,
            r#"{"choices":[{"index":0,"delta":{"content":" there"}}]}"#,
            "[DONE]",
        ]))
        .create_async()
        .await;

    let events = collect(&provider_for(&server)).await;

    let events: Vec<StreamEvent> = events.into_iter().map(|e| e.unwrap()).collect();
    assert_eq!(
        events,
        vec![StreamEvent::text_delta("Hi"), StreamEvent::text_delta(" there")]
    );
}
