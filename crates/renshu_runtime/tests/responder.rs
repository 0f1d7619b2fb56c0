//! Turn-level behavior of the responder against a scripted provider.
//!
//! Run with: cargo test -p renshu-runtime --test responder

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use futures::StreamExt;
use renshu_core::{HistoryEntry, RENSHU_SYSTEM_PROMPT};
use renshu_llms::{
    Error, FinishReason, GenerateRequest, GenerateStream, Headers, Message, Provider, StreamEvent,
    Usage,
};
use renshu_runtime::{
    RenshuConfig, ReplyUpdate, Responder, SamplingParams, SETUP_ERROR_MESSAGE, THINKING_MESSAGE,
};

/// Provider that replays a fixed script and records what it was asked.
struct ScriptedProvider {
    open_error: Option<String>,
    script: Vec<Result<StreamEvent, String>>,
    calls: AtomicUsize,
    requests: Mutex<Vec<GenerateRequest>>,
}

impl ScriptedProvider {
    fn streaming(script: Vec<Result<StreamEvent, String>>) -> Arc<Self> {
        Arc::new(Self {
            open_error: None,
            script,
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn refusing(message: &str) -> Arc<Self> {
        Arc::new(Self {
            open_error: Some(message.to_string()),
            script: Vec::new(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Provider for ScriptedProvider {
    fn provider_id(&self) -> &str {
        "scripted"
    }

    fn build_headers(&self, _custom_headers: Option<&Headers>) -> Headers {
        Headers::new()
    }

    async fn stream(&self, request: GenerateRequest) -> renshu_llms::Result<GenerateStream> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().unwrap().push(request);

        if let Some(message) = &self.open_error {
            return Err(Error::provider_error(message.clone()));
        }

        let events = self
            .script
            .iter()
            .cloned()
            .map(|item| item.map_err(Error::provider_error))
            .collect();
        Ok(GenerateStream::from_events(events))
    }
}

fn config() -> RenshuConfig {
    RenshuConfig::new().with_credential("hf_test")
}

async fn run_turn(responder: &Responder, message: &str, history: &[HistoryEntry]) -> Vec<ReplyUpdate> {
    responder
        .respond(message, history, SamplingParams::default())
        .collect()
        .await
}

fn texts(updates: &[ReplyUpdate]) -> Vec<&str> {
    updates.iter().map(ReplyUpdate::text).collect()
}

#[tokio::test]
async fn test_streams_cumulative_text() {
    let provider = ScriptedProvider::streaming(vec![
        Ok(StreamEvent::text_delta("Kon")),
        Ok(StreamEvent::text_delta("nichiwa!")),
        Ok(StreamEvent::finish(Usage::new(30, 2), FinishReason::Stop)),
    ]);
    let responder = Responder::new(&config(), provider.clone());

    let updates = run_turn(&responder, "Hello", &[]).await;

    assert_eq!(texts(&updates), vec![THINKING_MESSAGE, "Kon", "Konnichiwa!"]);
    assert_eq!(updates[0], ReplyUpdate::Status(THINKING_MESSAGE.to_string()));
    assert_eq!(updates[2], ReplyUpdate::Partial("Konnichiwa!".to_string()));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_missing_credential_makes_no_call() {
    let provider = ScriptedProvider::streaming(vec![Ok(StreamEvent::text_delta("never"))]);
    let responder = Responder::new(&RenshuConfig::new(), provider.clone());

    let history = vec![HistoryEntry::user("hi"), HistoryEntry::assistant("hello")];
    let updates = run_turn(&responder, "anything", &history).await;

    assert_eq!(updates, vec![ReplyUpdate::Failed(SETUP_ERROR_MESSAGE.to_string())]);
    assert_eq!(provider.calls(), 0);
    assert!(!responder.has_credential());
}

#[tokio::test]
async fn test_missing_credential_from_config() {
    let responder = Responder::from_config(&RenshuConfig::new().with_credential(""));
    let updates = run_turn(&responder, "Hello", &[]).await;
    assert_eq!(texts(&updates), vec![SETUP_ERROR_MESSAGE]);
}

#[tokio::test]
async fn test_request_carries_system_and_valid_history() {
    let provider = ScriptedProvider::streaming(vec![]);
    let responder = Responder::new(&config(), provider.clone());

    let history = vec![
        HistoryEntry::user("hi"),
        HistoryEntry {
            role: Some("user".to_string()),
            content: None,
        },
    ];
    let _ = run_turn(&responder, "bye", &history).await;

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].messages,
        vec![
            Message::system(RENSHU_SYSTEM_PROMPT),
            Message::user("hi"),
            Message::user("bye"),
        ]
    );
    assert_eq!(requests[0].model, "Qwen/Qwen2.5-72B-Instruct");
    assert_eq!(requests[0].options.max_tokens, Some(512));
}

#[tokio::test]
async fn test_failure_after_first_fragment() {
    let provider = ScriptedProvider::streaming(vec![
        Ok(StreamEvent::text_delta("Hi")),
        Err("Model too busy, unable to get response in less than 60 second(s)".to_string()),
        Ok(StreamEvent::text_delta("never shown")),
    ]);
    let responder = Responder::new(&config(), provider);

    let updates = run_turn(&responder, "Hello", &[]).await;

    assert_eq!(updates.len(), 3);
    assert_eq!(updates[0], ReplyUpdate::Status(THINKING_MESSAGE.to_string()));
    assert_eq!(updates[1], ReplyUpdate::Partial("Hi".to_string()));
    let last = updates.last().unwrap();
    assert!(last.is_failure());
    assert!(last.text().starts_with("❌ Error: "));
    assert!(last.text().contains("Model too busy"));
    assert!(last.text().contains("Qwen/Qwen2.5-7B-Instruct"));
}

#[tokio::test]
async fn test_failure_when_stream_cannot_open() {
    let provider = ScriptedProvider::refusing("Hugging Face API error 503 Service Unavailable: overloaded");
    let responder = Responder::new(&config(), provider.clone());

    let updates = run_turn(&responder, "Hello", &[]).await;

    assert_eq!(updates.len(), 2);
    assert_eq!(updates[0].text(), THINKING_MESSAGE);
    assert!(updates[1].is_failure());
    assert!(updates[1].text().contains("503 Service Unavailable"));
    assert_eq!(provider.calls(), 1);
}

#[tokio::test]
async fn test_in_band_error_event_ends_turn() {
    let provider = ScriptedProvider::streaming(vec![
        Ok(StreamEvent::text_delta("ga")),
        Ok(StreamEvent::error("Input validation error")),
    ]);
    let responder = Responder::new(&config(), provider);

    let updates = run_turn(&responder, "wa?", &[]).await;

    assert_eq!(texts(&updates)[..2], [THINKING_MESSAGE, "ga"]);
    assert!(updates[2].is_failure());
    assert!(updates[2].text().contains("Input validation error"));
}

#[tokio::test]
async fn test_partials_only_grow() {
    let provider = ScriptedProvider::streaming(vec![
        Ok(StreamEvent::text_delta("は")),
        Ok(StreamEvent::text_delta("")),
        Ok(StreamEvent::text_delta(" (wa) marks")),
        Ok(StreamEvent::text_delta(" the topic.")),
        Ok(StreamEvent::finish(Usage::default(), FinishReason::Stop)),
    ]);
    let responder = Responder::new(&config(), provider);

    let updates = run_turn(&responder, "wa vs ga", &[]).await;
    let partials: Vec<&str> = updates
        .iter()
        .filter(|u| matches!(u, ReplyUpdate::Partial(_)))
        .map(ReplyUpdate::text)
        .collect();

    assert_eq!(partials, vec!["は", "は (wa) marks", "は (wa) marks the topic."]);
    for pair in partials.windows(2) {
        assert!(pair[1].len() > pair[0].len());
        assert!(pair[1].starts_with(pair[0]));
    }
}

#[tokio::test]
async fn test_empty_reply_ends_after_status() {
    let provider = ScriptedProvider::streaming(vec![Ok(StreamEvent::finish(
        Usage::default(),
        FinishReason::Length,
    ))]);
    let responder = Responder::new(&config(), provider);

    let updates = run_turn(&responder, "Hello", &[]).await;
    assert_eq!(texts(&updates), vec![THINKING_MESSAGE]);
}

#[tokio::test]
async fn test_turns_share_no_state() {
    let provider = ScriptedProvider::streaming(vec![Ok(StreamEvent::text_delta("one"))]);
    let responder = Responder::new(&config(), provider.clone());

    let first = run_turn(&responder, "a", &[]).await;
    let second = run_turn(&responder, "b", &[HistoryEntry::user("a"), HistoryEntry::assistant("one")]).await;

    assert_eq!(texts(&first), vec![THINKING_MESSAGE, "one"]);
    assert_eq!(texts(&second), vec![THINKING_MESSAGE, "one"]);
    assert_eq!(provider.calls(), 2);

    let requests = provider.requests.lock().unwrap();
    assert_eq!(requests[1].messages.len(), 4);
}
