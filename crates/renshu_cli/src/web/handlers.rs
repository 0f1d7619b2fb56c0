//! Request handlers for the web surface.

use std::convert::Infallible;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::response::Html;
use axum::Json;
use futures::{Stream, StreamExt};
use renshu_core::{HistoryEntry, EXAMPLE_PROMPTS};
use renshu_runtime::sampling::{MAX_TOKENS_SLIDER, TEMPERATURE_SLIDER, TOP_P_SLIDER};
use renshu_runtime::{ReplyUpdate, SliderSpec};
use serde::{Deserialize, Serialize};

use super::AppState;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

pub const TITLE: &str = "Renshu (練習) - AI Tutor";

/// Body of `POST /api/chat`. Missing sampling values use the server defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SettingsResponse {
    pub title: &'static str,
    pub model: String,
    pub fallback_model: String,
    pub has_credential: bool,
    pub max_tokens: SliderSpec<u32>,
    pub temperature: SliderSpec<f32>,
    pub top_p: SliderSpec<f32>,
    pub examples: Vec<&'static str>,
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn settings(State(state): State<AppState>) -> Json<SettingsResponse> {
    let defaults = state.defaults;
    Json(SettingsResponse {
        title: TITLE,
        model: state.responder.model().to_string(),
        fallback_model: state.responder.fallback_model().to_string(),
        has_credential: state.responder.has_credential(),
        max_tokens: SliderSpec {
            default: defaults.max_tokens,
            ..MAX_TOKENS_SLIDER
        },
        temperature: SliderSpec {
            default: defaults.temperature,
            ..TEMPERATURE_SLIDER
        },
        top_p: SliderSpec {
            default: defaults.top_p,
            ..TOP_P_SLIDER
        },
        examples: EXAMPLE_PROMPTS.to_vec(),
    })
}

pub async fn chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let params = state
        .defaults
        .overridden_by(request.max_tokens, request.temperature, request.top_p)
        .clamped();

    let updates = state
        .responder
        .respond(&request.message, &request.history, params);

    Sse::new(updates.map(|update| Ok(to_event(&update)))).keep_alive(KeepAlive::default())
}

/// SSE event named after the update kind; data is the full text as a JSON string.
fn to_event(update: &ReplyUpdate) -> Event {
    let data = serde_json::to_string(update.text()).unwrap_or_default();
    Event::default().event(update.kind()).data(data)
}
