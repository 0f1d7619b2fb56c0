//! Streaming responder.
//!
//! One call to [`Responder::respond`] is one turn:
//!
//! ```text
//! IDLE → CREDENTIAL_CHECK ─┬─ missing ──▶ FAILED (setup message, no network)
//!                          └─ present ──▶ REQUEST_BUILT → STREAMING
//!                                           → ACCUMULATING* → COMPLETE | FAILED
//! ```
//!
//! Every produced [`ReplyUpdate`] carries the full text the UI should show, so a
//! consumer simply redraws with the latest value.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use futures::{Stream, StreamExt};
use renshu_core::{ConversationTurn, HistoryEntry, PromptAssembler, Role};
use renshu_llms::providers::huggingface::HuggingFaceConfig;
use renshu_llms::{GenerateRequest, HuggingFaceProvider, Message, Provider, StreamEvent};
use renshu_observability::{chat_turn_span, record_duration, record_error};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::RenshuConfig;
use crate::error::TurnError;
use crate::sampling::SamplingParams;

/// Transient notice shown before the first fragment arrives.
pub const THINKING_MESSAGE: &str = "🇯🇵 Renshu is thinking...";

/// Sole output of a turn when no credential is configured.
pub const SETUP_ERROR_MESSAGE: &str = "⚠️ **Setup Error:** Token missing! \
Set 'HF_TOKEN' in the environment (or in ~/.renshu/env or the project .env file) and restart Renshu.";

/// One produced value of a turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum ReplyUpdate {
    /// Placeholder until real output arrives
    Status(String),
    /// Everything generated so far
    Partial(String),
    /// Terminal error text; nothing follows it
    #[serde(rename = "error")]
    Failed(String),
}

impl ReplyUpdate {
    pub fn text(&self) -> &str {
        match self {
            ReplyUpdate::Status(text) | ReplyUpdate::Partial(text) | ReplyUpdate::Failed(text) => {
                text
            }
        }
    }

    pub fn into_text(self) -> String {
        match self {
            ReplyUpdate::Status(text) | ReplyUpdate::Partial(text) | ReplyUpdate::Failed(text) => {
                text
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ReplyUpdate::Status(_) => "status",
            ReplyUpdate::Partial(_) => "partial",
            ReplyUpdate::Failed(_) => "error",
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ReplyUpdate::Failed(_))
    }
}

impl std::fmt::Display for ReplyUpdate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.text())
    }
}

type BoxedUpdates = Pin<Box<dyn Stream<Item = ReplyUpdate> + Send>>;

/// The finite, non-restartable sequence of updates for one turn.
pub struct ReplyStream {
    inner: BoxedUpdates,
}

impl ReplyStream {
    fn new(inner: BoxedUpdates) -> Self {
        Self { inner }
    }

    fn once(update: ReplyUpdate) -> Self {
        Self::new(Box::pin(futures::stream::once(async move { update })))
    }
}

impl Stream for ReplyStream {
    type Item = ReplyUpdate;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Turns a chat message plus history into a stream of cumulative reply updates.
pub struct Responder {
    /// Why no turn can reach the model, when that is already known
    provider: std::result::Result<Arc<dyn Provider>, TurnError>,
    assembler: PromptAssembler,
    model: String,
    fallback_model: String,
}

impl Responder {
    /// Use `provider` for every turn, unless `config` carries no credential, in
    /// which case the provider is never called.
    pub fn new(config: &RenshuConfig, provider: Arc<dyn Provider>) -> Self {
        Self::with_provider(config, Ok(provider))
    }

    /// Build the Hugging Face backed responder described by `config`.
    pub fn from_config(config: &RenshuConfig) -> Self {
        let provider = match &config.credential {
            Some(credential) => {
                let hf_config = HuggingFaceConfig::new(credential.expose())
                    .with_base_url(config.base_url.as_str());
                HuggingFaceProvider::new(hf_config)
                    .map(|provider| Arc::new(provider) as Arc<dyn Provider>)
                    .map_err(|e| {
                        warn!(error = %e, "Could not build inference provider");
                        TurnError::Inference(format!("Could not build inference provider: {e}"))
                    })
            }
            None => Err(TurnError::MissingCredential),
        };
        Self::with_provider(config, provider)
    }

    fn with_provider(
        config: &RenshuConfig,
        provider: std::result::Result<Arc<dyn Provider>, TurnError>,
    ) -> Self {
        let provider = match config.credential {
            Some(_) => provider,
            None => Err(TurnError::MissingCredential),
        };
        if provider.as_ref().is_err_and(TurnError::is_missing_credential) {
            warn!("HF_TOKEN is not set; every turn will report the setup error");
        }

        Self {
            provider,
            assembler: PromptAssembler::new(config.system_prompt.as_str()),
            model: config.model.clone(),
            fallback_model: config.fallback_model.clone(),
        }
    }

    pub fn has_credential(&self) -> bool {
        !matches!(self.provider, Err(TurnError::MissingCredential))
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn fallback_model(&self) -> &str {
        &self.fallback_model
    }

    pub fn assembler(&self) -> &PromptAssembler {
        &self.assembler
    }

    /// Run one turn.
    ///
    /// Without a credential the stream holds exactly [`SETUP_ERROR_MESSAGE`]; a
    /// provider that could not be built yields a single failure naming why.
    /// Otherwise it starts with [`THINKING_MESSAGE`], continues with one
    /// [`ReplyUpdate::Partial`] per non-empty fragment and ends either when the
    /// remote stream closes or with a single [`ReplyUpdate::Failed`].
    pub fn respond(
        &self,
        message: &str,
        history: &[HistoryEntry],
        params: SamplingParams,
    ) -> ReplyStream {
        let span = chat_turn_span!(self.model.as_str(), history.len());

        let provider = match &self.provider {
            Ok(provider) => Arc::clone(provider),
            Err(err) => {
                warn!(parent: &span, error = %err, "Turn rejected before any request");
                return ReplyStream::once(ReplyUpdate::Failed(self.failure_message(err)));
            }
        };

        let request = self.build_request(history, message, params);
        debug!(
            parent: &span,
            messages = request.messages.len(),
            max_tokens = params.max_tokens,
            temperature = params.temperature,
            top_p = params.top_p,
            "Request built"
        );

        let model = self.model.clone();
        let fallback_model = self.fallback_model.clone();

        let stream = async_stream::stream! {
            yield ReplyUpdate::Status(THINKING_MESSAGE.to_string());

            let start = Instant::now();
            let mut events = match provider.stream(request).await {
                Ok(events) => events,
                Err(e) => {
                    let err = TurnError::from(e);
                    span.in_scope(|| record_error(&err));
                    yield ReplyUpdate::Failed(format_failure(&err, &model, &fallback_model));
                    return;
                }
            };

            let mut partial = String::new();
            let mut fragments = 0usize;

            while let Some(event) = events.next().await {
                let err = match event {
                    Ok(StreamEvent::TextDelta { delta }) => {
                        if delta.is_empty() {
                            continue;
                        }
                        fragments += 1;
                        partial.push_str(&delta);
                        yield ReplyUpdate::Partial(partial.clone());
                        continue;
                    }
                    Ok(StreamEvent::Finish { usage, reason }) => {
                        debug!(
                            parent: &span,
                            prompt_tokens = usage.prompt_tokens,
                            completion_tokens = usage.completion_tokens,
                            reason = ?reason,
                            "Remote stream finished"
                        );
                        continue;
                    }
                    Ok(StreamEvent::Error { message }) => TurnError::Inference(message),
                    Err(e) => TurnError::from(e),
                };

                span.in_scope(|| record_error(&err));
                yield ReplyUpdate::Failed(format_failure(&err, &model, &fallback_model));
                return;
            }

            span.in_scope(|| record_duration("turn.duration_ms", start.elapsed()));
            info!(
                parent: &span,
                fragments,
                chars = partial.chars().count(),
                duration_ms = start.elapsed().as_millis() as u64,
                "Turn complete"
            );
        };

        ReplyStream::new(Box::pin(stream))
    }

    /// Message list for one turn, in the provider's types.
    pub fn build_request(
        &self,
        history: &[HistoryEntry],
        message: &str,
        params: SamplingParams,
    ) -> GenerateRequest {
        let messages = self
            .assembler
            .assemble(history, message)
            .into_iter()
            .map(to_llm_message)
            .collect();

        GenerateRequest::new(self.model.as_str(), messages)
            .with_max_tokens(params.max_tokens)
            .with_temperature(params.temperature)
            .with_top_p(params.top_p)
    }

    /// User-facing text for a failed turn.
    pub fn failure_message(&self, err: &TurnError) -> String {
        format_failure(err, &self.model, &self.fallback_model)
    }
}

fn format_failure(err: &TurnError, model: &str, fallback_model: &str) -> String {
    match err {
        TurnError::MissingCredential => SETUP_ERROR_MESSAGE.to_string(),
        TurnError::Inference(_) => format!(
            "❌ Error: {err}\n\nTry switching the model to '{fallback_model}' \
             (set RENSHU_MODEL) if '{model}' is too busy."
        ),
    }
}

fn to_llm_message(turn: ConversationTurn) -> Message {
    match turn.role {
        Role::System => Message::system(turn.content),
        Role::User => Message::user(turn.content),
        Role::Assistant => Message::assistant(turn.content),
    }
}
