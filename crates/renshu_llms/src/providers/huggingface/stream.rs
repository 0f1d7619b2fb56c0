//! Hugging Face streaming support
//!
//! The router uses the OpenAI-compatible SSE format:
//! - `data: {"choices":[{"delta":{"content":"..."}}]}` for text deltas
//! - `data: {"error":"...","error_type":"..."}` for in-band failures
//! - `data: [DONE]` to signal stream end

use super::types::{HuggingFaceStreamChunk, HuggingFaceStreamPayload};
use crate::error::{Error, Result};
use crate::types::{FinishReason, GenerateStream, StreamEvent, Usage};
use futures::stream::StreamExt;
use reqwest_eventsource::{Event, EventSource};

/// Create a stream from a Hugging Face EventSource
pub async fn create_stream(mut event_source: EventSource) -> Result<GenerateStream> {
    let stream = async_stream::stream! {
        while let Some(event) = event_source.next().await {
            match event {
                Ok(Event::Open) => continue,
                Ok(Event::Message(message)) => {
                    if message.data.trim() == "[DONE]" {
                        break;
                    }

                    match serde_json::from_str::<HuggingFaceStreamPayload>(&message.data) {
                        Ok(HuggingFaceStreamPayload::Chunk(chunk)) => {
                            for stream_event in process_chunk(chunk) {
                                yield Ok(stream_event);
                            }
                        }
                        Ok(HuggingFaceStreamPayload::Error(err)) => {
                            yield Ok(StreamEvent::error(err.message()));
                            break;
                        }
                        Err(e) => {
                            yield Err(Error::stream_error(format!(
                                "Failed to parse Hugging Face chunk: {}", e
                            )));
                            break;
                        }
                    }
                }
                Err(reqwest_eventsource::Error::StreamEnded) => break,
                Err(reqwest_eventsource::Error::InvalidStatusCode(status, response)) => {
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    yield Err(Error::provider_error(format!(
                        "Hugging Face API error {}: {}", status, error_body
                    )));
                    break;
                }
                Err(reqwest_eventsource::Error::InvalidContentType(content_type, response)) => {
                    let error_body = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Unable to read error body".to_string());
                    yield Err(Error::provider_error(format!(
                        "Unexpected content type {:?}: {}", content_type, error_body
                    )));
                    break;
                }
                Err(e) => {
                    yield Err(Error::stream_error(e.to_string()));
                    break;
                }
            }
        }

        event_source.close();
    };

    Ok(GenerateStream::new(Box::pin(stream)))
}

/// Process a single chunk into unified StreamEvent(s)
fn process_chunk(chunk: HuggingFaceStreamChunk) -> Vec<StreamEvent> {
    let mut events = Vec::new();

    for choice in &chunk.choices {
        if let Some(ref content) = choice.delta.content {
            if !content.is_empty() {
                events.push(StreamEvent::text_delta(content.clone()));
            }
        }

        if choice.finish_reason.is_some() {
            let usage = chunk
                .usage
                .as_ref()
                .map(|u| Usage::new(u.prompt_tokens, u.completion_tokens))
                .unwrap_or_default();

            events.push(StreamEvent::finish(
                usage,
                FinishReason::parse(choice.finish_reason.as_deref()),
            ));
        }
    }

    events
}
