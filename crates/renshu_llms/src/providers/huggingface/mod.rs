//! Hugging Face inference provider
//!
//! Speaks the OpenAI-compatible chat-completion API exposed by the Hugging Face
//! router (and by Text Generation Inference deployments).
//! API docs: https://huggingface.co/docs/inference-providers/tasks/chat-completion

mod convert;
mod provider;
mod stream;
mod types;

pub use provider::HuggingFaceProvider;
pub use types::{HuggingFaceConfig, DEFAULT_BASE_URL};
