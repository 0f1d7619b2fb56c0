//! Per-turn orchestration: credential check, prompt assembly, streaming and
//! republishing of the accumulated reply.

pub mod config;
pub mod error;
pub mod responder;
pub mod sampling;

pub use config::{Credential, RenshuConfig, DEFAULT_FALLBACK_MODEL, DEFAULT_MODEL};
pub use error::{Result, TurnError};
pub use responder::{ReplyStream, ReplyUpdate, Responder, SETUP_ERROR_MESSAGE, THINKING_MESSAGE};
pub use sampling::{SamplingParams, SliderSpec};
