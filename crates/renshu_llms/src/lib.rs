//! renshu_llms: streaming chat completions against OpenAI-compatible endpoints.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐   GenerateRequest   ┌──────────────────────┐
//! │  caller          │ ──────────────────▶ │  dyn Provider        │
//! │  (responder)     │ ◀────────────────── │  HuggingFaceProvider │
//! └─────────────────┘   GenerateStream     └──────────────────────┘
//!                       (Result<StreamEvent>)        │  SSE
//!                                                    ▼
//!                                     POST {base_url}chat/completions
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use renshu_llms::{GenerateRequest, HuggingFaceProvider, Message, Provider, StreamEvent};
//!
//! # async fn run() -> renshu_llms::Result<()> {
//! let provider = HuggingFaceProvider::from_env()?;
//! let request = GenerateRequest::new(
//!     "Qwen/Qwen2.5-72B-Instruct",
//!     vec![Message::user("こんにちは")],
//! )
//! .with_max_tokens(256);
//!
//! let mut stream = provider.stream(request).await?;
//! while let Some(event) = stream.next().await {
//!     if let StreamEvent::TextDelta { delta } = event? {
//!         print!("{delta}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod provider;
pub mod providers;
pub mod types;

pub use error::{Error, Result};
pub use provider::Provider;

pub use providers::HuggingFaceProvider;

pub use types::{
    FinishReason, GenerateOptions, GenerateRequest, GenerateStream, Headers, Message, Role,
    StreamEvent, Usage,
};
