//! Provider trait

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{GenerateRequest, GenerateStream, Headers};

/// A remote chat-completion backend that can stream a reply.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Stable identifier used in logs and error messages.
    fn provider_id(&self) -> &str;

    /// Headers sent with every request, merged with per-request overrides.
    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers;

    /// Open a streaming completion.
    ///
    /// Errors that happen before the first event (bad request, refused
    /// connection) may surface either here or as the first stream item.
    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream>;
}
