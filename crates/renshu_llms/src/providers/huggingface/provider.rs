//! Hugging Face provider implementation

use super::convert::to_huggingface_request;
use super::stream::create_stream;
use super::types::HuggingFaceConfig;
use crate::error::{Error, Result};
use crate::provider::Provider;
use crate::types::{GenerateRequest, GenerateStream, Headers};
use async_trait::async_trait;
use reqwest::Client;
use reqwest_eventsource::EventSource;

/// Hugging Face provider
pub struct HuggingFaceProvider {
    config: HuggingFaceConfig,
    client: Client,
}

impl HuggingFaceProvider {
    /// Environment variable for the access token
    pub const API_KEY_ENV: &'static str = "HF_TOKEN";

    /// Create a new provider; an empty token is rejected
    pub fn new(config: HuggingFaceConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(Error::MissingApiKey("huggingface".to_string()));
        }

        let client = Client::new();
        Ok(Self { config, client })
    }

    /// Create provider from environment
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(Self::API_KEY_ENV)
            .map_err(|_| Error::MissingApiKey("huggingface".to_string()))?;

        Self::new(HuggingFaceConfig::new(api_key))
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }
}

#[async_trait]
impl Provider for HuggingFaceProvider {
    fn provider_id(&self) -> &str {
        "huggingface"
    }

    fn build_headers(&self, custom_headers: Option<&Headers>) -> Headers {
        let mut headers = Headers::new();
        headers.insert("Authorization", format!("Bearer {}", self.config.api_key));
        headers.insert("Content-Type", "application/json");
        headers.insert("Accept", "text/event-stream");

        if let Some(custom) = custom_headers {
            headers.merge_with(custom);
        }

        headers
    }

    async fn stream(&self, request: GenerateRequest) -> Result<GenerateStream> {
        let url = format!("{}chat/completions", self.config.base_url);
        let body = to_huggingface_request(&request, true);
        let headers = self.build_headers(request.options.headers.as_ref());

        tracing::debug!(
            provider = self.provider_id(),
            model = %request.model,
            messages = request.messages.len(),
            "Opening chat completion stream"
        );

        let req_builder = self
            .client
            .post(&url)
            .headers(headers.to_reqwest_headers())
            .json(&body);

        let event_source = EventSource::new(req_builder)
            .map_err(|e| Error::stream_error(format!("Failed to create event source: {}", e)))?;

        create_stream(event_source).await
    }
}
