//! Hugging Face wire types

use serde::{Deserialize, Serialize};

pub const DEFAULT_BASE_URL: &str = "https://router.huggingface.co/v1/";

/// Configuration for the Hugging Face provider
#[derive(Clone)]
pub struct HuggingFaceConfig {
    /// Access token sent as a bearer credential
    pub api_key: String,
    /// Base URL, always ending in `/`
    pub base_url: String,
}

impl HuggingFaceConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        if !url.ends_with('/') {
            url.push('/');
        }
        self.base_url = url;
        self
    }
}

impl std::fmt::Debug for HuggingFaceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HuggingFaceConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
pub struct HuggingFaceRequest {
    pub model: String,
    pub messages: Vec<HuggingFaceMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
    pub stream: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HuggingFaceMessage {
    pub role: String,
    pub content: String,
}

/// One `data:` payload of the event stream.
///
/// Deployments report overload and validation problems in-band as
/// `{"error": "...", "error_type": "..."}`, so the error shape is tried first.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HuggingFaceStreamPayload {
    Error(HuggingFaceStreamError),
    Chunk(HuggingFaceStreamChunk),
}

#[derive(Debug, Deserialize)]
pub struct HuggingFaceStreamError {
    pub error: serde_json::Value,
    #[serde(default)]
    pub error_type: Option<String>,
}

impl HuggingFaceStreamError {
    /// Human-readable message for either a string or an `{ "message": .. }` error.
    pub fn message(&self) -> String {
        let base = match &self.error {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Object(obj) => obj
                .get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| self.error.to_string()),
            other => other.to_string(),
        };
        match &self.error_type {
            Some(kind) => format!("{base} ({kind})"),
            None => base,
        }
    }
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct HuggingFaceStreamChunk {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    /// Absent on usage-only chunks
    #[serde(default)]
    pub choices: Vec<HuggingFaceStreamChoice>,
    #[serde(default)]
    pub usage: Option<HuggingFaceUsage>,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
pub struct HuggingFaceStreamChoice {
    #[serde(default)]
    pub index: u32,
    #[serde(default)]
    pub delta: HuggingFaceDelta,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[allow(dead_code)]
pub struct HuggingFaceDelta {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HuggingFaceUsage {
    #[serde(default)]
    pub prompt_tokens: u32,
    #[serde(default)]
    pub completion_tokens: u32,
}
