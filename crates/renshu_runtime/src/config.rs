//! Runtime configuration for Renshu
//!
//! Resolved once at startup and injected into the responder; nothing reads the
//! environment at turn time.

use renshu_core::RENSHU_SYSTEM_PROMPT;
use renshu_llms::providers::huggingface::DEFAULT_BASE_URL;

use crate::sampling::SamplingParams;

pub const DEFAULT_MODEL: &str = "Qwen/Qwen2.5-72B-Instruct";
pub const DEFAULT_FALLBACK_MODEL: &str = "Qwen/Qwen2.5-7B-Instruct";

/// Environment variable holding the inference access token
pub const CREDENTIAL_ENV: &str = "HF_TOKEN";

/// Inference access token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Returns `None` for an empty or whitespace-only token.
    pub fn new(token: impl Into<String>) -> Option<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            None
        } else {
            Some(Self(token))
        }
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct RenshuConfig {
    /// Access token; `None` makes every turn short-circuit with the setup error
    pub credential: Option<Credential>,
    /// Model used for every request
    pub model: String,
    /// Smaller model suggested to the user when a request fails
    pub fallback_model: String,
    /// OpenAI-compatible endpoint root
    pub base_url: String,
    /// Persona prepended to every request
    pub system_prompt: String,
    /// Defaults for surfaces that do not pass their own values
    pub sampling: SamplingParams,
}

impl Default for RenshuConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl RenshuConfig {
    pub fn new() -> Self {
        Self {
            credential: None,
            model: DEFAULT_MODEL.to_string(),
            fallback_model: DEFAULT_FALLBACK_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            system_prompt: RENSHU_SYSTEM_PROMPT.to_string(),
            sampling: SamplingParams::default(),
        }
    }

    pub fn with_credential(mut self, token: impl Into<String>) -> Self {
        self.credential = Credential::new(token);
        self
    }

    pub fn without_credential(mut self) -> Self {
        self.credential = None;
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_sampling(mut self, sampling: SamplingParams) -> Self {
        self.sampling = sampling;
        self
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// Reads:
    /// - `HF_TOKEN` → credential (empty counts as unset)
    /// - `RENSHU_MODEL`, `RENSHU_FALLBACK_MODEL`, `RENSHU_BASE_URL`, `RENSHU_SYSTEM_PROMPT`
    /// - `RENSHU_MAX_TOKENS`, `RENSHU_TEMPERATURE`, `RENSHU_TOP_P` (ignored when unparseable)
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new();

        config.credential = lookup(CREDENTIAL_ENV).and_then(Credential::new);

        if let Some(model) = non_empty(lookup("RENSHU_MODEL")) {
            config.model = model;
        }

        if let Some(model) = non_empty(lookup("RENSHU_FALLBACK_MODEL")) {
            config.fallback_model = model;
        }

        if let Some(url) = non_empty(lookup("RENSHU_BASE_URL")) {
            config.base_url = url;
        }

        if let Some(prompt) = non_empty(lookup("RENSHU_SYSTEM_PROMPT")) {
            config.system_prompt = prompt;
        }

        if let Some(val) = lookup("RENSHU_MAX_TOKENS").and_then(|v| v.trim().parse::<u32>().ok()) {
            config.sampling.max_tokens = val;
        }

        if let Some(val) = lookup("RENSHU_TEMPERATURE").and_then(|v| v.trim().parse::<f32>().ok()) {
            config.sampling.temperature = val;
        }

        if let Some(val) = lookup("RENSHU_TOP_P").and_then(|v| v.trim().parse::<f32>().ok()) {
            config.sampling.top_p = val;
        }

        config
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_new() {
        let config = RenshuConfig::new();
        assert!(config.credential.is_none());
        assert_eq!(config.model, "Qwen/Qwen2.5-72B-Instruct");
        assert_eq!(config.fallback_model, "Qwen/Qwen2.5-7B-Instruct");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.system_prompt, RENSHU_SYSTEM_PROMPT);
        assert_eq!(config.sampling, SamplingParams::default());
    }

    #[test]
    fn test_config_builder() {
        let config = RenshuConfig::new()
            .with_credential("hf_abc")
            .with_model("Qwen/Qwen2.5-7B-Instruct")
            .with_fallback_model("tiny")
            .with_base_url("http://localhost:8080/v1/")
            .with_system_prompt("be brief")
            .with_sampling(SamplingParams::new(256, 1.0, 0.5));

        assert_eq!(config.credential.as_ref().map(Credential::expose), Some("hf_abc"));
        assert_eq!(config.model, "Qwen/Qwen2.5-7B-Instruct");
        assert_eq!(config.fallback_model, "tiny");
        assert_eq!(config.base_url, "http://localhost:8080/v1/");
        assert_eq!(config.system_prompt, "be brief");
        assert_eq!(config.sampling.max_tokens, 256);

        assert!(!config.without_credential().has_credential());
    }

    #[test]
    fn test_from_lookup_reads_everything() {
        let config = RenshuConfig::from_lookup(lookup_from(&[
            ("HF_TOKEN", "hf_env"),
            ("RENSHU_MODEL", "m"),
            ("RENSHU_FALLBACK_MODEL", "f"),
            ("RENSHU_BASE_URL", "http://x/"),
            ("RENSHU_SYSTEM_PROMPT", "p"),
            ("RENSHU_MAX_TOKENS", "256"),
            ("RENSHU_TEMPERATURE", "1.5"),
            ("RENSHU_TOP_P", "0.5"),
        ]));

        assert!(config.has_credential());
        assert_eq!(config.model, "m");
        assert_eq!(config.fallback_model, "f");
        assert_eq!(config.base_url, "http://x/");
        assert_eq!(config.system_prompt, "p");
        assert_eq!(config.sampling, SamplingParams::new(256, 1.5, 0.5));
    }

    #[test]
    fn test_from_lookup_empty_token_is_missing() {
        let config = RenshuConfig::from_lookup(lookup_from(&[("HF_TOKEN", "   ")]));
        assert!(!config.has_credential());

        let config = RenshuConfig::from_lookup(lookup_from(&[]));
        assert!(!config.has_credential());
    }

    #[test]
    fn test_from_lookup_ignores_bad_numbers() {
        let config = RenshuConfig::from_lookup(lookup_from(&[
            ("RENSHU_MAX_TOKENS", "lots"),
            ("RENSHU_TEMPERATURE", ""),
            ("RENSHU_MODEL", ""),
        ]));
        assert_eq!(config.sampling, SamplingParams::default());
        assert_eq!(config.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_credential_debug_is_redacted() {
        let config = RenshuConfig::new().with_credential("hf_secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("hf_secret"));
        assert!(debug.contains("<redacted>"));
    }
}
