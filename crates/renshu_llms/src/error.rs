//! Error types for the completions SDK

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// No credential configured for the provider
    #[error("Missing API key for provider '{0}'")]
    MissingApiKey(String),

    /// Transport-level failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Body could not be (de)serialized
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The remote service answered with an error
    #[error("{0}")]
    ProviderError(String),

    /// The event stream broke or carried an undecodable chunk
    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    pub fn provider_error(message: impl Into<String>) -> Self {
        Error::ProviderError(message.into())
    }

    pub fn stream_error(message: impl Into<String>) -> Self {
        Error::StreamError(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_api_key_display() {
        let err = Error::MissingApiKey("huggingface".to_string());
        assert_eq!(err.to_string(), "Missing API key for provider 'huggingface'");
    }

    #[test]
    fn test_provider_error_is_verbatim() {
        let err = Error::provider_error("Hugging Face API error 503: overloaded");
        assert_eq!(err.to_string(), "Hugging Face API error 503: overloaded");
    }

    #[test]
    fn test_stream_error_prefix() {
        let err = Error::stream_error("connection reset");
        assert_eq!(err.to_string(), "Stream error: connection reset");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{oops").unwrap_err();
        let err = Error::from(json_err);
        assert!(err.to_string().starts_with("JSON error:"));
    }
}
