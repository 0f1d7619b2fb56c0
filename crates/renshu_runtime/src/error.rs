//! Turn error types

use thiserror::Error;

/// Why a turn ended without a complete reply.
#[derive(Debug, Error)]
pub enum TurnError {
    /// No access token configured; detected before any network attempt
    #[error("inference credential is not configured")]
    MissingCredential,

    /// Connecting, streaming or decoding the reply failed
    #[error("{0}")]
    Inference(String),
}

impl TurnError {
    pub fn is_missing_credential(&self) -> bool {
        matches!(self, TurnError::MissingCredential)
    }
}

impl From<renshu_llms::Error> for TurnError {
    fn from(err: renshu_llms::Error) -> Self {
        match err {
            renshu_llms::Error::MissingApiKey(_) => TurnError::MissingCredential,
            other => TurnError::Inference(other.to_string()),
        }
    }
}

pub type Result<T> = std::result::Result<T, TurnError>;
