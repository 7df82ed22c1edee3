use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KisanMitraError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("API key is not set. Run `kisan-mitra config --set-api-key YOUR_KEY` or set KISAN_MITRA_API_KEY")]
    MissingApiKey,

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to parse API response: {0}")]
    ApiParse(String),

    #[error("Input error: {0}")]
    Input(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] kisan_mitra_common::Error),
}

impl KisanMitraError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, KisanMitraError::NotFound { .. })
    }

    /// Network-class failures: transport, deadline, non-2xx status
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            KisanMitraError::Network(_) | KisanMitraError::Timeout(_) | KisanMitraError::Http { .. }
        )
    }

    /// LLM output that did not match the expected shape
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            KisanMitraError::ApiParse(_)
                | KisanMitraError::Common(kisan_mitra_common::Error::MalformedResponse(_))
                | KisanMitraError::Common(kisan_mitra_common::Error::Parse(_))
                | KisanMitraError::Common(kisan_mitra_common::Error::Json(_))
        )
    }
}

pub type Result<T> = std::result::Result<T, KisanMitraError>;
