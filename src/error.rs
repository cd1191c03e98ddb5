//! Custom error types for the dashboard service
//!
//! Panel fetches only ever fail with a `FetchError`; the panel boundary turns
//! it into a `Failed` state. `ConfigError` is reserved for startup.

use thiserror::Error;

/// Failure of a single panel fetch
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("No API credential configured for the generative text API")]
    MissingCredential,

    #[error("Network failure: {0}")]
    Network(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    /// Short machine-friendly name used in logs and events
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::MissingCredential => "missing_credential",
            FetchError::Network(_) => "network_failure",
            FetchError::MalformedResponse(_) => "malformed_response",
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            FetchError::MalformedResponse(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::MalformedResponse(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for FetchError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;
        match err {
            OpenAIError::JSONDeserialize(e) => FetchError::MalformedResponse(e.to_string()),
            other => FetchError::Network(other.to_string()),
        }
    }
}

/// Startup configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Errors surfaced by the selection shell
#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Unknown stock id {0}")]
    UnknownStock(u32),

    #[error("Unknown category {0}")]
    UnknownCategory(String),

    #[error("Failed to serialize panel state: {0}")]
    Serialize(#[from] serde_json::Error),
}
