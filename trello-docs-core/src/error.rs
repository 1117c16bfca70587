//! Error taxonomy shared by the client, the configuration module and the
//! generation pipeline.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, DocsError>;

#[derive(Error, Debug)]
pub enum DocsError {
    /// One or more configuration rules failed. Generation never starts.
    #[error("Invalid configuration: {}", .0.join("; "))]
    Configuration(Vec<String>),

    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// API key or token missing, or rejected by the remote API.
    #[error("Missing or invalid Trello credentials: {0}")]
    Credential(String),

    /// The remote API answered with a non-success status.
    #[error("Request to {endpoint} failed with HTTP {status}: {body}")]
    Http {
        endpoint: String,
        status: u16,
        body: String,
    },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}

impl DocsError {
    /// True for errors caused by the caller's input rather than by the
    /// remote service or the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            DocsError::Configuration(_) | DocsError::UnknownPreset(_)
        )
    }
}
