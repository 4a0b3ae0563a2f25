//! Error types for hackdeck.

use thiserror::Error;

/// Errors that can occur while loading or exporting events.
#[derive(Error, Debug)]
pub enum HackdeckError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load {url}: HTTP {status}")]
    Fetch { status: u16, url: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Event with id {0} not found")]
    NotFound(u64),

    #[error("Malformed payload from {url}: {source}")]
    MalformedPayload {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Session error: {0}")]
    Session(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HackdeckError {
    /// Whether a retry could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            HackdeckError::Network(_) => true,
            HackdeckError::Fetch { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Result type alias for hackdeck operations.
pub type HackdeckResult<T> = Result<T, HackdeckError>;

/// A login attempt that did not match the demo credentials.
///
/// Deliberately carries no detail about which field was wrong.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthError {
    #[error("Invalid username or password")]
    InvalidCredentials,
}
