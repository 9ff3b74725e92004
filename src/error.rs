//! Error handling module for the questionnaire
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Submission failures are rendered to the user through their `Display` output,
//! so every message here is written to be shown as-is.

use thiserror::Error;

/// Main error type for the questionnaire
#[derive(Error, Debug)]
pub enum QuizError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration errors (loading, parsing, validation)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation errors (question lists, answer files)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The request never produced a response (connection refused, timeout)
    #[error("Request to recommendation service failed: {0}")]
    Transport(String),

    /// The service answered with a non-success status
    #[error("Recommendation request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// A success response whose body does not have the expected shape
    #[error("Malformed recommendation response: {0}")]
    Decode(String),

    /// Session state machine rejected the action
    #[error("Submission error: {0}")]
    Submission(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for questionnaire operations
pub type Result<T> = std::result::Result<T, QuizError>;

// Convenient error constructors
impl QuizError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a submission (state machine) error
    pub fn submission(msg: impl Into<String>) -> Self {
        Self::Submission(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// True for failures reported by the network boundary, as opposed to
    /// local state or configuration problems.
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Decode(_)
        )
    }
}
