//! Error types for the `ReliefAI` application
//!
//! Startup and input errors are the only real errors here: remote lookup
//! failures degrade through `FetchOutcome` fallbacks instead of raising.

use thiserror::Error;

/// Main error type for the `ReliefAI` application
#[derive(Error, Debug)]
pub enum ReliefAiError {
    /// Bad configuration: endpoints, weather API key, shelter data
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A speech service request that cannot be degraded silently
    #[error("Service error: {message}")]
    Api { message: String },

    /// Rejected user input, such as an unsupported language code
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O failure on the transient audio spool
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl ReliefAiError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new service error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            ReliefAiError::Config { .. } => {
                "ReliefAI is misconfigured. Check the config file, service endpoints, and weather API key."
                    .to_string()
            }
            ReliefAiError::Api { .. } => {
                "An assistant service could not be reached. Answers may arrive with reduced detail."
                    .to_string()
            }
            ReliefAiError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            ReliefAiError::Io { .. } => {
                "Could not read or write the recorded audio. Try recording again.".to_string()
            }
        }
    }
}
