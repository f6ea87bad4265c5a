//! Domain-specific error types for pace-registration

use thiserror::Error;

/// Main error type for the registration flow and back-office client
#[derive(Error, Debug)]
pub enum PaceError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("API error: status {status}")]
    Api { status: u16 },

    #[error("Transport error: {message}")]
    Transport { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Timeout error: {operation} timed out")]
    Timeout { operation: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PaceError {
    /// Fixed German text shown to the end user. Raw transport detail
    /// (status codes, source errors) never leaks through here.
    pub fn user_message(&self) -> &'static str {
        match self {
            PaceError::Api { .. } | PaceError::Transport { .. } | PaceError::Timeout { .. } => {
                "Leider hat das nicht funktioniert. Bitte versuche es erneut!"
            }
            PaceError::Validation { .. } => "Bitte überprüfe deine Angaben!",
            _ => "Es ist ein Fehler aufgetreten. Bitte versuche es später erneut!",
        }
    }
}

impl From<anyhow::Error> for PaceError {
    fn from(err: anyhow::Error) -> Self {
        PaceError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for PaceError {
    fn from(err: serde_json::Error) -> Self {
        PaceError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for PaceError {
    fn from(err: std::io::Error) -> Self {
        PaceError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for PaceError {
    fn from(err: toml::de::Error) -> Self {
        PaceError::Config {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for PaceError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return PaceError::Timeout {
                operation: err
                    .url()
                    .map(|u| u.path().to_string())
                    .unwrap_or_else(|| "request".to_string()),
            };
        }
        PaceError::Transport {
            message: format!("HTTP request failed: {}", err),
        }
    }
}

pub type Result<T> = std::result::Result<T, PaceError>;
