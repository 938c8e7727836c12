//! Error types and handling for the `TrailScout` pipeline

use thiserror::Error;

/// Main error type for the `TrailScout` library
#[derive(Error, Debug)]
pub enum TrailScoutError {
    /// Recommendation blob lacks the expected delimiter grammar
    #[error("Format error: {message}")]
    Format { message: String },

    /// A run produced no usable trail records
    #[error("Empty result: {message}")]
    EmptyResult { message: String },

    /// The upstream service recorded an error before the run started
    #[error("Upstream error: {message}")]
    Upstream { message: String },

    /// Geocoding API communication errors
    #[error("API error: {message}")]
    Api { message: String },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Store operation errors
    #[error("Store error: {message}")]
    Store { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// General application errors
    #[error("Application error: {message}")]
    General { message: String },
}

impl TrailScoutError {
    /// Create a new format error
    pub fn format<S: Into<String>>(message: S) -> Self {
        Self::Format {
            message: message.into(),
        }
    }

    /// Create a new empty-result error
    pub fn empty_result<S: Into<String>>(message: S) -> Self {
        Self::EmptyResult {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }

    /// Create a new API error
    pub fn api<S: Into<String>>(message: S) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new store error
    pub fn store<S: Into<String>>(message: S) -> Self {
        Self::Store {
            message: message.into(),
        }
    }

    /// Create a new general error
    pub fn general<S: Into<String>>(message: S) -> Self {
        Self::General {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            TrailScoutError::Format { .. } => {
                "Trail recommendations were in an unexpected format. Please try again.".to_string()
            }
            TrailScoutError::EmptyResult { message } => message.clone(),
            TrailScoutError::Upstream { message } => message.clone(),
            TrailScoutError::Api { .. } => {
                "Unable to reach the geocoding service. Please check your internet connection."
                    .to_string()
            }
            TrailScoutError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            TrailScoutError::Store { .. } => {
                "Local storage operation failed. You may need to clear the app data.".to_string()
            }
            TrailScoutError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
            TrailScoutError::General { message } => message.clone(),
        }
    }
}
