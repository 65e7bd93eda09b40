// src/error.rs

//! Unified error handling for the award site.

use std::fmt;

use thiserror::Error;

/// Result type alias for AwardHub operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Data endpoint answered with a non-success HTTP status
    #[error("Network error: HTTP {status}")]
    Network { status: u16 },

    /// Data endpoint envelope was malformed or reported failure
    #[error("API error: {0}")]
    Api(String),

    /// URL segment could not be interpreted
    #[error("Invalid input: {0}")]
    Input(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed before a status was received
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    /// Create an API envelope error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Create an input error.
    pub fn input(message: impl fmt::Display) -> Self {
        Self::Input(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the error should be shown inline to a visitor.
    ///
    /// Transport failures are folded in with `Network` since the visitor
    /// sees the same thing: the data could not be loaded.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Api(_) | Self::Input(_) | Self::Http(_)
        )
    }
}
