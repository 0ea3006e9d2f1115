// src/error.rs

//! Unified error handling for the portal client.
//!
//! Portal operations report one of three coarse outcomes: [`AppError::Auth`],
//! [`AppError::Validation`] and [`AppError::Fetch`]. Each carries a
//! [`FailureReason`] for diagnostics, but callers are expected to branch on
//! the variant (or on [`AppError::kind`]) only.

use std::fmt;

use thiserror::Error;

/// Result type alias for portal operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Credential exchange did not yield a session token
    #[error("Authentication failed: {0}")]
    Auth(FailureReason),

    /// Session token was rejected or could not be checked
    #[error("Session validation failed: {0}")]
    Validation(FailureReason),

    /// Portal page could not be retrieved
    #[error("Fetch of '{path}' failed: {reason}")]
    Fetch { path: String, reason: FailureReason },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// CSS selector parsing failed
    #[error("Invalid selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Why a portal operation failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("transport error: {0}")]
    Transport(String),

    #[error("unexpected HTTP status {0}")]
    Status(u16),

    #[error("response did not set the {0} cookie")]
    MissingCookie(&'static str),

    #[error("portal reported status {0:?}")]
    NotAuthenticated(String),

    #[error("session token was rejected")]
    TokenRejected,

    #[error("invalid relative path: {0}")]
    InvalidPath(String),
}

/// The three outcomes callers can tell apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Auth,
    Validation,
    Fetch,
}

impl AppError {
    /// Create a selector parsing error.
    pub fn selector(selector: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a fetch error for a relative path.
    pub fn fetch(path: impl Into<String>, reason: FailureReason) -> Self {
        Self::Fetch {
            path: path.into(),
            reason,
        }
    }

    /// Coarse kind of a portal failure, `None` for ambient errors.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            Self::Auth(_) => Some(FailureKind::Auth),
            Self::Validation(_) => Some(FailureKind::Validation),
            Self::Fetch { .. } => Some(FailureKind::Fetch),
            _ => None,
        }
    }

    /// Diagnostic reason of a portal failure.
    pub fn reason(&self) -> Option<&FailureReason> {
        match self {
            Self::Auth(reason) | Self::Validation(reason) | Self::Fetch { reason, .. } => {
                Some(reason)
            }
            _ => None,
        }
    }
}
