//! Crate error types.
//!
//! Collaborator failures (storage, media, assistant, configuration) carry
//! enough context to be shown to the user. Deck mutations never produce an
//! `Error`; they report refusals through [`crate::edit::EditOutcome`].

use thiserror::Error;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Network error (connection, timeout, DNS)
    #[error("Network error: {0}")]
    Network(String),

    /// Assistant API error with status context
    #[error("Assistant error: {message}")]
    Assistant {
        /// Human-readable error description.
        message: String,
        /// HTTP status code, if from an HTTP response.
        status: Option<u16>,
        /// Actionable suggestion for resolving the error.
        hint: Option<&'static str>,
    },

    /// Configuration error with guidance
    #[error("Configuration error: {message}. {hint}")]
    Config {
        /// Description of the configuration problem.
        message: String,
        /// Actionable guidance for fixing the issue.
        hint: &'static str,
    },

    /// Parsing error (persisted decks, shape markup, assistant replies)
    #[error("Parse error in {file:?}: {message}")]
    Parse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// Description of the parse failure.
        message: String,
    },

    /// Deck store error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Media input error
    #[error("Media error for {path:?}: {message}")]
    Media {
        /// The file the user supplied.
        path: std::path::PathBuf,
        /// Why it could not be used.
        message: String,
    },

    /// Generic message error (escape hatch)
    #[error("{0}")]
    Msg(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create an assistant error without HTTP context
    pub fn assistant(message: impl Into<String>) -> Self {
        Self::Assistant {
            message: message.into(),
            status: None,
            hint: None,
        }
    }

    /// Create an assistant error with HTTP status
    pub fn assistant_status(message: impl Into<String>, status: u16) -> Self {
        let hint = match status {
            400 => Some("The request was rejected - check WRAPDECK_ASSISTANT_MODEL"),
            401 | 403 => Some("Check the GEMINI_API_KEY environment variable"),
            404 => Some("The configured model was not found"),
            429 => Some("Rate limited - wait a moment and try again"),
            500..=599 => Some("Assistant server error - try again later"),
            _ => None,
        };
        Self::Assistant {
            message: message.into(),
            status: Some(status),
            hint,
        }
    }

    /// Create a config error with actionable hint
    pub fn config(message: impl Into<String>, hint: &'static str) -> Self {
        Self::Config { message: message.into(), hint }
    }

    /// Create a parse error with file context
    pub fn parse(message: impl Into<String>, file: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Parse { file: file.into(), message: message.into() }
    }

    /// Create a media error for a user-supplied path
    pub fn media(path: impl Into<std::path::PathBuf>, message: impl Into<String>) -> Self {
        Self::Media { path: path.into(), message: message.into() }
    }
}

// Convenience conversions
impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse { file: None, message: e.to_string() }
    }
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Self::Msg(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Self::Msg(s.to_string())
    }
}
