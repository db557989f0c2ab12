//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. The
//! dispatcher renders every variant into in-band tool text via
//! [`Error::to_tool_message`]; none of them reach the host as protocol faults.

use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error enum for the bridge.
#[derive(Error, Debug)]
pub enum Error {
    /// Tool name is not in the enabled catalog.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// Client-side contract violation. Never reaches the network.
    #[error("{0}")]
    InvalidArguments(String),

    /// Connect, DNS, timeout or body-read failure.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with a non-2xx status.
    #[error("HTTP error: {}", status_line(.status, .reason))]
    Http { status: u16, reason: String },

    /// 2xx response whose body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration could not be resolved.
    #[error("config error: {0}")]
    Config(String),

    /// Internal errors (static catalog defects and the like).
    #[error("internal error: {0}")]
    Internal(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Text surfaced to the agent host inside a tool result.
    pub fn to_tool_message(&self) -> String {
        match self {
            Error::Http { .. } => self.to_string(),
            other => format!("Error: {}", other),
        }
    }

    /// Whether the error was detected before any network call.
    pub fn is_local(&self) -> bool {
        matches!(self, Error::UnknownTool(_) | Error::InvalidArguments(_))
    }
}

fn status_line(status: &u16, reason: &str) -> String {
    let reason = reason.trim();
    if reason.is_empty() {
        status.to_string()
    } else {
        format!("{} {}", status, reason)
    }
}

// Convenience constructors
impl Error {
    pub fn unknown_tool(name: impl Into<String>) -> Self {
        Self::UnknownTool(name.into())
    }

    pub fn invalid_arguments(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn http(status: u16, reason: impl Into<String>) -> Self {
        Self::Http {
            status,
            reason: reason.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}
