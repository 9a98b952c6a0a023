//! Client error types.

use streamwire_protocol::{CommandCode, ErrorCode, ProtocolError, ValidationError};
use thiserror::Error;

/// Client errors.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid request: {0}")]
    Validation(#[from] ValidationError),

    #[error("I/O error: {0}")]
    Io(std::io::Error),

    #[error("connection closed")]
    ConnectionClosed,

    #[error("connect timeout")]
    Timeout,

    #[error("broker error: {code} ({}) - {reason}", code.as_code())]
    Broker { code: ErrorCode, reason: String },

    #[error("{command}: resource not found")]
    NotFound { command: CommandCode },

    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Coarse classification of a [`ClientError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected locally; nothing was sent.
    Validation,
    /// The connection failed or was closed.
    Transport,
    /// The broker answered with a non-zero status.
    Broker,
    /// The broker answered successfully with nothing for a single-resource get.
    NotFound,
    /// The response could not be decoded.
    Decoding,
}

impl ClientError {
    /// Builds the error for a non-zero response status.
    ///
    /// The reason is the payload as text, or the status name when the broker sent none.
    pub fn from_status(status: u32, payload: &[u8]) -> Self {
        let code = ErrorCode::from_code(status);
        let reason = if payload.is_empty() {
            code.to_string()
        } else {
            String::from_utf8_lossy(payload).into_owned()
        };
        ClientError::Broker { code, reason }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Validation(_) | ClientError::Config(_) => ErrorKind::Validation,
            ClientError::Io(_) | ClientError::ConnectionClosed | ClientError::Timeout => {
                ErrorKind::Transport
            }
            ClientError::Broker { .. } => ErrorKind::Broker,
            ClientError::NotFound { .. } => ErrorKind::NotFound,
            ClientError::Protocol(_) => ErrorKind::Decoding,
        }
    }

    /// Returns whether this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// True for an empty single-resource reply and for broker "not found" statuses.
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::NotFound { .. } => true,
            ClientError::Broker { code, .. } => code.is_not_found(),
            _ => false,
        }
    }

    /// The broker status, if the broker rejected the command.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Broker { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::UnexpectedEof => ClientError::ConnectionClosed,
            _ => ClientError::Io(err),
        }
    }
}
