//! Error types for samwire
//!
//! Provides a unified error type for all client operations.

use thiserror::Error;

use crate::protocol::Reply;

/// Result type alias using SamError
pub type Result<T> = std::result::Result<T, SamError>;

/// Unified error type for samwire operations
#[derive(Debug, Error)]
pub enum SamError {
    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    /// Dial, write or read failure on the underlying connection
    #[error("Transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// Operation attempted after the client was closed
    #[error("Connection is closed")]
    ClosedConnection,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    /// A reply line that cannot be parsed into topic + pairs
    #[error("Malformed reply ({reason}): {line:?}")]
    MalformedReply { line: String, reason: String },

    /// A well-formed reply that failed the version/result check
    #[error("Handshake failed: {reason}. Reply: {reply}")]
    HandshakeFailed { reason: String, reply: Box<Reply> },

    /// A command line that would break line framing
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SamError {
    pub(crate) fn malformed(line: &str, reason: impl Into<String>) -> Self {
        SamError::MalformedReply {
            line: line.to_string(),
            reason: reason.into(),
        }
    }
}
