//! Error types for ambimon
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using AmbientError
pub type Result<T> = std::result::Result<T, AmbientError>;

/// Reason used when a reply is malformed and carries no `ERROR` tokens
pub const GENERIC_REASON: &str = "operation did not complete correctly";

/// Unified error type for ambimon operations
#[derive(Debug, Error)]
pub enum AmbientError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    // -------------------------------------------------------------------------
    // Protocol Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl AmbientError {
    /// Returns the protocol error if this is one
    pub fn as_protocol(&self) -> Option<&ProtocolError> {
        match self {
            AmbientError::Protocol(e) => Some(e),
            _ => None,
        }
    }
}

/// A reply that failed validation or reported device errors
///
/// Displays as the newline-joined list of reasons.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", .reasons.join("\n"))]
pub struct ProtocolError {
    reasons: Vec<String>,
}

impl ProtocolError {
    /// Build from collected reasons. An empty list becomes the generic reason.
    pub fn new(reasons: Vec<String>) -> Self {
        if reasons.is_empty() {
            return Self::generic();
        }
        Self { reasons }
    }

    /// The single-reason error for malformed or empty replies
    pub fn generic() -> Self {
        Self {
            reasons: vec![GENERIC_REASON.to_string()],
        }
    }

    /// All collected reasons, in reply order
    pub fn reasons(&self) -> &[String] {
        &self.reasons
    }

    /// True if this carries only the generic reason
    pub fn is_generic(&self) -> bool {
        self.reasons.len() == 1 && self.reasons[0] == GENERIC_REASON
    }
}
