//! Error types for the PUPPET engine

use std::net::SocketAddr;

use thiserror::Error;

/// Core PUPPET errors
#[derive(Error, Debug)]
pub enum PuppetError {
    // Transport errors
    #[error("Connection to {addr} failed: {reason}")]
    ConnectionFailed { addr: SocketAddr, reason: String },

    #[error("Transport error: {0}")]
    TransportError(String),

    // Wire errors
    #[error("Invalid wire format: {0}")]
    InvalidWireFormat(String),

    #[error("Wrong field count: expected {expected}, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    // Input errors
    #[error("Invalid timeline: {0}")]
    InvalidTimeline(String),

    #[error("Invalid pose library: {0}")]
    InvalidPoseLibrary(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PuppetError {
    /// Errors that end the session (the renderer is gone)
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PuppetError::ConnectionFailed { .. } | PuppetError::TransportError(_)
        )
    }
}

/// Result type for PUPPET operations
pub type PuppetResult<T> = Result<T, PuppetError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PuppetError::ConnectionFailed {
            addr: "127.0.0.1:5066".parse().unwrap(),
            reason: "refused".into(),
        };
        assert_eq!(err.to_string(), "Connection to 127.0.0.1:5066 failed: refused");
        assert!(err.is_fatal());

        let err = PuppetError::FieldCount {
            expected: 16,
            actual: 3,
        };
        assert_eq!(err.to_string(), "Wrong field count: expected 16, got 3");
        assert!(!err.is_fatal());
    }
}
