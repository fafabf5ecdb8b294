//! Error types for the Designer News API client.
//!
//! # Design
//! Failures are split by where they happen: `Configuration` at construction,
//! `InvalidArgument` before any request is built, `Transport` when the HTTP
//! round-trip itself fails, and `Deserialization` when a response body is not
//! JSON. Non-2xx responses are not errors here. The remote API reports its own
//! failures in a JSON envelope, which is returned to the caller unchanged.

use thiserror::Error;

/// Errors returned by `DesignerNewsClient`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Required configuration was missing when the client was constructed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A supplied argument (story or comment id) was rejected before any I/O.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The HTTP transport failed (DNS, connection, timeout, I/O).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The response body could not be decoded as JSON.
    #[error("HTTP {status}: response body is not JSON: {message}")]
    Deserialization { status: u16, message: String },
}

/// Coarse classification of a transport failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The host name could not be resolved.
    Dns,
    /// The TCP/TLS connection could not be established.
    Connect,
    /// The connect or overall timeout elapsed.
    Timeout,
    /// Reading or writing the connection failed mid-exchange.
    Io,
    /// Anything else the HTTP library reported.
    Other,
}

impl TransportErrorKind {
    /// Stable short code for logs and error messages.
    pub fn code(self) -> &'static str {
        match self {
            TransportErrorKind::Dns => "dns",
            TransportErrorKind::Connect => "connect",
            TransportErrorKind::Timeout => "timeout",
            TransportErrorKind::Io => "io",
            TransportErrorKind::Other => "other",
        }
    }
}

/// A failed HTTP round-trip, as reported by a `Transport`.
#[derive(Debug, Clone, Error)]
#[error("transport error ({}): {message}", .kind.code())]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}
