//! Error types for the Natter client.
//!
//! One unified error type with explicit variants for transport,
//! authentication, protocol, input validation and storage failures.

use std::fmt;
use thiserror::Error;

/// The unified error type for Natter client operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (DNS, TLS, connection, timeout, decoding).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Authentication errors (rejected credentials, missing artifacts).
    #[error("authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Protocol errors (non-2xx responses).
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Input validation errors.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),

    /// Durable storage or cookie jar errors.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}

impl Error {
    /// Returns the HTTP status if this error came from a server response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Protocol(err) => Some(err.status),
            _ => None,
        }
    }

    /// True when the failure happened before anything was sent.
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            Error::Auth(AuthError::MissingCredential { .. })
                | Error::InvalidInput(_)
                | Error::Storage(_)
        )
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out")]
    Timeout,

    /// The response body could not be decoded.
    #[error("failed to decode response: {message}")]
    Decode { message: String },

    /// Generic HTTP client error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// Authentication-related errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The server rejected the supplied credentials.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The active policy needs an artifact that is not present.
    #[error("missing credential: {kind}")]
    MissingCredential { kind: &'static str },

    /// The session or token is no longer accepted.
    #[error("session expired")]
    SessionExpired,
}

/// A non-2xx response from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtocolError {
    /// HTTP status code.
    pub status: u16,
    /// Reason phrase for the status, if known.
    pub status_text: Option<String>,
    /// Error message from a `{"error": ...}` body, if present.
    pub error: Option<String>,
    /// Seconds from a `Retry-After` header, if present.
    pub retry_after: Option<u64>,
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        if let Some(ref text) = self.status_text {
            write!(f, " {}", text)?;
        }
        if let Some(ref error) = self.error {
            write!(f, ": {}", error)?;
        }
        if let Some(secs) = self.retry_after {
            write!(f, " (retry after {}s)", secs)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProtocolError {}

impl ProtocolError {
    /// Create a new protocol error for the given status.
    pub fn new(status: u16, status_text: Option<String>) -> Self {
        Self {
            status,
            status_text,
            error: None,
            retry_after: None,
        }
    }

    /// Attach the server-provided error message.
    pub fn with_error(mut self, error: Option<String>) -> Self {
        self.error = error;
        self
    }

    /// Attach a `Retry-After` value in seconds.
    pub fn with_retry_after(mut self, retry_after: Option<u64>) -> Self {
        self.retry_after = retry_after;
        self
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        self.status == 401
    }

    /// Check if the request was rate limited.
    pub fn is_rate_limited(&self) -> bool {
        self.status == 429
    }
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid space name.
    #[error("invalid space name: {reason}")]
    SpaceName { reason: String },

    /// Invalid username (owner, author or login identifier).
    #[error("invalid username '{value}': {reason}")]
    Username { value: String, reason: String },

    /// Invalid message text.
    #[error("invalid message: {reason}")]
    Message { reason: String },

    /// Space permissions other than some of `r`, `w`, `d` in that order.
    #[error("invalid permissions '{value}': expected some of r, w, d in that order")]
    Permissions { value: String },

    /// A header value contains characters that cannot be sent.
    #[error("invalid header value for {name}")]
    HeaderValue { name: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

/// Storage errors for durable client-side state.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("IO error on {path}: {message}")]
    Io { path: String, message: String },

    /// The stored data could not be parsed.
    #[error("corrupt state: {message}")]
    Format { message: String },

    /// An in-memory lock was poisoned by a panicking writer.
    #[error("state lock poisoned")]
    Poisoned,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_error_display_includes_status_text() {
        let err = ProtocolError::new(403, Some("Forbidden".into()));
        assert_eq!(err.to_string(), "HTTP 403 Forbidden");
    }

    #[test]
    fn protocol_error_display_includes_body_and_retry() {
        let err = ProtocolError::new(429, Some("Too Many Requests".into()))
            .with_error(Some("slow down".into()))
            .with_retry_after(Some(2));
        assert_eq!(
            err.to_string(),
            "HTTP 429 Too Many Requests: slow down (retry after 2s)"
        );
        assert!(err.is_rate_limited());
    }

    #[test]
    fn missing_credential_is_local() {
        let err: Error = AuthError::MissingCredential { kind: "bearer token" }.into();
        assert!(err.is_local());
        assert_eq!(err.status(), None);
    }

    #[test]
    fn protocol_error_is_not_local() {
        let err: Error = ProtocolError::new(500, None).into();
        assert!(!err.is_local());
        assert_eq!(err.status(), Some(500));
    }
}
