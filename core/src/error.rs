//! Error types for request activation and resolution.
//!
//! # Design
//! Every variant carries owned strings rather than the underlying library
//! error so that a `FetchError` can be cloned into `RequestState::Error` and
//! compared in tests. `Configuration` and `Serialization` are raised before
//! any I/O and returned directly to the caller; the remaining variants are
//! captured into the request state when an activation resolves.

use thiserror::Error;

/// Errors produced while describing, sending or decoding a request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The descriptor is malformed (empty URL, bad header, no runtime).
    #[error("invalid request: {0}")]
    Configuration(String),

    /// The transport failed before a response was received.
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body is not valid JSON.
    #[error("response is not valid JSON: {0}")]
    Decode(String),

    /// The request payload could not be encoded as JSON.
    #[error("request body could not be serialized: {0}")]
    Serialization(String),
}

/// Coarse classification of a `FetchError`, for callers that branch on the
/// failure kind without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Configuration,
    Network,
    HttpStatus,
    Decode,
    Serialization,
}

impl FetchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::Configuration(_) => ErrorKind::Configuration,
            FetchError::Network(_) => ErrorKind::Network,
            FetchError::HttpStatus { .. } => ErrorKind::HttpStatus,
            FetchError::Decode(_) => ErrorKind::Decode,
            FetchError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Whether re-activating the same descriptor could plausibly succeed.
    /// Configuration and serialization failures are local and will repeat.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            FetchError::Network(_) | FetchError::HttpStatus { .. } | FetchError::Decode(_)
        )
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        // reqwest's Display omits the cause ("error sending request"), so
        // walk the source chain to keep "connection refused" and friends.
        let mut message = err.to_string();
        let mut source = std::error::Error::source(&err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        FetchError::Network(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_matches_variant() {
        assert_eq!(FetchError::Configuration("x".into()).kind(), ErrorKind::Configuration);
        assert_eq!(FetchError::Network("x".into()).kind(), ErrorKind::Network);
        assert_eq!(
            FetchError::HttpStatus { status: 404, body: "{}".into() }.kind(),
            ErrorKind::HttpStatus
        );
        assert_eq!(FetchError::Decode("x".into()).kind(), ErrorKind::Decode);
        assert_eq!(FetchError::Serialization("x".into()).kind(), ErrorKind::Serialization);
    }

    #[test]
    fn only_remote_failures_are_recoverable() {
        assert!(FetchError::Network("refused".into()).is_recoverable());
        assert!(FetchError::Decode("eof".into()).is_recoverable());
        assert!(FetchError::HttpStatus { status: 503, body: String::new() }.is_recoverable());
        assert!(!FetchError::Configuration("empty url".into()).is_recoverable());
        assert!(!FetchError::Serialization("bad".into()).is_recoverable());
    }

    #[test]
    fn display_is_human_readable() {
        let err = FetchError::HttpStatus { status: 500, body: "boom".into() };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        let err = FetchError::Configuration("request URL is empty".into());
        assert_eq!(err.to_string(), "invalid request: request URL is empty");
    }
}
