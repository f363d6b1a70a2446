//! Failure types shared by the pipeline and every call-site.

use std::fmt;

use reqwest::StatusCode;
use serde::Serialize;
use thiserror::Error;

/// Classification of a non-success outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The backend rejected the credentials; the session has been torn down.
    Unauthorized,
    /// The addressed entity does not exist.
    NotFound,
    /// Any other 4xx/5xx, carrying a body-derived message.
    ValidationOrServer,
    /// No response was received (DNS, connection reset, timeout, cancellation).
    NetworkError,
    /// A response arrived but its body could not be interpreted.
    MalformedResponse,
}

impl FailureKind {
    /// Classify an HTTP status code.
    pub fn from_status(status: StatusCode) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => FailureKind::Unauthorized,
            StatusCode::NOT_FOUND => FailureKind::NotFound,
            _ => FailureKind::ValidationOrServer,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Unauthorized => "unauthorized",
            FailureKind::NotFound => "not_found",
            FailureKind::ValidationOrServer => "validation_or_server",
            FailureKind::NetworkError => "network_error",
            FailureKind::MalformedResponse => "malformed_response",
        };
        f.write_str(name)
    }
}

/// Uniform representation of any non-success outcome.
///
/// `status_code` is 0 when no HTTP response was involved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("{message}")]
pub struct NormalizedFailure {
    pub status_code: u16,
    pub message: String,
    pub kind: FailureKind,
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, NormalizedFailure>;

impl NormalizedFailure {
    pub fn new(status_code: u16, message: impl Into<String>, kind: FailureKind) -> Self {
        Self {
            status_code,
            message: message.into(),
            kind,
        }
    }

    /// A failure whose kind follows from the HTTP status.
    pub fn from_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status.as_u16(), message, FailureKind::from_status(status))
    }

    /// The failure raised by the pipeline after a 401 response.
    pub fn unauthorized() -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED.as_u16(),
            "Unauthorized",
            FailureKind::Unauthorized,
        )
    }

    /// Wrap a transport-level error.
    pub fn network(error: &reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            format!("Request timed out: {error}")
        } else if error.is_connect() {
            format!("Connection failed: {error}")
        } else {
            format!("Network error: {error}")
        };
        Self::new(0, message, FailureKind::NetworkError)
    }

    /// The failure for a dispatch abandoned through its cancellation token.
    pub fn cancelled() -> Self {
        Self::new(0, "Request cancelled", FailureKind::NetworkError)
    }

    pub fn malformed(status: StatusCode, message: impl Into<String>) -> Self {
        Self::new(status.as_u16(), message, FailureKind::MalformedResponse)
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind == FailureKind::Unauthorized
    }

    pub fn is_not_found(&self) -> bool {
        self.kind == FailureKind::NotFound
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_status() {
        assert_eq!(FailureKind::from_status(StatusCode::UNAUTHORIZED), FailureKind::Unauthorized);
        assert_eq!(FailureKind::from_status(StatusCode::NOT_FOUND), FailureKind::NotFound);
        assert_eq!(FailureKind::from_status(StatusCode::FORBIDDEN), FailureKind::ValidationOrServer);
        assert_eq!(
            FailureKind::from_status(StatusCode::INTERNAL_SERVER_ERROR),
            FailureKind::ValidationOrServer
        );
    }

    #[test]
    fn test_unauthorized_failure() {
        let failure = NormalizedFailure::unauthorized();
        assert_eq!(failure.status_code, 401);
        assert!(failure.is_unauthorized());
        assert_eq!(failure.to_string(), "Unauthorized");
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let failure = NormalizedFailure::malformed(StatusCode::OK, "bad body");
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["kind"], "malformed_response");
        assert_eq!(json["status_code"], 200);
        assert_eq!(FailureKind::ValidationOrServer.to_string(), "validation_or_server");
    }
}
