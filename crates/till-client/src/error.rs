//! # Client Error Types
//!
//! Error types for collaborator calls, configuration and submission.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │    Network      │  │      Billing            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Unreachable    │  │  SubmissionRejected     │ │
//! │  │  InvalidUrl     │  │  Timeout        │  │                         │ │
//! │  │  ConfigLoad...  │  │  UnexpectedSt.. │  │                         │ │
//! │  │  ConfigSave...  │  │  Malformed...   │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                   │
//! │  │   Validation    │   Core(CoreError) - bill lines or catalog data    │
//! │  │                 │   failed a business rule                          │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Every error ends up as a Notice for the operator. Nothing here is     │
//! │  fatal to the process and nothing is retried automatically.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

use till_core::{CoreError, ValidationError};

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Client error type covering every collaborator-facing failure.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Invalid service URL.
    #[error("Invalid service URL: {0}")]
    InvalidUrl(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Network Errors
    // =========================================================================
    /// The service could not be reached at all.
    #[error("Service unreachable: {0}")]
    Unreachable(String),

    /// The transport gave up waiting.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Non-success status from any endpoint except bill creation.
    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus { status: u16, message: String },

    /// The body could not be decoded or failed validation.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    // =========================================================================
    // Billing Errors
    // =========================================================================
    /// The billing service refused to create the bill.
    #[error("Bill rejected ({status}): {message}")]
    SubmissionRejected { status: u16, message: String },

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// A business rule failed before anything was sent.
    #[error(transparent)]
    Core(#[from] CoreError),
}

/// The four failure classes the presentation layer distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[ts(export)]
pub enum ErrorKind {
    Network,
    Validation,
    SubmissionRejected,
    Configuration,
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ClientError {
    fn from(err: ValidationError) -> Self {
        ClientError::Core(CoreError::Validation(err))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout(err.to_string())
        } else if err.is_decode() {
            ClientError::MalformedResponse(err.to_string())
        } else if let Some(status) = err.status() {
            ClientError::UnexpectedStatus {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            ClientError::Unreachable(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::MalformedResponse(err.to_string())
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::InvalidConfig(_)
            | ClientError::InvalidUrl(_)
            | ClientError::ConfigLoadFailed(_)
            | ClientError::ConfigSaveFailed(_) => ErrorKind::Configuration,
            ClientError::Unreachable(_)
            | ClientError::Timeout(_)
            | ClientError::UnexpectedStatus { .. }
            | ClientError::MalformedResponse(_) => ErrorKind::Network,
            ClientError::SubmissionRejected { .. } => ErrorKind::SubmissionRejected,
            ClientError::Core(_) => ErrorKind::Validation,
        }
    }

    /// Returns true if re-triggering the same action may succeed.
    ///
    /// Informational only: the client never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Unreachable(_) | ClientError::Timeout(_) => true,
            ClientError::UnexpectedStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }

    pub fn is_config_error(&self) -> bool {
        self.kind() == ErrorKind::Configuration
    }

    /// Operator-facing form of this error.
    pub fn notice(&self) -> Notice {
        Notice::from(self)
    }
}

// =============================================================================
// Notice
// =============================================================================

/// What the operator sees when something fails.
///
/// ## Serialization
/// ```json
/// {
///   "code": "SUBMISSION_REJECTED",
///   "message": "Bill rejected (400): Item 99 not found",
///   "retryable": false
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notice {
    pub code: ErrorKind,
    pub message: String,
    pub retryable: bool,
}

impl From<&ClientError> for Notice {
    fn from(err: &ClientError) -> Self {
        Notice {
            code: err.kind(),
            message: err.to_string(),
            retryable: err.is_retryable(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            ClientError::Unreachable("refused".into()).kind(),
            ErrorKind::Network
        );
        assert_eq!(
            ClientError::MalformedResponse("bad json".into()).kind(),
            ErrorKind::Network
        );
        assert_eq!(
            ClientError::SubmissionRejected {
                status: 400,
                message: "Item 9 not found".into()
            }
            .kind(),
            ErrorKind::SubmissionRejected
        );
        assert_eq!(
            ClientError::InvalidUrl("nope".into()).kind(),
            ErrorKind::Configuration
        );
        assert!(ClientError::ConfigLoadFailed("eof".into()).is_config_error());
        assert!(!ClientError::Timeout("30s".into()).is_config_error());

        let validation: ClientError = ValidationError::Required {
            field: "items".into(),
        }
        .into();
        assert_eq!(validation.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_retryable_errors() {
        assert!(ClientError::Timeout("30s".into()).is_retryable());
        assert!(ClientError::Unreachable("refused".into()).is_retryable());
        assert!(ClientError::UnexpectedStatus {
            status: 503,
            message: "busy".into()
        }
        .is_retryable());

        assert!(!ClientError::UnexpectedStatus {
            status: 404,
            message: "gone".into()
        }
        .is_retryable());
        assert!(!ClientError::SubmissionRejected {
            status: 400,
            message: "bad".into()
        }
        .is_retryable());
        assert!(!ClientError::InvalidConfig("x".into()).is_retryable());
    }

    #[test]
    fn test_notice_serialization() {
        let err = ClientError::SubmissionRejected {
            status: 400,
            message: "Item 99 not found".into(),
        };
        let json = serde_json::to_value(err.notice()).unwrap();
        assert_eq!(json["code"], "SUBMISSION_REJECTED");
        assert_eq!(json["message"], "Bill rejected (400): Item 99 not found");
        assert_eq!(json["retryable"], false);
    }
}
