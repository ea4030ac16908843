//! Error types for MyAnimeList API operations.

use reqwest::StatusCode;
use thiserror::Error;

/// Status reported for failures that never produced an upstream status.
pub const LOCAL_FAILURE_STATUS: u16 = 500;

/// Errors that can occur during MyAnimeList API operations.
///
/// Every variant maps to an HTTP-like status through [`MalError::status`];
/// the `Display` output is the fixed message for that status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MalError {
    /// Upstream rejected a query parameter (HTTP 400).
    #[error("Invalid parameter")]
    InvalidParameter,

    /// Upstream rejected the credentials (HTTP 401).
    #[error("Expired access tokens, invalid access tokens, etc.")]
    Unauthorized,

    /// Upstream refused the request (HTTP 403).
    #[error("DoS detected etc.")]
    Forbidden,

    /// The requested resource does not exist (HTTP 404).
    #[error("Not found")]
    NotFound,

    /// Any other non-success status.
    #[error("Generic error occurred")]
    Upstream { status: u16 },

    /// The request never completed, or the body was not the expected JSON.
    #[error("Network error")]
    Network,

    /// An endpoint that needs an OAuth access token was called without one.
    /// Raised locally, before any request is sent.
    #[error("Access token required")]
    MissingCredential,

    /// A request URL could not be built.
    #[error("Invalid URL: {0}")]
    MalformedUrl(#[from] url::ParseError),

    /// Configuration is missing or incomplete.
    #[error("MyAnimeList configuration required: {0}")]
    ConfigMissing(String),
}

impl MalError {
    /// Classify a non-success upstream status.
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            400 => Self::InvalidParameter,
            401 => Self::Unauthorized,
            403 => Self::Forbidden,
            404 => Self::NotFound,
            status => Self::Upstream { status },
        }
    }

    /// The status code carried by this error.
    pub fn status(&self) -> u16 {
        match self {
            Self::InvalidParameter => 400,
            Self::Unauthorized | Self::MissingCredential => 401,
            Self::Forbidden => 403,
            Self::NotFound => 404,
            Self::Upstream { status } => *status,
            Self::Network | Self::MalformedUrl(_) | Self::ConfigMissing(_) => {
                LOCAL_FAILURE_STATUS
            }
        }
    }

    /// The human-readable message (same as `Display`).
    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// Result type alias for MyAnimeList operations.
pub type Result<T> = core::result::Result<T, MalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_table() {
        let cases = [
            (400, "Invalid parameter"),
            (401, "Expired access tokens, invalid access tokens, etc."),
            (403, "DoS detected etc."),
            (404, "Not found"),
            (418, "Generic error occurred"),
            (500, "Generic error occurred"),
            (503, "Generic error occurred"),
        ];

        for (code, message) in cases {
            let err = MalError::from_status(StatusCode::from_u16(code).unwrap());
            assert_eq!(err.status(), code);
            assert_eq!(err.message(), message);
        }
    }

    #[test]
    fn test_local_errors() {
        assert_eq!(MalError::Network.status(), 500);
        assert_eq!(MalError::Network.to_string(), "Network error");
        assert_eq!(MalError::MissingCredential.status(), 401);
        assert_eq!(MalError::MissingCredential.to_string(), "Access token required");

        let err = MalError::from(url::ParseError::RelativeUrlWithoutBase);
        assert_eq!(err.status(), 500);
        assert!(err.to_string().starts_with("Invalid URL"));
    }
}
