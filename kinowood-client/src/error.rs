//! Catalog client error types
//!
//! Transport, decode and configuration failures share [`ClientError`].
//! Stream resolution has its own [`ResolveError`] because a failed resolution
//! is an expected outcome that leaves playback state untouched.

use thiserror::Error;

/// Maximum response body size accepted from the backend (16 MB).
pub const MAX_RESPONSE_SIZE: usize = 16 * 1024 * 1024;

/// Error type for catalog and detail fetches.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTTP error {status} for {url}")]
    Http { status: reqwest::StatusCode, url: String },

    #[error("Response too large ({size} bytes, max {MAX_RESPONSE_SIZE})")]
    ResponseTooLarge { size: u64 },

    #[error("Empty response from server")]
    EmptyResponse,

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("No JSON object found in response")]
    NoJsonSpan,

    #[error("Detail response carries no film")]
    MissingFilm,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid header value: {0}")]
    InvalidHeader(String),
}

impl ClientError {
    /// Whether the failure happened before any payload could be read.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Http { .. } | Self::ResponseTooLarge { .. }
        )
    }
}

/// Why a playback URL could not be produced for a quality.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
    #[error("Quality {0} is not available")]
    QualityUnavailable(String),

    #[error("Upstream URL for quality {quality} lacks group_id or video_id")]
    MissingStreamIdentifiers { quality: String },
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<reqwest::header::InvalidHeaderValue> for ClientError {
    fn from(err: reqwest::header::InvalidHeaderValue) -> Self {
        Self::InvalidHeader(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_http() {
        let err = ClientError::Http {
            status: reqwest::StatusCode::NOT_FOUND,
            url: "https://kinowood.ru/api/index.php".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP error 404 Not Found for https://kinowood.ru/api/index.php"
        );
    }

    #[test]
    fn test_error_display_response_too_large() {
        let err = ClientError::ResponseTooLarge { size: 20_000_000 };
        let msg = err.to_string();
        assert!(msg.contains("20000000"));
        assert!(msg.contains(&MAX_RESPONSE_SIZE.to_string()));
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{broken").unwrap_err();
        let err: ClientError = json_err.into();
        assert!(matches!(err, ClientError::Decode(_)));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_transport_classification() {
        assert!(ClientError::Network("refused".to_string()).is_transport());
        assert!(!ClientError::NoJsonSpan.is_transport());
        assert!(!ClientError::EmptyResponse.is_transport());
    }

    #[test]
    fn test_resolve_error_display() {
        assert_eq!(
            ResolveError::QualityUnavailable("4k".to_string()).to_string(),
            "Quality 4k is not available"
        );
        let err = ResolveError::MissingStreamIdentifiers {
            quality: "1080".to_string(),
        };
        assert!(err.to_string().contains("1080"));
    }
}
