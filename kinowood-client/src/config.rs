//! Client configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ClientError;

/// Backend location and HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL of the backend; also prefixes asset paths and proxy URLs.
    pub api_base_url: String,
    pub listing_path: String,
    pub detail_path: String,
    pub user_agent: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://kinowood.ru/".to_string(),
            listing_path: "api/index.php".to_string(),
            detail_path: "api/film.php".to_string(),
            user_agent: "Kinowood Client".to_string(),
            connect_timeout_secs: 10,
            request_timeout_secs: 30,
        }
    }
}

impl ClientConfig {
    /// Config pointing at a different backend, other settings default.
    pub fn with_base_url(api_base_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into(),
            ..Self::default()
        }
    }

    /// Check the base URL and endpoint paths.
    ///
    /// URLs are built by plain concatenation, so the base must end with `/`
    /// and the paths must not start with one.
    pub fn validate(&self) -> Result<(), ClientError> {
        let base = url::Url::parse(&self.api_base_url).map_err(|e| {
            ClientError::InvalidConfig(format!("api_base_url {:?}: {e}", self.api_base_url))
        })?;

        if !matches!(base.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(format!(
                "api_base_url must use http or https, got {}",
                base.scheme()
            )));
        }
        if !self.api_base_url.ends_with('/') {
            return Err(ClientError::InvalidConfig(
                "api_base_url must end with '/'".to_string(),
            ));
        }

        for (name, path) in [
            ("listing_path", &self.listing_path),
            ("detail_path", &self.detail_path),
        ] {
            if path.is_empty() {
                return Err(ClientError::InvalidConfig(format!("{name} must not be empty")));
            }
            if path.starts_with('/') {
                return Err(ClientError::InvalidConfig(format!(
                    "{name} must be relative to api_base_url"
                )));
            }
        }

        Ok(())
    }

    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
