//! HTTP transport
//!
//! The catalog client only needs "fetch this URL as text". [`Transport`] is that
//! seam; [`HttpTransport`] is the reqwest implementation.

use std::sync::LazyLock;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT},
    Client,
};
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ClientError, MAX_RESPONSE_SIZE};

/// Fetches response text. One attempt per call; failures are returned as-is.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch_text(&self, url: &str) -> Result<String, ClientError>;
}

/// Shared HTTP client for default-configured transports (connection pooling).
static SHARED_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    let config = ClientConfig::default();
    build_client(&config).expect("Failed to build Kinowood shared HTTP client")
});

fn build_client(config: &ClientConfig) -> Result<Client, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static("application/json, text/plain, */*"));
    headers.insert(USER_AGENT, HeaderValue::from_str(&config.user_agent)?);

    Ok(Client::builder()
        .default_headers(headers)
        .connect_timeout(config.connect_timeout())
        .timeout(config.request_timeout())
        .pool_max_idle_per_host(10)
        .redirect(reqwest::redirect::Policy::limited(5))
        .build()?)
}

/// Check HTTP response status before processing body.
fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = resp.status();
    if status.is_client_error() || status.is_server_error() {
        return Err(ClientError::Http {
            status,
            url: resp.url().to_string(),
        });
    }
    Ok(resp)
}

/// Read a response body with size limit and decode it as (lossy) UTF-8.
async fn text_with_limit(response: reqwest::Response) -> Result<String, ClientError> {
    if let Some(cl) = response.content_length() {
        if cl as usize > MAX_RESPONSE_SIZE {
            return Err(ClientError::ResponseTooLarge { size: cl });
        }
    }
    let bytes = response.bytes().await?;
    if bytes.len() > MAX_RESPONSE_SIZE {
        return Err(ClientError::ResponseTooLarge {
            size: bytes.len() as u64,
        });
    }
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// reqwest-backed [`Transport`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Transport for `config`. Default settings reuse the shared pool.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let defaults = ClientConfig::default();
        let client = if config.user_agent == defaults.user_agent
            && config.connect_timeout_secs == defaults.connect_timeout_secs
            && config.request_timeout_secs == defaults.request_timeout_secs
        {
            SHARED_CLIENT.clone()
        } else {
            build_client(config)?
        };
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch_text(&self, url: &str) -> Result<String, ClientError> {
        debug!(url, "GET");
        let response = check_response(self.client.get(url).send().await?)?;
        let text = text_with_limit(response).await?;
        debug!(url, bytes = text.len(), "Received response");
        Ok(text)
    }
}
