//! HTTP transport

use crate::{SourceError, SourceResult, Transport};
use reqwest::Client as ReqwestClient;
use std::time::Duration;

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"))
                .to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// Plain GET transport over reqwest
///
/// No retries; a failed request is reported once.
#[derive(Clone)]
pub struct HttpTransport {
    inner: ReqwestClient,
    config: ClientConfig,
}

impl HttpTransport {
    /// Creates a new transport with default configuration
    pub fn new() -> SourceResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a new transport with custom configuration
    pub fn with_config(config: ClientConfig) -> SourceResult<Self> {
        let inner = ReqwestClient::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { inner, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> SourceResult<String> {
        log::debug!("GET {}", url);

        let response = self.inner.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.text().await?)
    }
}
