//! reqwest-backed [`Transport`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::Client;

use crate::config::ServerConfig;

use super::client::Transport;
use super::error::TransportError;
use super::request::{HttpRequest, HttpResponse, Method};

/// Timeouts applied to every HTTP request.
#[derive(Debug, Clone, Copy)]
pub struct TimeoutConfig {
    pub connect: Duration,
    pub request: Duration,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect: Duration::from_secs(5),
            request: Duration::from_secs(30),
        }
    }
}

impl From<&ServerConfig> for TimeoutConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            connect: Duration::from_secs(server.connect_timeout_seconds as u64),
            request: Duration::from_secs(server.request_timeout_seconds as u64),
        }
    }
}

pub struct ReqwestTransport {
    client: Client,
    base_url: String,
    timeouts: TimeoutConfig,
}

impl ReqwestTransport {
    pub fn new(base_url: &str, timeouts: TimeoutConfig) -> Result<Self, TransportError> {
        let client = Client::builder()
            .connect_timeout(timeouts.connect)
            .timeout(timeouts.request)
            .build()
            .map_err(|e| TransportError::InvalidRequest(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeouts,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = format!("{}{}", self.base_url, request.path);
        let mut builder = self
            .client
            .request(Self::method(request.method), &url)
            .header(ACCEPT, "application/json");

        if let Some(credential) = &request.credential {
            builder = builder.bearer_auth(credential.expose());
        }

        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout {
                    url: url.clone(),
                    seconds: self.timeouts.request.as_secs(),
                }
            } else if e.is_builder() {
                TransportError::InvalidRequest(e.to_string())
            } else {
                TransportError::Connection {
                    url: url.clone(),
                    message: e.to_string(),
                }
            }
        })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::Connection {
                url: url.clone(),
                message: format!("Failed to read response body: {}", e),
            })?
            .to_vec();

        tracing::debug!(url = %url, status, bytes = body.len(), "Response received");

        Ok(HttpResponse { status, body })
    }
}
