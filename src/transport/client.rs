//! Typed client over a raw [`Transport`].

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use crate::auth::SecureString;

use super::error::TransportError;
use super::request::{ApiRequest, HttpRequest, HttpResponse};

/// Moves encoded requests to the server and back.
///
/// Implementations own connection handling, TLS and any retry policy. They
/// return the raw status and body; classification and decoding happen in
/// [`ApiClient`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Error body shape returned by the server on non-success statuses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "message")]
    error: String,
}

/// Encodes typed requests, sends them and decodes typed responses.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Send `request`, attaching `credential` when present.
    ///
    /// Network failures, non-2xx statuses and body mismatches all surface as
    /// a single [`TransportError`].
    pub async fn send<R: ApiRequest>(
        &self,
        request: &R,
        credential: Option<SecureString>,
    ) -> Result<R::Response, TransportError> {
        let path = request.path();
        let body = request
            .body()
            .map_err(|source| TransportError::Encode {
                path: path.clone(),
                source,
            })?
            .map(|value| value.to_string().into_bytes());

        let http_request = HttpRequest {
            method: request.method(),
            path: path.clone(),
            body,
            credential,
        };

        tracing::debug!(
            method = %http_request.method,
            path = %path,
            authenticated = http_request.credential.is_some(),
            "Sending request"
        );

        let response = self.transport.send(http_request).await?;

        if !response.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&response.body)
                .map(|body| body.error)
                .unwrap_or_else(|_| format!("HTTP {}", response.status));
            return Err(TransportError::Status {
                status: response.status,
                message,
            });
        }

        serde_json::from_slice(&response.body).map_err(|source| TransportError::Decode { path, source })
    }
}
