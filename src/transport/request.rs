//! Request/response description types.

use serde::de::DeserializeOwned;

use crate::auth::SecureString;

/// HTTP method of an API request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed API endpoint.
///
/// Each request type declares exactly one response type; the
/// [`ApiClient`](super::ApiClient) decodes the body into it.
pub trait ApiRequest: Send + Sync {
    /// Shape of a successful response body.
    type Response: DeserializeOwned + Send + 'static;

    fn method(&self) -> Method;

    /// Path relative to the server base URL, starting with `/`.
    fn path(&self) -> String;

    /// JSON body, if the endpoint takes one.
    fn body(&self) -> Result<Option<serde_json::Value>, serde_json::Error> {
        Ok(None)
    }
}

/// An encoded request as handed to a [`Transport`](super::Transport).
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Vec<u8>>,
    pub credential: Option<SecureString>,
}

/// A raw response as returned by a [`Transport`](super::Transport).
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn json(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
