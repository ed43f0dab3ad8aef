//! Classified transport failures.

use thiserror::Error;

/// Errors that can occur while sending a request or decoding its response.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server could not be reached.
    #[error("Connection to '{url}' failed: {message}")]
    Connection { url: String, message: String },

    /// The request exceeded its timeout.
    #[error("Request to '{url}' timed out after {seconds}s")]
    Timeout { url: String, seconds: u64 },

    /// The server answered with a non-success status.
    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The response body did not match the expected shape.
    #[error("Failed to decode response from '{path}': {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be serialised.
    #[error("Failed to encode request body for '{path}': {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be built (bad URL, bad header value).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl TransportError {
    /// Short machine-readable classification for logs.
    pub fn error_type(&self) -> &'static str {
        match self {
            TransportError::Connection { .. } => "connection_error",
            TransportError::Timeout { .. } => "timeout",
            TransportError::Status { .. } => "status_error",
            TransportError::Decode { .. } => "decode_error",
            TransportError::Encode { .. } => "encode_error",
            TransportError::InvalidRequest(_) => "invalid_request",
        }
    }

    /// User-friendly message for display.
    pub fn user_message(&self) -> String {
        match self {
            TransportError::Connection { .. } => "Cannot reach the server".to_string(),
            TransportError::Timeout { .. } => "The server took too long to answer".to_string(),
            TransportError::Status { message, .. } => message.clone(),
            TransportError::Decode { .. } | TransportError::Encode { .. } => {
                "Unexpected data from the server".to_string()
            }
            TransportError::InvalidRequest(_) => "Could not build the request".to_string(),
        }
    }
}
