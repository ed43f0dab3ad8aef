use thiserror::Error;

/// Errors reported by the event connection.
#[derive(Debug, Error)]
pub enum EventError {
    /// The writer is gone: the sink failed earlier or the connection was shut down.
    #[error("Event connection closed")]
    Closed,

    /// The writer did not accept the write within the configured timeout.
    /// Nothing was sent.
    #[error("Event write timed out after {millis}ms")]
    Timeout { millis: u64 },

    /// The writer accepted the write but did not confirm it in time. The
    /// payload may still be delivered, so it must not be sent again.
    #[error("Event write not confirmed after {millis}ms")]
    Unconfirmed { millis: u64 },

    /// The sink rejected the write.
    #[error("Event connection I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to connect to event channel '{addr}': {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode event: {0}")]
    Encode(#[from] serde_json::Error),

    /// Payloads are framed by newlines and may not contain one.
    #[error("Event payload contains a newline")]
    InvalidPayload,
}
