//! Ordered outbound writer for the event channel.

use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::net::tcp::OwnedReadHalf;
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::ServerConfig;

use super::error::EventError;
use super::message::OutboundEvent;

const EVENT_BUFFER: usize = 32;

#[derive(Debug, Clone, Copy)]
pub struct EventConfig {
    /// Upper bound for enqueueing a write and for its completion.
    pub write_timeout: Duration,
    /// Upper bound for establishing the TCP connection.
    pub connect_timeout: Duration,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            write_timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

impl From<&ServerConfig> for EventConfig {
    fn from(server: &ServerConfig) -> Self {
        Self {
            write_timeout: Duration::from_millis(server.event_write_timeout_ms),
            connect_timeout: Duration::from_secs(server.connect_timeout_seconds as u64),
        }
    }
}

struct Outbound {
    payload: String,
    respond_to: oneshot::Sender<Result<(), EventError>>,
}

/// Handle to the process-wide outbound event stream.
///
/// All clones feed one writer task through a FIFO channel, so writes reach
/// the sink in the order they were issued. [`write`](Self::write) resolves
/// once the payload has been written and flushed.
#[derive(Clone)]
pub struct EventConnection {
    sender: mpsc::Sender<Outbound>,
    config: EventConfig,
}

impl EventConnection {
    /// Start a writer task that owns `sink`.
    pub fn spawn<W>(sink: W, config: EventConfig) -> (Self, JoinHandle<()>)
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (sender, receiver) = mpsc::channel(EVENT_BUFFER);
        let task = tokio::spawn(run_writer(sink, receiver));
        (Self { sender, config }, task)
    }

    /// A handle with no writer behind it; every write fails with
    /// [`EventError::Closed`]. Used when the event channel is unreachable.
    pub fn disconnected(config: EventConfig) -> Self {
        let (sender, _) = mpsc::channel(1);
        Self { sender, config }
    }

    /// Open a TCP connection to the event channel.
    ///
    /// Returns the writer handle and the read half for an
    /// [`EventListener`](super::EventListener).
    pub async fn connect(
        addr: &str,
        config: EventConfig,
    ) -> Result<(Self, OwnedReadHalf), EventError> {
        let stream = match tokio::time::timeout(config.connect_timeout, TcpStream::connect(addr)).await {
            Ok(result) => result,
            Err(_) => Err(std::io::Error::new(
                std::io::ErrorKind::TimedOut,
                format!("no answer within {}ms", config.connect_timeout.as_millis()),
            )),
        }
        .map_err(|source| EventError::Connect {
            addr: addr.to_string(),
            source,
        })?;
        let (read_half, write_half) = stream.into_split();
        let (connection, _task) = Self::spawn(write_half, config);
        tracing::info!(addr = %addr, "Event channel connected");
        Ok((connection, read_half))
    }

    /// Write one payload line and wait until it has been flushed.
    ///
    /// Once the writer has accepted the payload it will be written even if
    /// the caller stops waiting, so a completion timeout is reported as
    /// [`EventError::Unconfirmed`] rather than [`EventError::Timeout`].
    pub async fn write(&self, payload: String) -> Result<(), EventError> {
        if payload.contains('\n') {
            return Err(EventError::InvalidPayload);
        }

        let timeout = self.config.write_timeout;
        let (respond_to, receiver) = oneshot::channel();

        match tokio::time::timeout(timeout, self.sender.send(Outbound { payload, respond_to })).await {
            Ok(Ok(())) => {}
            Ok(Err(_)) => return Err(EventError::Closed),
            Err(_) => return Err(timeout_error(timeout)),
        }

        match tokio::time::timeout(timeout, receiver).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(EventError::Closed),
            Err(_) => Err(EventError::Unconfirmed {
                millis: timeout.as_millis() as u64,
            }),
        }
    }

    /// Encode `event` and write it.
    pub async fn send(&self, event: &OutboundEvent) -> Result<(), EventError> {
        let payload = event.to_payload()?;
        tracing::debug!(event = event.name(), "Writing event");
        self.write(payload).await
    }

    /// Whether the writer task is still accepting writes.
    pub fn is_open(&self) -> bool {
        !self.sender.is_closed()
    }
}

fn timeout_error(timeout: Duration) -> EventError {
    EventError::Timeout {
        millis: timeout.as_millis() as u64,
    }
}

async fn run_writer<W>(mut sink: W, mut receiver: mpsc::Receiver<Outbound>)
where
    W: AsyncWrite + Unpin + Send,
{
    while let Some(outbound) = receiver.recv().await {
        match write_line(&mut sink, &outbound.payload).await {
            Ok(()) => {
                if outbound.respond_to.send(Ok(())).is_err() {
                    tracing::trace!("Event write completion dropped (caller gone)");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "Event channel write failed, closing writer");
                let _ = outbound.respond_to.send(Err(EventError::Io(err)));
                break;
            }
        }
    }
    // Dropping the receiver fails every queued and future write with `Closed`.
    tracing::debug!("Event writer stopped");
}

async fn write_line<W>(sink: &mut W, payload: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    sink.write_all(payload.as_bytes()).await?;
    sink.write_all(b"\n").await?;
    sink.flush().await
}
