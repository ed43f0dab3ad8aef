//! Shared test utilities: recording fakes and an environment harness.

#![allow(dead_code, unused_imports)]

pub mod mock_server;

use async_trait::async_trait;
use gamesync::auth::{AuthError, AuthHolder, MemoryTokenStore, SecureString, TokenPersistence};
use gamesync::events::{EventConfig, EventConnection};
use gamesync::interactor::Environment;
use gamesync::state::GlobalStore;
use gamesync::store::Subscription;
use gamesync::transport::{ApiClient, HttpRequest, HttpResponse, Transport, TransportError};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;
use tokio::io::AsyncWrite;

/// Ordered record of everything observable a test cares about.
#[derive(Clone, Default)]
pub struct EffectLog(Arc<Mutex<Vec<String>>>);

impl EffectLog {
    pub fn push(&self, entry: impl Into<String>) {
        self.0.lock().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().clone()
    }
}

/// Token persistence that logs every call and can be told to fail.
pub struct RecordingTokenStore {
    log: EffectLog,
    inner: MemoryTokenStore,
    fail_save: AtomicBool,
}

impl RecordingTokenStore {
    pub fn new(log: EffectLog) -> Self {
        Self {
            log,
            inner: MemoryTokenStore::new(),
            fail_save: AtomicBool::new(false),
        }
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_save.store(fail, Ordering::SeqCst);
    }
}

impl TokenPersistence for RecordingTokenStore {
    fn save(&self, token: &SecureString) -> Result<(), AuthError> {
        if self.fail_save.load(Ordering::SeqCst) {
            self.log.push("save_token failed");
            return Err(AuthError::Persistence {
                path: PathBuf::from("/nonexistent/token"),
                source: io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.log.push(format!("save_token {}", token.expose()));
        self.inner.save(token)
    }

    fn load(&self) -> Result<Option<SecureString>, AuthError> {
        self.inner.load()
    }

    fn clear(&self) -> Result<(), AuthError> {
        self.log.push("clear_token");
        self.inner.clear()
    }
}

/// Event sink that records each complete line it receives.
pub struct LineSink {
    log: EffectLog,
    buffer: Vec<u8>,
}

impl LineSink {
    pub fn new(log: EffectLog) -> Self {
        Self {
            log,
            buffer: Vec::new(),
        }
    }
}

impl AsyncWrite for LineSink {
    fn poll_write(
        mut self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        self.buffer.extend_from_slice(buf);
        while let Some(end) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=end).collect();
            let text = String::from_utf8_lossy(&line[..line.len() - 1]).to_string();
            self.log.push(format!("event {}", text));
        }
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }
}

/// Transport answering from a queue of canned responses.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: Mutex<Vec<HttpRequest>>,
    delay: Mutex<Option<Duration>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses
            .lock()
            .push_back(Ok(HttpResponse::json(status, body)));
    }

    pub fn fail(&self, err: TransportError) {
        self.responses.lock().push_back(Err(err));
    }

    /// Hold every response for `delay` before returning it.
    pub fn set_delay(&self, delay: Duration) {
        *self.delay.lock() = Some(delay);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().push(request);
        let delay = *self.delay.lock();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        let next = self.responses.lock().pop_front();
        next.unwrap_or_else(|| {
            Err(TransportError::Connection {
                url: "scripted".to_string(),
                message: "no scripted response left".to_string(),
            })
        })
    }
}

/// An [`Environment`] wired to recording fakes.
///
/// Every global state change is logged as `user <name>` / `no user` so the
/// log interleaves dispatches with side effects.
pub struct Harness {
    pub env: Environment,
    pub log: EffectLog,
    pub transport: Arc<ScriptedTransport>,
    pub tokens: Arc<RecordingTokenStore>,
    _subscription: Subscription,
}

impl Harness {
    /// Must be called inside a tokio runtime.
    pub fn new() -> Self {
        let log = EffectLog::default();
        let (events, _task) =
            EventConnection::spawn(LineSink::new(log.clone()), EventConfig::default());
        Self::with_events(log, events)
    }

    /// Harness whose event connection is already closed.
    pub fn offline() -> Self {
        Self::with_events(
            EffectLog::default(),
            EventConnection::disconnected(EventConfig::default()),
        )
    }

    fn with_events(log: EffectLog, events: EventConnection) -> Self {
        let tokens = Arc::new(RecordingTokenStore::new(log.clone()));
        let transport = Arc::new(ScriptedTransport::new());
        let global = GlobalStore::new();

        let state_log = log.clone();
        let subscription = global.subscribe(move |state| match &state.current_user {
            Some(user) => state_log.push(format!("user {}", user.name)),
            None => state_log.push("no user"),
        });

        let env = Environment {
            global,
            api: ApiClient::new(transport.clone()),
            auth: AuthHolder::new(tokens.clone()),
            events,
        };

        Self {
            env,
            log,
            transport,
            tokens,
            _subscription: subscription,
        }
    }

    pub fn entries(&self) -> Vec<String> {
        self.log.entries()
    }
}
