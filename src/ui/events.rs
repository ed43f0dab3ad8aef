use crossterm::event::{Event, EventStream, KeyEvent, KeyEventKind};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::interactor::InteractorError;

/// Background work started by the view.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Task {
    Register,
    RestoreSession,
    Logout,
    /// Re-running side effects of an earlier task.
    Retry(RetryOf),
}

/// The task whose side effects are being retried.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum RetryOf {
    Register,
    RestoreSession,
    Logout,
}

impl Task {
    pub fn name(&self) -> &'static str {
        match self {
            Task::Register => "register",
            Task::RestoreSession => "restore_session",
            Task::Logout => "logout",
            Task::Retry(_) => "retry",
        }
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize,
    /// A store the view renders from changed.
    StateChanged,
    TaskFinished {
        task: Task,
        result: Result<(), InteractorError>,
    },
    /// The task panicked or was cancelled before reporting.
    TaskAborted(Task),
    /// Terminal input ended.
    InputClosed,
}

/// Merges terminal input with events posted by stores and tasks.
pub struct EventHandler {
    rx: UnboundedReceiver<AppEvent>,
    tx: UnboundedSender<AppEvent>,
}

impl EventHandler {
    /// Start reading terminal input on a background task.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let input_tx = tx.clone();

        tokio::spawn(async move {
            let mut stream = EventStream::new();
            while let Some(event) = stream.next().await {
                let forwarded = match event {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
                    Ok(Event::Resize(..)) => AppEvent::Resize,
                    Ok(_) => continue,
                    Err(err) => {
                        tracing::error!(error = %err, "Terminal input failed");
                        break;
                    }
                };
                if input_tx.send(forwarded).is_err() {
                    return;
                }
            }
            let _ = input_tx.send(AppEvent::InputClosed);
        });

        Self { rx, tx }
    }

    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }

    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }
}
