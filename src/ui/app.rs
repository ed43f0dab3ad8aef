use std::future::Future;
use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::interactor::{
    logout, Environment, InteractorError, Pipeline, RegisterUser, RestoreSession, SideEffect,
};
use crate::state::GlobalState;
use crate::store::Subscription;
use crate::ui::events::{AppEvent, RetryOf, Task};
use crate::ui::register::{RegisterAction, RegisterState, RegisterStore};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// One-line message shown in the footer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

impl Notice {
    fn new(level: NoticeLevel, text: impl Into<String>) -> Self {
        Self {
            level,
            text: text.into(),
        }
    }
}

/// View model: owns the register form's local store and starts tasks.
///
/// Rendering reads snapshots from the stores; the only state kept here is
/// what never reaches a store (notices, pending retries, quit flag).
pub struct App {
    env: Environment,
    register: RegisterStore,
    register_user: Arc<Pipeline<RegisterUser>>,
    restore_session: Arc<Pipeline<RestoreSession>>,
    events: UnboundedSender<AppEvent>,
    notice: Option<Notice>,
    retry: Option<(RetryOf, Vec<SideEffect>)>,
    should_quit: bool,
    _subscriptions: Vec<Subscription>,
}

impl App {
    pub fn new(env: Environment, events: UnboundedSender<AppEvent>) -> Self {
        let register = RegisterStore::new();
        let register_user = Arc::new(Pipeline::new(RegisterUser, &env, register.clone()));
        let restore_session = Arc::new(Pipeline::global_only(
            RestoreSession::new(env.auth.clone()),
            &env,
        ));

        let global_events = events.clone();
        let local_events = events.clone();
        let subscriptions = vec![
            env.global.subscribe(move |_| {
                let _ = global_events.send(AppEvent::StateChanged);
            }),
            register.subscribe(move |_| {
                let _ = local_events.send(AppEvent::StateChanged);
            }),
        ];

        Self {
            env,
            register,
            register_user,
            restore_session,
            events,
            notice: None,
            retry: None,
            should_quit: false,
            _subscriptions: subscriptions,
        }
    }

    pub fn global(&self) -> Arc<GlobalState> {
        self.env.global.state()
    }

    pub fn register_form(&self) -> Arc<RegisterState> {
        self.register.state()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn has_retry(&self) -> bool {
        self.retry.is_some()
    }

    pub fn events_connected(&self) -> bool {
        self.env.events.is_open()
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    /// Edit the register form's name. Ignored once signed in and while a
    /// registration is in flight, since the request already captured the name.
    pub fn edit_name(&mut self, edit: impl FnOnce(&mut String)) {
        let form = self.register.state();
        if self.global().is_signed_in() || form.submitting {
            return;
        }
        let mut name = form.name.clone();
        edit(&mut name);
        self.register.dispatch(RegisterAction::SetName(name));
    }

    /// Resolve the persisted session, if a token was restored at startup.
    pub fn restore_session(&mut self) {
        if self.env.auth.current_token().is_none() {
            return;
        }
        self.notice = Some(Notice::new(NoticeLevel::Info, "Restoring session..."));
        let handle = Arc::clone(&self.restore_session).spawn();
        self.watch(Task::RestoreSession, handle);
    }

    pub fn submit(&mut self) {
        if self.global().is_signed_in() || !self.register.state().can_submit() {
            return;
        }
        self.register.dispatch(RegisterAction::Submitted);
        self.notice = None;
        let handle = Arc::clone(&self.register_user).spawn();
        self.watch(Task::Register, handle);
    }

    pub fn logout(&mut self) {
        if !self.global().is_signed_in() {
            return;
        }
        let global = self.env.global.clone();
        let effects = self.env.side_effects();
        self.retry = None;
        self.spawn(Task::Logout, async move { logout(&global, &effects).await });
    }

    /// Re-run the side effects that did not complete last time.
    pub fn retry(&mut self) {
        let Some((origin, effects)) = self.retry.take() else {
            return;
        };
        let task = Task::Retry(origin);
        match origin {
            RetryOf::Register => {
                let pipeline = Arc::clone(&self.register_user);
                self.spawn(task, async move { pipeline.retry_side_effects(effects).await });
            }
            RetryOf::RestoreSession => {
                let pipeline = Arc::clone(&self.restore_session);
                self.spawn(task, async move { pipeline.retry_side_effects(effects).await });
            }
            RetryOf::Logout => {
                let runner = self.env.side_effects();
                self.spawn(task, async move { runner.run(effects).await });
            }
        }
    }

    pub fn on_task_finished(&mut self, task: Task, result: Result<(), InteractorError>) {
        match result {
            Ok(()) => {
                if task == Task::Register {
                    self.register.dispatch(RegisterAction::Succeeded);
                }
                self.notice = match task {
                    Task::Logout => Some(Notice::new(NoticeLevel::Info, "Signed out")),
                    _ => None,
                };
            }
            Err(err) if err.state_applied() => {
                if task == Task::Register {
                    self.register.dispatch(RegisterAction::Succeeded);
                }
                let origin = match task {
                    Task::Register => RetryOf::Register,
                    Task::RestoreSession => RetryOf::RestoreSession,
                    Task::Logout => RetryOf::Logout,
                    Task::Retry(origin) => origin,
                };
                let effects = err.retryable_effects();
                if effects.is_empty() {
                    self.notice = Some(Notice::new(NoticeLevel::Warning, err.user_message()));
                    self.retry = None;
                } else {
                    self.notice = Some(Notice::new(
                        NoticeLevel::Warning,
                        format!("{} (Ctrl+R to retry)", err.user_message()),
                    ));
                    self.retry = Some((origin, effects));
                }
            }
            Err(err) => match task {
                Task::Register => {
                    self.register
                        .dispatch(RegisterAction::Failed(err.user_message()));
                }
                _ => {
                    self.notice = Some(Notice::new(NoticeLevel::Error, err.user_message()));
                }
            },
        }
    }

    pub fn on_task_aborted(&mut self, task: Task) {
        if task == Task::Register {
            self.register
                .dispatch(RegisterAction::Failed("Registration was interrupted".to_string()));
        } else {
            self.notice = Some(Notice::new(
                NoticeLevel::Error,
                format!("{} was interrupted", task.name()),
            ));
        }
    }

    fn spawn<F>(&self, task: Task, work: F)
    where
        F: Future<Output = Result<(), InteractorError>> + Send + 'static,
    {
        self.watch(task, tokio::spawn(work));
    }

    /// Report the outcome of `handle` back to the event loop.
    fn watch(&self, task: Task, handle: JoinHandle<Result<(), InteractorError>>) {
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match handle.await {
                Ok(result) => AppEvent::TaskFinished { task, result },
                Err(err) => {
                    tracing::error!(task = task.name(), error = %err, "Task aborted");
                    AppEvent::TaskAborted(task)
                }
            };
            let _ = events.send(event);
        });
    }
}
