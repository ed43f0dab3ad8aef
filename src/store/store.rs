//! Store: owner of one immutable state value.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::{Mutex, ReentrantMutex, RwLock};

use super::action::Action;
use super::reducer::Reducer;

type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Holds the current state of one scope and applies actions to it.
///
/// `Store` is a cheap handle: clones share the same state and subscribers.
/// Every dispatch replaces the state snapshot with the reducer's output and
/// then notifies subscribers synchronously, in the calling context.
///
/// Dispatches are serialised. A dispatch issued from inside a subscriber
/// (a nested dispatch on the same thread) is queued and applied right after
/// the current notification round, before the outer `dispatch` returns, so
/// every subscriber sees every state in order and exactly once.
pub struct Store<R: Reducer> {
    inner: Arc<StoreInner<R>>,
}

struct StoreInner<R: Reducer> {
    /// Serialises reduce + notify. Reentrant so subscribers may dispatch.
    dispatch_lock: ReentrantMutex<()>,
    /// Nesting depth of the dispatch in progress; only touched under `dispatch_lock`.
    depth: AtomicUsize,
    pending: Mutex<VecDeque<R::Action>>,
    state: RwLock<Arc<R::State>>,
    listeners: Mutex<Vec<(u64, Listener<R::State>)>>,
    next_listener_id: AtomicU64,
}

impl<R: Reducer> Store<R> {
    /// Create a store holding `R::State::default()`.
    pub fn new() -> Self {
        Self::with_state(R::State::default())
    }

    /// Create a store with an explicit initial state.
    pub fn with_state(initial: R::State) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                dispatch_lock: ReentrantMutex::new(()),
                depth: AtomicUsize::new(0),
                pending: Mutex::new(VecDeque::new()),
                state: RwLock::new(Arc::new(initial)),
                listeners: Mutex::new(Vec::new()),
                next_listener_id: AtomicU64::new(0),
            }),
        }
    }

    /// Get the current state snapshot.
    pub fn state(&self) -> Arc<R::State> {
        Arc::clone(&self.inner.state.read())
    }

    /// Apply `action` through the reducer and notify subscribers.
    pub fn dispatch(&self, action: R::Action) {
        let _guard = self.inner.dispatch_lock.lock();

        if self.inner.depth.load(Ordering::Acquire) > 0 {
            tracing::trace!(
                scope = R::SCOPE,
                action = action.name(),
                "Nested dispatch queued"
            );
            self.inner.pending.lock().push_back(action);
            return;
        }

        let _depth = DepthGuard::enter(&self.inner.depth, &self.inner.pending);
        let mut next = Some(action);
        while let Some(action) = next {
            self.apply(action);
            next = self.inner.pending.lock().pop_front();
        }
    }

    fn apply(&self, action: R::Action) {
        let name = action.name();
        let current = (*self.state()).clone();
        let new_state = Arc::new(R::reduce(current, action));
        *self.inner.state.write() = Arc::clone(&new_state);

        // Snapshot so listeners added or removed during notification do not
        // affect this round.
        let listeners: Vec<Listener<R::State>> = self
            .inner
            .listeners
            .lock()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();

        tracing::trace!(
            scope = R::SCOPE,
            action = name,
            subscribers = listeners.len(),
            "Action dispatched"
        );

        for listener in listeners {
            listener(&new_state);
        }
    }

    /// Register a listener called with the new state after every dispatch.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or explicitly unsubscribed.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(&R::State) + Send + Sync + 'static,
    {
        let id = self.inner.next_listener_id.fetch_add(1, Ordering::Relaxed);
        self.inner.listeners.lock().push((id, Arc::new(listener)));

        let weak: Weak<StoreInner<R>> = Arc::downgrade(&self.inner);
        Subscription {
            remove: Some(Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.listeners.lock().retain(|(existing, _)| *existing != id);
                }
            })),
        }
    }

    /// Number of registered subscribers.
    pub fn subscriber_count(&self) -> usize {
        self.inner.listeners.lock().len()
    }
}

impl<R: Reducer> Clone for Store<R> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<R: Reducer> Default for Store<R> {
    fn default() -> Self {
        Self::new()
    }
}

/// Restores the dispatch depth even if a listener panics.
///
/// Nested actions still queued when the outermost dispatch unwinds are
/// discarded, so they never run after a later, unrelated dispatch.
struct DepthGuard<'a, A> {
    depth: &'a AtomicUsize,
    pending: &'a Mutex<VecDeque<A>>,
}

impl<'a, A> DepthGuard<'a, A> {
    fn enter(depth: &'a AtomicUsize, pending: &'a Mutex<VecDeque<A>>) -> Self {
        depth.fetch_add(1, Ordering::AcqRel);
        Self { depth, pending }
    }
}

impl<A> Drop for DepthGuard<'_, A> {
    fn drop(&mut self) {
        let dropped = {
            let mut pending = self.pending.lock();
            let dropped = pending.len();
            pending.clear();
            dropped
        };
        if dropped > 0 {
            tracing::warn!(dropped, "Dispatch unwound, discarding queued actions");
        }
        self.depth.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Handle to a store listener. Dropping it unsubscribes.
///
/// Holds only a weak reference, so an outstanding subscription does not
/// keep the store alive.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    remove: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Remove the listener now.
    pub fn unsubscribe(mut self) {
        self.remove_listener();
    }

    fn remove_listener(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.remove_listener();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.remove.is_some())
            .finish()
    }
}
