//! The session store.
//!
//! # Responsibilities
//! - Hold the current `Session` snapshot
//! - Apply init/login/logout/loading transitions atomically
//! - Notify synchronous observers and async subscribers of each transition
//!
//! # Design Decisions
//! - Snapshots live in an `ArcSwap`: readers never block, writers replace the
//!   whole value, so a torn session cannot be observed
//! - Observers run inline, after the new state is visible, so effects such as
//!   navigation complete before the transition call returns
//! - `logout` always notifies, even when already logged out; repeated
//!   notifications leave the state unchanged

use std::sync::Arc;

use arc_swap::ArcSwap;
use tokio::sync::broadcast;

use crate::observability::metrics;
use crate::session::state::{Identity, Session};

const EVENT_CAPACITY: usize = 64;

/// A session transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// `init` ran; `authenticated` tells which state it produced.
    Initialized { authenticated: bool },
    LoggedIn(Identity),
    LoggedOut,
    LoadingChanged(bool),
}

/// Reacts to session transitions synchronously.
pub trait SessionObserver: Send + Sync {
    fn on_event(&self, event: &SessionEvent, session: &Session);
}

struct StoreInner {
    state: ArcSwap<Session>,
    observers: ArcSwap<Vec<Arc<dyn SessionObserver>>>,
    events: broadcast::Sender<SessionEvent>,
}

/// Shared handle to the application's single session.
///
/// Cloning yields another handle to the same session.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<StoreInner>,
}

impl SessionStore {
    /// Create a store in the empty state.
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(StoreInner {
                state: ArcSwap::from_pointee(Session::empty()),
                observers: ArcSwap::from_pointee(Vec::new()),
                events,
            }),
        }
    }

    /// Register an observer invoked after every transition.
    pub fn register(&self, observer: Arc<dyn SessionObserver>) {
        self.inner.observers.rcu(|current| {
            let mut next = Vec::clone(current);
            next.push(observer.clone());
            next
        });
    }

    /// Subscribe to transitions from an async task.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.inner.events.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<Session> {
        self.inner.state.load_full()
    }

    /// Current bearer token, if any.
    pub fn token(&self) -> Option<String> {
        self.inner.state.load().token().map(str::to_string)
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.state.load().is_authenticated()
    }

    /// Seed the session at startup.
    ///
    /// Authenticated only when both user and token are present; otherwise the
    /// empty state.
    pub fn init(&self, user: Option<Identity>, token: Option<String>) {
        tracing::info!(
            has_user = user.is_some(),
            has_token = token.is_some(),
            "Initializing session"
        );
        let next = match (user, token) {
            (Some(user), Some(token)) => Session::authenticated(user, token),
            _ => Session::empty(),
        };
        let authenticated = next.is_authenticated();
        self.transition(next, SessionEvent::Initialized { authenticated }, "init");
    }

    /// Enter the authenticated state. Credentials were verified upstream.
    pub fn login(&self, user: Identity, token: impl Into<String>) {
        tracing::info!(username = %user.username, user_id = %user.id, "Logging in user");
        let event = SessionEvent::LoggedIn(user.clone());
        self.transition(Session::authenticated(user, token), event, "login");
    }

    /// Return to the empty state. Idempotent.
    pub fn logout(&self) {
        tracing::info!("Logging out user");
        self.transition(Session::empty(), SessionEvent::LoggedOut, "logout");
    }

    /// Toggle the UI-facing loading flag without touching credentials.
    pub fn set_loading(&self, loading: bool) {
        self.inner.state.rcu(|current| current.with_loading(loading));
        let session = self.inner.state.load_full();
        metrics::record_session_transition("loading");
        self.notify(&SessionEvent::LoadingChanged(loading), &session);
    }

    fn transition(&self, next: Session, event: SessionEvent, label: &'static str) {
        let next = Arc::new(next);
        self.inner.state.store(next.clone());
        metrics::record_session_transition(label);
        self.notify(&event, &next);
    }

    fn notify(&self, event: &SessionEvent, session: &Session) {
        for observer in self.inner.observers.load().iter() {
            observer.on_event(event, session);
        }
        // No subscribers is fine.
        let _ = self.inner.events.send(event.clone());
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("session", &self.inner.state.load())
            .field("observers", &self.inner.observers.load().len())
            .finish()
    }
}
