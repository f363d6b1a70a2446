//! Navigation effects driven by session transitions.
//!
//! The pipeline never navigates by itself. It logs the session out, and the
//! `SignInRedirect` observer registered at startup moves the UI to the
//! sign-in route.

use std::sync::{Arc, Mutex};

use crate::session::state::Session;
use crate::session::store::{SessionEvent, SessionObserver};

/// The routing capability of whatever UI hosts the gateway.
pub trait Navigator: Send + Sync {
    /// Route currently rendered.
    fn current_route(&self) -> String;

    /// Move to `route`.
    fn navigate(&self, route: &str);
}

/// In-memory navigator that keeps the full route history.
#[derive(Debug)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new(initial_route: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![initial_route.into()]),
        }
    }

    /// Every route visited, starting with the initial one.
    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// How many times `route` was navigated to (the initial route excluded).
    pub fn visits(&self, route: &str) -> usize {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .skip(1)
            .filter(|r| r.as_str() == route)
            .count()
    }
}

impl Navigator for RecordingNavigator {
    fn current_route(&self) -> String {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, route: &str) {
        self.history
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.to_string());
    }
}

/// Sends the UI to the sign-in route whenever the session is logged out.
pub struct SignInRedirect {
    navigator: Arc<dyn Navigator>,
    signin_route: String,
}

impl SignInRedirect {
    pub fn new(navigator: Arc<dyn Navigator>, signin_route: impl Into<String>) -> Self {
        Self {
            navigator,
            signin_route: signin_route.into(),
        }
    }
}

impl SessionObserver for SignInRedirect {
    fn on_event(&self, event: &SessionEvent, _session: &Session) {
        if *event != SessionEvent::LoggedOut {
            return;
        }
        let current = self.navigator.current_route();
        if current == self.signin_route {
            tracing::debug!(route = %current, "Already on sign-in route");
            return;
        }
        tracing::info!(from = %current, to = %self.signin_route, "Redirecting to sign-in route");
        self.navigator.navigate(&self.signin_route);
    }
}
