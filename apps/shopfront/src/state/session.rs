//! # Session State
//!
//! The auth phase plus the cached session of the logged-in user.
//!
//! The phase is only advanced through [`AuthPhase::apply`], so an event the
//! state machine rejects leaves both fields untouched.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use shopfront_core::{AuthEvent, AuthPhase, CoreResult, Session};
use tracing::debug;

#[derive(Debug, Default)]
struct Inner {
    phase: AuthPhase,
    session: Option<Session>,
}

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    inner: Arc<Mutex<Inner>>,
}

impl SessionState {
    /// Restores state from a stored session: logged in if one exists.
    pub fn restore(session: Option<Session>) -> Self {
        let phase = if session.is_some() {
            AuthPhase::LoggedIn
        } else {
            AuthPhase::Anonymous
        };

        SessionState {
            inner: Arc::new(Mutex::new(Inner { phase, session })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn phase(&self) -> AuthPhase {
        self.lock().phase
    }

    pub fn session(&self) -> Option<Session> {
        self.lock().session.clone()
    }

    /// The phase `event` would lead to, without committing it.
    pub fn preview(&self, event: AuthEvent) -> CoreResult<AuthPhase> {
        self.phase().apply(event)
    }

    /// Applies `event` and swaps in `session` if the transition is allowed.
    pub fn transition(&self, event: AuthEvent, session: Option<Session>) -> CoreResult<AuthPhase> {
        let mut inner = self.lock();
        let next = inner.phase.apply(event)?;

        debug!(from = ?inner.phase, to = ?next, ?event, "Auth phase changed");
        inner.phase = next;
        inner.session = session;
        Ok(next)
    }

    /// Applies `event`, keeping the current session.
    pub fn advance(&self, event: AuthEvent) -> CoreResult<AuthPhase> {
        let session = self.session();
        self.transition(event, session)
    }
}
