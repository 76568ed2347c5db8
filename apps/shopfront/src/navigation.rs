//! # Navigation
//!
//! The current route, its history, and at most one pending transition.
//!
//! ## Pending Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  schedule(/login, 1500ms)                                               │
//! │       │                                                                 │
//! │       ├── records Pending { target: /login, id: 7 }                     │
//! │       └── spawns timer task ──sleep──► fire(7)                          │
//! │                                          │                              │
//! │                                          ├── pending.id == 7 ? go       │
//! │                                          └── otherwise: stale, drop     │
//! │                                                                         │
//! │  cancel_pending()      ──► abort task, clear pending                    │
//! │  schedule(...) again   ──► replaces (cancels) the old one               │
//! │  navigate(...) now     ──► cancels pending, then moves                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Route changes are broadcast on a `watch` channel so the shell can
//! re-render when a timer fires while it is waiting for input.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use shopfront_core::{CoreResult, Route};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};

/// Routes kept in history; older entries are dropped first.
pub const MAX_HISTORY: usize = 32;

/// How a navigation affects history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationMode {
    /// Adds an entry.
    Push,
    /// Overwrites the current entry.
    Replace,
}

/// A scheduled navigation as seen by callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingView {
    pub target: Route,
    pub mode: NavigationMode,
    pub fires_at: Instant,
}

#[derive(Debug)]
struct Pending {
    id: u64,
    view: PendingView,
    handle: JoinHandle<()>,
}

#[derive(Debug)]
struct NavState {
    history: Vec<Route>,
    pending: Option<Pending>,
    next_id: u64,
}

impl NavState {
    fn current(&self) -> Route {
        self.history.last().copied().unwrap_or_default()
    }

    fn apply(&mut self, route: Route, mode: NavigationMode) {
        match mode {
            NavigationMode::Push => self.history.push(route),
            NavigationMode::Replace => {
                self.history.pop();
                self.history.push(route);
            }
        }

        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }
    }

    fn cancel(&mut self) -> Option<PendingView> {
        self.pending.take().map(|pending| {
            pending.handle.abort();
            pending.view
        })
    }
}

#[derive(Debug, Clone)]
pub struct Navigator {
    state: Arc<Mutex<NavState>>,
    routes: Arc<watch::Sender<Route>>,
}

impl Navigator {
    pub fn new(initial: Route) -> Self {
        let (routes, _) = watch::channel(initial);
        Navigator {
            state: Arc::new(Mutex::new(NavState {
                history: vec![initial],
                pending: None,
                next_id: 0,
            })),
            routes: Arc::new(routes),
        }
    }

    fn lock(&self) -> MutexGuard<'_, NavState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn current(&self) -> Route {
        self.lock().current()
    }

    /// The last [`MAX_HISTORY`] visited routes, oldest first.
    pub fn history(&self) -> Vec<Route> {
        self.lock().history.clone()
    }

    pub fn pending(&self) -> Option<PendingView> {
        self.lock().pending.as_ref().map(|p| p.view)
    }

    /// Receives every route change, including timer-driven ones.
    pub fn subscribe(&self) -> watch::Receiver<Route> {
        self.routes.subscribe()
    }

    /// Moves now. Any pending transition is cancelled.
    pub fn navigate(&self, route: Route) {
        self.go(route, NavigationMode::Push);
    }

    /// Parses and moves to a path.
    pub fn navigate_path(&self, path: &str) -> CoreResult<Route> {
        let route: Route = path.parse()?;
        self.navigate(route);
        Ok(route)
    }

    pub fn replace(&self, route: Route) {
        self.go(route, NavigationMode::Replace);
    }

    fn go(&self, route: Route, mode: NavigationMode) {
        {
            let mut state = self.lock();
            if let Some(cancelled) = state.cancel() {
                debug!(target_route = %cancelled.target, "Pending navigation superseded");
            }
            state.apply(route, mode);
        }
        self.routes.send_replace(route);
        info!(route = %route, ?mode, "Navigated");
    }

    /// Navigates to `target` after `delay`, replacing any earlier schedule.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, target: Route, delay: Duration) -> PendingView {
        self.schedule_with(target, NavigationMode::Push, delay)
    }

    pub fn schedule_replace(&self, target: Route, delay: Duration) -> PendingView {
        self.schedule_with(target, NavigationMode::Replace, delay)
    }

    fn schedule_with(&self, target: Route, mode: NavigationMode, delay: Duration) -> PendingView {
        let mut state = self.lock();
        state.cancel();

        state.next_id += 1;
        let id = state.next_id;
        let view = PendingView {
            target,
            mode,
            fires_at: Instant::now() + delay,
        };

        let navigator = self.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            navigator.fire(id);
        });

        state.pending = Some(Pending { id, view, handle });
        debug!(target_route = %target, delay_ms = delay.as_millis() as u64, "Navigation scheduled");
        view
    }

    /// Completes the pending transition `id` unless it was replaced meanwhile.
    fn fire(&self, id: u64) {
        let view = {
            let mut state = self.lock();
            if state.pending.as_ref().map(|p| p.id) != Some(id) {
                return;
            }
            let Some(pending) = state.pending.take() else {
                return;
            };
            state.apply(pending.view.target, pending.view.mode);
            pending.view
        };

        self.routes.send_replace(view.target);
        info!(route = %view.target, mode = ?view.mode, "Timed navigation fired");
    }

    /// Drops the pending transition, returning it if there was one.
    pub fn cancel_pending(&self) -> Option<PendingView> {
        let cancelled = self.lock().cancel();
        if let Some(view) = &cancelled {
            debug!(target_route = %view.target, "Pending navigation cancelled");
        }
        cancelled
    }
}
