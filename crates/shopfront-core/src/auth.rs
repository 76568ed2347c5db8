//! # Registration/Login Flow
//!
//! The auth state machine and the pure decisions that drive it.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Anonymous ──BeginRegistration──► Registering                          │
//! │       ▲                                │                                │
//! │       │                      RegistrationSucceeded                      │
//! │     Reset                              ▼                                │
//! │  (from any)                        Registered                           │
//! │       │                                │                                │
//! │   LoggedOut ◄──LoggedOut── LoggedIn ◄──LoginSucceeded                   │
//! │                                ▲   (from any phase but LoggedIn)        │
//! │                                                                         │
//! │  LoggedOut accepts the same events as Anonymous.                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The app layer persists data and schedules navigations around each
//! transition; nothing here touches the store.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::User;
use crate::validation::{is_email_registered, RegistrationErrors, RegistrationForm};

pub const INVALID_CREDENTIALS_MESSAGE: &str = "Invalid email or password";
pub const UNKNOWN_EMAIL_BANNER: &str =
    "No user registered with this email. Redirecting to Register...";
pub const ALREADY_REGISTERED_BANNER: &str =
    "This email is already registered. Redirecting to Login...";
pub const RESET_BANNER: &str = "User data reset successfully";

// =============================================================================
// State Machine
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthPhase {
    #[default]
    Anonymous,
    Registering,
    Registered,
    LoggedIn,
    LoggedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthEvent {
    BeginRegistration,
    RegistrationSucceeded,
    LoginSucceeded,
    LoggedOut,
    Reset,
}

impl AuthPhase {
    /// Applies an event, returning the next phase.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::{AuthEvent, AuthPhase};
    ///
    /// let phase = AuthPhase::Anonymous
    ///     .apply(AuthEvent::BeginRegistration)
    ///     .and_then(|p| p.apply(AuthEvent::RegistrationSucceeded))
    ///     .and_then(|p| p.apply(AuthEvent::LoginSucceeded))
    ///     .unwrap();
    /// assert_eq!(phase, AuthPhase::LoggedIn);
    ///
    /// assert!(AuthPhase::Anonymous.apply(AuthEvent::LoggedOut).is_err());
    /// ```
    pub fn apply(self, event: AuthEvent) -> CoreResult<AuthPhase> {
        use AuthEvent as E;
        use AuthPhase as P;

        let next = match (self, event) {
            (_, E::Reset) => P::Anonymous,

            (P::Anonymous | P::LoggedOut | P::Registered, E::BeginRegistration) => P::Registering,
            (P::Registering, E::BeginRegistration) => P::Registering,

            (P::Registering, E::RegistrationSucceeded) => P::Registered,

            (P::LoggedIn, E::LoginSucceeded) => {
                return Err(CoreError::InvalidTransition { phase: self, event })
            }
            (_, E::LoginSucceeded) => P::LoggedIn,

            (P::LoggedIn, E::LoggedOut) => P::LoggedOut,

            _ => return Err(CoreError::InvalidTransition { phase: self, event }),
        };

        Ok(next)
    }

    pub const fn is_logged_in(&self) -> bool {
        matches!(self, AuthPhase::LoggedIn)
    }
}

// =============================================================================
// Registration Decision
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// All checks passed; the caller appends this user and persists.
    Accepted(User),
    /// Nothing may be persisted.
    Rejected {
        errors: RegistrationErrors,
        /// The email belongs to a stored user; the caller redirects to login.
        already_registered: bool,
    },
}

/// Decides a registration submit.
///
/// Succeeds only if the email is valid and unused, the password is valid,
/// and the password equals its confirmation.
pub fn evaluate_registration(form: &RegistrationForm, users: &[User]) -> RegistrationOutcome {
    let errors = form.submit_errors(users);

    if errors.is_empty() {
        return RegistrationOutcome::Accepted(User::new(&form.email, &form.password));
    }

    RegistrationOutcome::Rejected {
        already_registered: is_email_registered(users, &form.email),
        errors,
    }
}

// =============================================================================
// Login Decision
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginOutcome {
    Success(User),
    /// The email exists but the password does not match.
    WrongPassword,
    /// No stored user has this email; the caller redirects to registration.
    UnknownEmail,
}

impl LoginOutcome {
    /// The inline message shown for a failed login.
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            LoginOutcome::Success(_) => None,
            LoginOutcome::WrongPassword | LoginOutcome::UnknownEmail => {
                Some(INVALID_CREDENTIALS_MESSAGE)
            }
        }
    }
}

/// Matches credentials against stored users (exact, case-sensitive).
pub fn authenticate(users: &[User], email: &str, password: &str) -> LoginOutcome {
    match users.iter().find(|user| user.email == email) {
        Some(user) if user.matches(email, password) => LoginOutcome::Success(user.clone()),
        Some(_) => LoginOutcome::WrongPassword,
        None => LoginOutcome::UnknownEmail,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
