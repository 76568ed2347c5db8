//! # Auth Commands
//!
//! Registration, login, logout and data reset.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  register ──accepted──────────► users += user ──► /login    (1500 ms)   │
//! │           ──email taken───────► banner ─────────► /login    (3000 ms)   │
//! │           ──other errors──────► field errors                            │
//! │                                                                         │
//! │  login    ──match─────────────► user = session ─► /home     (1500 ms)   │
//! │           ──wrong password────► inline error                            │
//! │           ──unknown email─────► banner ─────────► /register (3000 ms)   │
//! │                                                                         │
//! │  logout   ────────────────────► remove user ────► /login    (500 ms)    │
//! │  reset    ────────────────────► remove users, user, cart, favorites     │
//! │                                 banner ─────────► /register (1500 ms,   │
//! │                                                   replaces history)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command checks the auth state machine before touching the store, so
//! a rejected event persists nothing. The auth phase moves right after the
//! primary write; the activity log line comes last and never fails the
//! command.

use chrono::Utc;
use serde::Serialize;
use shopfront_core::auth::{
    authenticate, evaluate_registration, ALREADY_REGISTERED_BANNER, RESET_BANNER,
    UNKNOWN_EMAIL_BANNER,
};
use shopfront_core::{
    AuthEvent, Cart, Favorites, LoginOutcome, PasswordStrength, RegistrationErrors,
    RegistrationForm, RegistrationOutcome, Route, Session,
};
use shopfront_store::{Storage, StoreKey};
use tracing::{debug, info};

use crate::commands::profile::record_activity;
use crate::config::TransitionDelays;
use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::state::{CartState, FavoritesState, SessionState};

// =============================================================================
// Live Validation
// =============================================================================

/// Inline state of the registration form while it is being filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationFeedback {
    pub errors: RegistrationErrors,
    pub strength: PasswordStrength,
    pub can_submit: bool,
}

pub async fn check_registration(
    storage: &Storage,
    form: &RegistrationForm,
) -> Result<RegistrationFeedback, ApiError> {
    let users = storage.users().list().await?;

    Ok(RegistrationFeedback {
        errors: form.field_errors(&users),
        strength: form.password_strength(),
        can_submit: form.can_submit(&users),
    })
}

// =============================================================================
// Register
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RegisterStatus {
    Accepted,
    AlreadyRegistered,
    Invalid,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub status: RegisterStatus,
    pub errors: RegistrationErrors,
    pub strength: PasswordStrength,
    pub banner: Option<String>,
    /// Where the scheduled navigation leads, if one was scheduled.
    pub redirect: Option<Route>,
}

/// Submits the registration form.
///
/// ## Behavior
/// - Valid and unused: the user is appended to `users`, `/login` follows
/// - Email already registered: banner, `/login` follows
/// - Anything else: field errors, nothing is written
pub async fn register(
    storage: &Storage,
    session: &SessionState,
    navigator: &Navigator,
    delays: &TransitionDelays,
    form: RegistrationForm,
) -> Result<RegisterResponse, ApiError> {
    debug!(email = %form.email, "register command");

    session.advance(AuthEvent::BeginRegistration)?;

    let users = storage.users().list().await?;
    let strength = form.password_strength();

    match evaluate_registration(&form, &users) {
        RegistrationOutcome::Accepted(user) => {
            storage.users().add(&user).await?;
            session.advance(AuthEvent::RegistrationSucceeded)?;

            navigator.schedule(Route::Login, delays.after_register());
            info!(email = %user.email, "Registration accepted");
            record_activity(storage, "User registered", Utc::now()).await;

            Ok(RegisterResponse {
                status: RegisterStatus::Accepted,
                errors: RegistrationErrors::default(),
                strength,
                banner: None,
                redirect: Some(Route::Login),
            })
        }
        RegistrationOutcome::Rejected {
            errors,
            already_registered: true,
        } => {
            navigator.schedule(Route::Login, delays.already_registered());
            info!(email = %form.email, "Registration rejected: email already registered");

            Ok(RegisterResponse {
                status: RegisterStatus::AlreadyRegistered,
                errors,
                strength,
                banner: Some(ALREADY_REGISTERED_BANNER.to_string()),
                redirect: Some(Route::Login),
            })
        }
        RegistrationOutcome::Rejected { errors, .. } => {
            debug!(errors = ?errors.messages(), "Registration rejected");

            Ok(RegisterResponse {
                status: RegisterStatus::Invalid,
                errors,
                strength,
                banner: None,
                redirect: None,
            })
        }
    }
}

// =============================================================================
// Login
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoginStatus {
    Success,
    InvalidCredentials,
    UnknownEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub status: LoginStatus,
    /// Inline message under the form.
    pub error: Option<String>,
    pub banner: Option<String>,
    pub redirect: Option<Route>,
}

/// Checks credentials against stored users (exact match).
pub async fn login(
    storage: &Storage,
    session: &SessionState,
    navigator: &Navigator,
    delays: &TransitionDelays,
    email: &str,
    password: &str,
) -> Result<LoginResponse, ApiError> {
    debug!(email = %email, "login command");

    session.preview(AuthEvent::LoginSucceeded)?;

    let users = storage.users().list().await?;
    let outcome = authenticate(&users, email, password);
    let error = outcome.error_message().map(str::to_string);

    match outcome {
        LoginOutcome::Success(user) => {
            let now = Utc::now();
            let new_session = Session::start(&user, now);

            storage.session().save(&new_session).await?;
            session.transition(AuthEvent::LoginSucceeded, Some(new_session))?;

            navigator.schedule(Route::Home, delays.after_login());
            info!(email = %user.email, "User logged in");
            record_activity(storage, "User logged in", now).await;

            Ok(LoginResponse {
                status: LoginStatus::Success,
                error: None,
                banner: None,
                redirect: Some(Route::Home),
            })
        }
        LoginOutcome::WrongPassword => {
            debug!(email = %email, "Login rejected: wrong password");

            Ok(LoginResponse {
                status: LoginStatus::InvalidCredentials,
                error,
                banner: None,
                redirect: None,
            })
        }
        LoginOutcome::UnknownEmail => {
            navigator.schedule(Route::Register, delays.unknown_email());
            info!(email = %email, "Login rejected: unknown email");

            Ok(LoginResponse {
                status: LoginStatus::UnknownEmail,
                error,
                banner: Some(UNKNOWN_EMAIL_BANNER.to_string()),
                redirect: Some(Route::Register),
            })
        }
    }
}

// =============================================================================
// Logout & Reset
// =============================================================================

/// Ends the session; `/login` follows.
pub async fn logout(
    storage: &Storage,
    session: &SessionState,
    navigator: &Navigator,
    delays: &TransitionDelays,
) -> Result<Route, ApiError> {
    session.preview(AuthEvent::LoggedOut)?;

    storage.session().clear().await?;
    session.transition(AuthEvent::LoggedOut, None)?;

    navigator.schedule(Route::Login, delays.after_logout());
    info!("User logged out");

    Ok(Route::Login)
}

/// Clears users, session, cart and favorites. The activity log is kept.
///
/// ## Returns
/// The banner to show while `/register` replaces the current screen.
pub async fn reset_data(
    storage: &Storage,
    session: &SessionState,
    cart: &CartState,
    favorites: &FavoritesState,
    navigator: &Navigator,
    delays: &TransitionDelays,
) -> Result<String, ApiError> {
    storage.remove_all(&StoreKey::RESETTABLE).await?;

    cart.replace(Cart::new());
    favorites.replace(Favorites::new());
    session.transition(AuthEvent::Reset, None)?;

    navigator.schedule_replace(Route::Register, delays.after_reset());
    info!("User data reset");

    Ok(RESET_BANNER.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::auth::INVALID_CREDENTIALS_MESSAGE;
    use shopfront_core::validation::{EMAIL_FORMAT_MESSAGE, EMAIL_TAKEN_MESSAGE};
    use shopfront_core::{AuthPhase, User};
    use crate::testing::FlakyStore;
    use std::time::Duration;

    struct Fixture {
        storage: Storage,
        session: SessionState,
        cart: CartState,
        favorites: FavoritesState,
        navigator: Navigator,
        delays: TransitionDelays,
    }

    fn fixture(start: Route) -> Fixture {
        fixture_with(Storage::memory(), start)
    }

    fn fixture_with(storage: Storage, start: Route) -> Fixture {
        Fixture {
            storage,
            session: SessionState::default(),
            cart: CartState::default(),
            favorites: FavoritesState::default(),
            navigator: Navigator::new(start),
            delays: TransitionDelays::default(),
        }
    }

    impl Fixture {
        async fn register(&self, email: &str, pw: &str, confirm: &str) -> RegisterResponse {
            register(
                &self.storage,
                &self.session,
                &self.navigator,
                &self.delays,
                RegistrationForm::new(email, pw, confirm),
            )
            .await
            .unwrap()
        }

        async fn login(&self, email: &str, pw: &str) -> LoginResponse {
            login(
                &self.storage,
                &self.session,
                &self.navigator,
                &self.delays,
                email,
                pw,
            )
            .await
            .unwrap()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_register_then_login() {
        let f = fixture(Route::Root);

        let reg = f.register("a@gmail.com", "12345678", "12345678").await;
        assert_eq!(reg.status, RegisterStatus::Accepted);
        assert_eq!(f.session.phase(), AuthPhase::Registered);
        assert_eq!(
            f.storage.users().list().await.unwrap(),
            vec![User::new("a@gmail.com", "12345678")]
        );

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(f.navigator.current(), Route::Login);

        let res = f.login("a@gmail.com", "12345678").await;
        assert_eq!(res.status, LoginStatus::Success);
        assert_eq!(f.session.phase(), AuthPhase::LoggedIn);

        let stored = f.storage.session().load().await.unwrap().unwrap();
        assert_eq!(stored.email, "a@gmail.com");

        let logs = f.storage.logs().list().await.unwrap();
        assert!(logs.last().unwrap().starts_with("User logged in at "));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(f.navigator.current(), Route::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_duplicate_registration_redirects_to_login() {
        let f = fixture(Route::Register);
        f.register("a@gmail.com", "12345678", "12345678").await;
        f.navigator.navigate(Route::Register);

        let res = f.register("a@gmail.com", "87654321", "87654321").await;
        assert_eq!(res.status, RegisterStatus::AlreadyRegistered);
        assert_eq!(res.errors.email.as_deref(), Some(EMAIL_TAKEN_MESSAGE));
        assert_eq!(res.banner.as_deref(), Some(ALREADY_REGISTERED_BANNER));
        assert_eq!(f.storage.users().list().await.unwrap().len(), 1);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert_eq!(f.navigator.current(), Route::Register);
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert_eq!(f.navigator.current(), Route::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_invalid_registration_persists_nothing() {
        let f = fixture(Route::Register);

        let res = f.register("a@yahoo.com", "1234", "4321").await;
        assert_eq!(res.status, RegisterStatus::Invalid);
        assert_eq!(res.errors.email.as_deref(), Some(EMAIL_FORMAT_MESSAGE));
        assert!(res.errors.password.is_some());
        assert!(res.errors.confirm_password.is_some());
        assert!(res.redirect.is_none());

        assert!(f.storage.users().list().await.unwrap().is_empty());
        assert!(f.navigator.pending().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_wrong_password_stays_on_login() {
        let f = fixture(Route::Login);
        f.storage
            .users()
            .add(&User::new("a@gmail.com", "12345678"))
            .await
            .unwrap();

        let res = f.login("a@gmail.com", "00000000").await;
        assert_eq!(res.status, LoginStatus::InvalidCredentials);
        assert_eq!(res.error.as_deref(), Some(INVALID_CREDENTIALS_MESSAGE));
        assert!(f.navigator.pending().is_none());
        assert!(f.storage.session().load().await.unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_email_redirects_to_register() {
        let f = fixture(Route::Login);

        let res = f.login("nobody@gmail.com", "12345678").await;
        assert_eq!(res.status, LoginStatus::UnknownEmail);
        assert_eq!(res.banner.as_deref(), Some(UNKNOWN_EMAIL_BANNER));

        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(f.navigator.current(), Route::Register);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_requires_login() {
        let f = fixture(Route::Home);
        let err = logout(&f.storage, &f.session, &f.navigator, &f.delays)
            .await
            .unwrap_err();
        assert_eq!(err.code, crate::error::ErrorCode::BusinessLogic);
    }

    #[tokio::test(start_paused = true)]
    async fn test_logout_clears_session() {
        let f = fixture(Route::Login);
        f.storage
            .users()
            .add(&User::new("a@gmail.com", "12345678"))
            .await
            .unwrap();
        f.login("a@gmail.com", "12345678").await;
        tokio::time::sleep(Duration::from_millis(1600)).await;

        logout(&f.storage, &f.session, &f.navigator, &f.delays)
            .await
            .unwrap();
        assert!(f.storage.session().load().await.unwrap().is_none());
        assert_eq!(f.session.phase(), AuthPhase::LoggedOut);

        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(f.navigator.current(), Route::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_clears_data_but_keeps_logs() {
        let f = fixture(Route::Root);
        f.register("a@gmail.com", "12345678", "12345678").await;
        f.navigator.navigate(Route::Home);

        let banner = reset_data(
            &f.storage,
            &f.session,
            &f.cart,
            &f.favorites,
            &f.navigator,
            &f.delays,
        )
        .await
        .unwrap();
        assert_eq!(banner, RESET_BANNER);

        assert!(f.storage.users().list().await.unwrap().is_empty());
        assert!(!f.storage.logs().list().await.unwrap().is_empty());
        assert_eq!(f.session.phase(), AuthPhase::Anonymous);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(f.navigator.history(), vec![Route::Root, Route::Register]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_activity_log_failure_does_not_break_auth() {
        let (store, storage) = FlakyStore::storage();
        store.break_writes(StoreKey::Logs);
        let f = fixture_with(storage, Route::Register);

        let reg = f.register("a@gmail.com", "12345678", "12345678").await;
        assert_eq!(reg.status, RegisterStatus::Accepted);
        assert_eq!(f.session.phase(), AuthPhase::Registered);
        assert_eq!(f.navigator.pending().map(|p| p.target), Some(Route::Login));

        tokio::time::sleep(Duration::from_millis(1600)).await;
        let res = f.login("a@gmail.com", "12345678").await;
        assert_eq!(res.status, LoginStatus::Success);
        assert_eq!(f.session.phase(), AuthPhase::LoggedIn);
        assert!(f.storage.session().load().await.unwrap().is_some());
        assert!(f.storage.logs().list().await.unwrap().is_empty());

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(f.navigator.current(), Route::Home);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_session_write_keeps_user_logged_out() {
        let (store, storage) = FlakyStore::storage();
        let f = fixture_with(storage, Route::Login);
        f.storage
            .users()
            .add(&User::new("a@gmail.com", "12345678"))
            .await
            .unwrap();
        store.break_writes(StoreKey::User);

        let err = login(
            &f.storage,
            &f.session,
            &f.navigator,
            &f.delays,
            "a@gmail.com",
            "12345678",
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, crate::error::ErrorCode::StorageError);
        assert!(!f.session.phase().is_logged_in());
        assert!(f.navigator.pending().is_none());
        assert!(f.storage.session().load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_live_feedback() {
        let storage = Storage::memory();
        let feedback = check_registration(
            &storage,
            &RegistrationForm::new("a@gmail.com", "123456789012", "123456789012"),
        )
        .await
        .unwrap();

        assert!(feedback.can_submit);
        assert_eq!(feedback.strength, PasswordStrength::Medium);
    }
}
