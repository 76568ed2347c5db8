//! # Shell
//!
//! Renders the current screen as text and turns each input line into a
//! command.
//!
//! ## Event Loop
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   render(current route) ──► stdout                                      │
//! │          ▲                                                              │
//! │          │            ┌──── stdin line ──► parse ──► dispatch ─┐        │
//! │          │            │                                        │        │
//! │          └── select! ─┤                                        │        │
//! │                       │                                        │        │
//! │                       └──── route changed (timer fired) ───────┤        │
//! │                                                                │        │
//! │          ◄─────────────────────────────────────────────────────┘        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Screen-local messages (banners, inline errors) are dropped whenever the
//! route changes, as a freshly opened screen would show none.

mod command;
mod render;

pub use command::{Command, CommandError, Screen, HELP};

use chrono::Utc;
use shopfront_core::{PasswordStrength, RegistrationErrors, RegistrationForm, Route, Session, User};
use shopfront_store::Storage;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use crate::commands;
use crate::config::{AppConfig, DEMO_EMAIL, DEMO_PASSWORD};
use crate::error::ApiError;
use crate::navigation::Navigator;
use crate::state::{CartState, FavoritesState, SessionState};

/// Whether the loop keeps reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Messages belonging to the screen currently shown.
#[derive(Debug, Clone, Default)]
struct ViewState {
    banner: Option<String>,
    notice: Option<String>,
    form_errors: Option<RegistrationErrors>,
    strength: Option<PasswordStrength>,
    can_submit: Option<bool>,
    login_error: Option<String>,
    logs: Option<Vec<String>>,
    help: bool,
}

#[derive(Debug)]
pub struct Shell {
    storage: Storage,
    config: AppConfig,
    session: SessionState,
    cart: CartState,
    favorites: FavoritesState,
    navigator: Navigator,
    shown_route: Route,
    view: ViewState,
}

impl Shell {
    /// Loads persisted state and picks the first screen.
    ///
    /// ## Startup Sequence
    /// 1. Append `Session started at <timestamp>` to the activity log
    /// 2. Seed the demo session if configured and none exists
    /// 3. Load cart, favorites and session
    /// 4. Start on `/home` when a session exists, `/` otherwise
    pub async fn startup(storage: Storage, config: AppConfig) -> Result<Shell, ApiError> {
        let now = Utc::now();
        storage.logs().record("Session started", now).await?;

        if config.seed_demo_session && storage.session().load().await?.is_none() {
            let demo = Session::start(&User::new(DEMO_EMAIL, DEMO_PASSWORD), now);
            storage.session().save(&demo).await?;
            info!(email = DEMO_EMAIL, "Seeded demo session");
        }

        let cart = storage.cart().load().await?;
        let favorites = storage.favorites().load().await?;
        let session = SessionState::restore(storage.session().load().await?);

        let initial = if session.phase().is_logged_in() {
            Route::Home
        } else {
            Route::Root
        };

        info!(
            route = %initial,
            cart_lines = cart.item_count(),
            favorites = favorites.len(),
            "Shell ready"
        );

        Ok(Shell {
            storage,
            config,
            session,
            cart: CartState::new(cart),
            favorites: FavoritesState::new(favorites),
            navigator: Navigator::new(initial),
            shown_route: initial,
            view: ViewState::default(),
        })
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }

    pub fn favorites(&self) -> &FavoritesState {
        &self.favorites
    }

    /// Reads lines until EOF or `quit`, re-rendering after every event.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut routes = self.navigator.subscribe();

        loop {
            output.write_all(self.render().as_bytes()).await?;
            output.flush().await?;

            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else {
                        break;
                    };
                    if self.handle_line(&line).await == Flow::Quit {
                        break;
                    }
                }
                changed = routes.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
            routes.borrow_and_update();
        }

        info!("Shell stopped");
        Ok(())
    }

    /// Handles one input line. Failures become screen messages.
    pub async fn handle_line(&mut self, line: &str) -> Flow {
        self.sync_route();

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(CommandError::Empty) => return Flow::Continue,
            Err(e) => {
                self.view.notice = Some(e.to_string());
                return Flow::Continue;
            }
        };

        if let Some(required) = command.screen() {
            if Screen::from(self.navigator.current()) != required {
                self.view.notice = Some(format!(
                    "`{}` is not available on {}",
                    command.name(),
                    self.navigator.current()
                ));
                return Flow::Continue;
            }
        }

        debug!(command = command.name(), "Dispatching");
        match self.dispatch(command).await {
            Ok(flow) => flow,
            Err(e) => {
                self.view.banner = Some(e.message);
                Flow::Continue
            }
        }
    }

    async fn dispatch(&mut self, command: Command) -> Result<Flow, ApiError> {
        let delays = self.config.delays;

        match command {
            Command::Go(path) => {
                self.navigator.navigate_path(&path)?;
                self.sync_route();
            }
            Command::Register {
                email,
                password,
                confirm,
            } => {
                let res = commands::auth::register(
                    &self.storage,
                    &self.session,
                    &self.navigator,
                    &delays,
                    RegistrationForm::new(email, password, confirm),
                )
                .await?;

                self.view.form_errors = Some(res.errors);
                self.view.strength = Some(res.strength);
                self.view.banner = res.banner;
                if res.status == commands::auth::RegisterStatus::Accepted {
                    self.view.notice = Some("Registration successful".to_string());
                }
            }
            Command::Check {
                email,
                password,
                confirm,
            } => {
                let form = RegistrationForm::new(email, password, confirm);
                let feedback = commands::auth::check_registration(&self.storage, &form).await?;

                self.view.form_errors = Some(feedback.errors);
                self.view.strength = Some(feedback.strength);
                self.view.can_submit = Some(feedback.can_submit);
            }
            Command::Login { email, password } => {
                let res = commands::auth::login(
                    &self.storage,
                    &self.session,
                    &self.navigator,
                    &delays,
                    &email,
                    &password,
                )
                .await?;

                self.view.login_error = res.error;
                self.view.banner = res.banner;
                if res.status == commands::auth::LoginStatus::Success {
                    self.view.notice = Some("Login successful".to_string());
                }
            }
            Command::Logout => {
                commands::auth::logout(&self.storage, &self.session, &self.navigator, &delays)
                    .await?;
                self.view.notice = Some("Logging out...".to_string());
            }
            Command::Reset => {
                let banner = commands::auth::reset_data(
                    &self.storage,
                    &self.session,
                    &self.cart,
                    &self.favorites,
                    &self.navigator,
                    &delays,
                )
                .await?;
                self.view.banner = Some(banner);
            }
            Command::Add(id) => {
                commands::cart::add_to_cart(&self.storage, &self.config, &self.cart, id).await?;
            }
            Command::Increment(id) => {
                commands::cart::change_quantity(&self.storage, &self.cart, id, 1).await?;
            }
            Command::Decrement(id) => {
                commands::cart::change_quantity(&self.storage, &self.cart, id, -1).await?;
            }
            Command::Quantity(id, delta) => {
                commands::cart::change_quantity(&self.storage, &self.cart, id, delta).await?;
            }
            Command::Remove(id) => {
                commands::cart::remove_from_cart(&self.storage, &self.cart, id).await?;
            }
            Command::Favorite(id) => {
                commands::favorites::toggle_favorite(
                    &self.storage,
                    &self.config,
                    &self.cart,
                    &self.favorites,
                    id,
                )
                .await?;
            }
            Command::Cancel => {
                self.view.notice = Some(match self.navigator.cancel_pending() {
                    Some(pending) => format!("Stayed here instead of going to {}", pending.target),
                    None => "Nothing to cancel".to_string(),
                });
            }
            Command::Logs => {
                self.view.logs = Some(commands::profile::get_logs(&self.storage).await?);
            }
            Command::Help => self.view.help = true,
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Drops screen-local messages if the route moved since the last render.
    fn sync_route(&mut self) {
        let current = self.navigator.current();
        if current != self.shown_route {
            self.shown_route = current;
            self.view = ViewState::default();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shopfront_core::auth::{INVALID_CREDENTIALS_MESSAGE, RESET_BANNER};
    use shopfront_core::ItemId;
    use shopfront_store::StoreKey;
    use std::time::Duration;

    async fn shell() -> Shell {
        Shell::startup(Storage::memory(), AppConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_startup_logs_session_and_opens_root() {
        let storage = Storage::memory();
        let shell = Shell::startup(storage.clone(), AppConfig::default())
            .await
            .unwrap();

        assert_eq!(shell.navigator().current(), Route::Root);
        let logs = storage.logs().list().await.unwrap();
        assert_eq!(logs.len(), 1);
        assert!(logs[0].starts_with("Session started at "));
    }

    #[tokio::test]
    async fn test_startup_restores_session_and_cart() {
        let storage = Storage::memory();
        let user = User::new("a@gmail.com", "12345678");
        storage
            .session()
            .save(&Session::start(&user, Utc::now()))
            .await
            .unwrap();
        storage
            .backend()
            .set(
                StoreKey::Cart.as_str(),
                r#"[{"id":1,"name":"Tote","price":1899,"quantity":2,"image":""}]"#,
            )
            .await
            .unwrap();

        let shell = Shell::startup(storage, AppConfig::default()).await.unwrap();
        assert_eq!(shell.navigator().current(), Route::Home);
        assert!(shell.session().phase().is_logged_in());
        assert_eq!(shell.cart().snapshot().total_quantity(), 2);
    }

    #[tokio::test]
    async fn test_seed_demo_session() {
        let storage = Storage::memory();
        let config = AppConfig {
            seed_demo_session: true,
            ..AppConfig::default()
        };

        let shell = Shell::startup(storage.clone(), config).await.unwrap();
        assert_eq!(shell.navigator().current(), Route::Home);
        assert_eq!(
            storage.session().load().await.unwrap().map(|s| s.email),
            Some(DEMO_EMAIL.to_string())
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_flow() {
        let mut shell = shell().await;

        shell
            .handle_line("register a@gmail.com 12345678 12345678")
            .await;
        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(shell.navigator().current(), Route::Login);

        shell.handle_line("login a@gmail.com 00000000").await;
        assert!(shell.render().contains(INVALID_CREDENTIALS_MESSAGE));

        shell.handle_line("login a@gmail.com 12345678").await;
        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(shell.navigator().current(), Route::Home);

        shell.handle_line("add 1").await;
        shell.handle_line("add 1").await;
        shell.handle_line("qty 1 -5").await;
        shell.handle_line("fav 3").await;
        assert_eq!(shell.cart().snapshot().total_quantity(), 1);
        assert!(shell.favorites().snapshot().contains(ItemId::new(3)));

        shell.handle_line("logout").await;
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(shell.navigator().current(), Route::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_keeps_current_screen() {
        let mut shell = shell().await;
        shell.handle_line("go /login").await;
        shell.handle_line("login nobody@gmail.com 12345678").await;
        shell.handle_line("cancel").await;

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(shell.navigator().current(), Route::Login);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_shows_banner_then_registration() {
        let mut shell = shell().await;
        shell.handle_line("go /home").await;
        shell.handle_line("add 2").await;
        shell.handle_line("reset").await;

        assert!(shell.render().contains(RESET_BANNER));
        assert!(shell.cart().snapshot().is_empty());

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(shell.navigator().current(), Route::Register);
        assert!(!shell.render().contains(RESET_BANNER));
    }

    #[tokio::test]
    async fn test_commands_are_screen_bound() {
        let mut shell = shell().await;
        shell.handle_line("add 1").await;

        assert!(shell.cart().snapshot().is_empty());
        assert!(shell.render().contains("`add` is not available on /"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_reported() {
        let mut shell = shell().await;
        shell.handle_line("go /checkout").await;

        assert_eq!(shell.navigator().current(), Route::Root);
        assert!(shell.render().contains("Page not found: /checkout"));
    }

    #[tokio::test]
    async fn test_run_until_eof() {
        let mut shell = shell().await;
        let input: &[u8] = b"go /home\nadd 4\nquit\nadd 4\n";
        let mut output = Vec::new();

        shell.run(input, &mut output).await.unwrap();

        assert_eq!(shell.cart().snapshot().total_quantity(), 1);
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Notebook"));
    }
}
