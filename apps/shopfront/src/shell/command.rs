//! Parsing of one input line into a shell event.

use std::str::FromStr;

use shopfront_core::{ItemId, Route};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(String),
    Register {
        email: String,
        password: String,
        confirm: String,
    },
    /// Live validation of a registration form without submitting it.
    Check {
        email: String,
        password: String,
        confirm: String,
    },
    Login {
        email: String,
        password: String,
    },
    Logout,
    Reset,
    Add(ItemId),
    Increment(ItemId),
    Decrement(ItemId),
    Quantity(ItemId, i64),
    Remove(ItemId),
    Favorite(ItemId),
    Cancel,
    Logs,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Type a command, or `help`")]
    Empty,

    #[error("Unknown command `{0}`. Type `help` for a list")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("`{0}` is not a valid item id")]
    InvalidId(String),

    #[error("`{0}` is not a valid quantity change")]
    InvalidDelta(String),
}

impl Command {
    /// The screen a command belongs to; `None` means any screen.
    pub fn screen(&self) -> Option<Screen> {
        match self {
            Command::Register { .. } | Command::Check { .. } => Some(Screen::Registration),
            Command::Login { .. } => Some(Screen::Login),
            Command::Logout
            | Command::Reset
            | Command::Add(_)
            | Command::Increment(_)
            | Command::Decrement(_)
            | Command::Quantity(..)
            | Command::Remove(_)
            | Command::Favorite(_) => Some(Screen::Home),
            Command::Go(_) | Command::Cancel | Command::Logs | Command::Help | Command::Quit => {
                None
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Go(_) => "go",
            Command::Register { .. } => "register",
            Command::Check { .. } => "check",
            Command::Login { .. } => "login",
            Command::Logout => "logout",
            Command::Reset => "reset",
            Command::Add(_) => "add",
            Command::Increment(_) => "inc",
            Command::Decrement(_) => "dec",
            Command::Quantity(..) => "qty",
            Command::Remove(_) => "rm",
            Command::Favorite(_) => "fav",
            Command::Cancel => "cancel",
            Command::Logs => "logs",
            Command::Help => "help",
            Command::Quit => "quit",
        }
    }
}

/// What the current route shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Registration,
    Login,
    Home,
}

impl From<Route> for Screen {
    fn from(route: Route) -> Self {
        match route {
            Route::Root | Route::Register => Screen::Registration,
            Route::Login => Screen::Login,
            Route::Home => Screen::Home,
        }
    }
}

fn item_id(arg: Option<&str>, usage: &'static str) -> Result<ItemId, CommandError> {
    let arg = arg.ok_or(CommandError::Usage(usage))?;
    arg.parse()
        .map_err(|_| CommandError::InvalidId(arg.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(CommandError::Empty);
        };
        let args: Vec<&str> = words.collect();

        let command = match (head.to_lowercase().as_str(), args.as_slice()) {
            ("go", [path]) => Command::Go(path.to_string()),
            ("go", _) => return Err(CommandError::Usage("go <path>")),

            ("register", [email, password, confirm]) => Command::Register {
                email: email.to_string(),
                password: password.to_string(),
                confirm: confirm.to_string(),
            },
            ("register", _) => {
                return Err(CommandError::Usage("register <email> <password> <confirm>"))
            }

            ("check", [email, rest @ ..]) if rest.len() <= 2 => Command::Check {
                email: email.to_string(),
                password: rest.first().unwrap_or(&"").to_string(),
                confirm: rest.get(1).unwrap_or(&"").to_string(),
            },
            ("check", _) => return Err(CommandError::Usage("check <email> [password] [confirm]")),

            ("login", [email, password]) => Command::Login {
                email: email.to_string(),
                password: password.to_string(),
            },
            ("login", _) => return Err(CommandError::Usage("login <email> <password>")),

            ("logout", []) => Command::Logout,
            ("reset", []) => Command::Reset,

            ("add", _) => Command::Add(item_id(args.first().copied(), "add <id>")?),
            ("inc", _) => Command::Increment(item_id(args.first().copied(), "inc <id>")?),
            ("dec", _) => Command::Decrement(item_id(args.first().copied(), "dec <id>")?),
            ("rm", _) => Command::Remove(item_id(args.first().copied(), "rm <id>")?),
            ("fav", _) => Command::Favorite(item_id(args.first().copied(), "fav <id>")?),

            ("qty", [id, delta]) => {
                let id = item_id(Some(id), "qty <id> <delta>")?;
                let delta = delta
                    .parse::<i64>()
                    .map_err(|_| CommandError::InvalidDelta(delta.to_string()))?;
                Command::Quantity(id, delta)
            }
            ("qty", _) => return Err(CommandError::Usage("qty <id> <delta>")),

            ("cancel", []) => Command::Cancel,
            ("logs", []) => Command::Logs,
            ("help" | "?", []) => Command::Help,
            ("quit" | "exit", []) => Command::Quit,

            (other, _) => return Err(CommandError::Unknown(other.to_string())),
        };

        Ok(command)
    }
}

pub const HELP: &str = "\
Anywhere:       go <path> | cancel | logs | help | quit
Registration:   register <email> <password> <confirm>
                check <email> [password] [confirm]
Login:          login <email> <password>
Home:           add <id> | inc <id> | dec <id> | qty <id> <delta> | rm <id>
                fav <id> | logout | reset";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_auth_commands() {
        assert_eq!(
            "register a@gmail.com 12345678 12345678".parse::<Command>().unwrap(),
            Command::Register {
                email: "a@gmail.com".into(),
                password: "12345678".into(),
                confirm: "12345678".into(),
            }
        );
        assert_eq!(
            "  LOGIN a@gmail.com 1 ".parse::<Command>().unwrap(),
            Command::Login {
                email: "a@gmail.com".into(),
                password: "1".into(),
            }
        );
        assert_eq!(
            "check a@gmail.com".parse::<Command>().unwrap(),
            Command::Check {
                email: "a@gmail.com".into(),
                password: String::new(),
                confirm: String::new(),
            }
        );
    }

    #[test]
    fn test_parse_cart_commands() {
        assert_eq!("add 3".parse::<Command>().unwrap(), Command::Add(ItemId::new(3)));
        assert_eq!(
            "qty 3 -5".parse::<Command>().unwrap(),
            Command::Quantity(ItemId::new(3), -5)
        );
        assert_eq!(
            "rm x".parse::<Command>(),
            Err(CommandError::InvalidId("x".into()))
        );
        assert_eq!(
            "qty 3".parse::<Command>(),
            Err(CommandError::Usage("qty <id> <delta>"))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
        assert_eq!(
            "checkout".parse::<Command>(),
            Err(CommandError::Unknown("checkout".into()))
        );
        assert!("login a@gmail.com".parse::<Command>().is_err());
    }

    #[test]
    fn test_screens() {
        assert_eq!(Screen::from(Route::Root), Screen::Registration);
        assert_eq!(Command::Logout.screen(), Some(Screen::Home));
        assert_eq!(Command::Cancel.screen(), None);
    }
}
