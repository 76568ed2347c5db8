//! # Routes
//!
//! The path-like routes the shell renders screens for.
//!
//! ```text
//!   /          ──► registration screen (entry point)
//!   /register  ──► registration screen
//!   /login     ──► login screen
//!   /home      ──► storefront (cart, favorites, profile)
//! ```
//!
//! Routes carry no query parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    #[default]
    Root,
    Register,
    Login,
    Home,
}

impl Route {
    pub const fn path(&self) -> &'static str {
        match self {
            Route::Root => "/",
            Route::Register => "/register",
            Route::Login => "/login",
            Route::Home => "/home",
        }
    }

    /// Both `/` and `/register` show the registration screen.
    pub const fn is_registration(&self) -> bool {
        matches!(self, Route::Root | Route::Register)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

impl FromStr for Route {
    type Err = CoreError;

    /// Parses a path; a single trailing slash is ignored.
    ///
    /// ## Example
    /// ```rust
    /// use shopfront_core::Route;
    ///
    /// assert_eq!("/login".parse::<Route>().unwrap(), Route::Login);
    /// assert_eq!("/home/".parse::<Route>().unwrap(), Route::Home);
    /// assert!("/checkout".parse::<Route>().is_err());
    /// ```
    fn from_str(path: &str) -> Result<Self, Self::Err> {
        let trimmed = path.trim();
        let normalized = match trimmed {
            "/" => "/",
            other => other.strip_suffix('/').unwrap_or(other),
        };

        match normalized {
            "/" => Ok(Route::Root),
            "/register" => Ok(Route::Register),
            "/login" => Ok(Route::Login),
            "/home" => Ok(Route::Home),
            _ => Err(CoreError::UnknownRoute(path.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_round_trip() {
        for route in [Route::Root, Route::Register, Route::Login, Route::Home] {
            assert_eq!(route.path().parse::<Route>().unwrap(), route);
        }
    }

    #[test]
    fn test_query_parameters_are_rejected() {
        assert!(matches!(
            "/login?next=/home".parse::<Route>(),
            Err(CoreError::UnknownRoute(_))
        ));
        assert!("".parse::<Route>().is_err());
    }

    #[test]
    fn test_registration_screens() {
        assert!(Route::Root.is_registration());
        assert!(Route::Register.is_registration());
        assert!(!Route::Login.is_registration());
        assert_eq!(Route::default(), Route::Root);
    }
}
