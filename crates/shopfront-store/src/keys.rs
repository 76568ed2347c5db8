//! Well-known store keys.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    /// Every registered user, in registration order.
    Users,
    /// The logged-in session, absent when logged out.
    User,
    Cart,
    Favorites,
    /// Append-only session and login log lines.
    Logs,
}

impl StoreKey {
    pub const ALL: [StoreKey; 5] = [
        StoreKey::Users,
        StoreKey::User,
        StoreKey::Cart,
        StoreKey::Favorites,
        StoreKey::Logs,
    ];

    /// Keys cleared by a data reset. The log survives.
    pub const RESETTABLE: [StoreKey; 4] = [
        StoreKey::Users,
        StoreKey::User,
        StoreKey::Cart,
        StoreKey::Favorites,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Users => "users",
            StoreKey::User => "user",
            StoreKey::Cart => "cart",
            StoreKey::Favorites => "favorites",
            StoreKey::Logs => "logs",
        }
    }
}

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
