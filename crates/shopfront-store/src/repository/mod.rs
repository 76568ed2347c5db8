//! # Repository Module
//!
//! One repository per stored concern, all sharing a [`Storage`] handle.
//!
//! ```text
//!   storage.users()      ──► UserRepository       (key: users)
//!   storage.session()    ──► SessionRepository    (key: user)
//!   storage.cart()       ──► CartRepository       (key: cart)
//!   storage.favorites()  ──► FavoritesRepository  (key: favorites)
//!   storage.logs()       ──► LogRepository        (key: logs)
//! ```
//!
//! Absent or undecodable data loads as the empty value.
//!
//! [`Storage`]: crate::storage::Storage

pub mod cart;
pub mod favorites;
pub mod logs;
pub mod session;
pub mod users;

pub use cart::CartRepository;
pub use favorites::FavoritesRepository;
pub use logs::LogRepository;
pub use session::SessionRepository;
pub use users::UserRepository;
