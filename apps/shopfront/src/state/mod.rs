//! # State Module
//!
//! In-memory mirrors of persisted data, one focused type per concern.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │ SessionState │  │  CartState   │  │ FavoritesState   │              │
//! │  │              │  │              │  │                  │              │
//! │  │  AuthPhase   │  │  Arc<Mutex<  │  │  Arc<Mutex<      │              │
//! │  │  Session?    │  │    Cart>>    │  │    Favorites>>   │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  Commands mutate a state, take a snapshot, release the lock, and only  │
//! │  then await the store write. No lock is held across `.await`.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod favorites;
mod session;

pub use cart::CartState;
pub use favorites::FavoritesState;
pub use session::SessionState;
