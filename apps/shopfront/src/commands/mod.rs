//! # Commands
//!
//! Every user action the shell can trigger.
//!
//! ## Command Shape
//! ```text
//!   shell event ──► command(storage, state.., args) ──► Result<Response, ApiError>
//!                        │
//!                        ├── pure decision in shopfront-core
//!                        ├── store write (before returning)
//!                        └── optional scheduled navigation
//! ```
//!
//! - [`auth`] - register, login, logout, reset
//! - [`cart`] - view, add, change quantity, remove
//! - [`favorites`] - view, toggle
//! - [`profile`] - logged-in user and activity log

pub mod auth;
pub mod cart;
pub mod favorites;
pub mod profile;
