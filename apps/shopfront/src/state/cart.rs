//! # Cart State
//!
//! The current cart, loaded at startup and written back after every change.

use std::sync::{Arc, Mutex, PoisonError};

use shopfront_core::Cart;

#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    pub fn new(cart: Cart) -> Self {
        CartState {
            cart: Arc::new(Mutex::new(cart)),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let total = cart_state.with_cart(|cart| cart.total());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(&product))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    pub fn snapshot(&self) -> Cart {
        self.with_cart(Cart::clone)
    }

    pub fn replace(&self, cart: Cart) {
        self.with_cart_mut(|current| *current = cart);
    }
}
