//! # Cart State
//!
//! Owns the cart of one customer session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` so a host that runs handlers on
//! several threads still applies one command at a time, and every reader
//! sees a fully settled cart.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Handler                 Lock        Cart                               │
//! │  ───────                 ────        ────                               │
//! │  add_item()       ──►  exclusive ──► validate, then push                │
//! │  increment()      ──►  exclusive ──► validate, then bump                │
//! │  get_cart()       ──►  exclusive ──► clone snapshot, release            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};
use uuid::Uuid;

use pizzeria_core::{Cart, CartLimits};

/// The cart of one session, plus the id its log lines are tagged with.
#[derive(Debug, Clone)]
pub struct CartState {
    session_id: Uuid,
    started_at: DateTime<Utc>,
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new session with an empty cart.
    pub fn new(limits: CartLimits) -> Self {
        CartState {
            session_id: Uuid::new_v4(),
            started_at: Utc::now(),
            cart: Arc::new(Mutex::new(Cart::with_limits(limits))),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust
    /// use pizzeria_core::CartLimits;
    /// use pizzeria_session::CartState;
    ///
    /// let state = CartState::new(CartLimits::default());
    /// assert_eq!(state.with_cart(|cart| cart.total_item_count()), 0);
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.lock();
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.lock();
        f(&mut cart)
    }

    // Cart commands validate before mutating; a poisoned cart is still consistent.
    fn lock(&self) -> MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(CartLimits::default())
    }
}
