//! # pizzeria-core: Pure Cart Logic
//!
//! The cart state container behind the ordering interface. Everything in
//! here is a pure function over owned values: no I/O, no logging, no globals.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ordering Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Front-end (menu + cart views)                │   │
//! │  │    Menu item ──► Add button / stepper ──► Cart view ──► Order  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ CartCommand (JSON)                     │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pizzeria-session                             │   │
//! │  │    add_item, remove_item, increment, decrement, clear_cart      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pizzeria-core (THIS CRATE) ★                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ MenuItem  │  │   Money   │  │   Cart    │  │  payload  │  │   │
//! │  │   │ LineItem  │  │           │  │ Command   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog and cart line types (`PizzaId`, `MenuItem`, `LineItem`)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The `Cart` store: commands, queries, totals
//! - [`error`] - Domain error types
//! - [`validation`] - Add-payload and limit checks
//!
//! ## Example Usage
//!
//! ```rust
//! use pizzeria_core::{Cart, LineItem, Money, PizzaId};
//!
//! let mut cart = Cart::new();
//! cart.add_item(LineItem::new(PizzaId(1), "Margherita", Money::from_cents(1000)))
//!     .unwrap();
//! cart.increment_quantity(PizzaId(1)).unwrap();
//!
//! assert_eq!(cart.quantity_of(PizzaId(1)), 2);
//! assert_eq!(cart.total_value().cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartCommand, CartLimits, CartPhase, CartTotals, DuplicatePolicy};
pub use error::{CartError, CartResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default maximum number of distinct lines in a single cart.
///
/// Session config may lower or raise it up to [`HARD_MAX_CART_ITEMS`].
pub const MAX_CART_ITEMS: usize = 100;

/// Default maximum quantity of a single line.
///
/// Guards against a stuck "+" button turning into a 1000-pizza order.
pub const MAX_ITEM_QUANTITY: u32 = 999;

/// Upper bound any configuration may set for `max_items`.
pub const HARD_MAX_CART_ITEMS: usize = 1_000;

/// Upper bound any configuration may set for `max_quantity`.
pub const HARD_MAX_ITEM_QUANTITY: u32 = 9_999;

/// Highest unit price a line may carry, in cents ($1,000,000).
///
/// `HARD_MAX_CART_ITEMS × HARD_MAX_ITEM_QUANTITY × MAX_UNIT_PRICE_CENTS`
/// stays far below `i64::MAX`, so no cart total can overflow.
pub const MAX_UNIT_PRICE_CENTS: i64 = 100_000_000;
