//! # Pizzeria Session
//!
//! Session layer around the pizzeria cart.
//!
//! ## Module Organization
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         pizzeria-session                                │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    commands     │  │     state       │  │        config           │ │
//! │  │  (handlers)     │──│  (CartState)    │  │  (cart.toml + env)      │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │     error       │  │     replay      │                              │
//! │  │ ApiError,       │  │ JSON command    │                              │
//! │  │ SessionError    │  │ scripts         │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Startup
//! 1. Load [`SessionConfig`] (file, then `PIZZERIA_*` overrides)
//! 2. [`init_tracing`] with the configured filter
//! 3. Build a [`CartSession`] and route front-end commands through
//!    [`commands::dispatch`]

pub mod commands;
pub mod config;
pub mod error;
pub mod replay;
pub mod state;

use tracing::info;
use tracing_subscriber::EnvFilter;

pub use commands::CartResponse;
pub use config::SessionConfig;
pub use error::{ApiError, ErrorCode, SessionError, SessionResult};
pub use replay::{replay, ReplayArgs, ReplayCommand, ReplayOutcome};
pub use state::CartState;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins over `default_filter`. Calling this twice is harmless;
/// the second subscriber is simply not installed.
pub fn init_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// One customer session: its configuration and its cart.
#[derive(Debug, Clone)]
pub struct CartSession {
    config: SessionConfig,
    cart: CartState,
}

impl CartSession {
    /// Opens a session with an empty cart built from `config`'s limits.
    pub fn new(config: SessionConfig) -> Self {
        let cart = CartState::new(config.cart_limits());
        info!(
            session_id = %cart.session_id(),
            max_items = config.cart.max_items,
            max_quantity = config.cart.max_quantity,
            duplicate_policy = %config.cart.duplicate_policy,
            "Cart session opened"
        );
        CartSession { config, cart }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn cart(&self) -> &CartState {
        &self.cart
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::{DuplicatePolicy, LineItem, Money, PizzaId};

    #[test]
    fn test_session_uses_configured_limits() {
        let mut config = SessionConfig::default();
        config.cart.max_items = 1;
        config.cart.duplicate_policy = DuplicatePolicy::Merge;

        let session = CartSession::new(config);
        let pizza = LineItem::new(PizzaId(1), "Margherita", Money::from_major(9));

        commands::add_item(session.cart(), pizza.clone()).unwrap();
        let response = commands::add_item(session.cart(), pizza).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].quantity, 2);

        let err = commands::add_item(
            session.cart(),
            LineItem::new(PizzaId(2), "Marinara", Money::from_major(8)),
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(session.config().cart.max_items, 1);
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing("warn");
        init_tracing("debug");
    }
}
