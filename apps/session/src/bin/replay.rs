//! # Cart Command Replay
//!
//! Runs a JSON script of cart commands against a fresh session and prints
//! the resulting cart.
//!
//! ## Usage
//! ```bash
//! # Replay a script with the default configuration
//! cargo run -p pizzeria-session --bin pizzeria-replay -- --script ./orders/friday.json
//!
//! # Use a specific config file
//! cargo run -p pizzeria-session --bin pizzeria-replay -- -s ./orders/friday.json -c ./cart.toml
//! ```
//!
//! ## Script Format
//! ```json
//! [
//!   { "type": "addItem", "item": { "pizzaId": 1, "name": "Margherita",
//!     "quantity": 1, "unitPrice": 1200, "totalPrice": 1200 } },
//!   { "type": "incrementItemQuantity", "pizzaId": 1 },
//!   { "type": "removeItem", "pizzaId": 4 },
//!   { "type": "clearCart" }
//! ]
//! ```
//!
//! Rejected commands are logged and skipped; the replay keeps going.

use std::env;

use pizzeria_session::{
    init_tracing, replay, CartSession, ReplayArgs, ReplayCommand, SessionConfig, SessionError,
};
use tracing::info;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = match ReplayArgs::parse(env::args().skip(1)) {
        Ok(ReplayCommand::Run(args)) => args,
        Ok(ReplayCommand::Help) => {
            print_help();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{}", err);
            eprintln!();
            print_help();
            return Err(err.into());
        }
    };

    let config = SessionConfig::load(args.config)?;
    init_tracing(&config.logging.filter);

    let contents = std::fs::read_to_string(&args.script).map_err(SessionError::from)?;
    info!(script = ?args.script, "Loaded command script");

    let session = CartSession::new(config);
    let outcome = replay(&session, &contents)?;

    println!("{}", serde_json::to_string_pretty(&outcome.cart)?);
    Ok(())
}

fn print_help() {
    println!("Pizzeria Cart Replay");
    println!();
    println!("Usage: pizzeria-replay --script <FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --script <FILE>   JSON array of cart commands to apply");
    println!("  -c, --config <FILE>   Config file (default: $PIZZERIA_CONFIG or cart.toml)");
    println!("  -h, --help            Show this help message");
}
