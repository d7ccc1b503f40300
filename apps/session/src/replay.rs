//! # Command Replay
//!
//! Applies a JSON script of cart commands to a session. Backs the
//! `pizzeria-replay` binary.
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  args ──► ReplayArgs::parse ──► SessionConfig::load ──► CartSession     │
//! │                                                             │           │
//! │  script.json ──► replay() ── dispatch each command ─────────┘           │
//! │                      │                                                  │
//! │                      ▼                                                  │
//! │           ReplayOutcome { cart, rejected }                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use pizzeria_core::CartCommand;

use crate::commands::{self, CartResponse};
use crate::error::{SessionError, SessionResult};
use crate::CartSession;

// =============================================================================
// Arguments
// =============================================================================

/// What the command line asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayCommand {
    Help,
    Run(ReplayArgs),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayArgs {
    pub script: PathBuf,
    pub config: Option<PathBuf>,
}

impl ReplayArgs {
    /// Parses arguments, excluding the program name.
    ///
    /// A flag without its value, an unknown flag or a missing `--script` is a
    /// [`SessionError::Usage`].
    pub fn parse<I>(args: I) -> SessionResult<ReplayCommand>
    where
        I: IntoIterator<Item = String>,
    {
        let mut script = None;
        let mut config = None;

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--script" | "-s" => script = Some(flag_value(&arg, args.next())?),
                "--config" | "-c" => config = Some(flag_value(&arg, args.next())?),
                "--help" | "-h" => return Ok(ReplayCommand::Help),
                other => {
                    return Err(SessionError::Usage(format!("unknown argument '{}'", other)))
                }
            }
        }

        let script =
            script.ok_or_else(|| SessionError::Usage("missing --script <FILE>".to_string()))?;

        Ok(ReplayCommand::Run(ReplayArgs { script, config }))
    }
}

fn flag_value(flag: &str, value: Option<String>) -> SessionResult<PathBuf> {
    match value {
        Some(v) if !v.starts_with('-') => Ok(PathBuf::from(v)),
        _ => Err(SessionError::Usage(format!("{} requires a value", flag))),
    }
}

// =============================================================================
// Replay
// =============================================================================

/// Final cart plus how many commands were refused along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayOutcome {
    pub cart: CartResponse,
    pub rejected: usize,
}

/// Dispatches every command in `script` (a JSON array of [`CartCommand`]).
///
/// Rejected commands are logged and skipped. A script that is not valid JSON
/// fails before any command is applied.
pub fn replay(session: &CartSession, script: &str) -> SessionResult<ReplayOutcome> {
    let script_commands: Vec<CartCommand> = serde_json::from_str(script)?;
    info!(commands = script_commands.len(), "Replaying cart commands");

    let mut rejected = 0usize;
    for (step, command) in script_commands.into_iter().enumerate() {
        let name = command.name();
        if let Err(err) = commands::dispatch(session.cart(), command) {
            rejected += 1;
            warn!(step, command = name, code = ?err.code, "{}", err.message);
        }
    }

    let cart = commands::get_cart(session.cart());
    info!(
        rejected,
        lines = cart.totals.line_count,
        total = %cart.totals.total_value,
        "Replay finished"
    );

    Ok(ReplayOutcome { cart, rejected })
}
