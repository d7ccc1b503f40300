//! # Session Configuration
//!
//! Cart limits, duplicate policy and log filter for a session.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     PIZZERIA_MAX_ITEMS=50                                              │
//! │     PIZZERIA_DUPLICATE_POLICY=merge                                    │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     explicit path, else $PIZZERIA_CONFIG, else                         │
//! │     ~/.config/cart/cart.toml (Linux)                                   │
//! │     ~/Library/Application Support/com.pizzeria.cart/cart.toml (macOS)  │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     100 lines, 999 per line, append duplicates                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [cart]
//! max_items = 100
//! max_quantity = 999
//! duplicate_policy = "append"  # append | merge | reject
//!
//! [logging]
//! filter = "info,pizzeria=debug"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use pizzeria_core::validation::{validate_max_items, validate_max_quantity};
use pizzeria_core::{
    CartLimits, DuplicatePolicy, HARD_MAX_CART_ITEMS, HARD_MAX_ITEM_QUANTITY, MAX_CART_ITEMS,
    MAX_ITEM_QUANTITY,
};

use crate::error::{SessionError, SessionResult};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "PIZZERIA_CONFIG";

// =============================================================================
// Cart Settings
// =============================================================================

/// Limits applied to every cart the session creates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSettings {
    /// Maximum number of lines in one cart.
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Maximum quantity of a single line.
    #[serde(default = "default_max_quantity")]
    pub max_quantity: u32,

    /// What Add does for a pizza already in the cart.
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

fn default_max_items() -> usize {
    MAX_CART_ITEMS
}

fn default_max_quantity() -> u32 {
    MAX_ITEM_QUANTITY
}

impl Default for CartSettings {
    fn default() -> Self {
        CartSettings {
            max_items: default_max_items(),
            max_quantity: default_max_quantity(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

// =============================================================================
// Logging Settings
// =============================================================================

/// Log filter used when `RUST_LOG` is not set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

fn default_log_filter() -> String {
    "info,pizzeria=debug".to_string()
}

impl Default for LoggingSettings {
    fn default() -> Self {
        LoggingSettings {
            filter: default_log_filter(),
        }
    }
}

// =============================================================================
// Main Session Configuration
// =============================================================================

/// Complete session configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default)]
    pub cart: CartSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

impl SessionConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (cart.toml), if it exists
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> SessionResult<Self> {
        Self::load_with(config_path, |key| std::env::var(key).ok())
    }

    /// [`SessionConfig::load`] with `PIZZERIA_*` variables read through
    /// `lookup` instead of the process environment.
    pub fn load_with<F>(config_path: Option<PathBuf>, lookup: F) -> SessionResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        let path = config_path
            .or_else(|| lookup(CONFIG_PATH_ENV).map(PathBuf::from))
            .or_else(Self::default_config_path);

        if let Some(path) = path {
            if path.exists() {
                info!(?path, "Loading session config from file");
                let contents = std::fs::read_to_string(&path)?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(lookup);
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load session config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Writes the configuration as TOML.
    pub fn save(&self, path: &Path) -> SessionResult<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;

        info!(?path, "Session config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> SessionResult<()> {
        validate_max_items(self.cart.max_items, HARD_MAX_CART_ITEMS)?;
        validate_max_quantity(self.cart.max_quantity, HARD_MAX_ITEM_QUANTITY)?;

        if self.logging.filter.trim().is_empty() {
            return Err(SessionError::InvalidConfig(
                "logging.filter must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Limits to hand to `Cart::with_limits`.
    pub fn cart_limits(&self) -> CartLimits {
        CartLimits {
            max_items: self.cart.max_items,
            max_quantity: self.cart.max_quantity,
            duplicate_policy: self.cart.duplicate_policy,
        }
    }

    /// Applies overrides from any key lookup. Unparseable values are logged
    /// and ignored.
    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("PIZZERIA_MAX_ITEMS") {
            match value.parse::<usize>() {
                Ok(n) => {
                    debug!(max_items = n, "Overriding max items from environment");
                    self.cart.max_items = n;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid PIZZERIA_MAX_ITEMS"),
            }
        }

        if let Some(value) = lookup("PIZZERIA_MAX_QUANTITY") {
            match value.parse::<u32>() {
                Ok(n) => {
                    debug!(max_quantity = n, "Overriding max quantity from environment");
                    self.cart.max_quantity = n;
                }
                Err(_) => warn!(value = %value, "Ignoring invalid PIZZERIA_MAX_QUANTITY"),
            }
        }

        if let Some(value) = lookup("PIZZERIA_DUPLICATE_POLICY") {
            match value.parse::<DuplicatePolicy>() {
                Ok(policy) => {
                    debug!(%policy, "Overriding duplicate policy from environment");
                    self.cart.duplicate_policy = policy;
                }
                Err(_) => warn!(value = %value, "Unknown duplicate policy in environment"),
            }
        }

        if let Some(filter) = lookup("PIZZERIA_LOG_FILTER") {
            self.logging.filter = filter;
        }
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "pizzeria", "cart")
            .map(|dirs| dirs.config_dir().join("cart.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    fn no_env(_key: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_load_applies_lookup_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[cart]\nmax_items = 12\n").unwrap();

        let config = SessionConfig::load_with(
            None,
            lookup_from(&[
                (CONFIG_PATH_ENV, path.to_str().unwrap()),
                ("PIZZERIA_MAX_QUANTITY", "50"),
            ]),
        )
        .unwrap();
        assert_eq!(config.cart.max_items, 12);
        assert_eq!(config.cart.max_quantity, 50);

        let err = SessionConfig::load_with(
            Some(path),
            lookup_from(&[("PIZZERIA_MAX_ITEMS", "0")]),
        );
        assert!(matches!(err, Err(SessionError::InvalidConfig(_))));
    }

    #[test]
    fn test_default_config() {
        let config = SessionConfig::default();
        assert_eq!(config.cart.max_items, 100);
        assert_eq!(config.cart.max_quantity, 999);
        assert_eq!(config.cart.duplicate_policy, DuplicatePolicy::Append);
        assert_eq!(config.logging.filter, "info,pizzeria=debug");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = SessionConfig::default();

        config.cart.max_items = 0;
        assert!(config.validate().is_err());

        config.cart.max_items = 10;
        config.cart.max_quantity = HARD_MAX_ITEM_QUANTITY + 1;
        assert!(config.validate().is_err());

        config.cart.max_quantity = 5;
        config.logging.filter = "  ".to_string();
        assert!(matches!(
            config.validate(),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(
            &path,
            "[cart]\nmax_items = 12\nduplicate_policy = \"merge\"\n",
        )
        .unwrap();

        let config = SessionConfig::load_with(Some(path), no_env).unwrap();
        assert_eq!(config.cart.max_items, 12);
        assert_eq!(config.cart.max_quantity, 999);
        assert_eq!(config.cart.duplicate_policy, DuplicatePolicy::Merge);
        assert_eq!(config.logging, LoggingSettings::default());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            SessionConfig::load_with(Some(dir.path().join("absent.toml")), no_env).unwrap();
        assert_eq!(config.cart, CartSettings::default());
    }

    #[test]
    fn test_invalid_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[cart]\nmax_items = \"lots\"\n").unwrap();

        assert!(matches!(
            SessionConfig::load_with(Some(path.clone()), no_env),
            Err(SessionError::ConfigParse(_))
        ));
        assert_eq!(
            SessionConfig::load_or_default(Some(path)),
            SessionConfig::default()
        );
    }

    #[test]
    fn test_out_of_range_file_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.toml");
        std::fs::write(&path, "[cart]\nmax_quantity = 0\n").unwrap();

        assert!(matches!(
            SessionConfig::load_with(Some(path), no_env),
            Err(SessionError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_overrides() {
        let mut config = SessionConfig::default();
        config.apply_overrides(lookup_from(&[
            ("PIZZERIA_MAX_ITEMS", "20"),
            ("PIZZERIA_MAX_QUANTITY", "not-a-number"),
            ("PIZZERIA_DUPLICATE_POLICY", "reject"),
            ("PIZZERIA_LOG_FILTER", "warn"),
        ]));

        assert_eq!(config.cart.max_items, 20);
        assert_eq!(config.cart.max_quantity, 999);
        assert_eq!(config.cart.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cart.toml");

        let mut config = SessionConfig::default();
        config.cart.duplicate_policy = DuplicatePolicy::Reject;
        config.save(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("[cart]"));
        assert!(contents.contains("duplicate_policy = \"reject\""));
    }

    #[test]
    fn test_cart_limits() {
        let mut config = SessionConfig::default();
        config.cart.max_items = 3;
        let limits = config.cart_limits();
        assert_eq!(limits.max_items, 3);
        assert_eq!(limits.max_quantity, MAX_ITEM_QUANTITY);
        assert_eq!(limits.duplicate_policy, DuplicatePolicy::Append);
    }
}
