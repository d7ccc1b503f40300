//! # Session Error Types
//!
//! Two error types live here:
//!
//! - [`ApiError`] - what a front-end receives when a cart command fails
//! - [`SessionError`] - failures setting a session up (config, scripts)
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front-end                    Session                                   │
//! │  ─────────                    ───────                                   │
//! │                                                                         │
//! │  dispatch({type: "incrementItemQuantity", pizzaId: 9})                  │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Handler: Result<CartResponse, ApiError>                         │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Cart rejects ── CartError::ItemNotFound(9) ── ApiError ────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  { "code": "NOT_FOUND", "message": "Pizza 9 is not in the cart" }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use thiserror::Error;

use pizzeria_core::{CartError, ValidationError};

// =============================================================================
// API Error
// =============================================================================

/// Error returned from a cart command handler.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "unitPrice must be positive"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for handler responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Targeted pizza is not in the cart
    NotFound,

    /// Add payload failed validation
    ValidationError,

    /// Cart limit or duplicate policy refused the command
    CartError,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }
}

/// Converts rejected cart commands to API errors.
impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match &err {
            CartError::ItemNotFound(_) => ApiError::new(ErrorCode::NotFound, err.to_string()),
            CartError::DuplicateItem(_)
            | CartError::CartTooLarge { .. }
            | CartError::QuantityTooLarge { .. } => ApiError::cart(err.to_string()),
            CartError::Validation(e) => ApiError::validation(e.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Session Error
// =============================================================================

/// Result type alias for session setup.
pub type SessionResult<T> = Result<T, SessionError>;

/// Failures loading configuration, arguments or command scripts.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Invalid session configuration.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// Config file or script could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Config file is not valid TOML for `SessionConfig`.
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// Config could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    /// Bad command-line arguments.
    #[error("Usage error: {0}")]
    Usage(String),

    /// Command script is not a JSON array of cart commands.
    #[error("Invalid command script: {0}")]
    Script(#[from] serde_json::Error),
}

impl From<ValidationError> for SessionError {
    fn from(err: ValidationError) -> Self {
        SessionError::InvalidConfig(err.to_string())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pizzeria_core::PizzaId;

    #[test]
    fn test_not_found_maps_to_not_found_code() {
        let err = ApiError::from(CartError::ItemNotFound(PizzaId(9)));
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Pizza 9 is not in the cart");
    }

    #[test]
    fn test_limits_map_to_cart_error_code() {
        let err = ApiError::from(CartError::CartTooLarge { max: 100 });
        assert_eq!(err.code, ErrorCode::CartError);

        let err = ApiError::from(CartError::DuplicateItem(PizzaId(1)));
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_validation_maps_to_validation_code() {
        let err = ApiError::from(CartError::Validation(ValidationError::MustBePositive {
            field: "unitPrice".to_string(),
        }));
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "unitPrice must be positive");
    }

    #[test]
    fn test_api_error_serialization() {
        let json = serde_json::to_value(ApiError::cart("Cart cannot have more than 2 items")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": "CART_ERROR", "message": "Cart cannot have more than 2 items"})
        );
    }
}
