//! # Error Types
//!
//! Domain-specific error types for pizzeria-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pizzeria-core errors (this file)                                      │
//! │  ├── CartError        - Rejected cart commands                         │
//! │  └── ValidationError  - Malformed Add payloads                         │
//! │                                                                         │
//! │  pizzeria-session errors (separate crate)                              │
//! │  ├── SessionError     - Config / script loading failures               │
//! │  └── ApiError         - What the front-end sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CartError → ApiError → Front-end              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error is local to the one command that produced it: the cart is
//! validated before it is touched, so a rejected command leaves it unchanged.

use thiserror::Error;

use crate::types::PizzaId;

// =============================================================================
// Cart Error
// =============================================================================

/// Reasons a cart command can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// Increment/decrement targeted an id that is not in the cart.
    ///
    /// ## When This Occurs
    /// ```text
    /// Cart view renders stepper for pizza 7
    ///      │
    ///      ▼
    /// Another handler removes pizza 7
    ///      │
    ///      ▼
    /// Stale "+" click → increment_quantity(7)
    ///      │
    ///      ▼
    /// ItemNotFound(7), cart untouched
    /// ```
    #[error("Pizza {0} is not in the cart")]
    ItemNotFound(PizzaId),

    /// Add of an id already in the cart while the policy is `Reject`.
    #[error("Pizza {0} is already in the cart")]
    DuplicateItem(PizzaId),

    /// Cart has reached its maximum number of lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Line quantity would exceed the configured maximum.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: u32, max: u32 },

    /// Add payload failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CartError {
    /// True when the error is a caller contract violation on the payload
    /// rather than a state conflict.
    pub fn is_validation(&self) -> bool {
        matches!(self, CartError::Validation(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for Add payloads and limits.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// A derived field does not match the value implied by its inputs.
    #[error("{field} must equal {expected}, got {actual}")]
    Mismatch {
        field: String,
        expected: String,
        actual: String,
    },

    /// The menu item cannot be ordered right now.
    #[error("{name} is sold out")]
    SoldOut { name: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CartError.
pub type CartResult<T> = Result<T, CartError>;

// =============================================================================
// Unit Tests
// =============================================================================
