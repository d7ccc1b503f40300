//! # Validation Module
//!
//! Checks applied to a command before it is allowed to touch the cart.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front-end                                                    │
//! │  ├── Hides "Add" for sold-out pizzas                                   │
//! │  └── Builds the payload with quantity 1                                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Session handler                                              │
//! │  └── Type validation (deserialization)                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart (THIS MODULE)                                           │
//! │  ├── Payload shape: quantity 1, total == unit price                   │
//! │  ├── Price positive, name present                                      │
//! │  └── Limits: line count, per-line quantity                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use pizzeria_core::validation::{validate_line_item, validate_unit_price};
//! use pizzeria_core::{LineItem, Money, PizzaId};
//!
//! assert!(validate_unit_price(Money::from_cents(1200)).is_ok());
//! assert!(validate_unit_price(Money::zero()).is_err());
//!
//! let line = LineItem::new(PizzaId(1), "Margherita", Money::from_major(12));
//! assert!(validate_line_item(&line).is_ok());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::LineItem;
use crate::MAX_UNIT_PRICE_CENTS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest pizza name accepted on a line.
pub const MAX_NAME_LEN: usize = 120;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a pizza display name.
///
/// ## Rules
/// - Must not be blank
/// - At most [`MAX_NAME_LEN`] characters
pub fn validate_pizza_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be strictly positive; free or negative lines are rejected
/// - At most [`MAX_UNIT_PRICE_CENTS`]
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unitPrice".to_string(),
        });
    }

    if price.cents() > MAX_UNIT_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: "unitPrice".to_string(),
            min: 1,
            max: MAX_UNIT_PRICE_CENTS,
        });
    }

    Ok(())
}

/// Validates an Add payload.
///
/// ## Rules
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  add_item(payload)                                                      │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_line_item(payload) ← THIS FUNCTION                           │
/// │       │                                                                 │
/// │       ├── name blank?          → Required                              │
/// │       ├── unitPrice <= 0?      → MustBePositive                        │
/// │       ├── unitPrice too high?  → OutOfRange                            │
/// │       ├── quantity != 1?       → OutOfRange                            │
/// │       ├── totalPrice != unit?  → Mismatch                              │
/// │       │                                                                 │
/// │       └── OK → line appended                                           │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    validate_pizza_name(&item.name)?;
    validate_unit_price(item.unit_price)?;

    if item.quantity != 1 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 1,
        });
    }

    if item.total_price != item.unit_price {
        return Err(ValidationError::Mismatch {
            field: "totalPrice".to_string(),
            expected: item.unit_price.to_string(),
            actual: item.total_price.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Limit Validators
// =============================================================================

/// Validates a configured line-count limit against its hard cap.
pub fn validate_max_items(max_items: usize, hard_cap: usize) -> ValidationResult<()> {
    if max_items == 0 || max_items > hard_cap {
        return Err(ValidationError::OutOfRange {
            field: "max_items".to_string(),
            min: 1,
            max: hard_cap as i64,
        });
    }

    Ok(())
}

/// Validates a configured per-line quantity limit against its hard cap.
pub fn validate_max_quantity(max_quantity: u32, hard_cap: u32) -> ValidationResult<()> {
    if max_quantity == 0 || max_quantity > hard_cap {
        return Err(ValidationError::OutOfRange {
            field: "max_quantity".to_string(),
            min: 1,
            max: i64::from(hard_cap),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PizzaId;

    fn payload() -> LineItem {
        LineItem::new(PizzaId(2), "Funghi", Money::from_major(13))
    }

    #[test]
    fn test_validate_pizza_name() {
        assert!(validate_pizza_name("Quattro Formaggi").is_ok());
        assert!(validate_pizza_name("").is_err());
        assert!(validate_pizza_name("   ").is_err());
        assert!(validate_pizza_name(&"A".repeat(MAX_NAME_LEN + 1)).is_err());
    }

    #[test]
    fn test_validate_unit_price() {
        assert!(validate_unit_price(Money::from_cents(1)).is_ok());
        assert!(validate_unit_price(Money::zero()).is_err());
        assert!(validate_unit_price(Money::from_cents(-100)).is_err());

        assert!(validate_unit_price(Money::from_cents(MAX_UNIT_PRICE_CENTS)).is_ok());
        assert!(matches!(
            validate_unit_price(Money::from_cents(MAX_UNIT_PRICE_CENTS + 1)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_unit_price(Money::from_cents(i64::MAX)).is_err());
    }

    #[test]
    fn test_validate_line_item_accepts_fresh_payload() {
        assert!(validate_line_item(&payload()).is_ok());
    }

    #[test]
    fn test_validate_line_item_rejects_non_unit_quantity() {
        let mut item = payload();
        item.quantity = 2;
        item.total_price = item.expected_total();
        assert!(matches!(
            validate_line_item(&item),
            Err(ValidationError::OutOfRange { .. })
        ));

        item.quantity = 0;
        item.total_price = Money::zero();
        assert!(validate_line_item(&item).is_err());
    }

    #[test]
    fn test_validate_line_item_rejects_wrong_total() {
        let mut item = payload();
        item.total_price = Money::from_major(99);
        assert!(matches!(
            validate_line_item(&item),
            Err(ValidationError::Mismatch { .. })
        ));
    }

    #[test]
    fn test_validate_line_item_rejects_free_pizza() {
        let item = LineItem::new(PizzaId(2), "Funghi", Money::zero());
        assert!(matches!(
            validate_line_item(&item),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn test_validate_limits() {
        assert!(validate_max_items(100, 1_000).is_ok());
        assert!(validate_max_items(0, 1_000).is_err());
        assert!(validate_max_items(1_001, 1_000).is_err());

        assert!(validate_max_quantity(999, 9_999).is_ok());
        assert!(validate_max_quantity(0, 9_999).is_err());
        assert!(validate_max_quantity(10_000, 9_999).is_err());
    }
}
