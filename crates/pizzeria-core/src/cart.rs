//! # Cart Store
//!
//! The authoritative collection of line items for one ordering session,
//! plus the read-only queries the menu and cart views render from.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Commands                                        │
//! │                                                                         │
//! │  Front-end Action        Command                  Cart State Change     │
//! │  ───────────────         ───────                  ─────────────────     │
//! │                                                                         │
//! │  "Add to cart" ────────► add_item() ────────────► items.push(line)     │
//! │                                                                         │
//! │  Stepper "+" ──────────► increment_quantity() ──► qty += 1, recompute  │
//! │                                                                         │
//! │  Stepper "-" ──────────► decrement_quantity() ──► qty -= 1, recompute  │
//! │                                                   (qty 0 → remove)     │
//! │                                                                         │
//! │  "Delete" ─────────────► remove_item() ─────────► items.retain(..)     │
//! │                                                                         │
//! │  "Clear cart" ─────────► clear() ───────────────► items.clear()        │
//! │                                                                         │
//! │  Every command validates first and mutates second: a rejected command  │
//! │  leaves the cart exactly as it was.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Phases
//! ```text
//!            add_item                       remove / decrement last / clear
//!   ┌───────┐ ───────► ┌──────────┐ ────────────────────────────► ┌───────┐
//!   │ Empty │          │ NonEmpty │                               │ Empty │
//!   └───────┘          └──────────┘ ◄──┐ every other command      └───────┘
//!                           └──────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::{CartError, CartResult, ValidationError};
use crate::money::Money;
use crate::types::{LineItem, MenuItem, PizzaId};
use crate::validation::validate_line_item;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Duplicate Policy
// =============================================================================

/// What `add_item` does when the pizza is already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum DuplicatePolicy {
    /// Push a second, independent line (the ordering front-end's behaviour).
    #[default]
    Append,

    /// Bump the existing line's quantity instead.
    Merge,

    /// Fail with [`CartError::DuplicateItem`].
    Reject,
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DuplicatePolicy::Append => write!(f, "append"),
            DuplicatePolicy::Merge => write!(f, "merge"),
            DuplicatePolicy::Reject => write!(f, "reject"),
        }
    }
}

impl FromStr for DuplicatePolicy {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "append" => Ok(DuplicatePolicy::Append),
            "merge" => Ok(DuplicatePolicy::Merge),
            "reject" => Ok(DuplicatePolicy::Reject),
            other => Err(ValidationError::Mismatch {
                field: "duplicate_policy".to_string(),
                expected: "append, merge or reject".to_string(),
                actual: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Limits
// =============================================================================

/// Per-cart limits and policy, fixed when the cart is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLimits {
    /// Maximum number of lines.
    pub max_items: usize,

    /// Maximum quantity of a single line.
    pub max_quantity: u32,

    /// Behaviour of Add for a pizza already in the cart.
    pub duplicate_policy: DuplicatePolicy,
}

impl Default for CartLimits {
    fn default() -> Self {
        CartLimits {
            max_items: MAX_CART_ITEMS,
            max_quantity: MAX_ITEM_QUANTITY,
            duplicate_policy: DuplicatePolicy::default(),
        }
    }
}

// =============================================================================
// Phase
// =============================================================================

/// The two macro-states a cart view switches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum CartPhase {
    Empty,
    NonEmpty,
}

// =============================================================================
// Commands
// =============================================================================

/// A cart mutation as dispatched by a front-end.
///
/// ## Wire Format
/// ```json
/// {"type": "addItem", "item": {"pizzaId": 1, "name": "Margherita", "quantity": 1, "unitPrice": 1200, "totalPrice": 1200}}
/// {"type": "incrementItemQuantity", "pizzaId": 1}
/// {"type": "clearCart"}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", rename_all = "camelCase")]
#[ts(export)]
pub enum CartCommand {
    AddItem {
        item: LineItem,
    },
    RemoveItem {
        #[serde(rename = "pizzaId")]
        pizza_id: PizzaId,
    },
    ClearCart,
    IncrementItemQuantity {
        #[serde(rename = "pizzaId")]
        pizza_id: PizzaId,
    },
    DecrementItemQuantity {
        #[serde(rename = "pizzaId")]
        pizza_id: PizzaId,
    },
}

impl CartCommand {
    /// Short name used in log fields.
    pub fn name(&self) -> &'static str {
        match self {
            CartCommand::AddItem { .. } => "add_item",
            CartCommand::RemoveItem { .. } => "remove_item",
            CartCommand::ClearCart => "clear_cart",
            CartCommand::IncrementItemQuantity { .. } => "increment_item_quantity",
            CartCommand::DecrementItemQuantity { .. } => "decrement_item_quantity",
        }
    }

    /// The pizza the command targets, if any.
    pub fn pizza_id(&self) -> Option<PizzaId> {
        match self {
            CartCommand::AddItem { item } => Some(item.pizza_id),
            CartCommand::RemoveItem { pizza_id }
            | CartCommand::IncrementItemQuantity { pizza_id }
            | CartCommand::DecrementItemQuantity { pizza_id } => Some(*pizza_id),
            CartCommand::ClearCart => None,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Every line satisfies `total_price == quantity × unit_price`
/// - Every line has `quantity >= 1`; reaching 0 removes the line
/// - Line order is the order of first add
/// - Under `Merge` and `Reject` no two lines share a `pizza_id`
///
/// ```rust
/// use pizzeria_core::{Cart, CartPhase, LineItem, Money, PizzaId};
///
/// let mut cart = Cart::new();
/// assert_eq!(cart.phase(), CartPhase::Empty);
///
/// cart.add_item(LineItem::new(PizzaId(1), "Margherita", Money::from_major(10))).unwrap();
/// cart.add_item(LineItem::new(PizzaId(2), "Marinara", Money::from_major(15))).unwrap();
///
/// assert_eq!(cart.total_item_count(), 2);
/// assert_eq!(cart.total_value(), Money::from_major(25));
/// assert_eq!(cart.phase(), CartPhase::NonEmpty);
/// ```
#[derive(Debug, Clone)]
pub struct Cart {
    items: Vec<LineItem>,
    limits: CartLimits,
    created_at: DateTime<Utc>,
}

impl Cart {
    /// Creates an empty cart with default limits.
    pub fn new() -> Self {
        Cart::with_limits(CartLimits::default())
    }

    /// Creates an empty cart with the given limits.
    pub fn with_limits(limits: CartLimits) -> Self {
        Cart {
            items: Vec::new(),
            limits,
            created_at: Utc::now(),
        }
    }

    /// Limits this cart enforces.
    pub fn limits(&self) -> &CartLimits {
        &self.limits
    }

    /// When the cart was created or last cleared.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Adds a line.
    ///
    /// ## Behavior
    /// - Payload must be fresh: quantity 1, total equal to a positive unit price
    /// - Pizza already present: see [`DuplicatePolicy`]
    /// - New line beyond `max_items`: [`CartError::CartTooLarge`]
    pub fn add_item(&mut self, item: LineItem) -> CartResult<()> {
        validate_line_item(&item)?;

        if let Some(index) = self.position(item.pizza_id) {
            match self.limits.duplicate_policy {
                DuplicatePolicy::Append => {}
                DuplicatePolicy::Merge => return self.increment_at(index).map(|_| ()),
                DuplicatePolicy::Reject => return Err(CartError::DuplicateItem(item.pizza_id)),
            }
        }

        if self.items.len() >= self.limits.max_items {
            return Err(CartError::CartTooLarge {
                max: self.limits.max_items,
            });
        }

        self.items.push(item);
        Ok(())
    }

    /// Adds one of a menu item, refusing sold-out pizzas.
    pub fn add_menu_item(&mut self, menu_item: &MenuItem) -> CartResult<()> {
        if !menu_item.can_add() {
            return Err(ValidationError::SoldOut {
                name: menu_item.name.clone(),
            }
            .into());
        }

        self.add_item(LineItem::from_menu_item(menu_item))
    }

    /// Removes every line for `pizza_id`.
    ///
    /// Returns whether anything was removed; an absent id is not an error.
    pub fn remove_item(&mut self, pizza_id: PizzaId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.pizza_id != pizza_id);
        self.items.len() != initial_len
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.items.clear();
        self.created_at = Utc::now();
    }

    /// Adds one to the line's quantity and returns the new quantity.
    pub fn increment_quantity(&mut self, pizza_id: PizzaId) -> CartResult<u32> {
        let index = self
            .position(pizza_id)
            .ok_or(CartError::ItemNotFound(pizza_id))?;
        self.increment_at(index)
    }

    /// Takes one off the line's quantity and returns what is left.
    ///
    /// At zero the pizza is removed in the same step (as [`Cart::remove_item`]
    /// would) and `0` is returned.
    pub fn decrement_quantity(&mut self, pizza_id: PizzaId) -> CartResult<u32> {
        let index = self
            .position(pizza_id)
            .ok_or(CartError::ItemNotFound(pizza_id))?;

        let remaining = self.items[index].quantity - 1;
        if remaining == 0 {
            self.remove_item(pizza_id);
        } else {
            self.items[index].set_quantity(remaining);
        }

        Ok(remaining)
    }

    /// Applies a dispatched command.
    pub fn apply(&mut self, command: CartCommand) -> CartResult<()> {
        match command {
            CartCommand::AddItem { item } => self.add_item(item),
            CartCommand::RemoveItem { pizza_id } => {
                self.remove_item(pizza_id);
                Ok(())
            }
            CartCommand::ClearCart => {
                self.clear();
                Ok(())
            }
            CartCommand::IncrementItemQuantity { pizza_id } => {
                self.increment_quantity(pizza_id).map(|_| ())
            }
            CartCommand::DecrementItemQuantity { pizza_id } => {
                self.decrement_quantity(pizza_id).map(|_| ())
            }
        }
    }

    fn increment_at(&mut self, index: usize) -> CartResult<u32> {
        let line = &self.items[index];
        let max = self.limits.max_quantity;
        let requested = line.quantity.saturating_add(1);

        if requested > max || line.unit_price.checked_multiply_quantity(requested).is_none() {
            return Err(CartError::QuantityTooLarge { requested, max });
        }

        self.items[index].set_quantity(requested);
        Ok(requested)
    }

    fn position(&self, pizza_id: PizzaId) -> Option<usize> {
        self.items.iter().position(|i| i.pizza_id == pizza_id)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Sum of quantities over all lines.
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of line totals.
    pub fn total_value(&self) -> Money {
        self.items.iter().map(|i| i.total_price).sum()
    }

    /// Quantity of the pizza in the cart, `0` when absent.
    pub fn quantity_of(&self, pizza_id: PizzaId) -> u32 {
        self.items
            .iter()
            .find(|i| i.pizza_id == pizza_id)
            .map_or(0, |i| i.quantity)
    }

    /// The lines in display order.
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the pizza has a line in the cart.
    pub fn contains(&self, pizza_id: PizzaId) -> bool {
        self.position(pizza_id).is_some()
    }

    /// Number of lines (not pizzas).
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn phase(&self) -> CartPhase {
        if self.is_empty() {
            CartPhase::Empty
        } else {
            CartPhase::NonEmpty
        }
    }

    /// Summary of the derived totals.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }
}

impl Default for Cart {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Totals
// =============================================================================

/// Cart totals summary for the cart view and order overview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u64,
    pub total_value: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_quantity: cart.total_item_count(),
            total_value: cart.total_value(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
