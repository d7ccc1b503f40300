//! # Domain Types
//!
//! Catalog and cart line types.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   from_menu_item   ┌─────────────────┐             │
//! │  │    MenuItem     │ ─────────────────► │    LineItem     │             │
//! │  │  ─────────────  │                    │  ─────────────  │             │
//! │  │  id (PizzaId)   │                    │  pizza_id       │             │
//! │  │  name           │                    │  name           │             │
//! │  │  unit_price     │                    │  quantity (≥1)  │             │
//! │  │  ingredients    │                    │  unit_price     │             │
//! │  │  sold_out       │                    │  total_price    │             │
//! │  └─────────────────┘                    └─────────────────┘             │
//! │                                                                         │
//! │  total_price == quantity × unit_price for every line held by a Cart    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Pizza Id
// =============================================================================

/// Catalog identifier of a pizza; the key of a line within the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct PizzaId(pub u32);

impl fmt::Display for PizzaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for PizzaId {
    fn from(id: u32) -> Self {
        PizzaId(id)
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A pizza as listed on the menu.
///
/// Supplied by the catalog; the cart only ever sees the [`LineItem`] built
/// from it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    pub id: PizzaId,
    pub name: String,
    pub unit_price: Money,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub sold_out: bool,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl MenuItem {
    /// Whether the menu should offer an "Add to cart" button at all.
    #[inline]
    pub fn can_add(&self) -> bool {
        !self.sold_out
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One pizza's line within the cart.
///
/// ## Design Notes
/// - `unit_price` is frozen when the line is added; later menu price
///   changes do not reach lines already in the cart.
/// - Fields are public so a front-end payload can be deserialized as-is.
///   A `Cart` validates the payload on Add and from then on is the only
///   writer of `quantity` and `total_price`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct LineItem {
    pub pizza_id: PizzaId,
    pub name: String,
    pub quantity: u32,
    pub unit_price: Money,
    pub total_price: Money,
}

impl LineItem {
    /// Builds a well-formed Add payload: quantity 1, total equal to unit price.
    pub fn new(pizza_id: PizzaId, name: impl Into<String>, unit_price: Money) -> Self {
        LineItem {
            pizza_id,
            name: name.into(),
            quantity: 1,
            unit_price,
            total_price: unit_price,
        }
    }

    /// Builds the Add payload for a menu item.
    pub fn from_menu_item(item: &MenuItem) -> Self {
        LineItem::new(item.id, item.name.clone(), item.unit_price)
    }

    /// `quantity × unit_price`.
    #[inline]
    pub fn expected_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }

    /// True when `total_price` agrees with `quantity × unit_price`.
    #[inline]
    pub fn is_consistent(&self) -> bool {
        self.total_price == self.expected_total()
    }

    /// Sets the quantity and recomputes the total in one step.
    pub(crate) fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = self.expected_total();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
