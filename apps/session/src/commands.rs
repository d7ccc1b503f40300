//! # Cart Commands
//!
//! Handlers the front-end calls to change or read the session's cart.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐  add_item   ┌──────────┐   order placed   ┌──────────┐   │
//! │  │  Empty   │────────────►│ NonEmpty │─────────────────►│  Empty   │   │
//! │  │  Cart    │             │          │   clear_cart     │  Cart    │   │
//! │  └──────────┘             └──────────┘                  └──────────┘   │
//! │                              │    ▲                                     │
//! │              increment / decrement / remove_item                        │
//! │                              └────┘                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every mutating handler returns the whole [`CartResponse`] so the view can
//! re-render from one value.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pizzeria_core::{
    Cart, CartCommand, CartError, CartPhase, CartTotals, LineItem, MenuItem, PizzaId,
};

use crate::error::ApiError;
use crate::state::CartState;

/// Cart response including items, totals and phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
    pub phase: CartPhase,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
            phase: cart.phase(),
        }
    }
}

/// Gets the current cart contents.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  YOUR CART                                                              │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  2× Margherita                    $24.00   [-] 2 [+]  Delete  │    │
/// │  │  1× Diavola                       $14.50   [-] 1 [+]  Delete  │    │
/// │  ├────────────────────────────────────────────────────────────────┤    │
/// │  │  3 pizzas                                          $38.50     │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// │                                                                         │
/// │  get_cart() → { items: [...], totals: {...}, phase: "non_empty" }       │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!(session_id = %cart.session_id(), "get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Quantity of a pizza in the cart, `0` when absent.
///
/// The menu uses this to choose between the "Add to cart" button and the
/// quantity stepper.
pub fn get_current_quantity(cart: &CartState, pizza_id: PizzaId) -> u32 {
    cart.with_cart(|c| c.quantity_of(pizza_id))
}

/// Adds a line to the cart.
///
/// ## Behavior
/// - Payload must be fresh (quantity 1, total == positive unit price)
/// - A pizza already in the cart follows the configured duplicate policy
pub fn add_item(cart: &CartState, item: LineItem) -> Result<CartResponse, ApiError> {
    debug!(
        session_id = %cart.session_id(),
        pizza_id = %item.pizza_id,
        unit_price = %item.unit_price,
        "add_item command"
    );

    mutate(cart, "add_item", |c| c.add_item(item))
}

/// Adds one of a menu item, refusing sold-out pizzas.
pub fn add_menu_item(cart: &CartState, menu_item: &MenuItem) -> Result<CartResponse, ApiError> {
    debug!(
        session_id = %cart.session_id(),
        pizza_id = %menu_item.id,
        sold_out = menu_item.sold_out,
        "add_menu_item command"
    );

    mutate(cart, "add_menu_item", |c| c.add_menu_item(menu_item))
}

/// Removes a pizza from the cart. Absent pizzas are a no-op.
pub fn remove_item(cart: &CartState, pizza_id: PizzaId) -> CartResponse {
    debug!(session_id = %cart.session_id(), pizza_id = %pizza_id, "remove_item command");

    cart.with_cart_mut(|c| {
        if !c.remove_item(pizza_id) {
            debug!(pizza_id = %pizza_id, "remove_item: pizza was not in cart");
        }
        CartResponse::from(&*c)
    })
}

/// Clears all items from the cart.
///
/// ## When Used
/// - Customer presses "Clear cart"
/// - After the order has been placed
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!(session_id = %cart.session_id(), "clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
}

/// Stepper "+".
pub fn increment_item_quantity(
    cart: &CartState,
    pizza_id: PizzaId,
) -> Result<CartResponse, ApiError> {
    debug!(session_id = %cart.session_id(), pizza_id = %pizza_id, "increment_item_quantity command");

    mutate(cart, "increment_item_quantity", |c| {
        c.increment_quantity(pizza_id).map(|_| ())
    })
}

/// Stepper "-". At quantity 1 the pizza leaves the cart.
pub fn decrement_item_quantity(
    cart: &CartState,
    pizza_id: PizzaId,
) -> Result<CartResponse, ApiError> {
    debug!(session_id = %cart.session_id(), pizza_id = %pizza_id, "decrement_item_quantity command");

    mutate(cart, "decrement_item_quantity", |c| {
        let remaining = c.decrement_quantity(pizza_id)?;
        if remaining == 0 {
            debug!(pizza_id = %pizza_id, "quantity reached zero, pizza removed");
        }
        Ok(())
    })
}

/// Applies a command dispatched as JSON by the front-end.
pub fn dispatch(cart: &CartState, command: CartCommand) -> Result<CartResponse, ApiError> {
    match command {
        CartCommand::AddItem { item } => add_item(cart, item),
        CartCommand::RemoveItem { pizza_id } => Ok(remove_item(cart, pizza_id)),
        CartCommand::ClearCart => Ok(clear_cart(cart)),
        CartCommand::IncrementItemQuantity { pizza_id } => {
            increment_item_quantity(cart, pizza_id)
        }
        CartCommand::DecrementItemQuantity { pizza_id } => {
            decrement_item_quantity(cart, pizza_id)
        }
    }
}

/// Runs a fallible cart mutation under the lock and renders the result.
fn mutate<F>(cart: &CartState, command: &'static str, f: F) -> Result<CartResponse, ApiError>
where
    F: FnOnce(&mut Cart) -> Result<(), CartError>,
{
    let result: Result<CartResponse, CartError> = cart.with_cart_mut(|c| {
        f(c)?;
        Ok(CartResponse::from(&*c))
    });

    result.map_err(|err| {
        warn!(session_id = %cart.session_id(), command, error = %err, "cart command rejected");
        ApiError::from(err)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use pizzeria_core::{CartLimits, DuplicatePolicy, Money};

    fn margherita() -> LineItem {
        LineItem::new(PizzaId(1), "Margherita", Money::from_major(10))
    }

    fn marinara() -> LineItem {
        LineItem::new(PizzaId(2), "Marinara", Money::from_major(15))
    }

    #[test]
    fn test_add_increment_decrement_flow() {
        let cart = CartState::default();

        let response = add_item(&cart, margherita()).unwrap();
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.phase, CartPhase::NonEmpty);

        let response = increment_item_quantity(&cart, PizzaId(1)).unwrap();
        assert_eq!(response.items[0].quantity, 2);
        assert_eq!(response.items[0].total_price, Money::from_major(20));

        decrement_item_quantity(&cart, PizzaId(1)).unwrap();
        let response = decrement_item_quantity(&cart, PizzaId(1)).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.phase, CartPhase::Empty);
        assert_eq!(get_current_quantity(&cart, PizzaId(1)), 0);
    }

    #[test]
    fn test_totals_in_response() {
        let cart = CartState::default();
        add_item(&cart, margherita()).unwrap();
        let response = add_item(&cart, marinara()).unwrap();

        assert_eq!(response.totals.total_quantity, 2);
        assert_eq!(response.totals.total_value, Money::from_major(25));
        assert_eq!(response, get_cart(&cart));
    }

    #[test]
    fn test_increment_missing_returns_not_found() {
        let cart = CartState::default();
        add_item(&cart, margherita()).unwrap();
        let before = get_cart(&cart);

        let err = increment_item_quantity(&cart, PizzaId(99)).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(get_cart(&cart), before);
    }

    #[test]
    fn test_invalid_payload_returns_validation_error() {
        let cart = CartState::default();
        let mut item = margherita();
        item.total_price = Money::from_major(30);

        let err = add_item(&cart, item).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(get_cart(&cart).items.is_empty());
    }

    #[test]
    fn test_remove_and_clear_are_total() {
        let cart = CartState::default();
        assert!(remove_item(&cart, PizzaId(4)).items.is_empty());
        assert_eq!(clear_cart(&cart).phase, CartPhase::Empty);

        add_item(&cart, margherita()).unwrap();
        add_item(&cart, marinara()).unwrap();
        let response = remove_item(&cart, PizzaId(1));
        assert_eq!(response.items.len(), 1);
        assert_eq!(remove_item(&cart, PizzaId(1)), response);

        let response = clear_cart(&cart);
        assert_eq!(response.totals.total_quantity, 0);
        assert_eq!(response.totals.total_value, Money::zero());
    }

    #[test]
    fn test_add_menu_item_sold_out() {
        let cart = CartState::default();
        let menu_item = MenuItem {
            id: PizzaId(5),
            name: "Calzone".to_string(),
            unit_price: Money::from_major(16),
            ingredients: vec!["ham".to_string()],
            sold_out: true,
            image_url: None,
        };

        let err = add_menu_item(&cart, &menu_item).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Calzone is sold out");
    }

    #[test]
    fn test_reject_policy_surfaces_cart_error() {
        let cart = CartState::new(CartLimits {
            duplicate_policy: DuplicatePolicy::Reject,
            ..CartLimits::default()
        });
        add_item(&cart, margherita()).unwrap();

        let err = add_item(&cart, margherita()).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(get_current_quantity(&cart, PizzaId(1)), 1);
    }

    #[test]
    fn test_dispatch_json_commands() {
        let cart = CartState::default();
        let commands: Vec<CartCommand> = serde_json::from_str(
            r#"[
                {"type": "addItem", "item": {"pizzaId": 1, "name": "Margherita", "quantity": 1, "unitPrice": 1000, "totalPrice": 1000}},
                {"type": "incrementItemQuantity", "pizzaId": 1},
                {"type": "removeItem", "pizzaId": 3}
            ]"#,
        )
        .unwrap();

        let mut last = None;
        for command in commands {
            last = Some(dispatch(&cart, command).unwrap());
        }

        let response = last.unwrap();
        assert_eq!(response.totals.total_quantity, 2);
        assert_eq!(response.totals.total_value, Money::from_major(20));

        let err = dispatch(
            &cart,
            CartCommand::DecrementItemQuantity {
                pizza_id: PizzaId(8),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_response_json_shape() {
        let cart = CartState::default();
        let response = add_item(&cart, margherita()).unwrap();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["phase"], "non_empty");
        assert_eq!(json["totals"]["totalValue"], 1000);
        assert_eq!(json["items"][0]["pizzaId"], 1);
    }
}
