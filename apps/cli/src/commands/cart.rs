//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│  Order   │────►│  Placed  │       │
//! │  │  Cart    │     │          │     │  Form    │     │  Order   │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │                        │                                 │              │
//! │                   add_to_cart                      place_order         │
//! │                   update_cart_item                 (checkout.rs)       │
//! │                   remove_from_cart                       │              │
//! │                        │                                 │              │
//! │                        ▼                                 ▼              │
//! │                   clear_cart ─────────────────────► (back to empty)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Unknown lines are not an error: updating or removing them returns the
//! cart unchanged.

use atlas_core::validation::validate_selection;
use atlas_core::{CartSnapshot, CartTotals, LineItem, ProductSelection};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartState;

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl From<CartSnapshot> for CartResponse {
    fn from(snapshot: CartSnapshot) -> Self {
        CartResponse {
            items: snapshot.items,
            totals: snapshot.totals,
        }
    }
}

fn respond(cart: &CartState) -> CartResponse {
    cart.with_cart(|store| CartResponse::from(store.snapshot()))
}

/// Gets the current cart contents.
///
/// ## Returns
/// Current cart with items and calculated totals
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    respond(cart)
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If the `(id, variant)` line exists: quantity increases, name/price/image
///   keep the values from the first add
/// - Otherwise: appended as a new line
/// - Missing or non-positive quantity adds one
///
/// ## Errors
/// Blank id or negative price is rejected before the cart is touched.
pub fn add_to_cart(
    cart: &CartState,
    selection: ProductSelection,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(
        id = %selection.id,
        variant = ?selection.variant,
        quantity,
        "add_to_cart command"
    );

    validate_selection(&selection)?;

    Ok(cart.with_cart_mut(|store| {
        store.add_item(selection, quantity);
        CartResponse::from(store.snapshot())
    }))
}

/// Sets the quantity of a line. Zero or less removes it.
pub fn update_cart_item(
    cart: &CartState,
    id: &str,
    variant: Option<&str>,
    quantity: i64,
) -> CartResponse {
    debug!(id, ?variant, quantity, "update_cart_item command");

    cart.with_cart_mut(|store| {
        store.update_quantity(id, variant, quantity);
        CartResponse::from(store.snapshot())
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, id: &str, variant: Option<&str>) -> CartResponse {
    debug!(id, ?variant, "remove_from_cart command");

    cart.with_cart_mut(|store| {
        store.remove_item(id, variant);
        CartResponse::from(store.snapshot())
    })
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|store| {
        store.clear();
        CartResponse::from(store.snapshot())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn satin(variant: &str, price: i64) -> ProductSelection {
        ProductSelection::new("super-satin", "Super Satin", price, "/img/super-satin.jpg")
            .with_variant(variant)
    }

    #[test]
    fn test_add_and_get() {
        let cart = CartState::default();
        add_to_cart(&cart, satin("1-person", 250_000), None).unwrap();
        let response = add_to_cart(&cart, satin("2-person", 350_000), Some(1)).unwrap();

        assert_eq!(response.items.len(), 2);
        assert_eq!(response.totals.total_items, 2);
        assert_eq!(response.totals.total_price.units(), 600_000);
        assert_eq!(get_cart(&cart), response);
    }

    #[test]
    fn test_add_rejects_negative_price() {
        let cart = CartState::default();
        let err = add_to_cart(&cart, satin("1-person", -1), Some(1)).unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(get_cart(&cart).items.is_empty());
    }

    #[test]
    fn test_update_to_zero_removes_only_that_variant() {
        let cart = CartState::default();
        add_to_cart(&cart, satin("1-person", 250_000), Some(1)).unwrap();
        add_to_cart(&cart, satin("2-person", 350_000), Some(1)).unwrap();

        let response = update_cart_item(&cart, "super-satin", Some("1-person"), 0);

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].variant.as_deref(), Some("2-person"));
        assert_eq!(response.totals.total_items, 1);
    }

    #[test]
    fn test_remove_unknown_line_is_noop() {
        let cart = CartState::default();
        add_to_cart(&cart, satin("1-person", 250_000), Some(3)).unwrap();

        let before = get_cart(&cart);
        let after = remove_from_cart(&cart, "super-satin", Some("king"));
        assert_eq!(before, after);
    }

    #[test]
    fn test_clear() {
        let cart = CartState::default();
        add_to_cart(&cart, satin("1-person", 250_000), Some(3)).unwrap();

        let response = clear_cart(&cart);
        assert!(response.items.is_empty());
        assert_eq!(response.totals.total_items, 0);
        assert!(response.totals.total_price.is_zero());
    }

    #[test]
    fn test_response_is_camel_case() {
        let cart = CartState::default();
        add_to_cart(&cart, satin("1-person", 250_000), Some(2)).unwrap();

        let json = serde_json::to_value(get_cart(&cart)).unwrap();
        assert_eq!(json["totals"]["totalItems"], 2);
        assert_eq!(json["totals"]["totalPrice"], 500_000);
        assert_eq!(json["items"][0]["variant"], "1-person");
    }
}
