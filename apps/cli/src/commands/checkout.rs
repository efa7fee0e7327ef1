//! # Checkout Commands
//!
//! Submits the order form against the current cart.

use atlas_core::{OrderConfirmation, OrderForm};
use tracing::debug;

use crate::error::ApiError;
use crate::state::CartState;

/// Places an order for everything in the cart.
///
/// ## Behavior
/// - Invalid form: `VALIDATION_ERROR`, cart untouched
/// - Empty cart: `CART_ERROR`, cart untouched
/// - Otherwise: returns the confirmation and the cart is emptied
pub fn place_order(cart: &CartState, form: OrderForm) -> Result<OrderConfirmation, ApiError> {
    debug!(agree_to_terms = form.agree_to_terms, "place_order command");

    let confirmation = cart.with_cart_mut(|store| atlas_store::place_order(store, &form))?;
    Ok(confirmation)
}
