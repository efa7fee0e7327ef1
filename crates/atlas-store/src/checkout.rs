//! # Checkout
//!
//! Turns the current cart into a local order confirmation.
//!
//! ## User Workflow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Cart page ──► "Checkout" ──► order form submitted                      │
//! │                                   │                                     │
//! │                                   ▼                                     │
//! │                        validate_order_form                              │
//! │                          │               │                              │
//! │                       invalid           valid                           │
//! │                          │               │                              │
//! │                          ▼               ▼                              │
//! │               error shown, cart   cart empty? ── yes ──► EmptyCart      │
//! │               untouched                 │                               │
//! │                                         no                              │
//! │                                         ▼                               │
//! │                        OrderConfirmation captured, store.clear()        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing is sent anywhere; payment and order transmission are out of scope.

use atlas_core::validation::validate_order_form;
use atlas_core::{CoreError, CoreResult, OrderConfirmation, OrderForm};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::store::CartStore;

/// Validates the form, captures the order, and empties the cart.
///
/// On any error the cart is left exactly as it was.
pub fn place_order(store: &mut CartStore, form: &OrderForm) -> CoreResult<OrderConfirmation> {
    validate_order_form(form)?;

    if store.is_empty() {
        return Err(CoreError::EmptyCart);
    }

    let confirmation = OrderConfirmation {
        order_id: Uuid::new_v4().to_string(),
        placed_at: Utc::now(),
        items: store.items().to_vec(),
        totals: store.totals(),
    };

    store.clear();

    info!(
        order_id = %confirmation.order_id,
        lines = confirmation.totals.line_count,
        total = %confirmation.totals.total_price,
        "Order placed"
    );

    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::CartPersistence;
    use crate::storage::MemoryStorage;
    use atlas_core::{ProductSelection, ValidationError};

    fn form() -> OrderForm {
        OrderForm {
            full_name: "Dilnoza Karimova".to_string(),
            phone: "+998 90 123 45 67".to_string(),
            address: "Chilonzor 7, Tashkent".to_string(),
            agree_to_terms: true,
        }
    }

    fn filled_store(storage: &MemoryStorage) -> CartStore {
        let mut store = CartStore::open(CartPersistence::with_default_key(storage.clone()));
        store.add_item(
            ProductSelection::new("super-satin", "Super Satin", 350_000, "/s.jpg")
                .with_variant("2-person"),
            1,
        );
        store.add_item(ProductSelection::new("pastel-1", "Pastel", 200_000, "/p.jpg"), 2);
        store
    }

    #[test]
    fn test_successful_checkout_clears_cart_and_storage() {
        let storage = MemoryStorage::new();
        let mut store = filled_store(&storage);

        let confirmation = place_order(&mut store, &form()).unwrap();

        assert!(Uuid::parse_str(&confirmation.order_id).is_ok());
        assert_eq!(confirmation.items.len(), 2);
        assert_eq!(confirmation.totals.total_items, 3);
        assert_eq!(confirmation.totals.total_price.units(), 750_000);

        assert!(store.is_empty());
        let reopened = CartStore::open(CartPersistence::with_default_key(storage));
        assert!(reopened.is_empty());
    }

    #[test]
    fn test_invalid_form_leaves_cart_untouched() {
        let storage = MemoryStorage::new();
        let mut store = filled_store(&storage);
        let before = store.snapshot();

        let mut incomplete = form();
        incomplete.address = "   ".to_string();

        let err = place_order(&mut store, &incomplete).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::Required { ref field }) if field == "address"
        ));
        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_terms_must_be_accepted() {
        let mut store = filled_store(&MemoryStorage::new());
        let mut unchecked = form();
        unchecked.agree_to_terms = false;

        assert!(place_order(&mut store, &unchecked).is_err());
        assert_eq!(store.line_count(), 2);
    }

    #[test]
    fn test_empty_cart_is_rejected() {
        let mut store = CartStore::in_memory();
        let err = place_order(&mut store, &form()).unwrap_err();
        assert!(matches!(err, CoreError::EmptyCart));
    }
}
