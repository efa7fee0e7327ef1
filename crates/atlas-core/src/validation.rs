//! # Validation Module
//!
//! Rules applied at the edges of the cart.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  add_item(quantity)        ──► normalize_add_quantity (clamp, no error)│
//! │                                                                         │
//! │  Restore from storage      ──► validate_line_item (bad entry dropped)  │
//! │                                                                         │
//! │  Checkout form submitted   ──► validate_order_form (error shown,       │
//! │                                 cart untouched)                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::types::{LineItem, OrderForm, ProductSelection};
use crate::DEFAULT_ADD_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Quantities
// =============================================================================

/// Quantity actually applied by `add_item`.
///
/// Non-positive requests are clamped to [`DEFAULT_ADD_QUANTITY`] rather than
/// rejected; cart mutations have no error path.
///
/// ## Example
/// ```rust
/// use atlas_core::validation::normalize_add_quantity;
///
/// assert_eq!(normalize_add_quantity(3), 3);
/// assert_eq!(normalize_add_quantity(0), 1);
/// assert_eq!(normalize_add_quantity(-7), 1);
/// ```
#[inline]
pub fn normalize_add_quantity(quantity: i64) -> i64 {
    if quantity <= 0 {
        DEFAULT_ADD_QUANTITY
    } else {
        quantity
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// Checks the invariants every line item in a cart must hold.
///
/// ## Rules
/// - `id` must not be blank
/// - `price` must be non-negative (zero is a free item)
/// - `quantity` must be at least 1
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if item.price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if item.quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Checks a product selection before it is offered to the cart.
///
/// The cart itself accepts any selection; callers that take selections from
/// outside (command arguments, requests) screen them here first so that no
/// line is created that a later restore would have to drop.
pub fn validate_selection(selection: &ProductSelection) -> ValidationResult<()> {
    if selection.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if selection.price < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Checkout Form
// =============================================================================

/// Validates the checkout form.
///
/// Every text field is required (blank after trimming counts as missing)
/// and the terms checkbox must be ticked. Fields are checked in form order
/// so the first missing one is reported.
///
/// ## Example
/// ```rust
/// use atlas_core::types::OrderForm;
/// use atlas_core::validation::validate_order_form;
///
/// let mut form = OrderForm {
///     full_name: "Dilnoza".into(),
///     phone: "+998 90 123 45 67".into(),
///     address: "Tashkent".into(),
///     agree_to_terms: false,
/// };
/// assert!(validate_order_form(&form).is_err());
///
/// form.agree_to_terms = true;
/// assert!(validate_order_form(&form).is_ok());
/// ```
pub fn validate_order_form(form: &OrderForm) -> ValidationResult<()> {
    let required = [
        ("fullName", &form.full_name),
        ("phone", &form.phone),
        ("address", &form.address),
    ];

    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(ValidationError::Required {
                field: field.to_string(),
            });
        }
    }

    if !form.agree_to_terms {
        return Err(ValidationError::MustAccept {
            field: "agreeToTerms".to_string(),
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

    fn line(quantity: i64, price: i64) -> LineItem {
        ProductSelection::new("pastel-1", "Pastel", price, "/p.jpg").into_line(quantity)
    }

    fn complete_form() -> OrderForm {
        OrderForm {
            full_name: "Dilnoza Karimova".to_string(),
            phone: "+998 90 123 45 67".to_string(),
            address: "Chilonzor 7, Tashkent".to_string(),
            agree_to_terms: true,
        }
    }

    #[test]
    fn test_normalize_add_quantity() {
        assert_eq!(normalize_add_quantity(1), 1);
        assert_eq!(normalize_add_quantity(42), 42);
        assert_eq!(normalize_add_quantity(0), 1);
        assert_eq!(normalize_add_quantity(i64::MIN), 1);
    }

    #[test]
    fn test_validate_line_item() {
        assert!(validate_line_item(&line(1, 200_000)).is_ok());
        assert!(validate_line_item(&line(5, 0)).is_ok());

        assert_eq!(
            validate_line_item(&line(0, 200_000)),
            Err(ValidationError::MustBePositive {
                field: "quantity".to_string()
            })
        );
        assert!(validate_line_item(&line(-2, 200_000)).is_err());
        assert!(validate_line_item(&line(1, -1)).is_err());

        let mut blank_id = line(1, 100);
        blank_id.id = "   ".to_string();
        assert!(validate_line_item(&blank_id).is_err());
    }

    #[test]
    fn test_validate_selection() {
        let selection = ProductSelection::new("pastel-1", "Pastel", 200_000, "/p.jpg");
        assert!(validate_selection(&selection).is_ok());

        let mut free = selection.clone();
        free.price = 0;
        assert!(validate_selection(&free).is_ok());

        let mut negative = selection.clone();
        negative.price = -1;
        assert_eq!(validate_selection(&negative).unwrap_err().field(), "price");

        let mut blank = selection;
        blank.id = String::new();
        assert_eq!(validate_selection(&blank).unwrap_err().field(), "id");
    }

    #[test]
    fn test_validate_order_form_complete() {
        assert!(validate_order_form(&complete_form()).is_ok());
    }

    #[test]
    fn test_validate_order_form_reports_first_missing_field() {
        let mut form = complete_form();
        form.phone = "  ".to_string();
        form.address = String::new();

        let err = validate_order_form(&form).unwrap_err();
        assert_eq!(err.field(), "phone");
    }

    #[test]
    fn test_validate_order_form_requires_terms() {
        let mut form = complete_form();
        form.agree_to_terms = false;

        assert_eq!(
            validate_order_form(&form),
            Err(ValidationError::MustAccept {
                field: "agreeToTerms".to_string()
            })
        );
    }
}
