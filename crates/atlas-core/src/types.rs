//! # Domain Types
//!
//! Core domain types used throughout the storefront cart.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   add_item    ┌──────────────────┐               │
//! │  │ ProductSelection │ ────────────► │     LineItem     │               │
//! │  │  ──────────────  │  + quantity   │  ──────────────  │               │
//! │  │  id              │               │  id, variant     │ ◄── line key  │
//! │  │  variant?        │               │  name, price     │               │
//! │  │  name, price     │               │  image           │               │
//! │  │  image           │               │  quantity ≥ 1    │               │
//! │  └──────────────────┘               └──────────────────┘               │
//! │                                                                         │
//! │  ┌──────────────────┐  place_order  ┌──────────────────┐               │
//! │  │    OrderForm     │ ────────────► │ OrderConfirmation│               │
//! │  └──────────────────┘               └──────────────────┘               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! A line item freezes the name, price and image it was first added with.
//! Later additions of the same line only bump the quantity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::cart::CartTotals;
use crate::money::Money;

// =============================================================================
// Product Selection
// =============================================================================

/// A product as chosen on a product page, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSelection {
    /// Product identifier, e.g. `"super-satin"`.
    pub id: String,

    /// Set size or other sub-selection, e.g. `"2-person"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub variant: Option<String>,

    /// Display label.
    pub name: String,

    /// Unit price in whole UZS.
    #[ts(type = "number")]
    pub price: i64,

    /// Opaque reference to a display asset.
    pub image: String,
}

impl ProductSelection {
    /// Creates a selection without a variant.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        image: impl Into<String>,
    ) -> Self {
        ProductSelection {
            id: id.into(),
            variant: None,
            name: name.into(),
            price,
            image: image.into(),
        }
    }

    /// Sets the variant.
    pub fn with_variant(mut self, variant: impl Into<String>) -> Self {
        self.variant = Some(variant.into());
        self
    }

    /// Turns the selection into a line item with the given quantity.
    pub fn into_line(self, quantity: i64) -> LineItem {
        LineItem {
            id: self.id,
            variant: self.variant,
            name: self.name,
            price: self.price,
            image: self.image,
            quantity,
        }
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One distinct purchasable selection in the cart.
///
/// Two line items are the same line iff `id` and `variant` are equal;
/// `None` never matches `Some(_)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub variant: Option<String>,

    /// Name at time of adding (frozen).
    pub name: String,

    /// Unit price at time of adding (frozen).
    #[ts(type = "number")]
    pub price: i64,

    pub image: String,

    /// Always ≥ 1 while the item is in a cart.
    #[ts(type = "number")]
    pub quantity: i64,
}

impl LineItem {
    /// Whether this line has the key `(id, variant)`.
    #[inline]
    pub fn matches(&self, id: &str, variant: Option<&str>) -> bool {
        self.id == id && self.variant.as_deref() == variant
    }

    /// Whether two lines share a key.
    #[inline]
    pub fn same_line(&self, other: &LineItem) -> bool {
        self.matches(&other.id, other.variant.as_deref())
    }

    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_units(self.price)
    }

    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Checkout
// =============================================================================

/// The checkout form as submitted from the order modal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderForm {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub agree_to_terms: bool,
}

/// Result of a successful checkout.
///
/// Nothing is transmitted; the confirmation only lives in the session that
/// produced it.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderConfirmation {
    /// UUID v4 assigned at checkout.
    pub order_id: String,

    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,

    /// Lines as they were at checkout.
    pub items: Vec<LineItem>,

    pub totals: CartTotals,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn satin(variant: Option<&str>) -> LineItem {
        let selection = ProductSelection::new("super-satin", "Super Satin", 250_000, "/satin.jpg");
        match variant {
            Some(v) => selection.with_variant(v).into_line(1),
            None => selection.into_line(1),
        }
    }

    #[test]
    fn test_bindings_use_plain_numbers() {
        let line = LineItem::decl();
        assert!(line.contains("price: number"), "{line}");
        assert!(line.contains("quantity: number"), "{line}");
        assert!(!line.contains("bigint"), "{line}");

        assert!(!ProductSelection::decl().contains("bigint"));
    }

    #[test]
    fn test_line_key_matching() {
        let one = satin(Some("1-person"));
        assert!(one.matches("super-satin", Some("1-person")));
        assert!(!one.matches("super-satin", Some("2-person")));
        assert!(!one.matches("super-satin", None));
        assert!(!one.matches("pastel-1", Some("1-person")));
    }

    #[test]
    fn test_absent_variant_differs_from_empty_variant() {
        let plain = satin(None);
        let empty = satin(Some(""));
        assert!(!plain.same_line(&empty));
        assert!(plain.same_line(&satin(None)));
    }

    #[test]
    fn test_line_total() {
        let mut line = satin(None);
        line.quantity = 3;
        assert_eq!(line.line_total().units(), 750_000);
    }

    #[test]
    fn test_line_item_json_shape() {
        let json = serde_json::to_value(satin(None)).unwrap();
        assert!(json.get("variant").is_none());
        assert_eq!(json["price"], 250_000);

        let parsed: LineItem = serde_json::from_str(
            r#"{"id":"pastel-1","name":"Pastel","price":200000,"image":"/p.jpg","quantity":2}"#,
        )
        .unwrap();
        assert_eq!(parsed.variant, None);
        assert_eq!(parsed.quantity, 2);
    }

    #[test]
    fn test_order_form_uses_camel_case() {
        let form: OrderForm = serde_json::from_str(
            r#"{"fullName":"Dilnoza","phone":"+998 90 123 45 67","address":"Tashkent","agreeToTerms":true}"#,
        )
        .unwrap();
        assert_eq!(form.full_name, "Dilnoza");
        assert!(form.agree_to_terms);
    }
}
