//! # Cart
//!
//! The cart state machine: an ordered list of line items plus the
//! operations that are allowed to change it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  UI Action               Operation                State Change          │
//! │  ─────────               ─────────                ────────────          │
//! │                                                                         │
//! │  "Add to cart" ────────► add_item() ────────────► push / qty += n      │
//! │                                                                         │
//! │  + / − buttons ────────► update_quantity() ─────► qty = n, or remove   │
//! │                                                    when n ≤ 0          │
//! │                                                                         │
//! │  Trash icon ───────────► remove_item() ─────────► remove(i)            │
//! │                                                                         │
//! │  Order placed ─────────► clear() ───────────────► items.clear()        │
//! │                                                                         │
//! │  Header badge ─────────► total_items() ─────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Lines are unique by `(id, variant)`
//! - Every line has `quantity ≥ 1`; a line that would reach 0 is removed
//! - Insertion order is preserved; the first-added line stays first
//!
//! None of the operations can fail. A mutation that targets a line that is
//! not in the cart reports [`CartChange::Unchanged`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{LineItem, ProductSelection};
use crate::validation::{normalize_add_quantity, validate_line_item};

// =============================================================================
// Change Reporting
// =============================================================================

/// What a mutation did to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartChange {
    /// A new line was appended.
    Added,
    /// An existing line's quantity was increased.
    Incremented,
    /// An existing line's quantity was replaced.
    Updated,
    /// A line was removed.
    Removed,
    /// The cart was emptied.
    Cleared,
    /// Nothing changed (unknown line, or same quantity).
    Unchanged,
}

impl CartChange {
    /// Whether the cart contents differ from before the operation.
    ///
    /// `Cleared` always counts, even on an already empty cart.
    #[inline]
    pub fn is_change(&self) -> bool {
        !matches!(self, CartChange::Unchanged)
    }
}

// =============================================================================
// Restore Screening
// =============================================================================

/// Why a line was refused by [`Cart::from_lines`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RejectReason {
    /// The line breaks a line item invariant.
    Invalid(ValidationError),
    /// An earlier line already has the same `(id, variant)`.
    DuplicateKey,
}

/// A line refused during restore, with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedLine {
    pub index: usize,
    pub id: String,
    pub reason: RejectReason,
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { items: Vec::new() }
    }

    /// Builds a cart from previously stored lines.
    ///
    /// Lines that break an invariant, or repeat the key of an earlier line,
    /// are skipped individually and returned alongside the cart.
    pub fn from_lines<I>(lines: I) -> (Self, Vec<RejectedLine>)
    where
        I: IntoIterator<Item = LineItem>,
    {
        let mut cart = Cart::new();
        let mut rejected = Vec::new();

        for (index, line) in lines.into_iter().enumerate() {
            let reason = if let Err(e) = validate_line_item(&line) {
                Some(RejectReason::Invalid(e))
            } else if cart.items.iter().any(|existing| existing.same_line(&line)) {
                Some(RejectReason::DuplicateKey)
            } else {
                None
            };

            match reason {
                Some(reason) => rejected.push(RejectedLine {
                    index,
                    id: line.id,
                    reason,
                }),
                None => cart.items.push(line),
            }
        }

        (cart, rejected)
    }

    /// Adds a product to the cart or increases quantity if already present.
    ///
    /// ## Behavior
    /// - Line already in cart: quantity increases by `quantity`; the stored
    ///   name, price and image stay as first added
    /// - Line not in cart: appended with the selection's fields
    /// - `quantity ≤ 0` is treated as 1
    pub fn add_item(&mut self, selection: ProductSelection, quantity: i64) -> CartChange {
        let quantity = normalize_add_quantity(quantity);

        if let Some(item) = self.find_mut(&selection.id, selection.variant.as_deref()) {
            item.quantity = item.quantity.saturating_add(quantity);
            return CartChange::Incremented;
        }

        self.items.push(selection.into_line(quantity));
        CartChange::Added
    }

    /// Removes the line with the given key, if present.
    pub fn remove_item(&mut self, id: &str, variant: Option<&str>) -> CartChange {
        match self.items.iter().position(|i| i.matches(id, variant)) {
            Some(index) => {
                self.items.remove(index);
                CartChange::Removed
            }
            None => CartChange::Unchanged,
        }
    }

    /// Replaces the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity ≤ 0`: same as [`Cart::remove_item`]
    /// - Line not in cart: no-op
    pub fn update_quantity(&mut self, id: &str, variant: Option<&str>, quantity: i64) -> CartChange {
        if quantity <= 0 {
            return self.remove_item(id, variant);
        }

        match self.find_mut(id, variant) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                CartChange::Updated
            }
            _ => CartChange::Unchanged,
        }
    }

    /// Clears all items from the cart.
    pub fn clear(&mut self) -> CartChange {
        self.items.clear();
        CartChange::Cleared
    }

    /// Lines in insertion order.
    #[inline]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Looks up a line by key.
    pub fn find(&self, id: &str, variant: Option<&str>) -> Option<&LineItem> {
        self.items.iter().find(|i| i.matches(id, variant))
    }

    fn find_mut(&mut self, id: &str, variant: Option<&str>) -> Option<&mut LineItem> {
        self.items.iter_mut().find(|i| i.matches(id, variant))
    }

    /// Returns the number of distinct lines.
    #[inline]
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity of all lines (the header badge number).
    pub fn total_items(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.quantity))
    }

    /// Returns Σ price × quantity.
    pub fn total_price(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Checks if the cart is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Totals computed from the current lines.
    pub fn totals(&self) -> CartTotals {
        CartTotals::from(self)
    }

    /// Owned copy of the read model.
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot::from(self)
    }
}

// =============================================================================
// Read Model
// =============================================================================

/// Cart totals summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartTotals {
    pub line_count: usize,
    #[ts(type = "number")]
    pub total_items: i64,
    pub total_price: Money,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

/// Items plus totals, as handed to observers and callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items.clone(),
            totals: CartTotals::from(cart),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
