//! # Cart Store
//!
//! The single source of truth for cart contents: the pure [`Cart`] plus
//! write-through persistence and change notification.
//!
//! ## Mutation Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  store.add_item(selection, 2)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Cart::add_item ───────────► in-memory state updated                 │
//! │       │                                                                 │
//! │       ▼ (only if something changed; clear always counts)               │
//! │  2. CartPersistence::save ────► failure logged, never returned         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  3. observers(&snapshot) ─────► header badge, cart page, ...           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  return CartChange                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every step runs before the call returns, so an observer never sees a
//! state that storage does not also hold (unless the write failed).

use atlas_core::{Cart, CartChange, CartSnapshot, CartTotals, LineItem, Money, ProductSelection};
use tracing::{debug, info, warn};

use crate::persistence::CartPersistence;
use crate::storage::MemoryStorage;

/// Callback invoked with the new state after each change.
pub type Observer = Box<dyn Fn(&CartSnapshot) + Send>;

/// Handle returned by [`CartStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// The shopping cart as shared by the whole application.
pub struct CartStore {
    cart: Cart,
    persistence: CartPersistence,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: u64,
    persisted: bool,
}

impl CartStore {
    /// Restores the saved cart, or starts empty if there is none.
    pub fn open(persistence: CartPersistence) -> Self {
        let cart = match persistence.load() {
            Some(restored) => {
                info!(
                    key = persistence.key(),
                    lines = restored.cart.line_count(),
                    dropped = restored.dropped,
                    "Restored saved cart"
                );
                restored.cart
            }
            None => Cart::new(),
        };

        CartStore {
            cart,
            persistence,
            observers: Vec::new(),
            next_subscription: 0,
            persisted: true,
        }
    }

    /// A store backed by fresh in-process storage.
    pub fn in_memory() -> Self {
        Self::open(CartPersistence::with_default_key(MemoryStorage::new()))
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Lines in insertion order.
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    pub fn total_items(&self) -> i64 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> Money {
        self.cart.total_price()
    }

    pub fn line_count(&self) -> usize {
        self.cart.line_count()
    }

    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    pub fn find(&self, id: &str, variant: Option<&str>) -> Option<&LineItem> {
        self.cart.find(id, variant)
    }

    pub fn totals(&self) -> CartTotals {
        self.cart.totals()
    }

    pub fn snapshot(&self) -> CartSnapshot {
        self.cart.snapshot()
    }

    /// Whether the last write to storage succeeded.
    pub fn is_persisted(&self) -> bool {
        self.persisted
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds `quantity` of a product (non-positive counts as 1).
    pub fn add_item(&mut self, selection: ProductSelection, quantity: i64) -> CartChange {
        debug!(id = %selection.id, variant = ?selection.variant, quantity, "add_item");
        let change = self.cart.add_item(selection, quantity);
        self.commit(change)
    }

    /// Removes a line; no-op if it is not in the cart.
    pub fn remove_item(&mut self, id: &str, variant: Option<&str>) -> CartChange {
        debug!(id, ?variant, "remove_item");
        let change = self.cart.remove_item(id, variant);
        self.commit(change)
    }

    /// Sets a line's quantity; `quantity ≤ 0` removes the line.
    pub fn update_quantity(&mut self, id: &str, variant: Option<&str>, quantity: i64) -> CartChange {
        debug!(id, ?variant, quantity, "update_quantity");
        let change = self.cart.update_quantity(id, variant, quantity);
        self.commit(change)
    }

    /// Empties the cart.
    pub fn clear(&mut self) -> CartChange {
        debug!(lines = self.cart.line_count(), "clear");
        let change = self.cart.clear();
        self.commit(change)
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Registers a callback run after every change.
    pub fn subscribe<F>(&mut self, observer: F) -> SubscriptionId
    where
        F: Fn(&CartSnapshot) + Send + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Drops a callback. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sub, _)| *sub != id);
        self.observers.len() != before
    }

    fn commit(&mut self, change: CartChange) -> CartChange {
        if !change.is_change() {
            return change;
        }

        match self.persistence.save(self.cart.items()) {
            Ok(()) => self.persisted = true,
            Err(e) => {
                warn!(key = self.persistence.key(), error = %e, "Cart not saved; keeping in-memory state");
                self.persisted = false;
            }
        }

        if !self.observers.is_empty() {
            let snapshot = self.cart.snapshot();
            for (_, observer) in &self.observers {
                observer(&snapshot);
            }
        }

        change
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("persistence", &self.persistence)
            .field("observers", &self.observers.len())
            .field("persisted", &self.persisted)
            .finish()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
