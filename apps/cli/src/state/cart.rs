//! # Cart State
//!
//! Shared handle to the cart store.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` so every command sees the same
//! cart and only one command mutates it at a time. Observers run while the
//! lock is held, before the mutating command returns.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  CLI Action               Command                 Store Change          │
//! │  ──────────               ───────                 ────────────          │
//! │                                                                         │
//! │  atlas add ──────────────► add_to_cart() ───────► add_item + save      │
//! │                                                                         │
//! │  atlas update ───────────► update_cart_item() ──► update_quantity      │
//! │                                                    + save               │
//! │                                                                         │
//! │  atlas remove ───────────► remove_from_cart() ──► remove_item + save   │
//! │                                                                         │
//! │  atlas clear ────────────► clear_cart() ────────► clear + save         │
//! │                                                                         │
//! │  atlas checkout ─────────► place_order() ───────► clear + save         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use atlas_store::CartStore;
use tracing::warn;

/// Thread-safe cart state.
#[derive(Debug, Clone)]
pub struct CartState {
    store: Arc<Mutex<CartStore>>,
}

impl CartState {
    /// Wraps an opened store.
    pub fn new(store: CartStore) -> Self {
        CartState {
            store: Arc::new(Mutex::new(store)),
        }
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let totals = cart_state.with_cart(|store| store.totals());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&CartStore) -> R,
    {
        let store = self.lock();
        f(&store)
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|store| store.add_item(selection, 1));
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut CartStore) -> R,
    {
        let mut store = self.lock();
        f(&mut store)
    }

    // A panic inside an observer poisons the lock. The cart itself is never
    // left half-mutated by a panic there, so keep serving it.
    fn lock(&self) -> MutexGuard<'_, CartStore> {
        self.store.lock().unwrap_or_else(|poisoned: PoisonError<_>| {
            warn!("Cart lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new(CartStore::in_memory())
    }
}
