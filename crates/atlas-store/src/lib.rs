//! # atlas-store: Cart Persistence and the Shared Cart Store
//!
//! This crate keeps the storefront cart alive across reloads and gives the
//! rest of the application one place to read and change it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Data Flow                                   │
//! │                                                                         │
//! │  View / command (add to cart, + / −, checkout)                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   atlas-store (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │CartPersistence│    │   Storage    │  │   │
//! │  │   │  (store.rs)   │───►│ (record.rs)   │───►│ (storage.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ atlas_core::  │    │ JSON record,  │    │ Memory       │  │   │
//! │  │   │ Cart +        │    │ per-entry     │    │ File         │  │   │
//! │  │   │ observers     │    │ recovery      │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │           ▲                                                     │   │
//! │  │   checkout.rs (place_order)                                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use atlas_store::{CartPersistence, CartStore, MemoryStorage};
//! use atlas_core::ProductSelection;
//!
//! let storage = MemoryStorage::new();
//! let mut store = CartStore::open(CartPersistence::with_default_key(storage.clone()));
//!
//! store.subscribe(|snapshot| println!("badge: {}", snapshot.totals.total_items));
//! store.add_item(ProductSelection::new("pastel-1", "Pastel", 200_000, "/p.jpg"), 1);
//!
//! // A second store over the same storage sees the saved cart.
//! let reopened = CartStore::open(CartPersistence::with_default_key(storage));
//! assert_eq!(reopened.total_items(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod persistence;
pub mod record;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use checkout::place_order;
pub use error::{StoreError, StoreResult};
pub use persistence::{CartPersistence, DEFAULT_CART_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::{CartStore, Observer, SubscriptionId};
