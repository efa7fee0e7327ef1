//! # Cart Persistence
//!
//! Binds a [`KeyValueStorage`] to the single key the cart lives under.
//!
//! ```text
//! CartStore::open ──► load() ──► storage.get(key) ──► decode_record
//!                                     │ Err / None           │ None
//!                                     ▼                      ▼
//!                                  absent                  absent
//!
//! every mutation ───► save(items) ──► encode_record ──► storage.set(key)
//!                          │ empty
//!                          └──────────────────────────► storage.remove(key)
//! ```
//!
//! An empty cart leaves nothing in storage; reading the absent key restores
//! an empty cart, so the two are equivalent.

use atlas_core::LineItem;
use chrono::Utc;
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::record::{decode_record, encode_record, RestoredCart};
use crate::storage::KeyValueStorage;

/// Storage key used when none is configured.
pub const DEFAULT_CART_KEY: &str = "cart";

/// The cart's view of durable storage.
pub struct CartPersistence {
    storage: Box<dyn KeyValueStorage>,
    key: String,
}

impl CartPersistence {
    pub fn new(storage: impl KeyValueStorage + 'static, key: impl Into<String>) -> Self {
        CartPersistence {
            storage: Box::new(storage),
            key: key.into(),
        }
    }

    /// Persistence under [`DEFAULT_CART_KEY`].
    pub fn with_default_key(storage: impl KeyValueStorage + 'static) -> Self {
        Self::new(storage, DEFAULT_CART_KEY)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the previously saved cart, or `None` if there is nothing
    /// usable in storage. Storage failures count as "nothing saved".
    pub fn load(&self) -> Option<RestoredCart> {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!(key = %self.key, "No saved cart");
                return None;
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Could not read saved cart");
                return None;
            }
        };

        decode_record(&raw)
    }

    /// Writes the lines under the cart key, replacing what was there.
    /// Saving no lines removes the key.
    pub fn save(&self, items: &[LineItem]) -> StoreResult<()> {
        if items.is_empty() {
            debug!(key = %self.key, "Cart empty; removing saved record");
            return self.storage.remove(&self.key);
        }

        let record = encode_record(items, Utc::now())?;
        self.storage.set(&self.key, &record)
    }
}

impl std::fmt::Debug for CartPersistence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartPersistence")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}
