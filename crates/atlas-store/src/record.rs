//! # Persisted Cart Record
//!
//! Encoding and lenient decoding of the value stored under the cart key.
//!
//! ## Layout
//! ```text
//! {
//!   "items": [
//!     { "id": "super-satin", "variant": "2-person", "name": "Super Satin",
//!       "price": 350000, "image": "/img/super-satin.jpg", "quantity": 1 }
//!   ],
//!   "savedAt": "2026-10-17T09:30:00Z"
//! }
//! ```
//! There is no version field. A bare JSON array of line items is accepted
//! on read as well.
//!
//! ## Recovery Rules
//! ```text
//! not JSON / wrong shape ──────────────► absent (empty cart)
//! entry with missing field or bad type ─► entry dropped
//! entry breaking a line invariant ──────► entry dropped
//! entry repeating an earlier key ───────► entry dropped (first wins)
//! ```

use atlas_core::{Cart, LineItem, RejectReason};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use crate::error::StoreResult;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CartRecord<'a> {
    items: &'a [LineItem],
    saved_at: DateTime<Utc>,
}

/// A cart rebuilt from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoredCart {
    pub cart: Cart,
    /// Number of stored entries that were skipped.
    pub dropped: usize,
}

/// Serializes the lines into the stored record.
pub fn encode_record(items: &[LineItem], saved_at: DateTime<Utc>) -> StoreResult<String> {
    Ok(serde_json::to_string(&CartRecord { items, saved_at })?)
}

/// Parses a stored record, keeping every entry that is still a valid line.
///
/// Returns `None` when the record as a whole is unreadable.
pub fn decode_record(raw: &str) -> Option<RestoredCart> {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!(error = %e, "Stored cart is not valid JSON; starting empty");
            return None;
        }
    };

    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(mut record) => match record.remove("items") {
            Some(Value::Array(entries)) => entries,
            _ => {
                warn!("Stored cart record has no items array; starting empty");
                return None;
            }
        },
        _ => {
            warn!("Stored cart has an unexpected shape; starting empty");
            return None;
        }
    };

    let mut dropped = 0;
    let mut positions = Vec::with_capacity(entries.len());
    let mut lines = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<LineItem>(entry) {
            Ok(line) => {
                positions.push(index);
                lines.push(line);
            }
            Err(e) => {
                warn!(index, error = %e, "Dropping unreadable cart entry");
                dropped += 1;
            }
        }
    }

    let (cart, rejected) = Cart::from_lines(lines);
    for line in &rejected {
        let index = positions.get(line.index).copied().unwrap_or(line.index);
        match &line.reason {
            RejectReason::Invalid(e) => {
                warn!(index, id = %line.id, error = %e, "Dropping invalid cart entry")
            }
            RejectReason::DuplicateKey => {
                warn!(index, id = %line.id, "Dropping duplicate cart entry")
            }
        }
    }
    dropped += rejected.len();

    Some(RestoredCart { cart, dropped })
}

// =============================================================================
// Unit Tests
// =============================================================================
