//! # atlas-core: Pure Cart Logic for the Atlas Storefront
//!
//! This crate is the **heart** of the storefront cart. It contains the cart
//! state machine and its rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Atlas Storefront Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │           Storefront views (header badge, cart page, ...)       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / observers                   │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │          atlas-store (CartStore, persistence, checkout)         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atlas-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │ validation│  │   │
//! │  │   │ LineItem  │  │   Money   │  │   Cart    │  │   rules   │  │   │
//! │  │   │ OrderForm │  │  (UZS)    │  │  Totals   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO CLOCK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, ProductSelection, OrderForm, ...)
//! - [`money`] - Money type with integer arithmetic in whole UZS
//! - [`cart`] - The cart state machine and its derived totals
//! - [`error`] - Domain error types
//! - [`validation`] - Line item and checkout form rules
//!
//! ## Example Usage
//!
//! ```rust
//! use atlas_core::{Cart, ProductSelection};
//!
//! let mut cart = Cart::new();
//! let pastel = ProductSelection::new("pastel-1", "Pastel Satin", 200_000, "/img/pastel-1.jpg");
//!
//! cart.add_item(pastel.clone(), 1);
//! cart.add_item(pastel, 2);
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.total_items(), 3);
//! assert_eq!(cart.total_price().units(), 600_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartChange, CartSnapshot, CartTotals, RejectReason, RejectedLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// ISO 4217 code of the only currency the storefront sells in.
///
/// Prices carry no fractional subunit; one [`Money`] unit is one so'm.
pub const CURRENCY_CODE: &str = "UZS";

/// Quantity used by `add_item` when the caller passes a non-positive value.
pub const DEFAULT_ADD_QUANTITY: i64 = 1;
