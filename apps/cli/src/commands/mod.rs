//! # Commands Module
//!
//! One function per CLI action. Commands take only the state they need and
//! return a serializable response or an [`ApiError`](crate::error::ApiError).
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  atlas add --id pastel-1 --name Pastel --price 200000 --image /p.jpg    │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  cli::Command::Add ──► commands::cart::add_to_cart(&CartState, ...)     │
//! │         │                                                               │
//! │         │ (JSON serialization)                                          │
//! │         ▼                                                               │
//! │  stdout: CartResponse                                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cart;
pub mod checkout;
pub mod config;
