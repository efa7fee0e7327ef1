//! # State Module
//!
//! Application state shared by the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │          ┌──────────────────────┐        ┌──────────────────────┐      │
//! │          │      CartState       │        │     ConfigState      │      │
//! │          │                      │        │                      │      │
//! │          │  Arc<Mutex<          │        │  store_name          │      │
//! │          │    CartStore         │        │  data_dir            │      │
//! │          │  >>                  │        │  storage_key         │      │
//! │          └──────────────────────┘        └──────────────────────┘      │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: Protected by Arc<Mutex<T>> for exclusive access          │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;

pub use cart::CartState;
pub use config::ConfigState;
