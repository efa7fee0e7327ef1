//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`ATLAS_*`)
//! 2. Defaults (this file)
//!
//! ## Thread Safety
//! Configuration is read-only after initialization, so no mutex needed.

use std::path::PathBuf;

use atlas_core::{Money, CURRENCY_CODE};
use atlas_store::DEFAULT_CART_KEY;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigState {
    /// Store name (shown in order confirmations)
    pub store_name: String,

    /// Directory the cart file lives in.
    /// `None` means the platform data directory.
    pub data_dir: Option<PathBuf>,

    /// Storage key the cart is saved under
    pub storage_key: String,

    /// Currency code (ISO 4217). Amounts are whole units.
    pub currency_code: String,

    /// Thousands separator used when formatting amounts
    pub group_separator: char,
}

impl Default for ConfigState {
    /// ## Default Values
    /// - Store: "Atlas Textiles"
    /// - Data dir: platform default
    /// - Storage key: "cart"
    /// - Currency: UZS, "," grouping
    fn default() -> Self {
        ConfigState {
            store_name: "Atlas Textiles".to_string(),
            data_dir: None,
            storage_key: DEFAULT_CART_KEY.to_string(),
            currency_code: CURRENCY_CODE.to_string(),
            group_separator: ',',
        }
    }
}

impl ConfigState {
    /// Creates a new ConfigState from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `ATLAS_STORE_NAME`: Override store name
    /// - `ATLAS_DATA_DIR`: Directory for the cart file
    /// - `ATLAS_STORAGE_KEY`: Override storage key
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// Blank values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = ConfigState::default();
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        if let Some(store_name) = var("ATLAS_STORE_NAME") {
            config.store_name = store_name;
        }

        if let Some(data_dir) = var("ATLAS_DATA_DIR") {
            config.data_dir = Some(PathBuf::from(data_dir));
        }

        if let Some(key) = var("ATLAS_STORAGE_KEY") {
            config.storage_key = key;
        }

        config
    }

    /// Formats an amount for display.
    ///
    /// ## Example
    /// ```rust
    /// use atlas_cli_lib::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(600_000), "600,000 UZS");
    /// ```
    pub fn format_currency(&self, units: i64) -> String {
        format!(
            "{} {}",
            Money::from_units(units).format_grouped(self.group_separator),
            self.currency_code
        )
    }
}
