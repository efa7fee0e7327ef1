//! # Atlas Storefront CLI
//!
//! Host for the cart engine: wires configuration, logging, durable storage
//! and the command layer together.
//!
//! ## Module Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  main.rs ────► parses arguments, prints the result                      │
//! │                                                                         │
//! │  lib.rs ─────► logging, data directory, state, dispatch                 │
//! │                                                                         │
//! │  cli.rs ─────► clap argument definitions                                │
//! │                                                                         │
//! │  commands/ ──► get_cart, add_to_cart, place_order, get_config, ...      │
//! │                                                                         │
//! │  state/ ─────► CartState, ConfigState                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use atlas_store::{CartPersistence, CartStore, FileStorage, StoreError};
use directories::ProjectDirs;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};
use error::ApiError;
use state::{CartState, ConfigState};

/// Runs one CLI invocation and returns the response as pretty JSON.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Load Configuration ────────────────────────────────────────────────►│
/// │     • ATLAS_* environment variables over defaults                       │
/// │                                                                         │
/// │  2. Determine Data Directory ──────────────────────────────────────────►│
/// │     • ATLAS_DATA_DIR, or                                                │
/// │     • Linux: ~/.local/share/atlas-storefront                            │
/// │     • macOS: ~/Library/Application Support/uz.Atlas.atlas-storefront    │
/// │                                                                         │
/// │  3. Open Cart Store ───────────────────────────────────────────────────►│
/// │     • Saved cart restored, bad entries dropped                          │
/// │                                                                         │
/// │  4. Dispatch Command ──────────────────────────────────────────────────►│
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run(cli: Cli) -> Result<String, ApiError> {
    let config = ConfigState::from_env();

    // Config needs no storage; answer it even if the data dir is unusable.
    if matches!(cli.command, Command::Config) {
        return to_json(commands::config::get_config(&config));
    }

    let data_dir = resolve_data_dir(&config)?;
    let cart = open_cart(&config, data_dir);

    let output = dispatch(cli.command, &cart, &config)?;
    to_pretty_string(&output)
}

/// Builds the shared cart state backed by files in `data_dir`.
pub fn open_cart(config: &ConfigState, data_dir: PathBuf) -> CartState {
    let persistence = CartPersistence::new(FileStorage::new(data_dir), config.storage_key.clone());
    let mut store = CartStore::open(persistence);

    let formatter = config.clone();
    store.subscribe(move |snapshot| {
        debug!(
            lines = snapshot.totals.line_count,
            items = snapshot.totals.total_items,
            total = %formatter.format_currency(snapshot.totals.total_price.units()),
            "Cart changed"
        );
    });

    CartState::new(store)
}

/// Routes a parsed command to its handler.
pub fn dispatch(command: Command, cart: &CartState, config: &ConfigState) -> Result<Value, ApiError> {
    match command {
        Command::Show => to_value(commands::cart::get_cart(cart)),
        Command::Add { product, quantity } => {
            to_value(commands::cart::add_to_cart(cart, product.into(), quantity)?)
        }
        Command::Update { line, quantity } => to_value(commands::cart::update_cart_item(
            cart,
            &line.id,
            line.variant.as_deref(),
            quantity,
        )),
        Command::Remove { line } => to_value(commands::cart::remove_from_cart(
            cart,
            &line.id,
            line.variant.as_deref(),
        )),
        Command::Clear => to_value(commands::cart::clear_cart(cart)),
        Command::Checkout(args) => {
            let confirmation = commands::checkout::place_order(cart, args.into())?;
            info!(
                store = %config.store_name,
                order_id = %confirmation.order_id,
                total = %config.format_currency(confirmation.totals.total_price.units()),
                "Order confirmed"
            );
            to_value(confirmation)
        }
        Command::Config => to_value(commands::config::get_config(config)),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so stdout carries only command output.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=atlas_store=trace` - Show trace for one crate only
/// - Default: INFO, DEBUG for the atlas crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,atlas=debug"));

    // A second call (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Determines the directory the cart file lives in.
///
/// ## Platform-Specific Paths
/// - **Linux**: `~/.local/share/atlas-storefront`
/// - **macOS**: `~/Library/Application Support/uz.Atlas.atlas-storefront`
/// - **Windows**: `%APPDATA%\Atlas\atlas-storefront\data`
///
/// ## Override
/// Set `ATLAS_DATA_DIR` to use a custom directory.
pub fn resolve_data_dir(config: &ConfigState) -> Result<PathBuf, ApiError> {
    let dir = match &config.data_dir {
        Some(dir) => dir.clone(),
        None => ProjectDirs::from("uz", "Atlas", "atlas-storefront")
            .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?
            .data_dir()
            .to_path_buf(),
    };

    std::fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;
    Ok(dir)
}

fn to_value<T: Serialize>(response: T) -> Result<Value, ApiError> {
    serde_json::to_value(response).map_err(|e| ApiError::internal(e.to_string()))
}

fn to_json<T: Serialize>(response: T) -> Result<String, ApiError> {
    to_pretty_string(&to_value(response)?)
}

fn to_pretty_string(value: &Value) -> Result<String, ApiError> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))
}
