//! # Config Commands
//!
//! Reports the effective configuration.

use tracing::debug;

use crate::state::ConfigState;

/// Gets the current application configuration.
pub fn get_config(config: &ConfigState) -> ConfigState {
    debug!("get_config command");
    config.clone()
}
