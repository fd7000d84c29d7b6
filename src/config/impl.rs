use std::sync::{Arc, OnceLock};

use arc_swap::ArcSwap;

use super::CommonsConfig;
use crate::errors::{CommonsError, Result};

static CONFIG: OnceLock<ArcSwap<CommonsConfig>> = OnceLock::new();

/// Get the global configuration instance
///
/// Returns an Arc pointer to the configuration, which is cheap to clone
/// and doesn't hold any locks. Fails when `init_config` was never called.
pub fn get_config() -> Result<Arc<CommonsConfig>> {
    CONFIG
        .get()
        .map(ArcSwap::load_full)
        .ok_or_else(|| CommonsError::config("Config not initialized. Call init_config() first."))
}

/// Initialize the global configuration
///
/// Loads configuration from "commons.toml" in the current directory plus
/// `COMMONS__*` environment variables. If the file doesn't exist, uses
/// in-memory defaults. Later calls keep the first configuration.
pub fn init_config() -> Arc<CommonsConfig> {
    CONFIG
        .get_or_init(|| ArcSwap::from_pointee(CommonsConfig::load()))
        .load_full()
}

/// Replace the global configuration, initializing it if needed.
pub fn update_config(config: CommonsConfig) {
    match CONFIG.get() {
        Some(current) => current.store(Arc::new(config)),
        None => {
            let swap = CONFIG.get_or_init(|| ArcSwap::from_pointee(config.clone()));
            swap.store(Arc::new(config));
        }
    }
}
