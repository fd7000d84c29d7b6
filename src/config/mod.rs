//! Library settings
//!
//! `commons.toml` (optional) overridden by `COMMONS__*` environment
//! variables, deserialized into [`CommonsConfig`] and held globally behind
//! `ArcSwap` for lock-free reads.

mod r#impl;
mod structs;

pub use r#impl::{get_config, init_config, update_config};
pub use structs::*;
