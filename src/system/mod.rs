//! System-level modules
//!
//! This module contains system-level functionality:
//! - Logging bootstrap (`logging` feature)
//! - Operating system and hardware introspection (`system` feature)

#[cfg(feature = "logging")]
pub mod logging;
#[cfg(feature = "system")]
pub mod platform;
