//! Commons - application support library
//!
//! This library bundles the small building blocks most applications end up
//! writing themselves: fallible function values, observable settings cells,
//! profile-aware property files, OS introspection and logging setup.
//!
//! # Features
//! - **system**: OS and hardware introspection via `sysinfo` (default)
//! - **logging**: tracing subscriber bootstrap (default)
//! - **full**: All features enabled
//!
//! # Architecture
//! - `function`: Checked functions (lift, recover, compose, curry, memoize)
//! - `value`: Observable value cells with change listeners
//! - `properties`: Layered `.properties` / YAML loading with profiles
//! - `config`: The library's own settings (`commons.toml` + env)
//! - `system`: Logging bootstrap and platform introspection
//! - `errors`: Error types

pub mod config;
pub mod errors;
pub mod function;
pub mod properties;
pub mod system;
pub mod value;

/// Common imports for downstream crates.
pub mod prelude {
    pub use crate::errors::{CommonsError, Result};
    pub use crate::function::{
        Checked, CheckedConsumer, CheckedFunction0, CheckedFunction1, CheckedFunction2,
        CheckedFunction3, CheckedFunction4, CheckedPredicate, CheckedRunnable, Failure,
        UncheckedFailure,
    };
    pub use crate::properties::{ActiveProfiles, ConfigRegistry, Layer};
    pub use crate::value::{
        BooleanValue, DoubleValue, EnumValue, FloatValue, IntegerValue, LongValue, NumericCompare,
    };
}
