//! Layered property loading
//!
//! Each layer reads `<base>[-<profile>].{properties,yml,yaml}` candidates
//! from a [`PropertySource`] and merges them key by key, later files winning.
//! [`ConfigRegistry`] combines the internal (bundled) and external
//! (deployment) layers into a shared view where external keys override.
//!
//! # Architecture
//! - `parser.rs`: `.properties` syntax
//! - `yaml.rs`: YAML flattening through the `config` crate
//! - `source.rs`: directory and embedded file sources (UTF-8, falling back
//!   to ISO-8859-1)
//! - `profiles.rs`: active profiles and candidate ordering
//! - `snapshot.rs`: immutable merged view with typed access
//! - `loader.rs`: one layer, published via `ArcSwap`
//! - `registry.rs`: internal + external + shared view

mod loader;
mod parser;
mod profiles;
mod registry;
mod snapshot;
mod source;
mod yaml;

pub use loader::{LoadReport, PropertyLoader};
pub use parser::parse_properties;
pub use profiles::{ActiveProfiles, EXTENSIONS};
pub use registry::{ConfigRegistry, Layer};
pub use snapshot::PropertySnapshot;
pub use source::{DirectorySource, EmbeddedSource, PropertySource};
pub use yaml::parse_yaml;
