use std::collections::{HashMap, HashSet};
use std::str::FromStr;
use std::sync::Arc;

use config::Config;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::errors::{CommonsError, Result};

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    value: String,
    source: Arc<str>,
}

/// Immutable merged view of one property layer.
///
/// Published whole through `ArcSwap`, so readers never see a half-built map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertySnapshot {
    entries: HashMap<String, Entry>,
}

impl PropertySnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key`, replacing any earlier value and its recorded source.
    pub(crate) fn insert(&mut self, key: String, value: String, source: &Arc<str>) {
        self.entries.insert(
            key,
            Entry {
                value,
                source: Arc::clone(source),
            },
        );
    }

    /// Copies every entry of `other` over this snapshot.
    pub(crate) fn merge_from(&mut self, other: &PropertySnapshot) {
        for (key, entry) in &other.entries {
            self.entries.insert(key.clone(), entry.clone());
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| e.value.as_str())
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Sorted key list.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// File that last set `key`.
    pub fn source_file(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(|e| &*e.source)
    }

    /// `true/1/yes/on` and `false/0/no/off`, case-insensitive.
    pub fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        let Some(raw) = self.get(key) else {
            return Ok(None);
        };
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(Some(true)),
            "false" | "0" | "no" | "off" => Ok(Some(false)),
            _ => Err(CommonsError::validation(format!(
                "Property '{}' is not a boolean: '{}'",
                key, raw
            ))),
        }
    }

    pub fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get_parsed(key)
    }

    pub fn get_u64(&self, key: &str) -> Result<Option<u64>> {
        self.get_parsed(key)
    }

    pub fn get_f64(&self, key: &str) -> Result<Option<f64>> {
        self.get_parsed(key)
    }

    /// Parses the trimmed value with `FromStr`; absent keys yield `None`.
    pub fn get_parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key)
            .map(|raw| {
                raw.trim().parse::<T>().map_err(|e| {
                    CommonsError::validation(format!(
                        "Property '{}' has invalid value '{}': {}",
                        key, raw, e
                    ))
                })
            })
            .transpose()
    }

    /// Deserializes the sub-tree below `prefix` (the whole view when empty).
    ///
    /// Values are strings; the `config` crate converts them to the target
    /// field types. A key that is also the parent of other keys (`db` next
    /// to `db.url` or `db[0]`) is shadowed: its children always win.
    pub fn bind<T: DeserializeOwned>(&self, prefix: &str) -> Result<T> {
        let parents = self.parent_keys();
        let mut builder = Config::builder();
        for key in self.keys() {
            if parents.contains(key) {
                debug!("Property '{}' shadowed by its child keys", key);
                continue;
            }
            if let Some(value) = self.get(key) {
                builder = builder.set_override(key, value)?;
            }
        }
        let settings = builder.build()?;

        if prefix.is_empty() {
            Ok(settings.try_deserialize()?)
        } else {
            Ok(settings.get(prefix)?)
        }
    }

    /// Every proper path prefix (`a`, `a.b` of `a.b[0]`) of a stored key.
    fn parent_keys(&self) -> HashSet<&str> {
        self.entries
            .keys()
            .flat_map(|key| {
                key.char_indices()
                    .filter(|&(i, c)| i > 0 && (c == '.' || c == '['))
                    .map(move |(i, _)| &key[..i])
            })
            .collect()
    }
}
