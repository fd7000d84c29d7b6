//! YAML documents flattened to property keys.

use config::{Config, File, FileFormat};
use serde_json::Value;

use crate::errors::{CommonsError, Result};

/// Parses YAML text and flattens it to `(key, value)` pairs.
///
/// Nested mappings become dotted keys (`server.port`), sequences use index
/// suffixes (`hosts[0]`), scalars are stringified and null becomes `""`.
pub fn parse_yaml(text: &str) -> Result<Vec<(String, String)>> {
    let settings = Config::builder()
        .add_source(File::from_str(text, FileFormat::Yaml))
        .build()
        .map_err(|e| CommonsError::parse(format!("Invalid YAML document: {}", e)))?;

    let tree: Value = settings
        .try_deserialize()
        .map_err(|e| CommonsError::parse(format!("Unsupported YAML structure: {}", e)))?;

    let mut entries = Vec::new();
    flatten(String::new(), &tree, &mut entries);
    Ok(entries)
}

fn flatten(prefix: String, node: &Value, out: &mut Vec<(String, String)>) {
    match node {
        Value::Object(map) => {
            for (key, child) in map {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(path, child, out);
            }
        }
        Value::Array(items) => {
            for (idx, child) in items.iter().enumerate() {
                flatten(format!("{}[{}]", prefix, idx), child, out);
            }
        }
        Value::Null => {
            if !prefix.is_empty() {
                out.push((prefix, String::new()));
            }
        }
        Value::String(s) => out.push((prefix, s.clone())),
        Value::Bool(b) => out.push((prefix, b.to_string())),
        Value::Number(n) => out.push((prefix, n.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(entries: &'a [(String, String)], key: &str) -> Option<&'a str> {
        entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_flattens_nested_mappings_and_sequences() {
        let yaml = "server:\n  port: 8080\n  host: localhost\nhosts:\n  - alpha\n  - beta\nflag: true\nempty:\n";
        let entries = parse_yaml(yaml).unwrap();

        assert_eq!(lookup(&entries, "server.port"), Some("8080"));
        assert_eq!(lookup(&entries, "server.host"), Some("localhost"));
        assert_eq!(lookup(&entries, "hosts[0]"), Some("alpha"));
        assert_eq!(lookup(&entries, "hosts[1]"), Some("beta"));
        assert_eq!(lookup(&entries, "flag"), Some("true"));
        assert_eq!(lookup(&entries, "empty"), Some(""));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = parse_yaml("server:\n  port: [1, 2\n").unwrap_err();
        assert!(matches!(err, CommonsError::Parse(_)));
    }
}
