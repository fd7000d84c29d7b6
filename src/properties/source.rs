use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::trace;

use crate::errors::Result;

/// Where a property layer reads its candidate files from.
pub trait PropertySource: Send + Sync {
    /// Human readable origin of `name`, recorded as the key's source file.
    fn locate(&self, name: &str) -> String;

    /// Reads the file called `name`. `Ok(None)` when it does not exist.
    fn read(&self, name: &str) -> Result<Option<String>>;
}

/// Files below a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PropertySource for DirectorySource {
    fn locate(&self, name: &str) -> String {
        self.root.join(name).display().to_string()
    }

    /// UTF-8 first; anything else is read as ISO-8859-1, the traditional
    /// `.properties` encoding.
    fn read(&self, name: &str) -> Result<Option<String>> {
        match std::fs::read(self.root.join(name)) {
            Ok(bytes) => Ok(Some(decode(bytes))),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

fn decode(bytes: Vec<u8>) -> String {
    match String::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            trace!("Property file is not UTF-8, decoding as ISO-8859-1");
            e.into_bytes().into_iter().map(char::from).collect()
        }
    }
}

/// In-memory file table, typically filled from `include_str!` bundles.
#[derive(Debug, Clone, Default)]
pub struct EmbeddedSource {
    label: String,
    files: HashMap<String, String>,
}

impl EmbeddedSource {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            files: HashMap::new(),
        }
    }

    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<String>) {
        self.files.insert(name.into(), content.into());
    }
}

impl PropertySource for EmbeddedSource {
    fn locate(&self, name: &str) -> String {
        format!("{}:{}", self.label, name)
    }

    fn read(&self, name: &str) -> Result<Option<String>> {
        Ok(self.files.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_directory_source_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(source.read("application.properties").unwrap().is_none());

        std::fs::write(dir.path().join("application.properties"), "a=1").unwrap();
        assert_eq!(
            source.read("application.properties").unwrap().as_deref(),
            Some("a=1")
        );
        assert!(source.locate("application.properties").ends_with("application.properties"));
    }

    #[test]
    fn test_directory_source_unreadable_entry_is_error() {
        let dir = TempDir::new().unwrap();
        // 目录不能作为文件读取
        std::fs::create_dir(dir.path().join("application.yml")).unwrap();
        let source = DirectorySource::new(dir.path());
        assert!(source.read("application.yml").is_err());
    }

    #[test]
    fn test_directory_source_reads_latin1() {
        let dir = TempDir::new().unwrap();
        // "größe=groß" 的 ISO-8859-1 编码
        std::fs::write(
            dir.path().join("application.properties"),
            b"gr\xf6\xdfe=gro\xdf\n",
        )
        .unwrap();
        let source = DirectorySource::new(dir.path());

        let content = source.read("application.properties").unwrap().unwrap();
        assert_eq!(content, "größe=groß\n");

        std::fs::write(dir.path().join("application.yml"), "name: größe\n").unwrap();
        assert_eq!(
            source.read("application.yml").unwrap().as_deref(),
            Some("name: größe\n")
        );
    }

    #[test]
    fn test_embedded_source() {
        let source = EmbeddedSource::new("classpath").with_file("application.yml", "a: 1");
        assert_eq!(source.locate("application.yml"), "classpath:application.yml");
        assert!(source.read("application.yml").unwrap().is_some());
        assert!(source.read("application.yaml").unwrap().is_none());
    }
}
