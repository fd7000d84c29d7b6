use std::path::Path;
use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use tracing::{debug, error, trace};

use super::parser::parse_properties;
use super::profiles::ActiveProfiles;
use super::snapshot::PropertySnapshot;
use super::source::PropertySource;
use super::yaml::parse_yaml;
use crate::errors::Result;

/// Outcome of one load pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// 成功加载的文件
    pub loaded: Vec<String>,
    /// 读取或解析失败而被跳过的文件
    pub failed: Vec<String>,
    /// 加载后的键数量
    pub keys: usize,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// One property layer: candidate files from a source, merged by profile.
pub struct PropertyLoader {
    source: Box<dyn PropertySource>,
    base_name: String,
    profiles: ActiveProfiles,
    current: ArcSwap<PropertySnapshot>,
    reload_lock: Mutex<()>,
}

impl PropertyLoader {
    pub fn new(
        source: impl PropertySource + 'static,
        base_name: impl Into<String>,
        profiles: ActiveProfiles,
    ) -> Self {
        Self {
            source: Box::new(source),
            base_name: base_name.into(),
            profiles,
            current: ArcSwap::from_pointee(PropertySnapshot::new()),
            reload_lock: Mutex::new(()),
        }
    }

    pub fn profiles(&self) -> &ActiveProfiles {
        &self.profiles
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Merges every candidate file over the current contents.
    pub fn load(&self) -> LoadReport {
        let _guard = self.reload_lock.lock();
        let base = PropertySnapshot::clone(&self.current.load());
        self.load_onto(base)
    }

    /// Discards the current contents and loads from scratch.
    pub fn reload(&self) -> LoadReport {
        let _guard = self.reload_lock.lock();
        self.load_onto(PropertySnapshot::new())
    }

    pub fn snapshot(&self) -> Arc<PropertySnapshot> {
        self.current.load_full()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.current.load().get(key).map(str::to_string)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.current.load().contains_key(key)
    }

    pub fn source_file(&self, key: &str) -> Option<String> {
        self.current.load().source_file(key).map(str::to_string)
    }

    fn load_onto(&self, mut snapshot: PropertySnapshot) -> LoadReport {
        let mut report = LoadReport::default();

        for name in self.profiles.candidates(&self.base_name) {
            let origin = self.source.locate(&name);
            match self.read_candidate(&name) {
                Ok(None) => trace!("Property file not found, skipping: {}", origin),
                Ok(Some(entries)) => {
                    let source: Arc<str> = Arc::from(origin.as_str());
                    let count = entries.len();
                    for (key, value) in entries {
                        snapshot.insert(key, value, &source);
                    }
                    debug!("Loaded {} properties from {}", count, origin);
                    report.loaded.push(origin);
                }
                Err(e) => {
                    error!("Failed to load property file {}: {}", origin, e);
                    report.failed.push(origin);
                }
            }
        }

        report.keys = snapshot.len();
        self.current.store(Arc::new(snapshot));
        report
    }

    fn read_candidate(&self, name: &str) -> Result<Option<Vec<(String, String)>>> {
        let Some(text) = self.source.read(name)? else {
            return Ok(None);
        };
        let entries = match Path::new(name).extension().and_then(|e| e.to_str()) {
            Some("properties") => parse_properties(&text),
            _ => parse_yaml(&text)?,
        };
        Ok(Some(entries))
    }
}

impl std::fmt::Debug for PropertyLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertyLoader")
            .field("base_name", &self.base_name)
            .field("profiles", &self.profiles)
            .field("keys", &self.current.load().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::EmbeddedSource;

    fn loader(source: EmbeddedSource, profiles: &str) -> PropertyLoader {
        PropertyLoader::new(source, "application", ActiveProfiles::from_list(profiles))
    }

    #[test]
    fn test_profile_overrides_base() {
        let source = EmbeddedSource::new("mem")
            .with_file("application.properties", "a=1\nb=2")
            .with_file("application-dev.yml", "b: 3\nc: 4");
        let loader = loader(source, "dev");

        let report = loader.load();
        assert_eq!(report.loaded.len(), 2);
        assert_eq!(report.keys, 3);

        let snap = loader.snapshot();
        assert_eq!(snap.get("a"), Some("1"));
        assert_eq!(snap.get("b"), Some("3"));
        assert_eq!(snap.get("c"), Some("4"));
        assert_eq!(snap.source_file("b"), Some("mem:application-dev.yml"));
        assert_eq!(snap.source_file("a"), Some("mem:application.properties"));
    }

    #[test]
    fn test_yaml_overrides_properties_of_same_stem() {
        let source = EmbeddedSource::new("mem")
            .with_file("application.properties", "k=props")
            .with_file("application.yml", "k: yml")
            .with_file("application.yaml", "k: yaml");
        let loader = loader(source, "");

        loader.load();
        assert_eq!(loader.get("k").as_deref(), Some("yaml"));
    }

    #[test]
    fn test_malformed_file_is_skipped() {
        let source = EmbeddedSource::new("mem")
            .with_file("application.yml", "broken: [1, 2\n")
            .with_file("application-dev.properties", "ok=true");
        let loader = loader(source, "dev");

        let report = loader.load();
        assert!(!report.is_clean());
        assert_eq!(report.failed, vec!["mem:application.yml"]);
        assert_eq!(loader.get("ok").as_deref(), Some("true"));
    }

    #[test]
    fn test_reload_is_idempotent() {
        let source = EmbeddedSource::new("mem").with_file("application.properties", "a=1");
        let loader = loader(source, "");

        let first = loader.reload();
        let before = loader.snapshot();
        let second = loader.reload();

        assert_eq!(first, second);
        assert_eq!(*before, *loader.snapshot());
    }
}
