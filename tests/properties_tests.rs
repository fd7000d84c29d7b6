//! Property loading 集成测试
//!
//! 使用临时目录模拟内部资源目录与外部部署目录。

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;

use serde::Deserialize;
use tempfile::TempDir;

use commons::config::PropertiesConfig;
use commons::properties::{
    ActiveProfiles, ConfigRegistry, DirectorySource, EmbeddedSource, Layer, PropertyLoader,
};

fn write(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).expect("写入测试文件失败");
}

#[cfg(test)]
mod merge_tests {
    use super::*;

    #[test]
    fn test_profile_file_overrides_base() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "application.properties", "a=1\nb=2\n");
        write(dir.path(), "application-dev.properties", "b=3\nc=4\n");

        let loader = PropertyLoader::new(
            DirectorySource::new(dir.path()),
            "application",
            ActiveProfiles::from_list("dev"),
        );
        let report = loader.load();
        let snap = loader.snapshot();

        assert_eq!(report.loaded.len(), 2);
        assert_eq!(snap.keys(), vec!["a", "b", "c"]);
        assert_eq!(snap.get("a"), Some("1"));
        assert_eq!(snap.get("b"), Some("3"));
        assert_eq!(snap.get("c"), Some("4"));
        assert!(
            snap.source_file("b")
                .unwrap()
                .ends_with("application-dev.properties")
        );
    }

    #[test]
    fn test_later_profiles_win() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "application-dev.yml", "db:\n  url: dev-db\n");
        write(dir.path(), "application-local.yaml", "db:\n  url: local-db\n");

        let loader = PropertyLoader::new(
            DirectorySource::new(dir.path()),
            "application",
            ActiveProfiles::from_list("dev,local"),
        );
        loader.load();
        assert_eq!(loader.get("db.url").as_deref(), Some("local-db"));
    }

    #[test]
    fn test_malformed_yaml_skipped_others_load() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "application.properties", "name=app\n");
        write(dir.path(), "application.yml", "server: [unclosed\n");
        write(dir.path(), "application-prod.properties", "mode=prod\n");

        let loader = PropertyLoader::new(
            DirectorySource::new(dir.path()),
            "application",
            ActiveProfiles::from_list("prod"),
        );
        let report = loader.load();

        assert_eq!(report.failed.len(), 1);
        assert!(report.failed[0].ends_with("application.yml"));
        assert_eq!(loader.get("name").as_deref(), Some("app"));
        assert_eq!(loader.get("mode").as_deref(), Some("prod"));
    }

    #[test]
    fn test_reload_drops_removed_keys() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "application.properties", "keep=1\ndrop=2\n");
        let loader = PropertyLoader::new(
            DirectorySource::new(dir.path()),
            "application",
            ActiveProfiles::new(),
        );
        loader.load();
        assert!(loader.contains_key("drop"));

        write(dir.path(), "application.properties", "keep=1\n");
        loader.reload();
        assert!(!loader.contains_key("drop"));
        assert_eq!(loader.get("keep").as_deref(), Some("1"));
    }
}

#[cfg(test)]
mod registry_tests {
    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Database {
        url: String,
        pool: u32,
        readonly: bool,
    }

    fn settings(internal: &Path, external: &Path, profiles: &[&str]) -> PropertiesConfig {
        PropertiesConfig {
            base_name: "application".into(),
            internal_dir: internal.to_path_buf(),
            external_dir: external.to_path_buf(),
            profiles: profiles.iter().map(|p| p.to_string()).collect(),
        }
    }

    #[test]
    fn test_external_layer_overrides_internal() {
        let internal = TempDir::new().unwrap();
        let external = TempDir::new().unwrap();
        write(internal.path(), "application.properties", "db.url=bundled\ndb.pool=4\n");
        write(external.path(), "application.yml", "db:\n  url: deployed\n");

        let registry =
            ConfigRegistry::from_settings(&settings(internal.path(), external.path(), &[]))
                .unwrap();
        registry.load_all();

        assert_eq!(registry.get("db.url").as_deref(), Some("deployed"));
        assert_eq!(registry.get("db.pool").as_deref(), Some("4"));
        assert!(registry.source_file("db.url").unwrap().ends_with("application.yml"));
        assert_eq!(registry.snapshot(Layer::Internal).get("db.url"), Some("bundled"));
    }

    #[test]
    fn test_bind_typed_section() {
        let internal = TempDir::new().unwrap();
        let external = TempDir::new().unwrap();
        write(
            internal.path(),
            "application.properties",
            "db.url=jdbc:h2:mem\ndb.pool=8\ndb.readonly=false\n",
        );
        write(external.path(), "application-ro.properties", "db.readonly=true\n");

        let registry =
            ConfigRegistry::from_settings(&settings(internal.path(), external.path(), &["ro"]))
                .unwrap();
        registry.load_all();

        let db: Database = registry.bind("db").unwrap();
        assert_eq!(
            db,
            Database {
                url: "jdbc:h2:mem".into(),
                pool: 8,
                readonly: true,
            }
        );
    }

    #[test]
    fn test_readers_see_whole_snapshots_during_reload() {
        let internal = EmbeddedSource::new("bundle").with_file(
            "application.properties",
            (0..200).map(|i| format!("k{}={}\n", i, i)).collect::<String>(),
        );
        let registry = Arc::new(ConfigRegistry::new(
            internal,
            EmbeddedSource::new("empty"),
            "application",
            ActiveProfiles::new(),
        ));
        registry.load_all();

        let reloader = {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for _ in 0..50 {
                    registry.reload();
                }
            })
        };

        for _ in 0..200 {
            let shared = registry.shared();
            assert_eq!(shared.len(), 200);
        }
        reloader.join().unwrap();
    }

    #[test]
    fn test_invalid_base_name_rejected() {
        let dir = TempDir::new().unwrap();
        let mut config = settings(dir.path(), dir.path(), &[]);
        config.base_name = "  ".into();
        assert!(ConfigRegistry::from_settings(&config).is_err());
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Endpoint {
        url: String,
    }

    #[test]
    fn test_bind_is_stable_when_parent_and_child_keys_coexist() {
        // 每次都新建 loader，避免复用同一个 HashMap 的迭代顺序
        for _ in 0..40 {
            let source = EmbeddedSource::new("internal").with_file(
                "application.properties",
                "db=plain\ndb.url=x\na=1\nb=2\nc=3\n",
            );
            let loader = PropertyLoader::new(source, "application", ActiveProfiles::new());
            loader.load();

            let endpoint: Endpoint = loader.snapshot().bind("db").unwrap();
            assert_eq!(endpoint.url, "x");
        }
    }

    #[test]
    fn test_layer_load_picks_up_changes_on_disk() {
        let internal = TempDir::new().unwrap();
        let external = TempDir::new().unwrap();
        write(internal.path(), "application.properties", "mode=bundled\n");
        let registry =
            ConfigRegistry::from_settings(&settings(internal.path(), external.path(), &[])).unwrap();
        registry.load_all();
        assert_eq!(registry.get("mode").as_deref(), Some("bundled"));

        write(external.path(), "application.properties", "mode=deployed\n");
        registry.load(Layer::External);
        assert_eq!(registry.get("mode").as_deref(), Some("deployed"));

        fs::remove_file(external.path().join("application.properties")).unwrap();
        registry.reload();
        assert_eq!(registry.get("mode").as_deref(), Some("bundled"));
    }
}
