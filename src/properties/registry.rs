use std::sync::Arc;

use arc_swap::ArcSwap;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use strum::{AsRefStr, Display, EnumIter};
use tracing::{debug, info, warn};

use super::loader::{LoadReport, PropertyLoader};
use super::profiles::ActiveProfiles;
use super::snapshot::PropertySnapshot;
use super::source::{DirectorySource, PropertySource};
use crate::config::PropertiesConfig;
use crate::errors::Result;

/// Property layer selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum Layer {
    /// 随程序打包的资源
    Internal,
    /// 部署目录中的文件
    External,
}

/// Internal and external property layers plus the shared view.
///
/// The shared view is rebuilt after every load with the external layer
/// merged last, so external keys win. Reload entry points are serialized;
/// readers only ever see whole snapshots.
pub struct ConfigRegistry {
    internal: PropertyLoader,
    external: PropertyLoader,
    shared: ArcSwap<PropertySnapshot>,
    reload_lock: Mutex<()>,
}

impl ConfigRegistry {
    pub fn new(
        internal: impl PropertySource + 'static,
        external: impl PropertySource + 'static,
        base_name: &str,
        profiles: ActiveProfiles,
    ) -> Self {
        Self::from_loaders(
            PropertyLoader::new(internal, base_name, profiles.clone()),
            PropertyLoader::new(external, base_name, profiles),
        )
    }

    /// Directory-backed registry built from the `[properties]` settings.
    pub fn from_settings(settings: &PropertiesConfig) -> Result<Self> {
        settings.validate()?;
        Ok(Self::new(
            DirectorySource::new(&settings.internal_dir),
            DirectorySource::new(&settings.external_dir),
            &settings.base_name,
            settings.active_profiles(),
        ))
    }

    pub fn from_loaders(internal: PropertyLoader, external: PropertyLoader) -> Self {
        Self {
            internal,
            external,
            shared: ArcSwap::from_pointee(PropertySnapshot::new()),
            reload_lock: Mutex::new(()),
        }
    }

    fn loader(&self, layer: Layer) -> &PropertyLoader {
        match layer {
            Layer::Internal => &self.internal,
            Layer::External => &self.external,
        }
    }

    /// Loads one layer and republishes the shared view.
    pub fn load(&self, layer: Layer) -> LoadReport {
        let _guard = self.reload_lock.lock();
        let report = self.loader(layer).load();
        self.log_report(layer, &report);
        self.rebuild_shared();
        report
    }

    /// Loads both layers, internal first.
    pub fn load_all(&self) -> (LoadReport, LoadReport) {
        let _guard = self.reload_lock.lock();
        let internal = self.internal.load();
        let external = self.external.load();
        self.log_report(Layer::Internal, &internal);
        self.log_report(Layer::External, &external);
        self.rebuild_shared();
        (internal, external)
    }

    /// Clears and reloads both layers, then republishes the shared view.
    pub fn reload(&self) -> (LoadReport, LoadReport) {
        let _guard = self.reload_lock.lock();
        let internal = self.internal.reload();
        let external = self.external.reload();
        self.log_report(Layer::Internal, &internal);
        self.log_report(Layer::External, &external);
        self.rebuild_shared();
        (internal, external)
    }

    /// Merged view, external over internal.
    pub fn shared(&self) -> Arc<PropertySnapshot> {
        self.shared.load_full()
    }

    pub fn snapshot(&self, layer: Layer) -> Arc<PropertySnapshot> {
        self.loader(layer).snapshot()
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.shared.load().get(key).map(str::to_string)
    }

    pub fn get_or(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.shared.load().contains_key(key)
    }

    pub fn source_file(&self, key: &str) -> Option<String> {
        self.shared.load().source_file(key).map(str::to_string)
    }

    pub fn bind<T: DeserializeOwned>(&self, prefix: &str) -> Result<T> {
        self.shared.load().bind(prefix)
    }

    fn rebuild_shared(&self) {
        let mut merged = PropertySnapshot::clone(&self.internal.snapshot());
        merged.merge_from(&self.external.snapshot());
        debug!("Shared property view rebuilt with {} keys", merged.len());
        self.shared.store(Arc::new(merged));
    }

    fn log_report(&self, layer: Layer, report: &LoadReport) {
        if report.is_clean() {
            info!(
                "Loaded {} {} property file(s), {} keys",
                report.loaded.len(),
                layer,
                report.keys
            );
        } else {
            warn!(
                "Loaded {} {} property file(s), {} failed: {:?}",
                report.loaded.len(),
                layer,
                report.failed.len(),
                report.failed
            );
        }
    }
}

impl std::fmt::Debug for ConfigRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigRegistry")
            .field("internal", &self.internal)
            .field("external", &self.external)
            .field("shared_keys", &self.shared.load().len())
            .finish()
    }
}
