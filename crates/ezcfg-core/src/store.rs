//! Locator-based synchronization of persisted types with files
//!
//! [`ConfigSync`] is what a host holds on to: it resolves locators against a
//! base directory, makes sure the file exists, runs discovery and the
//! [`SyncEngine`], and writes the document back only when it changed.

use std::path::{Path, PathBuf};

use ezcfg_content::Document;
use ezcfg_fs::{NormalizedPath, ensure_file};
use serde::{Deserialize, Serialize};

use crate::Result;
use crate::adapter::{open_document, persist_document};
use crate::error::FieldError;
use crate::schema::{Discovered, Persisted, discover};
use crate::sync::{SyncEngine, SyncHooks, SyncOptions, SyncReport, TracingHooks};

/// Host settings for a [`ConfigSync`], loadable with
/// [`SettingsStore`](ezcfg_fs::SettingsStore)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncSettings {
    /// Directory that relative locators resolve against
    pub base_dir: PathBuf,
    /// File used when no locator is given
    pub default_file: String,
    pub options: SyncOptions,
}

impl Default for SyncSettings {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            default_file: "config.yml".to_string(),
            options: SyncOptions::default(),
        }
    }
}

/// Loads and saves persisted types from configuration files
#[derive(Debug, Clone)]
pub struct ConfigSync<H = TracingHooks> {
    base_dir: NormalizedPath,
    default_file: String,
    options: SyncOptions,
    hooks: H,
}

impl ConfigSync {
    /// Synchronize with files under `base_dir`, defaulting to `config.yml`
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self::from_settings(SyncSettings {
            base_dir: base_dir.as_ref().to_path_buf(),
            ..SyncSettings::default()
        })
    }

    pub fn from_settings(settings: SyncSettings) -> Self {
        Self {
            base_dir: NormalizedPath::new(&settings.base_dir),
            default_file: settings.default_file,
            options: settings.options,
            hooks: TracingHooks,
        }
    }
}

impl<H: SyncHooks> ConfigSync<H> {
    /// Replace the hooks
    pub fn with_hooks<K: SyncHooks>(self, hooks: K) -> ConfigSync<K> {
        ConfigSync {
            base_dir: self.base_dir,
            default_file: self.default_file,
            options: self.options,
            hooks,
        }
    }

    pub fn with_options(mut self, options: SyncOptions) -> Self {
        self.options = options;
        self
    }

    pub fn base_dir(&self) -> &NormalizedPath {
        &self.base_dir
    }

    pub fn options(&self) -> &SyncOptions {
        &self.options
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Resolve a locator against the base directory; an empty locator names
    /// the default file.
    pub fn locate(&self, locator: &str) -> NormalizedPath {
        if locator.is_empty() {
            self.base_dir.join(&self.default_file)
        } else {
            self.base_dir.resolve(locator)
        }
    }

    /// Load `target` from the default file
    pub fn load<T: Persisted>(&self, target: &mut T) -> Result<SyncReport> {
        self.load_from(target, "")
    }

    /// Load `target` from the file named by `locator`.
    ///
    /// Missing entries are backfilled from the fields' current values; the
    /// file is rewritten only if something was backfilled and
    /// `auto_persist_on_load` is set.
    ///
    /// # Errors
    ///
    /// Fails without writing if the locator names a directory, the file
    /// cannot be created or read, or it is malformed. Per-field failures
    /// are returned in the report instead.
    pub fn load_from<T: Persisted>(&self, target: &mut T, locator: &str) -> Result<SyncReport> {
        let path = self.locate(locator);
        let mut document = self.open(&path)?;
        let discovered = self.discover::<T>();

        let report = self
            .engine()
            .load(target, &discovered.descriptors, &mut document);
        if report.changed && self.options.auto_persist_on_load {
            persist_document(&document, &path)?;
        }

        Ok(with_unsupported(discovered.unsupported, report))
    }

    /// Save `target` to the default file
    pub fn save<T: Persisted>(&self, target: &T) -> Result<SyncReport> {
        self.save_to(target, "")
    }

    /// Save `target` to the file named by `locator`, rewriting it only if a
    /// field differs from its stored entry.
    ///
    /// # Errors
    ///
    /// Same as [`load_from`](Self::load_from).
    pub fn save_to<T: Persisted>(&self, target: &T, locator: &str) -> Result<SyncReport> {
        let path = self.locate(locator);
        let mut document = self.open(&path)?;
        let discovered = self.discover::<T>();

        let report = self
            .engine()
            .save(target, &discovered.descriptors, &mut document);
        if report.changed {
            persist_document(&document, &path)?;
        }

        Ok(with_unsupported(discovered.unsupported, report))
    }

    /// Copy every persisted field of `source` into `destination`
    pub fn copy_from<T: Persisted>(&self, destination: &mut T, source: &T) -> SyncReport {
        let discovered = self.discover::<T>();
        let report = self
            .engine()
            .copy_fields(source, destination, &discovered.descriptors);
        with_unsupported(discovered.unsupported, report)
    }

    fn engine(&self) -> SyncEngine<&H> {
        SyncEngine::with_hooks(self.options, &self.hooks)
    }

    fn open(&self, path: &NormalizedPath) -> Result<Document> {
        let bootstrap = ensure_file(path)?;
        if bootstrap.dir_created
            && let Some(parent) = path.parent()
        {
            self.hooks.on_dir_created(&parent);
        }
        if bootstrap.file_created {
            self.hooks.on_file_created(path);
        }
        open_document(path)
    }

    fn discover<T: Persisted>(&self) -> Discovered<T> {
        let discovered = discover::<T>();
        for error in &discovered.unsupported {
            self.hooks.on_unsupported_field(error);
        }
        discovered
    }
}

fn with_unsupported(unsupported: Vec<FieldError>, mut report: SyncReport) -> SyncReport {
    report.errors.splice(0..0, unsupported);
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locate() {
        let sync = ConfigSync::new("plugins/demo");
        assert_eq!(sync.locate("").as_str(), "plugins/demo/config.yml");
        assert_eq!(sync.locate("audio.toml").as_str(), "plugins/demo/audio.toml");
        assert_eq!(sync.locate("/etc/demo.yml").as_str(), "/etc/demo.yml");
    }

    #[test]
    fn test_settings_defaults() {
        let settings: SyncSettings =
            serde_json::from_str(r#"{"default_file": "app.json"}"#).unwrap();
        assert_eq!(settings.base_dir, PathBuf::from("."));
        assert_eq!(settings.default_file, "app.json");
        assert_eq!(settings.options, SyncOptions::default());
    }
}
