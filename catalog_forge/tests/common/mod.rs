//! Shared fixtures for pipeline integration tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use camino::{Utf8Path, Utf8PathBuf};
use catalog_forge::{
    BuildContext, CatalogConfig, CatalogFormat, FallbackLocales, ProjectConfig,
};
use tempfile::TempDir;

/// A throwaway project directory with a minimal-format catalog layout.
pub struct Fixture {
    _dir: TempDir,
    pub root: Utf8PathBuf,
}

impl Fixture {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
        Self { _dir: dir, root }
    }

    /// Writes a file below the project root, creating parent directories.
    pub fn write(&self, relative: &str, body: &str) {
        let path = self.root.join(relative);
        std::fs::create_dir_all(path.parent().expect("parent dir").as_std_path())
            .expect("create parent dir");
        std::fs::write(path.as_std_path(), body).expect("write fixture file");
    }

    /// Project configuration with one `greetings` catalog in en/fr, English
    /// source and fallback, and a `pseudo` pseudo locale.
    pub fn config(&self) -> ProjectConfig {
        ProjectConfig {
            root_dir: Some(self.root.clone()),
            locales: vec!["en".to_owned(), "fr".to_owned(), "pseudo".to_owned()],
            catalogs: vec![CatalogConfig {
                path: "locales/{locale}/greetings".to_owned(),
                locales: None,
            }],
            source_locale: Some("en".to_owned()),
            fallback_locales: Some(FallbackLocales {
                default: Some("en".to_owned()),
                locales: BTreeMap::new(),
            }),
            pseudo_locale: Some("pseudo".to_owned()),
            format: CatalogFormat::Minimal,
        }
    }

    /// Absolute resource id for a locale's catalog file.
    pub fn resource(&self, locale: &str) -> String {
        self.root
            .join(format!("locales/{locale}/greetings.json"))
            .into_string()
    }
}

/// Build context capturing warnings and watch registrations.
#[derive(Default)]
pub struct RecordingContext {
    warnings: Mutex<Vec<String>>,
    watched: Mutex<Vec<Utf8PathBuf>>,
}

impl RecordingContext {
    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("warning mutex poisoned").clone()
    }

    pub fn watched(&self) -> Vec<Utf8PathBuf> {
        self.watched.lock().expect("watch mutex poisoned").clone()
    }
}

impl BuildContext for RecordingContext {
    fn add_watch_file(&self, path: &Utf8Path) {
        self.watched
            .lock()
            .expect("watch mutex poisoned")
            .push(path.to_owned());
    }

    fn warn(&self, message: &str) {
        self.warnings
            .lock()
            .expect("warning mutex poisoned")
            .push(message.to_owned());
    }
}
