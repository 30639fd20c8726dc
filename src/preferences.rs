//! Persisted user preferences.
//!
//! Preferences live in a flat YAML mapping of string keys to string values:
//!
//! ```yaml
//! settings_order_by_key: newest
//! settings_sections_key: world
//! ```
//!
//! Values are handed back exactly as stored. Nothing here checks that an
//! order or section is one the API accepts.

use crate::models::SortOrder;
use std::collections::BTreeMap;
use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Key holding the `order-by` value.
pub const ORDER_BY_KEY: &str = "settings_order_by_key";
/// Key holding the `sectionId` value.
pub const SECTIONS_KEY: &str = "settings_sections_key";

/// Section used when none is stored.
pub const DEFAULT_SECTION: &str = "world";

/// A key-value preference store backed by a YAML file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl Preferences {
    /// Load preferences from `path`.
    ///
    /// A missing file yields an empty store, so every lookup falls back to
    /// its default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but can't be read or isn't a
    /// mapping of strings to strings.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let path = path.as_ref().to_path_buf();
        let entries: BTreeMap<String, String> = match fs::read_to_string(&path).await {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => serde_yaml::from_str(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No preference file; using defaults");
                BTreeMap::new()
            }
            Err(e) => return Err(Box::new(e)),
        };
        info!(count = entries.len(), "Loaded preferences");
        Ok(Self { path, entries })
    }

    /// Look up `key`, falling back to `default` when it isn't stored.
    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.entries
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    pub fn set_string(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// The stored sort order, `newest` by default.
    pub fn order_by(&self) -> String {
        self.get_string(ORDER_BY_KEY, SortOrder::default().as_str())
    }

    /// The stored section filter, [`DEFAULT_SECTION`] by default.
    pub fn section(&self) -> String {
        self.get_string(SECTIONS_KEY, DEFAULT_SECTION)
    }

    /// Write the store back to the file it was loaded from.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub async fn save(&self) -> Result<(), Box<dyn Error>> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let yaml = serde_yaml::to_string(&self.entries)?;
        fs::write(&self.path, yaml).await?;
        info!(count = self.entries.len(), "Saved preferences");
        Ok(())
    }
}
