//! Locally persisted list preferences.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::error::Result;

/// First page number.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when no valid preference is stored.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Page sizes offered by list screens.
pub const PAGE_SIZE_OPTIONS: [u32; 4] = [10, 20, 50, 100];

/// Page-size preferences stored as a JSON object in a file.
///
/// Keys are list identifiers such as `attributes`. Stored values that are
/// not positive integers are ignored on read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeStore {
    path: PathBuf,
}

impl PageSizeStore {
    /// Opens the store at `path`; the file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BTreeMap<String, Value> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                if e.kind() != ErrorKind::NotFound {
                    debug!(path = %self.path.display(), error = %e, "cannot read page size store");
                }
                return BTreeMap::new();
            }
        };
        serde_json::from_str(&text).unwrap_or_default()
    }

    /// Returns the stored page size for `key`, if valid.
    pub fn get(&self, key: &str) -> Option<u32> {
        let value = self.read_all().remove(key)?;
        let size = match value {
            Value::Number(n) => n.as_u64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }?;
        u32::try_from(size).ok().filter(|&s| s > 0)
    }

    /// Returns the stored page size for `key`, or [`DEFAULT_PAGE_SIZE`].
    pub fn get_or_default(&self, key: &str) -> u32 {
        self.get(key).unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Stores the page size for `key`.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be written.
    pub fn set(&self, key: &str, size: u32) -> Result<()> {
        let mut all = self.read_all();
        all.insert(key.to_string(), Value::from(size));
        fs::write(&self.path, serde_json::to_string_pretty(&all)?)?;
        Ok(())
    }
}
