//! Sent-set store: the durable list of page IDs that were already delivered.
//!
//! The file is a JSON array of strings, indented with four spaces. It is read
//! once per run and rewritten in full after every successful delivery. There
//! is no locking; two concurrent runs against the same file will race.

use std::collections::HashSet;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use penugasan_common::error::{AppError, AppResult};

/// In-memory view of the sent-ID file, preserving insertion order.
#[derive(Debug)]
pub struct SentStore {
    path: PathBuf,
    ids: Vec<String>,
    index: HashSet<String>,
}

impl SentStore {
    /// Load the store from `path`. A missing or blank file yields an empty set.
    ///
    /// Duplicate IDs in the file are collapsed, keeping first-seen order.
    pub fn load(path: impl Into<PathBuf>) -> AppResult<Self> {
        let path = path.into();

        let ids: Vec<String> = match std::fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => Vec::new(),
            Ok(contents) => serde_json::from_str(&contents).map_err(|e| {
                AppError::Store(format!(
                    "{} is not a JSON array of IDs: {e}",
                    path.display()
                ))
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "No sent-ID file yet, starting empty");
                Vec::new()
            }
            Err(e) => return Err(e.into()),
        };

        let mut store = Self::empty(path);
        for id in ids {
            store.insert(id);
        }

        tracing::debug!(path = %store.path.display(), count = store.len(), "Loaded sent IDs");
        Ok(store)
    }

    /// A store with no IDs that will persist to `path`.
    pub fn empty(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ids: Vec::new(),
            index: HashSet::new(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// Add `id` in memory. Returns `false` if it was already present.
    pub fn insert(&mut self, id: impl Into<String>) -> bool {
        let id = id.into();
        if !self.index.insert(id.clone()) {
            return false;
        }
        self.ids.push(id);
        true
    }

    /// Overwrite the backing file with the complete set.
    ///
    /// Writes to a sibling `.tmp` file first and renames it into place, so a
    /// crash mid-write leaves the previous contents intact.
    pub fn save(&self) -> AppResult<()> {
        let mut buf = Vec::new();
        let mut ser =
            serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
        self.ids.serialize(&mut ser)?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let tmp_path = tmp_path_for(&self.path);
        std::fs::write(&tmp_path, &buf)?;
        std::fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".tmp");
    PathBuf::from(name)
}
