use std::path::{Path, PathBuf};

use indexmap::IndexSet;

/// Ordered, de-duplicated list of directories. Entries are only ever
/// appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    entries: IndexSet<PathBuf>,
}

impl SearchPath {
    /// Appends `path` unless already present. Returns whether it was added.
    pub fn append(&mut self, path: impl Into<PathBuf>) -> bool {
        self.entries.insert(path.into())
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains(path)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_vec(&self) -> Vec<PathBuf> {
        self.entries.iter().cloned().collect()
    }
}
