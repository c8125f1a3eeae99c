//! Batch data model: one rename operation over one directory.

use std::path::{Path, PathBuf};

/// One file participating in a rename operation.
///
/// `current_name` is the name on disk when the batch was assembled and is
/// fixed for the lifetime of the batch. `target_name` is the sanitized
/// candidate; when it equals `current_name` the entry is a no-op and is
/// excluded from execution (but still occupies its name during validation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEntry {
    pub current_name: String,
    pub target_name: String,
    /// Stable position correlating the entry with the source of its
    /// candidate name. Not a filesystem concept.
    pub row_index: usize,
}

impl RenameEntry {
    pub fn is_changed(&self) -> bool {
        self.current_name != self.target_name
    }
}

/// An ordered set of [`RenameEntry`] for a single directory.
///
/// Constructed fresh for every rename or undo invocation and discarded after
/// execution; never persisted.
#[derive(Debug, Clone)]
pub struct RenameBatch {
    pub directory: PathBuf,
    pub entries: Vec<RenameEntry>,
}

impl RenameBatch {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            entries: Vec::new(),
        }
    }

    /// Append an entry, assigning the next row index.
    pub fn push(&mut self, current_name: impl Into<String>, target_name: impl Into<String>) {
        let row_index = self.entries.len();
        self.entries.push(RenameEntry {
            current_name: current_name.into(),
            target_name: target_name.into(),
            row_index,
        });
    }

    /// Append a no-op entry for a file that keeps its name. These matter for
    /// end-state validation: a target colliding with an untouched file must
    /// reject the batch.
    pub fn push_unchanged(&mut self, name: impl Into<String>) {
        let name = name.into();
        let row_index = self.entries.len();
        self.entries.push(RenameEntry {
            current_name: name.clone(),
            target_name: name,
            row_index,
        });
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Entries whose name actually changes.
    pub fn changed(&self) -> impl Iterator<Item = &RenameEntry> {
        self.entries.iter().filter(|e| e.is_changed())
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }
}
