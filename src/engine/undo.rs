//! The undo ledger: the only state that outlives a batch.

use std::path::{Path, PathBuf};

/// Record of the last executed batch, kept in memory only.
///
/// `from` holds the post-rename names and `to` the pre-rename names, so that
/// replaying `from[i] -> to[i]` reverses the batch. Overwritten before every
/// execution with the planned pairs, rewritten afterwards with only the pairs
/// that actually succeeded, and swapped by undo so a second undo reverses the
/// first. No on-disk persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    pub directory: PathBuf,
    pub from: Vec<String>,
    pub to: Vec<String>,
}

impl UndoRecord {
    /// Build a record from (pre-rename, post-rename) pairs.
    pub fn from_pairs(directory: impl Into<PathBuf>, pairs: &[(String, String)]) -> Self {
        Self {
            directory: directory.into(),
            from: pairs.iter().map(|(_, post)| post.clone()).collect(),
            to: pairs.iter().map(|(pre, _)| pre.clone()).collect(),
        }
    }

    /// The (current name, target name) pairs an undo batch must execute.
    pub fn undo_pairs(&self) -> Vec<(String, String)> {
        self.from
            .iter()
            .cloned()
            .zip(self.to.iter().cloned())
            .collect()
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_empty()
    }

    pub fn len(&self) -> usize {
        self.from.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pairs_stores_post_as_from() {
        let rec = UndoRecord::from_pairs(
            "/tmp/d",
            &[("old1".into(), "new1".into()), ("old2".into(), "new2".into())],
        );
        assert_eq!(rec.from, vec!["new1", "new2"]);
        assert_eq!(rec.to, vec!["old1", "old2"]);
    }

    #[test]
    fn undo_pairs_reverse_the_batch() {
        let rec = UndoRecord::from_pairs("/tmp/d", &[("old".into(), "new".into())]);
        assert_eq!(rec.undo_pairs(), vec![("new".to_string(), "old".to_string())]);
    }
}
