//! Typed error definitions for batch_rename.
//! Validation errors reject a whole batch before any filesystem mutation;
//! per-entry execution failures are reported as outcomes, not errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::validate::Collision;

#[derive(Debug, Error)]
pub enum BatchRenameError {
    #[error("conflicting target names: {}", format_collisions(.0))]
    DuplicateTargetNames(Vec<Collision>),

    #[error("target name is empty after sanitization for: {}", .0.join(", "))]
    EmptyTargetNames(Vec<String>),

    #[error("nothing to undo: no rename batch has been executed in this session")]
    NothingToUndo,

    #[error("cannot read directory '{}'", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid character substitution: {0}")]
    InvalidSubstitution(String),
}

impl BatchRenameError {
    /// Stable short code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            BatchRenameError::DuplicateTargetNames(_) => "duplicate_targets",
            BatchRenameError::EmptyTargetNames(_) => "empty_targets",
            BatchRenameError::NothingToUndo => "nothing_to_undo",
            BatchRenameError::DirectoryUnreadable { .. } => "directory_unreadable",
            BatchRenameError::InvalidSubstitution(_) => "invalid_substitution",
        }
    }
}

fn format_collisions(collisions: &[Collision]) -> String {
    collisions
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
