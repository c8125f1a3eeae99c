//! Per-entry execution outcomes and failure-reason diagnosis types.

use std::fmt;

use serde::Serialize;

/// Diagnosed reason a single rename failed. `std::fs::rename` reports little
/// on its own, so the executor re-probes the filesystem to classify failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FailReason {
    /// A file with the attempted name already exists.
    NameExists,
    /// The source file no longer exists.
    SourceMissing,
    /// The process lacks permission to rename the file.
    PermissionDenied,
    /// The attempted name is structurally invalid for the filesystem.
    InvalidName,
    /// Could not be determined.
    Unknown,
}

impl fmt::Display for FailReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailReason::NameExists => "a file with the new name already exists",
            FailReason::SourceMissing => "the file no longer exists",
            FailReason::PermissionDenied => "permission denied",
            FailReason::InvalidName => "the new name is not valid",
            FailReason::Unknown => "unknown reason",
        };
        f.write_str(s)
    }
}

/// Result of one failed rename attempt, suitable for direct display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureOutcome {
    pub current_name: String,
    pub attempted_name: String,
    pub reason: FailReason,
}

impl fmt::Display for FailureOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' -> '{}': {}",
            self.current_name, self.attempted_name, self.reason
        )
    }
}
