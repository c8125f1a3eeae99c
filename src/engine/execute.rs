//! Rename execution: issues the planned renames one at a time, diagnoses
//! failures, and never lets one failed entry abort the rest of the batch.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use crate::shutdown;

use super::outcome::{FailReason, FailureOutcome};
use super::plan::RenameStep;
use super::sanitize::FORBIDDEN_CHARS;
use super::validate::CaseMode;

/// What actually happened when a plan was executed.
#[derive(Debug, Clone, Default)]
pub struct ExecutionReport {
    /// (pre-rename name, post-rename name) for every fully renamed entry,
    /// in execution order. These are the pairs undo must reverse.
    pub completed: Vec<(String, String)>,
    pub failures: Vec<FailureOutcome>,
    /// True when a cooperative cancel stopped the batch early. Completed
    /// renames are kept; the caller may undo them.
    pub cancelled: bool,
}

impl ExecutionReport {
    pub fn fully_succeeded(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

/// Execute the planned steps strictly in order.
///
/// Renames are issued one at a time; the ordering argument for collision
/// freedom assumes no concurrent mutation from this engine. Cancellation is
/// honored only between steps. With `dry_run` set, steps are logged and
/// counted as successful but no filesystem call is made.
pub fn execute_steps(
    directory: &Path,
    steps: &[RenameStep],
    case: CaseMode,
    dry_run: bool,
) -> ExecutionReport {
    let mut report = ExecutionReport::default();
    // Rows whose earlier step failed; their later steps are skipped.
    let mut failed_rows: HashSet<usize> = HashSet::new();

    for step in steps {
        if shutdown::is_requested() {
            info!(remaining = steps.len() - report.completed.len(), "rename batch cancelled between steps");
            report.cancelled = true;
            break;
        }
        if failed_rows.contains(&step.row_index) {
            continue;
        }

        if dry_run {
            info!(from = %step.from, to = %step.to, "dry-run: would rename");
            if let Some(original) = &step.restore {
                report.completed.push((original.clone(), step.to.clone()));
            } else if step.to == step.attempted {
                report.completed.push((step.from.clone(), step.to.clone()));
            }
            continue;
        }

        let src = directory.join(&step.from);
        let dst = directory.join(&step.to);

        // Unix rename(2) silently replaces an existing destination, so probe
        // first. A case-only rename legitimately finds "itself" at the
        // destination and is allowed through.
        if !case.eq(&step.from, &step.to) && fs::symlink_metadata(&dst).is_ok() {
            record_failure(&mut report, &mut failed_rows, step, directory, None);
            restore_original_name(step, directory);
            continue;
        }

        match fs::rename(&src, &dst) {
            Ok(()) => {
                debug!(from = %step.from, to = %step.to, "renamed");
                if let Some(original) = &step.restore {
                    // Final pass of an intermediate plan: the entry is done.
                    report.completed.push((original.clone(), step.to.clone()));
                } else if step.to == step.attempted {
                    report.completed.push((step.from.clone(), step.to.clone()));
                }
                // Temporary-name steps complete silently; the entry is
                // recorded when its final pass lands.
            }
            Err(e) => {
                record_failure(&mut report, &mut failed_rows, step, directory, Some(&e));
                restore_original_name(step, directory);
            }
        }
    }

    report
}

/// A failed final pass of an intermediate plan leaves the file under its
/// temporary name; put the original name back so nothing is stranded.
/// No-op for direct steps (`restore` is None).
fn restore_original_name(step: &RenameStep, directory: &Path) {
    if let Some(original) = &step.restore {
        let temp = directory.join(&step.from);
        let back = directory.join(original);
        if let Err(e) = fs::rename(&temp, &back) {
            warn!(
                temp = %step.from,
                original = %original,
                error = %e,
                "could not restore original name after failed final rename"
            );
        }
    }
}

fn record_failure(
    report: &mut ExecutionReport,
    failed_rows: &mut HashSet<usize>,
    step: &RenameStep,
    directory: &Path,
    err: Option<&io::Error>,
) {
    let src = directory.join(&step.from);
    let dst = directory.join(&step.to);
    let reason = diagnose(&src, &dst, err, &step.attempted);
    let current = step.restore.clone().unwrap_or_else(|| step.from.clone());
    warn!(
        current = %current,
        attempted = %step.attempted,
        %reason,
        "rename failed"
    );
    report.failures.push(FailureOutcome {
        current_name: current,
        attempted_name: step.attempted.clone(),
        reason,
    });
    failed_rows.insert(step.row_index);
}

/// Classify a failed rename by re-probing the filesystem, since the rename
/// call itself does not say why it failed.
fn diagnose(src: &Path, dst: &Path, err: Option<&io::Error>, attempted: &str) -> FailReason {
    if fs::symlink_metadata(dst).is_ok() {
        return FailReason::NameExists;
    }
    if fs::symlink_metadata(src).is_err() {
        return FailReason::SourceMissing;
    }
    if let Some(e) = err {
        if e.kind() == io::ErrorKind::PermissionDenied {
            return FailReason::PermissionDenied;
        }
    }
    if attempted.is_empty() || attempted.chars().any(|c| FORBIDDEN_CHARS.contains(&c)) {
        return FailReason::InvalidName;
    }
    FailReason::Unknown
}
