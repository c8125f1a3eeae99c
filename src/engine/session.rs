//! Per-directory rename session: assembles batches, drives validation,
//! planning and execution, and owns the undo ledger.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::errors::BatchRenameError;

use super::batch::RenameBatch;
use super::execute::execute_steps;
use super::outcome::FailureOutcome;
use super::plan::{plan, steps, ExecutionPlan};
use super::sanitize::CharSubs;
use super::undo::UndoRecord;
use super::validate::{validate_end_state, CaseMode};

/// Engine-level options fixed for the lifetime of a session.
#[derive(Debug, Clone, Default)]
pub struct SessionOptions {
    pub substitutions: CharSubs,
    pub case_mode: CaseMode,
    /// Log planned renames without touching the filesystem.
    pub dry_run: bool,
}

/// Result of one executed (or dry-run) batch.
#[derive(Debug, Clone)]
pub struct RenameReport {
    pub plan: ExecutionPlan,
    /// Number of entries fully renamed.
    pub renamed: usize,
    pub failures: Vec<FailureOutcome>,
    pub cancelled: bool,
}

impl RenameReport {
    pub fn fully_succeeded(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }
}

/// One open directory context.
///
/// The undo record lives here rather than in process-wide state, so separate
/// sessions can never interfere. The session assumes it is not invoked
/// reentrantly while a rename or undo is in flight.
#[derive(Debug)]
pub struct Session {
    directory: PathBuf,
    options: SessionOptions,
    undo: Option<UndoRecord>,
}

impl Session {
    pub fn new(directory: impl Into<PathBuf>, options: SessionOptions) -> Self {
        Self {
            directory: directory.into(),
            options,
            undo: None,
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Point the session at a different directory. Drops the undo record:
    /// an undo may only replay renames in the directory they happened in.
    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.directory = directory.into();
        self.undo = None;
    }

    pub fn can_undo(&self) -> bool {
        self.undo.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// Rename files according to `(current name, raw candidate name)` pairs.
    ///
    /// Candidates are sanitized here; files present in the directory but
    /// absent from `candidates` join the batch as no-op entries so end-state
    /// validation sees every name the directory will contain.
    pub fn rename(
        &mut self,
        candidates: &[(String, String)],
    ) -> Result<RenameReport, BatchRenameError> {
        let subs = self.options.substitutions.clone();
        subs.validate().map_err(BatchRenameError::InvalidSubstitution)?;

        let mut empty: Vec<String> = Vec::new();
        let sanitized: Vec<(String, String)> = candidates
            .iter()
            .map(|(current, raw)| {
                let target = subs.sanitize(raw);
                if target.is_empty() {
                    empty.push(current.clone());
                }
                (current.clone(), target)
            })
            .collect();
        if !empty.is_empty() {
            return Err(BatchRenameError::EmptyTargetNames(empty));
        }

        self.run_batch(&sanitized)
    }

    /// Reverse the last executed batch.
    ///
    /// Builds a fresh batch from the stored record with the from/to roles
    /// swapped and re-runs planning from scratch: the reverse of a direct
    /// plan is not assumed to be direct. Pre-rename names came straight from
    /// disk, so no sanitization is applied. On completion the record is
    /// overwritten again, so a second undo reverses the undo.
    pub fn undo_last_batch(&mut self) -> Result<RenameReport, BatchRenameError> {
        let record = self
            .undo
            .take()
            .filter(|r| !r.is_empty())
            .ok_or(BatchRenameError::NothingToUndo)?;
        info!(entries = record.len(), directory = %self.directory.display(), "undoing last rename batch");
        match self.run_batch(&record.undo_pairs()) {
            Ok(report) => Ok(report),
            Err(e) => {
                // Rejection happens before any mutation; the record is still
                // valid and the undo may be retried once the obstruction is
                // cleared.
                self.undo = Some(record);
                Err(e)
            }
        }
    }

    /// Shared batch pipeline for rename and undo: assemble, validate, plan,
    /// execute, record.
    fn run_batch(
        &mut self,
        pairs: &[(String, String)],
    ) -> Result<RenameReport, BatchRenameError> {
        let batch = self.assemble_batch(pairs)?;
        let case = self.options.case_mode;

        if batch.changed_count() == 0 {
            debug!("batch has no changed entries; nothing to do");
            return Ok(RenameReport {
                plan: ExecutionPlan::Direct(super::validate::Direction::Forward),
                renamed: 0,
                failures: Vec::new(),
                cancelled: false,
            });
        }

        validate_end_state(&batch, case).map_err(BatchRenameError::DuplicateTargetNames)?;

        let chosen = plan(&batch, case);
        let rename_steps = steps(&batch, chosen, case);

        // Record the planned pairs before the first mutation, so a crash
        // mid-batch still leaves enough to recover whatever completed.
        let planned: Vec<(String, String)> = batch
            .changed()
            .map(|e| (e.current_name.clone(), e.target_name.clone()))
            .collect();
        if !self.options.dry_run {
            self.undo = Some(UndoRecord::from_pairs(&self.directory, &planned));
        }

        info!(
            directory = %self.directory.display(),
            entries = planned.len(),
            plan = ?chosen,
            dry_run = self.options.dry_run,
            "executing rename batch"
        );
        let report = execute_steps(&self.directory, &rename_steps, case, self.options.dry_run);

        // Keep only what actually happened: undo must not try to reverse
        // entries that never renamed.
        if !self.options.dry_run {
            self.undo = Some(UndoRecord::from_pairs(&self.directory, &report.completed));
        }

        if !report.failures.is_empty() {
            info!(
                failed = report.failures.len(),
                renamed = report.completed.len(),
                "rename batch partially completed"
            );
        }

        Ok(RenameReport {
            plan: chosen,
            renamed: report.completed.len(),
            failures: report.failures,
            cancelled: report.cancelled,
        })
    }

    /// Build the batch: the given pairs in order, then a no-op entry for
    /// every other file currently in the directory.
    fn assemble_batch(
        &self,
        pairs: &[(String, String)],
    ) -> Result<RenameBatch, BatchRenameError> {
        let mut batch = RenameBatch::new(&self.directory);
        for (current, target) in pairs {
            batch.push(current.clone(), target.clone());
        }

        let listing = fs::read_dir(&self.directory).map_err(|source| {
            BatchRenameError::DirectoryUnreadable {
                path: self.directory.clone(),
                source,
            }
        })?;
        let mut names: Vec<String> = listing
            .filter_map(|e| e.ok())
            .filter_map(|e| e.file_name().into_string().ok())
            .collect();
        names.sort();
        for name in names {
            if !pairs.iter().any(|(current, _)| current == &name) {
                batch.push_unchanged(name);
            }
        }
        Ok(batch)
    }
}
