//! Rename planning: choose a collision-safe execution order and expand it
//! into the linear sequence of filesystem operations.

use std::collections::HashSet;

use tracing::debug;

use super::batch::RenameBatch;
use super::validate::{validate_order, CaseMode, Direction};

/// Prefix of generated intermediate names. Deliberately unlikely to collide
/// with real files; uniqueness is still checked against the whole batch.
pub const INTERMEDIATE_PREFIX: &str = ".batch_rename.intermediate.";

/// Strategy chosen for a batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPlan {
    /// Single linear pass in the given direction.
    Direct(Direction),
    /// Two passes through generated temporary names. Handles cycles and
    /// permutation structures no single linear order can satisfy.
    Intermediate,
}

/// One filesystem rename to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameStep {
    pub row_index: usize,
    /// Name on disk before this step.
    pub from: String,
    /// Name on disk after this step.
    pub to: String,
    /// The user-meaningful destination, for failure reporting. Differs from
    /// `to` only for the temporary-name pass of an intermediate plan.
    pub attempted: String,
    /// Original on-disk name to restore if this step fails, set only for the
    /// final pass of an intermediate plan.
    pub restore: Option<String>,
}

/// Decide the execution strategy for a batch.
///
/// Forward is preferred when both direct orders validate, so plans are
/// stable and predictable. Never touches the filesystem.
pub fn plan(batch: &RenameBatch, case: CaseMode) -> ExecutionPlan {
    if validate_order(batch, Direction::Forward, case) {
        debug!(entries = batch.changed_count(), "planned direct forward pass");
        ExecutionPlan::Direct(Direction::Forward)
    } else if validate_order(batch, Direction::Backward, case) {
        debug!(entries = batch.changed_count(), "planned direct backward pass");
        ExecutionPlan::Direct(Direction::Backward)
    } else {
        debug!(
            entries = batch.changed_count(),
            "no conflict-free linear order; planned intermediate two-phase pass"
        );
        ExecutionPlan::Intermediate
    }
}

/// Expand a plan into the exact sequence of renames to issue, in order.
pub fn steps(batch: &RenameBatch, plan: ExecutionPlan, case: CaseMode) -> Vec<RenameStep> {
    match plan {
        ExecutionPlan::Direct(Direction::Forward) => direct_steps(batch, false),
        ExecutionPlan::Direct(Direction::Backward) => direct_steps(batch, true),
        ExecutionPlan::Intermediate => intermediate_steps(batch, case),
    }
}

fn direct_steps(batch: &RenameBatch, reverse: bool) -> Vec<RenameStep> {
    let mut out: Vec<RenameStep> = batch
        .changed()
        .map(|e| RenameStep {
            row_index: e.row_index,
            from: e.current_name.clone(),
            to: e.target_name.clone(),
            attempted: e.target_name.clone(),
            restore: None,
        })
        .collect();
    if reverse {
        out.reverse();
    }
    out
}

fn intermediate_steps(batch: &RenameBatch, case: CaseMode) -> Vec<RenameStep> {
    // Every current and target name in the batch is off-limits for temporaries.
    let mut taken: HashSet<String> = HashSet::new();
    for e in &batch.entries {
        taken.insert(case.key(&e.current_name));
        taken.insert(case.key(&e.target_name));
    }

    let mut pass1 = Vec::new();
    let mut pass2 = Vec::new();
    for e in batch.changed() {
        let temp = intermediate_name(e.row_index, &taken, case);
        taken.insert(case.key(&temp));
        pass1.push(RenameStep {
            row_index: e.row_index,
            from: e.current_name.clone(),
            to: temp.clone(),
            attempted: e.target_name.clone(),
            restore: None,
        });
        pass2.push(RenameStep {
            row_index: e.row_index,
            from: temp,
            to: e.target_name.clone(),
            attempted: e.target_name.clone(),
            restore: Some(e.current_name.clone()),
        });
    }
    pass1.extend(pass2);
    pass1
}

/// Deterministic temporary name for a row, bumped until it is free of the
/// batch namespace.
fn intermediate_name(row_index: usize, taken: &HashSet<String>, case: CaseMode) -> String {
    let mut candidate = format!("{INTERMEDIATE_PREFIX}{row_index:04}.tmp");
    let mut bump = 0u32;
    while taken.contains(&case.key(&candidate)) {
        bump += 1;
        candidate = format!("{INTERMEDIATE_PREFIX}{row_index:04}.{bump}.tmp");
    }
    candidate
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn batch(entries: &[(&str, &str)]) -> RenameBatch {
        let mut b = RenameBatch::new("/tmp/dir");
        for (cur, tgt) in entries {
            b.push(*cur, *tgt);
        }
        b
    }

    #[test]
    fn forward_preferred_when_both_orders_valid() {
        let b = batch(&[("a", "x"), ("b", "y")]);
        assert_eq!(plan(&b, CaseMode::Sensitive), ExecutionPlan::Direct(Direction::Forward));
    }

    #[test]
    fn shift_down_chain_plans_backward() {
        let b = batch(&[("IMG1.JPG", "IMG2.JPG"), ("IMG2.JPG", "IMG3.JPG")]);
        let p = plan(&b, CaseMode::Sensitive);
        assert_eq!(p, ExecutionPlan::Direct(Direction::Backward));
        let s = steps(&b, p, CaseMode::Sensitive);
        assert_eq!(s[0].from, "IMG2.JPG");
        assert_eq!(s[1].from, "IMG1.JPG");
    }

    #[test]
    fn cycle_plans_intermediate_never_direct() {
        let b = batch(&[("a", "b"), ("b", "a")]);
        assert_eq!(plan(&b, CaseMode::Sensitive), ExecutionPlan::Intermediate);
    }

    #[test]
    fn three_cycle_plans_intermediate() {
        let b = batch(&[("a", "b"), ("b", "c"), ("c", "a")]);
        assert_eq!(plan(&b, CaseMode::Sensitive), ExecutionPlan::Intermediate);
    }

    #[test]
    fn intermediate_steps_are_two_phases_with_unique_temps() {
        let b = batch(&[("a", "b"), ("b", "a"), ("keep", "keep")]);
        let s = steps(&b, ExecutionPlan::Intermediate, CaseMode::Sensitive);
        assert_eq!(s.len(), 4);
        let temps: HashSet<&str> = s[..2].iter().map(|st| st.to.as_str()).collect();
        assert_eq!(temps.len(), 2);
        for t in &temps {
            assert!(t.starts_with(INTERMEDIATE_PREFIX));
        }
        // Second phase renames each temp to its final target and can restore.
        assert_eq!(s[2].to, "b");
        assert_eq!(s[2].restore.as_deref(), Some("a"));
        assert_eq!(s[3].to, "a");
        assert_eq!(s[3].restore.as_deref(), Some("b"));
    }

    #[test]
    fn temp_name_avoids_batch_namespace() {
        let clash = format!("{INTERMEDIATE_PREFIX}0000.tmp");
        let b = batch(&[("a", "b"), ("b", "a"), (&clash, &clash)]);
        let s = steps(&b, ExecutionPlan::Intermediate, CaseMode::Sensitive);
        assert!(s.iter().all(|st| st.to != clash && st.from != clash || st.from == st.to));
        assert_ne!(s[0].to, clash);
    }

    /// Simulate an accepted plan against an in-memory name set: at no point
    /// may a destination already be occupied by a different file.
    fn simulate(entries: &[(&str, &str)], case: CaseMode) {
        let b = batch(entries);
        if super::super::validate::validate_end_state(&b, case).is_err() {
            panic!("simulation expects an accepted batch");
        }
        let p = plan(&b, case);
        let s = steps(&b, p, case);
        let mut on_disk: HashSet<String> =
            b.entries.iter().map(|e| case.key(&e.current_name)).collect();
        for step in &s {
            let from = case.key(&step.from);
            let to = case.key(&step.to);
            assert!(on_disk.contains(&from), "source '{}' missing", step.from);
            if from != to {
                assert!(!on_disk.contains(&to), "collision on '{}'", step.to);
            }
            on_disk.remove(&from);
            on_disk.insert(to);
        }
    }

    #[test]
    fn simulated_plans_are_collision_free() {
        simulate(&[("a", "x"), ("b", "y")], CaseMode::Sensitive);
        simulate(&[("IMG1.JPG", "IMG2.JPG"), ("IMG2.JPG", "IMG3.JPG")], CaseMode::Sensitive);
        simulate(&[("a", "b"), ("b", "a")], CaseMode::Sensitive);
        simulate(&[("a", "b"), ("b", "c"), ("c", "a"), ("z", "z")], CaseMode::Sensitive);
        simulate(&[("1", "2"), ("2", "3"), ("3", "4"), ("4", "1")], CaseMode::Sensitive);
    }
}
