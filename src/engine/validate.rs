//! Conflict validation: end-state collision checks and execution-order checks.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::batch::RenameBatch;

/// Name-comparison semantics of the target filesystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CaseMode {
    /// Names differing only in case are distinct (typical Unix).
    Sensitive,
    /// Names differing only in case collide (Windows, default macOS).
    /// The default: a batch valid under it is valid on every filesystem.
    #[default]
    Insensitive,
}

impl CaseMode {
    /// Comparison key for a file name under this mode.
    pub fn key(&self, name: &str) -> String {
        match self {
            CaseMode::Sensitive => name.to_owned(),
            CaseMode::Insensitive => name.to_lowercase(),
        }
    }

    pub fn eq(&self, a: &str, b: &str) -> bool {
        match self {
            CaseMode::Sensitive => a == b,
            CaseMode::Insensitive => a.to_lowercase() == b.to_lowercase(),
        }
    }
}

/// Direction of a single-pass execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// One name claimed by more than one entry in the batch end state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    /// The contested final name (first spelling seen).
    pub name: String,
    /// Current names of every entry that would end up holding it.
    pub holders: Vec<String>,
}

impl fmt::Display for Collision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "'{}' claimed by {}", self.name, self.holders.join(", "))
    }
}

/// Check that applying every rename simultaneously yields a directory with no
/// duplicate names.
///
/// The end-state name of a changing entry is its target; the end-state name
/// of a no-op entry is its current name. Any name claimed twice (under the
/// configured case mode) rejects the whole batch before any filesystem call.
pub fn validate_end_state(batch: &RenameBatch, case: CaseMode) -> Result<(), Vec<Collision>> {
    // key -> (display spelling, holders' current names), insertion-ordered
    let mut claims: HashMap<String, (String, Vec<String>)> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for entry in &batch.entries {
        let final_name = if entry.is_changed() {
            &entry.target_name
        } else {
            &entry.current_name
        };
        let key = case.key(final_name);
        let slot = claims.entry(key.clone()).or_insert_with(|| {
            order.push(key);
            (final_name.clone(), Vec::new())
        });
        slot.1.push(entry.current_name.clone());
    }

    let collisions: Vec<Collision> = order
        .into_iter()
        .filter_map(|key| {
            let (name, holders) = claims.remove(&key)?;
            if holders.len() > 1 {
                Some(Collision { name, holders })
            } else {
                None
            }
        })
        .collect();

    if collisions.is_empty() {
        Ok(())
    } else {
        Err(collisions)
    }
}

/// Check whether executing the changing entries strictly in the given order
/// completes without two files ever sharing a name on disk.
///
/// A linear order is safe iff at the moment each rename is applied, no
/// not-yet-processed entry still occupies the destination name. Entries
/// processed earlier have already been renamed away; an entry may occupy its
/// own target's key (a case-only rename of itself).
pub fn validate_order(batch: &RenameBatch, direction: Direction, case: CaseMode) -> bool {
    // Current names are unique within a directory listing, so the key map is
    // well-defined.
    let occupied: HashMap<String, usize> = batch
        .entries
        .iter()
        .map(|e| (case.key(&e.current_name), e.row_index))
        .collect();

    for entry in batch.changed() {
        if let Some(&holder) = occupied.get(&case.key(&entry.target_name)) {
            let blocked = match direction {
                Direction::Forward => holder > entry.row_index,
                Direction::Backward => holder < entry.row_index,
            };
            if blocked {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn batch(entries: &[(&str, &str)]) -> RenameBatch {
        let mut b = RenameBatch::new("/tmp/dir");
        for (cur, tgt) in entries {
            b.push(*cur, *tgt);
        }
        b
    }

    #[test]
    fn accepts_disjoint_targets() {
        let b = batch(&[("a", "x"), ("b", "y"), ("c", "c")]);
        assert!(validate_end_state(&b, CaseMode::Sensitive).is_ok());
    }

    #[test]
    fn rejects_duplicate_targets_naming_both_holders() {
        let b = batch(&[("a", "x"), ("b", "x")]);
        let collisions = validate_end_state(&b, CaseMode::Sensitive).unwrap_err();
        assert_eq!(collisions.len(), 1);
        assert_eq!(collisions[0].name, "x");
        assert_eq!(collisions[0].holders, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn rejects_target_held_by_unrelated_file() {
        let mut b = batch(&[("a", "kept")]);
        b.push_unchanged("kept");
        let collisions = validate_end_state(&b, CaseMode::Sensitive).unwrap_err();
        assert_eq!(collisions[0].holders, vec!["a".to_string(), "kept".to_string()]);
    }

    #[test]
    fn case_insensitive_mode_collides_across_case() {
        let b = batch(&[("a", "Name.txt"), ("b", "name.TXT")]);
        assert!(validate_end_state(&b, CaseMode::Sensitive).is_ok());
        assert!(validate_end_state(&b, CaseMode::Insensitive).is_err());
    }

    #[test]
    fn shift_down_chain_is_backward_valid_only() {
        // IMG1 -> IMG2 is blocked forward because IMG2 still exists at j > i.
        let b = batch(&[("IMG1.JPG", "IMG2.JPG"), ("IMG2.JPG", "IMG3.JPG")]);
        assert!(!validate_order(&b, Direction::Forward, CaseMode::Sensitive));
        assert!(validate_order(&b, Direction::Backward, CaseMode::Sensitive));
    }

    #[test]
    fn shift_up_chain_is_forward_valid_only() {
        let b = batch(&[("IMG2.JPG", "IMG1.JPG"), ("IMG3.JPG", "IMG2.JPG")]);
        assert!(validate_order(&b, Direction::Forward, CaseMode::Sensitive));
        assert!(!validate_order(&b, Direction::Backward, CaseMode::Sensitive));
    }

    #[test]
    fn swap_cycle_fails_both_directions() {
        let b = batch(&[("a", "b"), ("b", "a")]);
        assert!(!validate_order(&b, Direction::Forward, CaseMode::Sensitive));
        assert!(!validate_order(&b, Direction::Backward, CaseMode::Sensitive));
    }

    #[test]
    fn case_only_self_rename_is_not_a_block() {
        let b = batch(&[("readme.txt", "README.txt")]);
        assert!(validate_order(&b, Direction::Forward, CaseMode::Insensitive));
        assert!(validate_order(&b, Direction::Backward, CaseMode::Insensitive));
    }
}
