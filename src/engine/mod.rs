//! The rename engine: sanitization, conflict validation, order planning,
//! execution, and undo.

pub mod batch;
pub mod execute;
pub mod outcome;
pub mod plan;
pub mod sanitize;
pub mod session;
pub mod undo;
pub mod validate;

pub use batch::{RenameBatch, RenameEntry};
pub use execute::{execute_steps, ExecutionReport};
pub use outcome::{FailReason, FailureOutcome};
pub use plan::{plan, steps, ExecutionPlan, RenameStep, INTERMEDIATE_PREFIX};
pub use sanitize::{strip_invalid_trailing, CharSubs, FORBIDDEN_CHARS};
pub use session::{RenameReport, Session, SessionOptions};
pub use undo::UndoRecord;
pub use validate::{validate_end_state, validate_order, CaseMode, Collision, Direction};
