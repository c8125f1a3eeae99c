//! Core library for `batch_rename`.
//!
//! Batch file renaming with real safety guarantees: candidate names are
//! sanitized, the end state is validated to be collision-free, execution
//! order is chosen so no two files ever share a name on disk (falling back
//! to a two-phase intermediate-name pass for cycles), failures are diagnosed
//! per file, and the last batch can be undone.
//!
//! The [`engine::Session`] type is the main entry point; everything else is
//! plumbing around it.

pub mod cli;
pub mod config;
pub mod engine;
pub mod errors;
pub mod output;
pub mod shutdown;

pub use config::{Config, LogLevel};
pub use engine::{
    CaseMode, CharSubs, ExecutionPlan, FailReason, FailureOutcome, RenameReport, Session,
    SessionOptions, UndoRecord,
};
pub use errors::BatchRenameError;
