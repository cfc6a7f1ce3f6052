//! Query-safety gate: admit a `SELECT` only when it reads allow-listed tables
//! or filters on an ownership column.
#![warn(missing_docs)]

/// Error type for parsing, configuration and report rendering.
pub mod error;
/// Table and filter-column extraction plus the admit/deny decision.
pub mod gate;
/// Per-statement verdict reports.
pub mod output;
/// SQL parsing, identifier normalization and operand classification.
pub mod parser;
/// Static gate configuration and its compiled form.
pub mod policy;

pub use error::GateError;
pub use gate::evaluator::{AdmitReason, Denial, SafetyEvaluator, Verdict};
pub use policy::config::SafetyConfig;
pub use policy::ownership::SafetyPolicy;
