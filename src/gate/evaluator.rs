use std::fmt;

use serde::Serialize;
use sqlparser::ast::Statement;

use crate::error::GateError;
use crate::gate::columns::extract_filter_columns;
use crate::gate::tables::{extract_tables, FromScope};
use crate::policy::config::SafetyConfig;
use crate::policy::ownership::SafetyPolicy;

/// Why a statement was let through.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdmitReason {
    /// Every table read is allow-listed (vacuously true when none was recognized).
    AllTablesSafe,
    /// A filter pins an ownership column to a literal.
    OwnershipColumn {
        /// Qualified column that matched.
        column: String,
        /// Configured pattern it matched.
        pattern: String,
    },
}

impl fmt::Display for AdmitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AdmitReason::AllTablesSafe => write!(f, "all tables safe"),
            AdmitReason::OwnershipColumn { column, pattern } => {
                write!(f, "ownership column {column} ~ {pattern}")
            }
        }
    }
}

/// Diagnostic record of a rejected statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Denial {
    /// Caller/request identifier supplied to the check.
    pub caller_id: u32,
    /// Tables the statement reads.
    pub tables: Vec<String>,
    /// Columns filtered against literals, none of which is an ownership column.
    pub columns: Vec<String>,
}

impl Denial {
    /// Table names joined with commas.
    pub fn joined_tables(&self) -> String {
        self.tables.join(",")
    }

    /// Column names joined with commas.
    pub fn joined_columns(&self) -> String {
        self.columns.join(",")
    }
}

/// Outcome of evaluating one statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum Verdict {
    /// The statement may run.
    Admit {
        /// Tables the statement reads.
        tables: Vec<String>,
        /// Evidence of safety.
        reason: AdmitReason,
    },
    /// The statement must not run.
    Deny(Denial),
}

impl Verdict {
    /// Returns `true` for [`Verdict::Admit`].
    pub fn is_admitted(&self) -> bool {
        matches!(self, Verdict::Admit { .. })
    }

    /// Tables the statement reads.
    pub fn tables(&self) -> &[String] {
        match self {
            Verdict::Admit { tables, .. } => tables,
            Verdict::Deny(denial) => &denial.tables,
        }
    }
}

/// Decides whether a statement may run without a row-ownership filter.
///
/// Holds only the compiled, immutable policy; share it behind an `Arc` across
/// connections.
#[derive(Debug, Clone, Default)]
pub struct SafetyEvaluator {
    policy: SafetyPolicy,
}

impl SafetyEvaluator {
    /// Create an evaluator over a compiled policy.
    pub fn new(policy: SafetyPolicy) -> Self {
        Self { policy }
    }

    /// Compile a configuration and wrap it in an evaluator.
    pub fn from_config(config: &SafetyConfig) -> Result<Self, GateError> {
        Ok(Self::new(SafetyPolicy::compile(config)?))
    }

    /// The policy this evaluator enforces.
    pub fn policy(&self) -> &SafetyPolicy {
        &self.policy
    }

    /// Admit/deny decision for `stmt`. Denials are logged with `caller_id`.
    pub fn check(&self, stmt: &Statement, caller_id: u32) -> bool {
        self.evaluate(stmt, caller_id).is_admitted()
    }

    /// Full decision for `stmt`, including the evidence behind it.
    pub fn evaluate(&self, stmt: &Statement, caller_id: u32) -> Verdict {
        let tables = extract_tables(stmt);
        if tables.iter().all(|table| self.policy.is_safe_table(table)) {
            log::debug!("caller {caller_id}: admitted, all tables safe [{}]", tables.join(","));
            return Verdict::Admit {
                tables,
                reason: AdmitReason::AllTablesSafe,
            };
        }

        let scope = FromScope::of(stmt);
        let columns = extract_filter_columns(stmt, &scope);
        let matched = columns.iter().find_map(|column| {
            self.policy
                .matching_pattern(column)
                .map(|pattern| (column, pattern))
        });
        if let Some((column, pattern)) = matched {
            log::debug!(
                "caller {caller_id}: admitted, {column} matches ownership pattern {}",
                pattern.as_str()
            );
            return Verdict::Admit {
                reason: AdmitReason::OwnershipColumn {
                    column: column.clone(),
                    pattern: pattern.as_str().to_string(),
                },
                tables,
            };
        }

        let denial = Denial {
            caller_id,
            tables,
            columns,
        };
        log::info!(
            target: "rowscope::gate",
            "caller {caller_id}: denied, tables=[{}] columns=[{}]",
            denial.joined_tables(),
            denial.joined_columns()
        );
        Verdict::Deny(denial)
    }
}
