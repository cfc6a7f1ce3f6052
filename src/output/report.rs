use std::fmt::Write;

use serde::Serialize;

use crate::error::GateError;
use crate::gate::evaluator::Verdict;

/// Verdict for one statement of an input batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementReport {
    /// 1-based position of the statement in its batch.
    pub index: usize,
    /// Statement text as re-rendered by the parser.
    pub sql: String,
    /// Decision and evidence.
    #[serde(flatten)]
    pub verdict: Verdict,
}

/// One line per statement: `#N ADMIT ...` or `#N DENY ...`.
pub fn build_text_report(reports: &[StatementReport]) -> String {
    let mut out = String::new();
    for report in reports {
        let line = match &report.verdict {
            Verdict::Admit { tables, reason } => format!(
                "#{} ADMIT tables=[{}] reason={}",
                report.index,
                tables.join(","),
                reason
            ),
            Verdict::Deny(denial) => format!(
                "#{} DENY tables=[{}] columns=[{}]",
                report.index,
                denial.joined_tables(),
                denial.joined_columns()
            ),
        };
        writeln!(out, "{line}").unwrap();
        writeln!(out, "    {}", report.sql).unwrap();
    }
    out
}

/// Pretty-printed JSON array of reports.
pub fn build_json_report(reports: &[StatementReport]) -> Result<String, GateError> {
    serde_json::to_string_pretty(reports).map_err(|e| GateError::Serialize(e.to_string()))
}
