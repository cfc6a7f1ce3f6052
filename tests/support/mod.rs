#![allow(dead_code)]

use std::path::PathBuf;

use rowscope::gate::evaluator::{SafetyEvaluator, Verdict};
use rowscope::parser::sql_parser::{self, SqlDialect};
use rowscope::policy::config::SafetyConfig;
use sqlparser::ast::Statement;

pub(crate) fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from("tests/fixtures").join(name)
}

pub(crate) fn parse(sql: &str) -> Statement {
    sql_parser::parse_statement(sql, SqlDialect::MySql).expect("test SQL should parse")
}

pub(crate) fn default_evaluator() -> SafetyEvaluator {
    SafetyEvaluator::default()
}

pub(crate) fn evaluator_with(safe_tables: &[&str], ownership_columns: &[&str]) -> SafetyEvaluator {
    let config = SafetyConfig {
        safe_tables: safe_tables.iter().map(ToString::to_string).collect(),
        ownership_columns: ownership_columns.iter().map(ToString::to_string).collect(),
    };
    SafetyEvaluator::from_config(&config).expect("test config should compile")
}

pub(crate) fn check(sql: &str) -> bool {
    default_evaluator().check(&parse(sql), 0)
}

pub(crate) fn evaluate(sql: &str) -> Verdict {
    default_evaluator().evaluate(&parse(sql), 0)
}
