use std::fmt;

use sqlparser::ast::Statement;
use sqlparser::dialect::{GenericDialect, MySqlDialect, PostgreSqlDialect};
use sqlparser::parser::Parser;

use crate::error::GateError;

/// SQL dialect used to parse query text before it reaches the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SqlDialect {
    /// `MySQL` syntax (backtick identifiers, double-quoted strings).
    #[default]
    MySql,
    /// `PostgreSQL` syntax (double-quoted identifiers).
    Postgres,
    /// Permissive ANSI-ish syntax.
    Generic,
}

impl fmt::Display for SqlDialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlDialect::MySql => write!(f, "mysql"),
            SqlDialect::Postgres => write!(f, "postgres"),
            SqlDialect::Generic => write!(f, "generic"),
        }
    }
}

impl std::str::FromStr for SqlDialect {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mysql" => Ok(SqlDialect::MySql),
            "postgres" | "postgresql" => Ok(SqlDialect::Postgres),
            "generic" => Ok(SqlDialect::Generic),
            _ => Err(format!("Invalid SQL dialect: {s}")),
        }
    }
}

/// Parse one or more `;`-separated statements.
pub fn parse_statements(sql: &str, dialect: SqlDialect) -> Result<Vec<Statement>, GateError> {
    let statements = match dialect {
        SqlDialect::MySql => Parser::parse_sql(&MySqlDialect {}, sql)?,
        SqlDialect::Postgres => Parser::parse_sql(&PostgreSqlDialect {}, sql)?,
        SqlDialect::Generic => Parser::parse_sql(&GenericDialect {}, sql)?,
    };
    Ok(statements)
}

/// Parse text that must contain exactly one statement.
pub fn parse_statement(sql: &str, dialect: SqlDialect) -> Result<Statement, GateError> {
    let mut statements = parse_statements(sql, dialect)?;
    match statements.len() {
        1 => Ok(statements.remove(0)),
        n => Err(GateError::Parse(format!("expected one statement, found {n}"))),
    }
}
