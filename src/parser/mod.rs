/// Operand classification: column references versus literal values.
pub mod expr;
/// Identifier and table-name normalization helpers (schema-qualified names, quoted identifiers).
pub mod names;
/// Thin wrapper around `sqlparser` for turning query text into statements.
pub mod sql_parser;
