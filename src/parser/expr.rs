use sqlparser::ast::{Expr, UnaryOperator, Value};

use crate::parser::names::ident_name;

/// A column operand as written in the query, with normalized parts.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    /// Table name or alias preceding the column, if any.
    pub qualifier: Option<String>,
    /// Column name.
    pub column: String,
}

/// Classify an operand as a column reference.
///
/// Supports plain identifiers (`owner_id`), qualified identifiers (`m.owner_id`,
/// `app.messages.owner_id`) and parenthesized forms of either. For three-part
/// names the qualifier is the table component.
pub fn column_reference(expr: &Expr) -> Option<ColumnRef> {
    match expr {
        Expr::Identifier(ident) => Some(ColumnRef {
            qualifier: None,
            column: ident_name(ident),
        }),
        Expr::CompoundIdentifier(parts) => {
            let (column, rest) = parts.split_last()?;
            Some(ColumnRef {
                qualifier: rest.last().map(ident_name),
                column: ident_name(column),
            })
        }
        Expr::Nested(inner) => column_reference(inner),
        _ => None,
    }
}

/// Returns `true` when the operand is a constant: number, string, or a
/// non-empty tuple of constants.
///
/// Placeholders, `NULL` and booleans are not constants here: they do not pin
/// the compared column to a caller-supplied value.
pub fn is_literal_value(expr: &Expr) -> bool {
    match expr {
        Expr::Value(v) => is_literal(&v.value),
        Expr::UnaryOp {
            op: UnaryOperator::Minus | UnaryOperator::Plus,
            expr,
        } => matches!(expr.as_ref(), Expr::Value(v) if matches!(v.value, Value::Number(..))),
        Expr::Nested(inner) => is_literal_value(inner),
        Expr::Tuple(items) => is_literal_list(items),
        _ => false,
    }
}

/// Returns `true` for a non-empty list that starts with a constant.
///
/// Only the first element is inspected: `(1, user_id)` is a literal list,
/// `(user_id, 1)` is not.
pub fn is_literal_list(items: &[Expr]) -> bool {
    items.first().is_some_and(is_literal_value)
}

fn is_literal(value: &Value) -> bool {
    matches!(
        value,
        Value::Number(..)
            | Value::SingleQuotedString(_)
            | Value::DoubleQuotedString(_)
            | Value::NationalStringLiteral(_)
            | Value::EscapedStringLiteral(_)
    )
}
