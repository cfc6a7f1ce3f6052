use sqlparser::ast::{BinaryOperator, Expr, Statement};

use crate::gate::tables::{select_body, FromScope};
use crate::parser::expr::{column_reference, is_literal_list, is_literal_value, ColumnRef};

/// Columns pinned to a literal anywhere in the statement's `WHERE` conjunction,
/// rendered as `qualifier.column`.
pub fn extract_filter_columns(stmt: &Statement, scope: &FromScope) -> Vec<String> {
    select_body(stmt)
        .and_then(|select| select.selection.as_ref())
        .map(|selection| filter_columns(selection, scope))
        .unwrap_or_default()
}

/// Walk a filter expression through `AND` and parentheses, collecting the
/// columns of every comparison against a literal.
///
/// `OR`, `NOT` and any other shape end the walk for that branch.
pub fn filter_columns(expr: &Expr, scope: &FromScope) -> Vec<String> {
    let mut columns = Vec::new();
    collect_conjunction(expr, scope, &mut columns);
    columns
}

fn collect_conjunction(expr: &Expr, scope: &FromScope, out: &mut Vec<String>) {
    match expr {
        Expr::BinaryOp {
            left,
            op: BinaryOperator::And,
            right,
        } => {
            collect_conjunction(left, scope, out);
            collect_conjunction(right, scope, out);
        }
        Expr::Nested(inner) => collect_conjunction(inner, scope, out),
        _ => out.extend(
            comparison_columns(expr)
                .iter()
                .map(|column| scope.qualify(column)),
        ),
    }
}

/// Column operands of a single comparison whose other side is a literal.
///
/// Any comparison operator counts (`=`, `<=>`, `!=`, `<`, `<=`, `>`, `>=`),
/// as do `[NOT] IN (...)` and `[NOT] LIKE`. Each side is checked
/// independently; column-to-column comparisons yield nothing.
pub fn comparison_columns(expr: &Expr) -> Vec<ColumnRef> {
    match expr {
        Expr::BinaryOp { left, op, right } if is_comparison(op) => {
            column_against_literal(left, right)
        }
        Expr::Like { expr, pattern, .. } | Expr::ILike { expr, pattern, .. } => {
            column_against_literal(expr, pattern)
        }
        Expr::InList { expr, list, .. } => column_reference(expr)
            .filter(|_| is_literal_list(list))
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

fn is_comparison(op: &BinaryOperator) -> bool {
    matches!(
        op,
        BinaryOperator::Eq
            | BinaryOperator::NotEq
            | BinaryOperator::Lt
            | BinaryOperator::LtEq
            | BinaryOperator::Gt
            | BinaryOperator::GtEq
            | BinaryOperator::Spaceship
    )
}

fn column_against_literal(left: &Expr, right: &Expr) -> Vec<ColumnRef> {
    let mut columns = Vec::new();
    if let Some(column) = column_reference(left) {
        if is_literal_value(right) {
            columns.push(column);
        }
    }
    if let Some(column) = column_reference(right) {
        if is_literal_value(left) {
            columns.push(column);
        }
    }
    columns
}
