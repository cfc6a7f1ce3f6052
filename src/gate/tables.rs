use std::collections::HashMap;

use sqlparser::ast::{
    JoinConstraint, JoinOperator, Query, Select, SetExpr, Statement, TableFactor, TableWithJoins,
};

use crate::parser::expr::ColumnRef;
use crate::parser::names::{ident_name, relation_name};

/// The `SELECT` body of a statement, unwrapping parenthesized queries.
///
/// `None` for every other statement kind and for set operations.
pub fn select_body(stmt: &Statement) -> Option<&Select> {
    match stmt {
        Statement::Query(query) => query_select(query),
        _ => None,
    }
}

fn query_select(query: &Query) -> Option<&Select> {
    match query.body.as_ref() {
        SetExpr::Select(select) => Some(select.as_ref()),
        SetExpr::Query(inner) => query_select(inner),
        _ => None,
    }
}

/// Tables read by the statement, as far as the safety policy is concerned.
///
/// Only the first `FROM` element is inspected. Within it, the left side of
/// every join is always read, while a joined right side counts only for plain
/// `JOIN` / `INNER JOIN`.
pub fn extract_tables(stmt: &Statement) -> Vec<String> {
    select_body(stmt)
        .and_then(|select| select.from.first())
        .map(join_tree_tables)
        .unwrap_or_default()
}

/// Flatten one `FROM` element (a table plus its join chain) into table names.
pub fn join_tree_tables(tree: &TableWithJoins) -> Vec<String> {
    let mut tables = factor_tables(&tree.relation);
    for join in &tree.joins {
        if includes_right_side(&join.join_operator) {
            tables.extend(factor_tables(&join.relation));
        }
    }
    tables
}

fn factor_tables(factor: &TableFactor) -> Vec<String> {
    match factor {
        TableFactor::Table { name, .. } => relation_name(name).into_iter().collect(),
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => join_tree_tables(table_with_joins),
        _ => Vec::new(),
    }
}

/// Only `JOIN` and `INNER JOIN` with an `ON`/`USING` (or no) constraint count.
/// `NATURAL`, outer, cross, semi/anti and the other join forms leave their
/// right side out.
fn includes_right_side(operator: &JoinOperator) -> bool {
    match operator {
        JoinOperator::Join(constraint) | JoinOperator::Inner(constraint) => {
            !matches!(constraint, JoinConstraint::Natural)
        }
        _ => false,
    }
}

/// Naming context of a `SELECT`: table aliases and the sole table, if any.
///
/// Used to turn column operands into `table.column` text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FromScope {
    aliases: HashMap<String, String>,
    sole_table: Option<String>,
}

impl FromScope {
    /// Build the scope of a statement; empty for anything but a `SELECT`.
    pub fn of(stmt: &Statement) -> Self {
        let mut scope = Self::default();
        let Some(select) = select_body(stmt) else {
            return scope;
        };

        for tree in &select.from {
            scope.collect_aliases(tree);
        }

        if let [only] = select.from.as_slice() {
            if let TableFactor::Table { name, .. } = &only.relation {
                if only.joins.is_empty() {
                    scope.sole_table = relation_name(name);
                }
            }
        }
        scope
    }

    fn collect_aliases(&mut self, tree: &TableWithJoins) {
        self.collect_factor_alias(&tree.relation);
        for join in &tree.joins {
            self.collect_factor_alias(&join.relation);
        }
    }

    fn collect_factor_alias(&mut self, factor: &TableFactor) {
        match factor {
            TableFactor::Table {
                name,
                alias: Some(alias),
                ..
            } => {
                if let Some(table) = relation_name(name) {
                    self.aliases.insert(ident_name(&alias.name), table);
                }
            }
            TableFactor::NestedJoin {
                table_with_joins, ..
            } => self.collect_aliases(table_with_joins),
            _ => {}
        }
    }

    /// The table the statement reads when it names exactly one and joins nothing.
    pub fn sole_table(&self) -> Option<&str> {
        self.sole_table.as_deref()
    }

    /// Base table behind a qualifier; the qualifier itself when it is not an alias.
    pub fn resolve_qualifier<'a>(&'a self, qualifier: &'a str) -> &'a str {
        self.aliases.get(qualifier).map_or(qualifier, String::as_str)
    }

    /// Render a column operand as `qualifier.column`.
    ///
    /// Unqualified columns take the sole table when there is one and an empty
    /// qualifier otherwise (`.column`).
    pub fn qualify(&self, column: &ColumnRef) -> String {
        let qualifier = match &column.qualifier {
            Some(q) => self.resolve_qualifier(q),
            None => self.sole_table().unwrap_or_default(),
        };
        format!("{qualifier}.{}", column.column)
    }
}
