use rowscope::gate::columns::extract_filter_columns;
use rowscope::gate::tables::{extract_tables, FromScope};
use rowscope::parser::sql_parser::{self, SqlDialect};

mod support;

fn tables(sql: &str) -> Vec<String> {
    extract_tables(&support::parse(sql))
}

fn columns(sql: &str) -> Vec<String> {
    let stmt = support::parse(sql);
    extract_filter_columns(&stmt, &FromScope::of(&stmt))
}

#[test]
fn single_table_with_or_without_alias_yields_base_name() {
    assert_eq!(tables("SELECT * FROM messages"), ["messages"]);
    assert_eq!(tables("SELECT * FROM messages AS m"), ["messages"]);
    assert_eq!(tables("SELECT * FROM app.Messages m"), ["messages"]);
    assert_eq!(tables("SELECT * FROM `Messages`"), ["messages"]);
}

#[test]
fn inner_join_chains_flatten_in_order() {
    assert_eq!(
        tables("SELECT * FROM a JOIN b ON a.x = b.x INNER JOIN c ON b.y = c.y JOIN d ON c.z = d.z"),
        ["a", "b", "c", "d"]
    );
}

#[test]
fn duplicate_tables_are_kept() {
    assert_eq!(
        tables("SELECT * FROM users a JOIN users b ON a.manager_id = b.id"),
        ["users", "users"]
    );
}

#[test]
fn outer_join_right_side_is_excluded() {
    assert_eq!(
        tables("SELECT * FROM sensitive LEFT JOIN announcements ON sensitive.a = announcements.a"),
        ["sensitive"]
    );
    assert_eq!(
        tables("SELECT * FROM a LEFT OUTER JOIN b ON a.x = b.x JOIN c ON a.x = c.x"),
        ["a", "c"]
    );
}

#[test]
fn derived_tables_contribute_nothing() {
    assert_eq!(
        tables("SELECT * FROM a JOIN (SELECT * FROM secrets) s ON a.x = s.x"),
        ["a"]
    );
}

#[test]
fn postgres_quoted_identifiers_are_unquoted() {
    let stmt = sql_parser::parse_statement(
        r#"SELECT * FROM "public"."Messages" AS "M" WHERE "M"."Recipient_Id" = 5"#,
        SqlDialect::Postgres,
    )
    .unwrap();
    assert_eq!(extract_tables(&stmt), ["messages"]);
    assert_eq!(
        extract_filter_columns(&stmt, &FromScope::of(&stmt)),
        ["messages.recipient_id"]
    );
}

#[test]
fn unqualified_columns_take_the_sole_table() {
    assert_eq!(
        columns("SELECT * FROM messages WHERE recipient_id = 5 AND body = 'x'"),
        ["messages.recipient_id", "messages.body"]
    );
}

#[test]
fn unqualified_columns_in_joins_keep_an_empty_qualifier() {
    assert_eq!(
        columns("SELECT * FROM a JOIN b ON a.x = b.x WHERE user_id = 1"),
        [".user_id"]
    );
    assert_eq!(
        columns("SELECT * FROM a, b WHERE user_id = 1"),
        [".user_id"]
    );
}

#[test]
fn where_clause_absent_yields_no_columns() {
    assert!(columns("SELECT * FROM messages").is_empty());
    assert!(columns("DELETE FROM messages WHERE user_id = 1").is_empty());
}
