use sqlparser::ast::{Ident, ObjectName, ObjectNamePart};

/// Return the identifier without surrounding double quotes or backticks.
pub fn unquote_identifier(ident: &str) -> &str {
    ident
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| ident.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(ident)
}

/// Normalize an identifier for case-insensitive matching.
///
/// Trims whitespace, removes surrounding quotes on a single identifier,
/// and lowercases the result.
pub fn normalize_identifier(ident: &str) -> String {
    unquote_identifier(ident.trim()).to_ascii_lowercase()
}

/// Split a potentially schema-qualified name into `(schema, relation)`.
///
/// Handles dots inside quoted identifiers, e.g. `"my.schema"."table.name"`.
pub fn split_schema_and_relation(name: &str) -> Option<(String, String)> {
    let mut quote: Option<char> = None;
    let mut start = 0usize;
    let mut parts: Vec<&str> = Vec::new();

    for (idx, ch) in name.char_indices() {
        match (ch, quote) {
            ('"' | '`', None) => quote = Some(ch),
            (c, Some(open)) if c == open => quote = None,
            ('.', None) => {
                parts.push(name[start..idx].trim());
                start = idx + 1;
            }
            _ => {}
        }
    }
    parts.push(name[start..].trim());

    if parts.len() < 2 {
        return None;
    }

    let schema = unquote_identifier(parts[parts.len() - 2]).to_string();
    let relation = unquote_identifier(parts[parts.len() - 1]).to_string();
    Some((schema, relation))
}

/// Normalize an object name written as text to its terminal relation identifier.
///
/// Examples:
/// - `"public.docs"` -> `"docs"`
/// - `"\"app\".\"Messages\""` -> `"messages"`
pub fn normalize_relation_name(name: &str) -> String {
    if let Some((_, relation)) = split_schema_and_relation(name.trim()) {
        return normalize_identifier(&relation);
    }
    normalize_identifier(name)
}

/// Normalized name of a parsed identifier.
pub fn ident_name(ident: &Ident) -> String {
    ident.value.to_ascii_lowercase()
}

/// Terminal relation of a parsed object name, normalized.
///
/// `None` for names whose last part is not a plain identifier.
pub fn relation_name(name: &ObjectName) -> Option<String> {
    match name.0.last()? {
        ObjectNamePart::Identifier(ident) => Some(ident_name(ident)),
        #[allow(unreachable_patterns)]
        _ => None,
    }
}
