use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GateError;

const DEFAULT_SAFE_TABLES: &[&str] = &["schools", "announcements"];

const DEFAULT_OWNERSHIP_COLUMNS: &[&str] = &[
    r".*\.id",
    r".*\.school_id",
    r".*\.group_id",
    r".*\.term_id",
    r".*\.user_id",
    r".*\.persona_id",
    r".*\.creator_id",
    r".*\.created_by",
    r".*\.updated_by",
    r".*\.owner_id",
    r".*\.advisor_id",
    r".*\.tutor_id",
    r"calendar_instances\.organizer_id",
    r"availabilities\.available_id",
    r"messages\.recipient_id",
    r"messages\.sender_id",
    r"allowances\.allowable_id",
    r"sessions\.session_id",
    r"direct_relationships\.child_id",
    r"direct_relationships\.parent_id",
];

/// Static gate configuration: tables safe to scan and ownership-column patterns.
///
/// Loaded once at startup and compiled into a [`crate::policy::ownership::SafetyPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SafetyConfig {
    /// Tables that may be read without any ownership filter.
    #[serde(default)]
    pub safe_tables: BTreeSet<String>,
    /// Regular expressions over `qualifier.column`, in evaluation order.
    #[serde(default)]
    pub ownership_columns: Vec<String>,
}

impl SafetyConfig {
    /// Configuration with no safe tables and no ownership patterns: every
    /// statement that reads a table is denied.
    pub fn empty() -> Self {
        Self {
            safe_tables: BTreeSet::new(),
            ownership_columns: Vec::new(),
        }
    }

    /// Parse a configuration from a JSON string.
    pub fn load_from_json(json: &str) -> Result<Self, GateError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON configuration file.
    pub fn load_from_path(path: &Path) -> Result<Self, GateError> {
        let content = std::fs::read_to_string(path).map_err(|source| GateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::load_from_json(&content)
    }
}

impl Default for SafetyConfig {
    fn default() -> Self {
        Self {
            safe_tables: DEFAULT_SAFE_TABLES.iter().map(ToString::to_string).collect(),
            ownership_columns: DEFAULT_OWNERSHIP_COLUMNS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_ships_built_in_lists() {
        let config = SafetyConfig::default();
        assert!(config.safe_tables.contains("announcements"));
        assert!(config.safe_tables.contains("schools"));
        assert_eq!(config.ownership_columns.len(), 20);
        assert_eq!(config.ownership_columns[0], r".*\.id");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let config = SafetyConfig::load_from_json("{}").expect("empty object should parse");
        assert_eq!(config, SafetyConfig::empty());
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = SafetyConfig::load_from_json(r#"{"safe_table": ["x"]}"#)
            .expect_err("typo should not be silently ignored");
        assert!(matches!(err, GateError::Config(_)));
        assert!(err.to_string().contains("unknown field"));
    }
}
