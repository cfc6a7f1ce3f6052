use std::collections::HashSet;

use regex::{Regex, RegexBuilder};

use crate::error::GateError;
use crate::parser::names::normalize_relation_name;
use crate::policy::config::SafetyConfig;

/// A compiled ownership-column pattern.
///
/// The pattern must match the whole `qualifier.column` text, ignoring case.
#[derive(Debug, Clone)]
pub struct OwnershipPattern {
    source: String,
    regex: Regex,
}

impl OwnershipPattern {
    /// Compile a pattern as written in the configuration.
    pub fn new(pattern: &str) -> Result<Self, GateError> {
        let regex = RegexBuilder::new(&format!("^(?:{pattern})$"))
            .case_insensitive(true)
            .build()
            .map_err(|source| GateError::InvalidPattern {
                pattern: pattern.to_string(),
                source,
            })?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
        })
    }

    /// Pattern text as configured.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns `true` when the qualified column name matches.
    pub fn matches(&self, qualified_column: &str) -> bool {
        self.regex.is_match(qualified_column)
    }
}

/// Immutable, compiled form of a [`SafetyConfig`].
#[derive(Debug, Clone)]
pub struct SafetyPolicy {
    safe_tables: HashSet<String>,
    patterns: Vec<OwnershipPattern>,
}

impl SafetyPolicy {
    /// Compile a configuration, validating every ownership pattern.
    pub fn compile(config: &SafetyConfig) -> Result<Self, GateError> {
        let safe_tables = config
            .safe_tables
            .iter()
            .map(|t| normalize_relation_name(t))
            .collect();
        let patterns = config
            .ownership_columns
            .iter()
            .map(|p| OwnershipPattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            safe_tables,
            patterns,
        })
    }

    /// Returns `true` when the normalized table name is allow-listed.
    pub fn is_safe_table(&self, table: &str) -> bool {
        self.safe_tables.contains(table)
    }

    /// First pattern, in configuration order, matching the qualified column.
    pub fn matching_pattern(&self, qualified_column: &str) -> Option<&OwnershipPattern> {
        self.patterns.iter().find(|p| p.matches(qualified_column))
    }

    /// Compiled ownership patterns in configuration order.
    pub fn patterns(&self) -> &[OwnershipPattern] {
        &self.patterns
    }
}

impl Default for SafetyPolicy {
    /// Compiles [`SafetyConfig::default`].
    fn default() -> Self {
        Self::compile(&SafetyConfig::default()).expect("built-in ownership patterns compile")
    }
}
