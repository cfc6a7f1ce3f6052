/// Filter extraction: columns pinned to literals in the `WHERE` conjunction.
pub mod columns;
/// The admit/deny decision and its verdict types.
pub mod evaluator;
/// Table extraction from the `FROM` clause and column qualification scope.
pub mod tables;
