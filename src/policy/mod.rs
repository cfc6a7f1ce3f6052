/// Serializable gate configuration and its built-in defaults.
pub mod config;
/// Compiled allow-list and ownership-column patterns.
pub mod ownership;
