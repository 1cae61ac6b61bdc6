//! Error types for the config boundary

use crate::validate::Violation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Document carries a version literal the current schema does not
    /// recognize. Refused at load, never migrated.
    #[error("unsupported schema version {found} at {path} (expected {expected})")]
    SchemaVersionMismatch {
        path: String,
        found: u64,
        expected: u64,
    },

    /// Element `type` discriminant outside the closed set. Fails the whole
    /// page load — silently dropping the element would lose data on save.
    #[error("unknown element type {found:?} at {path}")]
    UnknownElementType { path: String, found: String },

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid document: {}", format_violations(.0))]
    Invalid(Vec<Violation>),
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
