use thiserror::Error;

use crate::data::range::RangeViolation;

/// Errors raised by the data-preparation core.
///
/// File loading and the binaries wrap these in `anyhow` with context.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// Empty record sets, unusable sample intervals, malformed numeric text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Failure reported by the spectrum transform collaborator.
    #[error("transform failed: {0}")]
    Transform(String),

    /// A filter range that violates one or more bound constraints.
    #[error("invalid filter range: {}", join_violations(.0))]
    Validation(Vec<RangeViolation>),
}

fn join_violations(violations: &[RangeViolation]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, EditorError>;
