//! Error types for constraint evaluation and linearization.

use thiserror::Error;

use crate::keys::Key;

/// Errors raised while evaluating or linearizing inequality constraints.
///
/// A missing dual entry is not an error: it is how inactive constraints are
/// encoded.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConstraintError {
    /// The constraint linearized to something other than a Jacobian factor.
    #[error("constraint with dual key {dual_key} linearized to a {kind} factor, expected a Jacobian factor")]
    MalformedConstraint { dual_key: Key, kind: &'static str },

    /// The constraint linearized to a Jacobian with more than one row.
    #[error("constraint with dual key {dual_key} has {rows} rows, inequality constraints must be scalar")]
    NonScalarConstraint { dual_key: Key, rows: usize },

    /// Two constraints in one graph share a dual key.
    #[error("dual key {0} is already owned by another constraint")]
    DuplicateDualKey(Key),

    #[error("variable {key} is missing from the linearization point")]
    MissingVariable { key: Key },

    #[error("variable {key} has dimension {actual}, expected {expected}")]
    DimensionMismatch {
        key: Key,
        expected: usize,
        actual: usize,
    },

    /// A violation evaluated to NaN or infinity where a finite value is required.
    #[error("constraint with dual key {dual_key} has non-finite violation {value}")]
    NonFiniteViolation { dual_key: Key, value: f64 },
}

/// Result type alias for constraint operations.
pub type Result<T> = std::result::Result<T, ConstraintError>;
