//! Centralized error types for KGViz core.

use thiserror::Error;

/// Validation errors raised while building a query from user input.
///
/// The `Display` text doubles as the blocking message shown to the user,
/// so keep it short and imperative.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QueryError {
    #[error("Please specify both range bounds")]
    MissingBound,

    #[error("Range bound is not a number: {0}")]
    NonNumericBound(String),

    #[error("Please supply a query")]
    EmptyQuery,
}
