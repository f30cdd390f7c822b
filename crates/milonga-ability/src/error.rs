//! Error types for ability construction
//!
//! All failures in this crate happen while rules are being built:
//! unknown action or subject symbols and malformed condition documents.
//! Evaluation (`can`/`cannot`) is total and never errors; any malformed
//! or missing input fails closed to a denial instead.

use thiserror::Error;

/// Errors raised while constructing rules, before an [`Ability`] exists.
///
/// [`Ability`]: crate::Ability
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BuildError {
    /// An action symbol that is not part of the closed action set.
    #[error("unknown action: {0}")]
    UnknownAction(String),

    /// A subject symbol that is not part of the closed subject set.
    #[error("unknown subject: {0}")]
    UnknownSubject(String),

    /// A condition document that does not fit the condition grammar.
    #[error("invalid condition: {0}")]
    InvalidCondition(String),
}

/// Result type for rule construction.
pub type BuildResult<T> = Result<T, BuildError>;
