//! Fallback Selection Error Types

use thiserror::Error;

/// Errors during candidate registration and selection
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FallbackError {
    /// Selection invoked with an empty ancestry chain
    #[error("failure ancestry chain is empty")]
    EmptyAncestry,

    /// Candidate name registered twice
    #[error("fallback candidate '{0}' is already registered")]
    DuplicateCandidate(String),

    /// Failure kind missing from the taxonomy
    #[error("unknown failure kind '{0}'")]
    UnknownKind(String),
}
