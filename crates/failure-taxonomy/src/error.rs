//! Taxonomy Error Types

use thiserror::Error;

/// Errors during taxonomy construction and lookup
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxonomyError {
    /// Kind name registered twice
    #[error("failure kind '{0}' is already registered")]
    DuplicateKind(String),

    /// Parent kind not registered before its child
    #[error("failure kind '{kind}' references unknown parent '{parent}'")]
    UnknownParent { kind: String, parent: String },

    /// Parent links in a declarative definition form a loop
    #[error("failure kind '{0}' is part of a parent cycle")]
    ParentCycle(String),

    /// Lookup for a kind that was never registered
    #[error("unknown failure kind '{0}'")]
    UnknownKind(String),
}
