//! Include/Exclude Filter Rules

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Immutable include/exclude filter attached to a fallback candidate
///
/// An empty `includes` set is the open policy: the candidate handles every
/// failure kind not excluded. An empty `excludes` set excludes nothing.
/// Exclusion always wins over inclusion, so a kind named in both sets is
/// not handled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackRule {
    /// Failure kinds this candidate explicitly handles (empty = all)
    #[serde(default)]
    includes: HashSet<String>,

    /// Failure kinds this candidate never handles (empty = none)
    #[serde(default)]
    excludes: HashSet<String>,
}

impl FallbackRule {
    /// Create a rule from explicit include and exclude sets
    pub fn new<I, X>(includes: I, excludes: X) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
        X: IntoIterator,
        X::Item: Into<String>,
    {
        Self {
            includes: includes.into_iter().map(Into::into).collect(),
            excludes: excludes.into_iter().map(Into::into).collect(),
        }
    }

    /// Rule that handles every failure kind
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Rule that handles only the given kinds (and their descendants)
    pub fn including<I>(kinds: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        Self::new(kinds, Vec::<String>::new())
    }

    /// Open rule that handles everything except the given kinds
    pub fn excluding<X>(kinds: X) -> Self
    where
        X: IntoIterator,
        X::Item: Into<String>,
    {
        Self::new(Vec::<String>::new(), kinds)
    }

    /// Included kinds
    pub fn includes(&self) -> &HashSet<String> {
        &self.includes
    }

    /// Excluded kinds
    pub fn excludes(&self) -> &HashSet<String> {
        &self.excludes
    }

    /// Whether this rule places no restriction at all
    pub fn matches_all(&self) -> bool {
        self.includes.is_empty() && self.excludes.is_empty()
    }

    /// Decide whether this rule handles a failure
    ///
    /// `ancestry` is the failure's kind followed by its ancestors,
    /// most-specific first. Exclusion of any kind in the chain wins
    /// unconditionally; otherwise an empty include set handles everything,
    /// and a non-empty one requires a kind in the chain to be included.
    pub fn should_handle<S: AsRef<str>>(&self, ancestry: &[S]) -> bool {
        if ancestry
            .iter()
            .any(|kind| self.excludes.contains(kind.as_ref()))
        {
            return false;
        }
        if self.includes.is_empty() {
            return true;
        }
        ancestry
            .iter()
            .any(|kind| self.includes.contains(kind.as_ref()))
    }
}
