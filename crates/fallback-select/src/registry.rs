//! Candidate Registry with Deterministic Selection

use crate::error::FallbackError;
use crate::rule::FallbackRule;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, RwLock};
use tracing::{debug, info};

/// A registered fallback candidate
///
/// Couples a handler with the immutable rule deciding which failures it
/// handles. Created through [`FallbackRegistry::register`] and discarded
/// on deregistration.
pub struct Candidate<H> {
    name: String,
    priority: u8,
    rule: FallbackRule,
    handler: H,
    seq: u64,
}

impl<H> std::fmt::Debug for Candidate<H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Candidate")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("rule", &self.rule)
            .finish_non_exhaustive()
    }
}

impl<H> Candidate<H> {
    /// Candidate name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Selection priority (higher = consulted first)
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// The candidate's filter rule
    pub fn rule(&self) -> &FallbackRule {
        &self.rule
    }

    /// The handler to invoke in place of a failed call
    pub fn handler(&self) -> &H {
        &self.handler
    }
}

/// Registry of fallback candidates
///
/// The candidate set is copy-on-write: registration swaps in a new sorted
/// snapshot under a write lock, while selection clones the current `Arc`
/// and evaluates without holding the lock. A selection in flight always
/// sees a complete, consistent candidate set.
pub struct FallbackRegistry<H> {
    entries: RwLock<Arc<Vec<Arc<Candidate<H>>>>>,
    next_seq: AtomicU64,
}

impl<H> FallbackRegistry<H> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Arc::new(Vec::new())),
            next_seq: AtomicU64::new(0),
        }
    }

    /// Register a candidate under a unique name
    ///
    /// Candidates are consulted in descending priority order; equal
    /// priorities fall back to registration order.
    pub fn register(
        &self,
        name: impl Into<String>,
        priority: u8,
        rule: FallbackRule,
        handler: H,
    ) -> Result<(), FallbackError> {
        let name = name.into();
        let mut entries = self.entries.write().expect("candidate set lock poisoned");

        if entries.iter().any(|candidate| candidate.name == name) {
            return Err(FallbackError::DuplicateCandidate(name));
        }

        let seq = self.next_seq.fetch_add(1, Ordering::Relaxed);
        let mut next: Vec<Arc<Candidate<H>>> = entries.as_ref().clone();
        next.push(Arc::new(Candidate {
            name: name.clone(),
            priority,
            rule,
            handler,
            seq,
        }));
        next.sort_by_key(|candidate| (Reverse(candidate.priority), candidate.seq));
        *entries = Arc::new(next);

        info!("Registered fallback candidate '{}' (priority {})", name, priority);
        Ok(())
    }

    /// Remove a candidate and its rule; returns false if unknown
    pub fn deregister(&self, name: &str) -> bool {
        let mut entries = self.entries.write().expect("candidate set lock poisoned");
        if !entries.iter().any(|candidate| candidate.name == name) {
            return false;
        }

        let next: Vec<_> = entries
            .iter()
            .filter(|candidate| candidate.name != name)
            .cloned()
            .collect();
        *entries = Arc::new(next);

        info!("Deregistered fallback candidate '{}'", name);
        true
    }

    /// Select the first candidate whose rule handles the failure
    ///
    /// `ancestry` is the failing kind followed by its ancestors,
    /// most-specific first; an empty chain is malformed input and is
    /// rejected rather than tolerated.
    pub fn select<S: AsRef<str>>(
        &self,
        ancestry: &[S],
    ) -> Result<Option<Arc<Candidate<H>>>, FallbackError> {
        if ancestry.is_empty() {
            return Err(FallbackError::EmptyAncestry);
        }

        let snapshot = self.snapshot();
        for candidate in snapshot.iter() {
            if candidate.rule.should_handle(ancestry) {
                debug!(
                    "Selected fallback candidate '{}' for '{}'",
                    candidate.name,
                    ancestry[0].as_ref()
                );
                return Ok(Some(Arc::clone(candidate)));
            }
        }

        debug!("No fallback candidate matches '{}'", ancestry[0].as_ref());
        Ok(None)
    }

    /// Current candidate set, sorted in consultation order
    pub fn snapshot(&self) -> Arc<Vec<Arc<Candidate<H>>>> {
        Arc::clone(&self.entries.read().expect("candidate set lock poisoned"))
    }

    /// Number of registered candidates
    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    /// Whether no candidates are registered
    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}

impl<H> Default for FallbackRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}
