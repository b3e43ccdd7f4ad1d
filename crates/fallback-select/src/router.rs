//! Call-Boundary Fallback Routing

use crate::classify::FailureClass;
use crate::error::FallbackError;
use crate::registry::{Candidate, FallbackRegistry};
use failure_taxonomy::Taxonomy;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Routes failed calls to the fallback candidate their rules select
///
/// Owns the failure taxonomy and the candidate registry. The routing
/// decision itself never fails a call: when no candidate matches, or the
/// failure cannot be classified, the original failure propagates
/// unchanged.
pub struct FallbackRouter<H> {
    taxonomy: Taxonomy,
    registry: FallbackRegistry<H>,
}

impl<H> FallbackRouter<H> {
    /// Create a router over the given failure taxonomy
    pub fn new(taxonomy: Taxonomy) -> Self {
        Self {
            taxonomy,
            registry: FallbackRegistry::new(),
        }
    }

    /// Candidate registry
    pub fn registry(&self) -> &FallbackRegistry<H> {
        &self.registry
    }

    /// Failure taxonomy
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    /// Resolve a failure kind to the candidate that should handle it
    pub fn route(&self, failure_kind: &str) -> Result<Option<Arc<Candidate<H>>>, FallbackError> {
        let ancestry = self
            .taxonomy
            .ancestry(failure_kind)
            .map_err(|_| FallbackError::UnknownKind(failure_kind.to_string()))?;
        self.registry.select(ancestry)
    }

    /// Run `primary`, redirecting a matching failure to its fallback
    ///
    /// The selected candidate is invoked with the same arguments as the
    /// original call and its result is returned as-is; a failing fallback
    /// propagates its own failure, with no further redirection. With no
    /// matching candidate, or a failure kind the taxonomy does not know,
    /// the original failure propagates unchanged.
    pub fn call<A, T, E>(&self, args: &A, primary: impl FnOnce(&A) -> Result<T, E>) -> Result<T, E>
    where
        H: Fn(&A) -> Result<T, E>,
        E: FailureClass,
    {
        let failure = match primary(args) {
            Ok(value) => return Ok(value),
            Err(failure) => failure,
        };

        let kind = failure.failure_kind();
        match self.route(kind) {
            Ok(Some(candidate)) => {
                info!("Redirecting '{}' failure to fallback '{}'", kind, candidate.name());
                (candidate.handler())(args)
            }
            Ok(None) => {
                debug!("No fallback candidate for '{}' failure, propagating", kind);
                Err(failure)
            }
            Err(routing) => {
                warn!("Fallback routing unavailable for '{}': {}", kind, routing);
                Err(failure)
            }
        }
    }
}
