//! Rule-Based Fallback Selection
//!
//! Decides which registered fallback candidate, if any, should handle a
//! failed call. Candidates carry immutable include/exclude rules over
//! hierarchical failure kinds; selection is deterministic (priority, then
//! registration order).

mod classify;
mod error;
mod registry;
mod router;
mod rule;

pub use classify::FailureClass;
pub use error::FallbackError;
pub use registry::{Candidate, FallbackRegistry};
pub use router::FallbackRouter;
pub use rule::FallbackRule;
