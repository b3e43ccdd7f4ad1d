//! Failure Kind Taxonomy
//!
//! Provides hierarchical classification of runtime failures. Kinds are
//! plain string identifiers with explicit parent links, so matching logic
//! stays portable instead of leaning on any language's error-class
//! hierarchy.

mod config;
mod error;
mod taxonomy;

pub use config::{KindSpec, TaxonomyConfig};
pub use error::TaxonomyError;
pub use taxonomy::Taxonomy;
