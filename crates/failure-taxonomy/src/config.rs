//! Declarative taxonomy definitions

use serde::{Deserialize, Serialize};

/// A single failure kind definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindSpec {
    /// Unique kind name
    pub name: String,

    /// Parent kind name; `None` marks a root kind
    #[serde(default)]
    pub parent: Option<String>,
}

/// Declarative form of a full taxonomy, loadable from any serde source
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Kind definitions, in any order
    pub kinds: Vec<KindSpec>,
}
