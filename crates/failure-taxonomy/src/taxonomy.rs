//! Failure Kind Registry

use crate::config::TaxonomyConfig;
use crate::error::TaxonomyError;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A registered kind with its precomputed ancestry chain
#[derive(Debug, Clone)]
struct KindEntry {
    /// Parent kind name; `None` for root kinds
    parent: Option<String>,
    /// The kind itself first, then parents up to the root
    ancestry: Vec<String>,
}

/// Registry of failure kinds and their hierarchy
///
/// Parents must be registered before their children, which makes cycles
/// unconstructible through [`register`](Taxonomy::register). Ancestry
/// chains are precomputed at registration time so per-failure resolution
/// is a single lookup.
#[derive(Debug, Clone, Default)]
pub struct Taxonomy {
    kinds: HashMap<String, KindEntry>,
}

impl Taxonomy {
    /// Create an empty taxonomy
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a failure kind under an optional parent
    pub fn register(&mut self, name: &str, parent: Option<&str>) -> Result<(), TaxonomyError> {
        if self.kinds.contains_key(name) {
            return Err(TaxonomyError::DuplicateKind(name.to_string()));
        }

        let ancestry = match parent {
            Some(parent) => {
                let entry =
                    self.kinds
                        .get(parent)
                        .ok_or_else(|| TaxonomyError::UnknownParent {
                            kind: name.to_string(),
                            parent: parent.to_string(),
                        })?;
                let mut chain = Vec::with_capacity(entry.ancestry.len() + 1);
                chain.push(name.to_string());
                chain.extend(entry.ancestry.iter().cloned());
                chain
            }
            None => vec![name.to_string()],
        };

        debug!("Registered failure kind '{}' (depth {})", name, ancestry.len());

        self.kinds.insert(
            name.to_string(),
            KindEntry {
                parent: parent.map(str::to_string),
                ancestry,
            },
        );
        Ok(())
    }

    /// Build a taxonomy from a declarative definition, in any order
    pub fn from_config(config: &TaxonomyConfig) -> Result<Self, TaxonomyError> {
        let mut taxonomy = Self::new();
        let mut pending: Vec<_> = config.kinds.iter().collect();

        while !pending.is_empty() {
            let mut deferred = Vec::new();
            let mut progressed = false;

            for spec in pending {
                let parent_ready = spec
                    .parent
                    .as_deref()
                    .map_or(true, |parent| taxonomy.contains(parent));
                if parent_ready {
                    taxonomy.register(&spec.name, spec.parent.as_deref())?;
                    progressed = true;
                } else {
                    deferred.push(spec);
                }
            }

            if !progressed {
                // Nothing resolvable is left: either a parent is missing
                // from the definition entirely, or the parent links loop.
                let defined: HashSet<&str> =
                    deferred.iter().map(|spec| spec.name.as_str()).collect();
                for spec in &deferred {
                    if let Some(parent) = spec.parent.as_deref() {
                        if !defined.contains(parent) {
                            return Err(TaxonomyError::UnknownParent {
                                kind: spec.name.clone(),
                                parent: parent.to_string(),
                            });
                        }
                    }
                }
                return Err(TaxonomyError::ParentCycle(deferred[0].name.clone()));
            }

            pending = deferred;
        }

        Ok(taxonomy)
    }

    /// Ancestry chain for a kind, most-specific first (the kind itself
    /// is the first element)
    pub fn ancestry(&self, kind: &str) -> Result<&[String], TaxonomyError> {
        self.kinds
            .get(kind)
            .map(|entry| entry.ancestry.as_slice())
            .ok_or_else(|| TaxonomyError::UnknownKind(kind.to_string()))
    }

    /// Whether `kind` is `ancestor` or a descendant of it
    ///
    /// Returns false for unregistered kinds.
    pub fn is_a(&self, kind: &str, ancestor: &str) -> bool {
        self.kinds
            .get(kind)
            .map(|entry| entry.ancestry.iter().any(|name| name == ancestor))
            .unwrap_or(false)
    }

    /// Direct parent of a kind, if it has one
    pub fn parent(&self, kind: &str) -> Option<&str> {
        self.kinds.get(kind).and_then(|entry| entry.parent.as_deref())
    }

    /// Whether a kind is registered
    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Number of registered kinds
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Whether the taxonomy is empty
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KindSpec;

    fn sample() -> Taxonomy {
        let mut taxonomy = Taxonomy::new();
        taxonomy.register("failure", None).unwrap();
        taxonomy.register("io_failure", Some("failure")).unwrap();
        taxonomy
            .register("timeout_failure", Some("io_failure"))
            .unwrap();
        taxonomy.register("parse_failure", Some("failure")).unwrap();
        taxonomy
    }

    #[test]
    fn test_ancestry_most_specific_first() {
        let taxonomy = sample();
        let chain = taxonomy.ancestry("timeout_failure").unwrap();
        assert_eq!(chain, ["timeout_failure", "io_failure", "failure"]);
    }

    #[test]
    fn test_root_ancestry_is_self() {
        let taxonomy = sample();
        assert_eq!(taxonomy.ancestry("failure").unwrap(), ["failure"]);
    }

    #[test]
    fn test_parent_links() {
        let taxonomy = sample();
        assert_eq!(taxonomy.parent("timeout_failure"), Some("io_failure"));
        assert_eq!(taxonomy.parent("failure"), None);
        assert_eq!(taxonomy.len(), 4);
        assert!(!taxonomy.is_empty());
    }

    #[test]
    fn test_duplicate_kind_rejected() {
        let mut taxonomy = sample();
        assert_eq!(
            taxonomy.register("io_failure", Some("failure")),
            Err(TaxonomyError::DuplicateKind("io_failure".to_string()))
        );
    }

    #[test]
    fn test_unknown_parent_rejected() {
        let mut taxonomy = Taxonomy::new();
        let result = taxonomy.register("timeout_failure", Some("io_failure"));
        assert!(matches!(result, Err(TaxonomyError::UnknownParent { .. })));
    }

    #[test]
    fn test_unknown_kind_lookup_is_an_error() {
        let taxonomy = sample();
        assert_eq!(
            taxonomy.ancestry("disk_failure"),
            Err(TaxonomyError::UnknownKind("disk_failure".to_string()))
        );
    }

    #[test]
    fn test_is_a() {
        let taxonomy = sample();
        assert!(taxonomy.is_a("timeout_failure", "io_failure"));
        assert!(taxonomy.is_a("timeout_failure", "failure"));
        assert!(taxonomy.is_a("timeout_failure", "timeout_failure"));
        assert!(!taxonomy.is_a("parse_failure", "io_failure"));
        assert!(!taxonomy.is_a("disk_failure", "failure"));
    }

    #[test]
    fn test_from_config_resolves_out_of_order() {
        let config = TaxonomyConfig {
            kinds: vec![
                KindSpec {
                    name: "timeout_failure".to_string(),
                    parent: Some("io_failure".to_string()),
                },
                KindSpec {
                    name: "io_failure".to_string(),
                    parent: Some("failure".to_string()),
                },
                KindSpec {
                    name: "failure".to_string(),
                    parent: None,
                },
            ],
        };

        let taxonomy = Taxonomy::from_config(&config).unwrap();
        assert_eq!(taxonomy.len(), 3);
        assert_eq!(
            taxonomy.ancestry("timeout_failure").unwrap(),
            ["timeout_failure", "io_failure", "failure"]
        );
    }

    #[test]
    fn test_from_config_detects_cycle() {
        let config = TaxonomyConfig {
            kinds: vec![
                KindSpec {
                    name: "a".to_string(),
                    parent: Some("b".to_string()),
                },
                KindSpec {
                    name: "b".to_string(),
                    parent: Some("a".to_string()),
                },
            ],
        };

        assert!(matches!(
            Taxonomy::from_config(&config),
            Err(TaxonomyError::ParentCycle(_))
        ));
    }

    #[test]
    fn test_from_config_reports_missing_parent() {
        let config = TaxonomyConfig {
            kinds: vec![KindSpec {
                name: "io_failure".to_string(),
                parent: Some("failure".to_string()),
            }],
        };

        assert_eq!(
            Taxonomy::from_config(&config).unwrap_err(),
            TaxonomyError::UnknownParent {
                kind: "io_failure".to_string(),
                parent: "failure".to_string(),
            }
        );
    }
}
