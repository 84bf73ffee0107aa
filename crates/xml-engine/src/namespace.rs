//! Namespace registry
//!
//! Maps a logical namespace identifier to its XML namespace URI and
//! schema location. One spec is designated the document default and
//! doubles as the root element's namespace. The registry is read-only
//! after construction; lookups are pure.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One namespace mapping entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamespaceSpec {
    /// Logical namespace identifier, used as the XML prefix
    pub id: String,
    /// XML namespace URI
    pub uri: String,
    /// Schema location hint listed in xsi:schemaLocation
    pub schema_location: String,
}

impl NamespaceSpec {
    /// Create a namespace spec
    pub fn new(
        id: impl Into<String>,
        uri: impl Into<String>,
        schema_location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            uri: uri.into(),
            schema_location: schema_location.into(),
        }
    }
}

/// Registry of namespace specs with one designated default
#[derive(Debug, Clone)]
pub struct NamespaceRegistry {
    default: NamespaceSpec,
    by_id: HashMap<String, NamespaceSpec>,
}

impl NamespaceRegistry {
    /// Build a registry from the default spec plus extra entries
    ///
    /// The default is entered into the lookup map as well. A later
    /// extra with the same id overrides the map entry (last write
    /// wins) while the designated default spec is retained.
    pub fn new(default: NamespaceSpec, extras: impl IntoIterator<Item = NamespaceSpec>) -> Self {
        let mut by_id = HashMap::new();
        by_id.insert(default.id.clone(), default.clone());
        for spec in extras {
            by_id.insert(spec.id.clone(), spec);
        }
        Self { default, by_id }
    }

    /// The designated default namespace
    pub fn default_spec(&self) -> &NamespaceSpec {
        &self.default
    }

    /// Look up a namespace by id
    pub fn resolve(&self, id: &str) -> Option<&NamespaceSpec> {
        self.by_id.get(id)
    }

    /// Ids of every registered namespace, in no particular order
    pub fn ids(&self) -> Vec<&str> {
        self.by_id.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_spec() -> NamespaceSpec {
        NamespaceSpec::new(
            "integration",
            "http://example.org/integration",
            "https://example.org/integration.xsd",
        )
    }

    #[test]
    fn test_resolve_default_and_extras() {
        let registry = NamespaceRegistry::new(
            default_spec(),
            vec![NamespaceSpec::new(
                "amqp",
                "http://example.org/amqp",
                "https://example.org/amqp.xsd",
            )],
        );

        assert_eq!(
            registry.resolve("integration").map(|s| s.uri.as_str()),
            Some("http://example.org/integration")
        );
        assert_eq!(
            registry.resolve("amqp").map(|s| s.uri.as_str()),
            Some("http://example.org/amqp")
        );
        assert!(registry.resolve("jms").is_none());
    }

    #[test]
    fn test_last_write_wins_keeps_designated_default() {
        let override_spec = NamespaceSpec::new(
            "integration",
            "http://example.org/integration/v2",
            "https://example.org/integration-v2.xsd",
        );
        let registry = NamespaceRegistry::new(default_spec(), vec![override_spec.clone()]);

        // Map entry is overridden, the designated default is not
        assert_eq!(registry.resolve("integration"), Some(&override_spec));
        assert_eq!(registry.default_spec(), &default_spec());
    }

    #[test]
    fn test_ids_cover_every_entry() {
        let registry = NamespaceRegistry::new(
            default_spec(),
            vec![NamespaceSpec::new(
                "amqp",
                "http://example.org/amqp",
                "https://example.org/amqp.xsd",
            )],
        );
        let mut ids = registry.ids();
        ids.sort_unstable();
        assert_eq!(ids, vec!["amqp", "integration"]);
    }
}
