//! Built-in node encoders for the Wireloom integration vocabulary.
//!
//! The engine in `xml-engine` is vocabulary-agnostic; this crate supplies
//! the concrete encoders that turn designer nodes into integration XML:
//!
//! - [`channels`]: channel resolution shared by every encoder
//! - [`default_node`]: fallback encoder covering ordinary nodes
//! - [`router`]: content-based router with resolved mapping children
//!
//! [`standard_translator`] assembles a ready-to-use engine from these
//! parts plus the built-in namespace.

use std::sync::Arc;

use flow_model::NodeTypeId;
use xml_engine::{EncoderRegistry, GraphTranslator, NamespaceRegistry, NamespaceSpec};

pub mod channels;
pub mod default_node;
pub mod router;

pub use channels::{implicit_channels, incoming_channel_ref, outgoing_channel_ref};
pub use default_node::DefaultNodeEncoder;
pub use router::RouterNodeEncoder;

/// Logical id and XML prefix of the built-in vocabulary
pub const INTEGRATION_NS: &str = "integration";
/// Namespace URI of the built-in vocabulary
pub const INTEGRATION_URI: &str = "http://schema.wireloom.dev/integration";
/// Schema location listed for the built-in vocabulary
pub const INTEGRATION_SCHEMA_LOCATION: &str =
    "https://schema.wireloom.dev/integration/wireloom-integration.xsd";
/// Root element of every translated document
pub const ROOT_ELEMENT: &str = "flow";

/// Namespace spec of the built-in vocabulary, the document default
pub fn integration_namespace() -> NamespaceSpec {
    NamespaceSpec::new(INTEGRATION_NS, INTEGRATION_URI, INTEGRATION_SCHEMA_LOCATION)
}

/// Encoder registry for the built-in vocabulary
///
/// The router gets its dedicated encoder; every other node type falls
/// back to [`DefaultNodeEncoder`].
pub fn standard_registry() -> EncoderRegistry {
    let mut registry = EncoderRegistry::new();
    registry.register(
        NodeTypeId::new(INTEGRATION_NS, "router"),
        Arc::new(RouterNodeEncoder::new()),
    );
    registry.with_fallback(Arc::new(DefaultNodeEncoder::new()))
}

/// Ready-to-use translator for the built-in vocabulary
///
/// `extras` registers additional namespaces (adapter vocabularies and
/// the like) beyond the built-in default.
pub fn standard_translator(extras: impl IntoIterator<Item = NamespaceSpec>) -> GraphTranslator {
    let namespaces = NamespaceRegistry::new(integration_namespace(), extras);
    GraphTranslator::new(ROOT_ELEMENT, namespaces, standard_registry())
}
