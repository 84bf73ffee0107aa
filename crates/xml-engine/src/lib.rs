//! XML Engine - Graph-to-XML translation for Wireloom
//!
//! This crate turns a validated integration flow graph into one
//! namespaced, schema-located XML document. It supports:
//!
//! - Two-pass translation: namespace discovery, then encode-and-write
//! - Pluggable per-node-type encoders with an optional fallback
//! - Partial-failure isolation (one bad node never sinks the document)
//! - Deterministic output: repeat translations are byte-identical
//! - Streaming serialization over any `std::io::Write` sink
//!
//! # Architecture
//!
//! The [`GraphTranslator`] orchestrates: it resolves every namespace a
//! graph uses against the [`NamespaceRegistry`] before output starts,
//! builds the root element's declarations, then walks the graph in its
//! canonical order dispatching each node through the
//! [`EncoderRegistry`]. Encoders produce [`XmlElement`] trees; the
//! [`XmlStreamWriter`] serializes them.
//!
//! # Example
//!
//! ```ignore
//! use xml_engine::{EncoderRegistry, GraphTranslator, NamespaceRegistry, NamespaceSpec, XmlElement};
//! use flow_model::NodeTypeId;
//!
//! let namespaces = NamespaceRegistry::new(default_spec, extra_specs);
//! let mut encoders = EncoderRegistry::new();
//! encoders.register_fn(NodeTypeId::new("core", "filter"), |node, _graph| {
//!     Ok(vec![XmlElement::new("core", "filter")
//!         .with_attribute("id", node.id.clone())])
//! });
//!
//! let translator = GraphTranslator::new("flow", namespaces, encoders);
//! let (document, errors) = translator.translate_to_string(&graph)?;
//! ```

pub mod element;
pub mod encoder;
pub mod error;
pub mod namespace;
pub mod translator;
pub mod writer;

// Re-export key types
pub use element::XmlElement;
pub use encoder::{CallbackEncoder, EncodeResult, EncoderRegistry, NodeEncoder};
pub use error::{EncodeError, EngineError, Result, TranslationError};
pub use namespace::{NamespaceRegistry, NamespaceSpec};
pub use translator::{GraphTranslator, XSI_NAMESPACE_URI};
pub use writer::{RootStart, XmlStreamWriter};
