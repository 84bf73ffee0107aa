//! Per-node-type encoder registry
//!
//! Maps a node's qualified type to the encoder that turns it into XML
//! elements. This replaces hardcoded match-statement dispatch with a
//! dynamic, composable registry populated at engine construction.
//!
//! # Usage
//!
//! ```ignore
//! use xml_engine::{EncoderRegistry, XmlElement};
//! use flow_model::NodeTypeId;
//!
//! let mut registry = EncoderRegistry::new();
//! registry.register_fn(NodeTypeId::new("core", "filter"), |node, _graph| {
//!     Ok(vec![XmlElement::new("core", "filter")
//!         .with_attribute("id", &node.id)])
//! });
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use flow_model::{FlowGraph, FlowNode, NodeTypeId};

use crate::element::XmlElement;
use crate::error::EncodeError;

/// Outcome of one encoder invocation
pub type EncodeResult = std::result::Result<Vec<XmlElement>, EncodeError>;

/// Per-node-type encoder
///
/// An encoder handles exactly one node type. It may read the whole
/// graph for context (the node's edges, its neighbours) but must not
/// mutate anything. A failure is scoped to the node being encoded; the
/// translator converts it into a per-node error and moves on.
pub trait NodeEncoder: Send + Sync {
    /// Encode one node into zero or more element trees
    fn encode(&self, node: &FlowNode, graph: &dyn FlowGraph) -> EncodeResult;
}

/// Closure-backed NodeEncoder
///
/// Wraps a plain function as an encoder so simple vocabularies do not
/// need a dedicated type per element.
pub struct CallbackEncoder {
    callback: Box<dyn Fn(&FlowNode, &dyn FlowGraph) -> EncodeResult + Send + Sync>,
}

impl CallbackEncoder {
    /// Wrap a closure as an encoder
    pub fn new(
        callback: impl Fn(&FlowNode, &dyn FlowGraph) -> EncodeResult + Send + Sync + 'static,
    ) -> Self {
        Self {
            callback: Box::new(callback),
        }
    }
}

impl NodeEncoder for CallbackEncoder {
    fn encode(&self, node: &FlowNode, graph: &dyn FlowGraph) -> EncodeResult {
        (self.callback)(node, graph)
    }
}

/// Registry of node types with their encoders
///
/// Registration is last-write-wins for an exact type id. An optional
/// fallback encoder handles types with no exact registration; without
/// one, a lookup miss surfaces as a per-node error.
///
/// # Composability
///
/// Registries can be composed by merging:
/// ```ignore
/// let mut registry = EncoderRegistry::new();
/// // Register built-in vocabularies...
/// registry.merge(extension_registry); // Add site-specific encoders
/// ```
#[derive(Clone)]
pub struct EncoderRegistry {
    encoders: HashMap<NodeTypeId, Arc<dyn NodeEncoder>>,
    fallback: Option<Arc<dyn NodeEncoder>>,
}

impl EncoderRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            encoders: HashMap::new(),
            fallback: None,
        }
    }

    /// Register an encoder for a node type
    ///
    /// Replaces any prior encoder for that exact type id.
    pub fn register(&mut self, type_id: NodeTypeId, encoder: Arc<dyn NodeEncoder>) {
        self.encoders.insert(type_id, encoder);
    }

    /// Register a closure as the encoder for a node type
    pub fn register_fn(
        &mut self,
        type_id: NodeTypeId,
        encoder: impl Fn(&FlowNode, &dyn FlowGraph) -> EncodeResult + Send + Sync + 'static,
    ) {
        self.register(type_id, Arc::new(CallbackEncoder::new(encoder)));
    }

    /// Set the fallback encoder consulted when no exact entry matches
    pub fn set_fallback(&mut self, encoder: Arc<dyn NodeEncoder>) {
        self.fallback = Some(encoder);
    }

    /// Builder-style variant of [`set_fallback`](Self::set_fallback)
    pub fn with_fallback(mut self, encoder: Arc<dyn NodeEncoder>) -> Self {
        self.set_fallback(encoder);
        self
    }

    /// Look up the encoder for a node type
    ///
    /// Falls back to the fallback encoder, when one is set, for types
    /// with no exact registration.
    pub fn lookup(&self, type_id: &NodeTypeId) -> Option<Arc<dyn NodeEncoder>> {
        self.encoders
            .get(type_id)
            .or(self.fallback.as_ref())
            .cloned()
    }

    /// Check if a node type has an exact registration
    pub fn has_type(&self, type_id: &NodeTypeId) -> bool {
        self.encoders.contains_key(type_id)
    }

    /// Number of exact registrations
    pub fn len(&self) -> usize {
        self.encoders.len()
    }

    /// Whether the registry has no exact registrations
    pub fn is_empty(&self) -> bool {
        self.encoders.is_empty()
    }

    /// Merge another registry into this one
    ///
    /// Entries from `other` override entries in `self` for the same
    /// type id; `other`'s fallback, when set, replaces this one's.
    pub fn merge(&mut self, other: EncoderRegistry) {
        self.encoders.extend(other.encoders);
        if other.fallback.is_some() {
            self.fallback = other.fallback;
        }
    }
}

impl Default for EncoderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
