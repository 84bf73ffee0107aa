//! Core types for integration flows
//!
//! These types mirror the JSON document the flow designer produces:
//! nodes, typed edges, nested child elements, and their metadata.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a node
pub type NodeId = String;

/// Unique identifier for an edge
pub type EdgeId = String;

/// Qualified type of a node: which vocabulary it belongs to and
/// which entry within that vocabulary it is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeTypeId {
    /// Logical namespace identifier (e.g. "integration")
    pub namespace: String,
    /// Type name within the namespace (e.g. "filter")
    pub name: String,
}

impl NodeTypeId {
    /// Create a type identifier
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for NodeTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.namespace, self.name)
    }
}

/// Kind of connection an edge represents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeKind {
    /// Ordinary message flow
    #[default]
    Default,
    /// Flow taken for discarded/rejected messages
    Discard,
}

/// A directed connection between two nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowEdge {
    /// Unique identifier for this edge
    pub id: EdgeId,
    /// Source node ID
    pub source: NodeId,
    /// Target node ID
    pub target: NodeId,
    /// Connection kind; plain message flow when absent
    #[serde(rename = "type", default)]
    pub kind: EdgeKind,
}

impl FlowEdge {
    /// Create an ordinary edge between two nodes
    pub fn new(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
            kind: EdgeKind::Default,
        }
    }

    /// Mark this edge as the discard flow
    pub fn discard(mut self) -> Self {
        self.kind = EdgeKind::Discard;
        self
    }
}

/// Role a node plays in the flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeRole {
    /// Message channel connecting endpoints
    Channel,
    /// Processing endpoint
    Endpoint,
    /// Routing endpoint with multiple outputs
    Router,
}

/// How a node connects into the surrounding flow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    /// Produces messages, no input
    Source,
    /// Consumes messages, no output
    Sink,
    /// One input, one output
    Passthru,
    /// One input, multiple outputs
    Tee,
    /// Request/reply exchange
    RequestReply,
}

/// Nested configuration element of a node
///
/// Children carry structured configuration that maps to nested XML,
/// e.g. a router's mapping entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildElement {
    /// Element name within the node's namespace
    pub name: String,
    /// Attribute values keyed by attribute name
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Nested children, in document order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildElement>,
}

impl ChildElement {
    /// Create a child element with no attributes or children
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: serde_json::Map::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute on this child
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a nested child
    pub fn with_child(mut self, child: ChildElement) -> Self {
        self.children.push(child);
        self
    }
}

/// A node instance in a flow
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowNode {
    /// Unique identifier for this node instance
    pub id: NodeId,
    /// Qualified node type
    #[serde(rename = "type")]
    pub type_id: NodeTypeId,
    /// Human-readable label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    /// Description of what the node does
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Role the node plays in the flow
    pub role: NodeRole,
    /// How the node connects to its neighbours
    pub connection: ConnectionKind,
    /// Configured attribute values keyed by attribute name
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub attributes: serde_json::Map<String, serde_json::Value>,
    /// Nested configuration elements
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ChildElement>,
}

impl FlowNode {
    /// Create a node with empty attributes and children
    pub fn new(
        id: impl Into<String>,
        type_id: NodeTypeId,
        role: NodeRole,
        connection: ConnectionKind,
    ) -> Self {
        Self {
            id: id.into(),
            type_id,
            label: None,
            description: None,
            role,
            connection,
            attributes: serde_json::Map::new(),
            children: Vec::new(),
        }
    }

    /// Set the display label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set an attribute on this node
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a nested configuration element
    pub fn with_child(mut self, child: ChildElement) -> Self {
        self.children.push(child);
        self
    }
}

/// A complete flow description as posted by the designer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Flow {
    /// Nodes in the flow
    pub nodes: Vec<FlowNode>,
    /// Edges connecting nodes
    pub edges: Vec<FlowEdge>,
}

impl Flow {
    /// Create an empty flow
    pub fn new() -> Self {
        Self::default()
    }
}
