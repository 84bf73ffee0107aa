//! Flow Model - Integration flow graphs for Wireloom
//!
//! This crate defines the flow description the designer posts (nodes,
//! typed edges, nested child elements) and the validated graph
//! abstraction the translation engine consumes. It supports:
//!
//! - Serde-based parsing of the designer's JSON flow document
//! - Structural validation collecting every violation at once
//! - A deterministic-traversal graph view with edge lookups by node id
//!
//! # Example
//!
//! ```ignore
//! use flow_model::{Flow, FlowGraph, SequencedFlowGraph};
//!
//! let flow: Flow = serde_json::from_str(body)?;
//! let graph = SequencedFlowGraph::from_flow(flow)?;
//! for node in graph.traverse() {
//!     println!("{} ({})", node.id, node.type_id);
//! }
//! ```

pub mod graph;
pub mod types;
pub mod validation;

// Re-export key types
pub use graph::{FlowGraph, SequencedFlowGraph};
pub use types::{
    ChildElement, ConnectionKind, EdgeId, EdgeKind, Flow, FlowEdge, FlowNode, NodeId, NodeRole,
    NodeTypeId,
};
pub use validation::{validate_flow, GraphError, InvalidFlow};
