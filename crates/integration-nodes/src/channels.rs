//! Channel resolution shared by the built-in encoders.
//!
//! Endpoints never reference each other directly. Every edge drains into a
//! channel: either an explicit channel-role node placed in the graph, or an
//! implicit channel named after the edge itself. The helpers here answer
//! "which channel id does this edge stand for" from either end, and build
//! the synthetic channel elements a node owes for its outgoing edges.
//!
//! Implicit channels are emitted in the document default namespace, so they
//! stay well formed no matter which namespaces the graph discovers.

use flow_model::{FlowEdge, FlowGraph, FlowNode, NodeRole};
use xml_engine::XmlElement;

/// Channel id an edge resolves to when read from its source node.
///
/// When the target is a channel-role node, that node is the channel.
/// Otherwise the edge denotes an implicit channel named by the edge id.
pub fn outgoing_channel_ref(edge: &FlowEdge, graph: &dyn FlowGraph) -> String {
    match graph.node(&edge.target) {
        Some(target) if target.role == NodeRole::Channel => target.id.clone(),
        _ => edge.id.clone(),
    }
}

/// Channel id an edge resolves to when read from its target node.
pub fn incoming_channel_ref(edge: &FlowEdge, graph: &dyn FlowGraph) -> String {
    match graph.node(&edge.source) {
        Some(source) if source.role == NodeRole::Channel => source.id.clone(),
        _ => edge.id.clone(),
    }
}

/// Synthetic channel elements owed by a node for its outgoing edges.
///
/// Each outgoing edge whose target is not a channel-role node gets one
/// `<channel id="{edge.id}"/>` element, in outgoing-edge order. The source
/// side owns the emission, so every implicit channel appears exactly once
/// in the document. A channel-role node is itself the channel for every
/// adjacent edge and owes none.
pub fn implicit_channels(node: &FlowNode, graph: &dyn FlowGraph) -> Vec<XmlElement> {
    if node.role == NodeRole::Channel {
        return Vec::new();
    }
    graph
        .outgoing_edges(&node.id)
        .into_iter()
        .filter(|edge| !targets_channel(edge, graph))
        .map(|edge| XmlElement::unprefixed("channel").with_attribute("id", edge.id.clone()))
        .collect()
}

fn targets_channel(edge: &FlowEdge, graph: &dyn FlowGraph) -> bool {
    graph
        .node(&edge.target)
        .is_some_and(|target| target.role == NodeRole::Channel)
}
