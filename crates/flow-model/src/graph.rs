//! Graph abstraction over a validated flow
//!
//! The translation engine consumes flows through the [`FlowGraph`]
//! trait: a deterministic, repeatable node traversal plus edge lookups
//! by node id. Internal adjacency is deliberately not exposed.

use crate::types::{Flow, FlowEdge, FlowNode};
use crate::validation::{validate_flow, InvalidFlow};

/// Read-only graph view of a validated flow
///
/// Implementations guarantee a total, deterministic traversal: every
/// node exactly once, in the same order on every call for an unchanged
/// graph. Edge lookups preserve edge insertion order.
pub trait FlowGraph {
    /// Visit every node once, in the graph's canonical order
    fn traverse(&self) -> Box<dyn Iterator<Item = &FlowNode> + '_>;

    /// Look up a node by id
    fn node(&self, id: &str) -> Option<&FlowNode>;

    /// Edges coming into a node
    fn incoming_edges(&self, id: &str) -> Vec<&FlowEdge>;

    /// Edges going out of a node
    fn outgoing_edges(&self, id: &str) -> Vec<&FlowEdge>;
}

/// Flow graph that traverses nodes in insertion order
///
/// Insertion order was chosen over a topological order so that
/// translating an unchanged flow always yields the same document, and
/// so that flows containing loops need no special handling.
#[derive(Debug, Clone)]
pub struct SequencedFlowGraph {
    nodes: Vec<FlowNode>,
    edges: Vec<FlowEdge>,
}

impl SequencedFlowGraph {
    /// Build a graph from a flow description
    ///
    /// Fails with every structural violation found when the flow has
    /// duplicate ids or edges pointing at nonexistent nodes.
    pub fn from_flow(flow: Flow) -> Result<Self, InvalidFlow> {
        let violations = validate_flow(&flow);
        if !violations.is_empty() {
            return Err(InvalidFlow { violations });
        }
        Ok(Self {
            nodes: flow.nodes,
            edges: flow.edges,
        })
    }

    /// Number of nodes in the graph
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of edges in the graph
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

impl FlowGraph for SequencedFlowGraph {
    fn traverse(&self) -> Box<dyn Iterator<Item = &FlowNode> + '_> {
        Box::new(self.nodes.iter())
    }

    fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    fn incoming_edges(&self, id: &str) -> Vec<&FlowEdge> {
        self.edges.iter().filter(|e| e.target == id).collect()
    }

    fn outgoing_edges(&self, id: &str) -> Vec<&FlowEdge> {
        self.edges.iter().filter(|e| e.source == id).collect()
    }
}

impl TryFrom<Flow> for SequencedFlowGraph {
    type Error = InvalidFlow;

    fn try_from(flow: Flow) -> Result<Self, Self::Error> {
        Self::from_flow(flow)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConnectionKind, NodeRole, NodeTypeId};

    fn endpoint(id: &str) -> FlowNode {
        FlowNode::new(
            id,
            NodeTypeId::new("integration", "filter"),
            NodeRole::Endpoint,
            ConnectionKind::Passthru,
        )
    }

    fn three_node_flow() -> Flow {
        Flow {
            nodes: vec![endpoint("a"), endpoint("b"), endpoint("c")],
            edges: vec![
                FlowEdge::new("e1", "a", "b"),
                FlowEdge::new("e2", "b", "c"),
                FlowEdge::new("e3", "a", "c"),
            ],
        }
    }

    #[test]
    fn test_traversal_follows_insertion_order() {
        let graph = SequencedFlowGraph::from_flow(three_node_flow()).unwrap();
        let order: Vec<&str> = graph.traverse().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["a", "b", "c"]);

        // Repeat traversal yields the same sequence
        let again: Vec<&str> = graph.traverse().map(|n| n.id.as_str()).collect();
        assert_eq!(order, again);
    }

    #[test]
    fn test_node_lookup() {
        let graph = SequencedFlowGraph::from_flow(three_node_flow()).unwrap();
        assert_eq!(graph.node("b").map(|n| n.id.as_str()), Some("b"));
        assert!(graph.node("missing").is_none());
    }

    #[test]
    fn test_edge_lookups_preserve_insertion_order() {
        let graph = SequencedFlowGraph::from_flow(three_node_flow()).unwrap();

        let outgoing: Vec<&str> = graph.outgoing_edges("a").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(outgoing, vec!["e1", "e3"]);

        let incoming: Vec<&str> = graph.incoming_edges("c").iter().map(|e| e.id.as_str()).collect();
        assert_eq!(incoming, vec!["e2", "e3"]);
    }

    #[test]
    fn test_from_flow_rejects_invalid_flows() {
        let flow = Flow {
            nodes: vec![endpoint("a")],
            edges: vec![FlowEdge::new("e1", "a", "gone")],
        };
        let err = SequencedFlowGraph::from_flow(flow).unwrap_err();
        assert_eq!(err.violations.len(), 1);
    }
}
