//! Structural validation of flow descriptions
//!
//! A flow coming off the wire is checked before a graph is built from
//! it: node and edge ids must be unique and every edge endpoint must
//! name an existing node. Every violation is collected rather than
//! stopping at the first, so the designer can surface all of them at
//! once. Cycles are not rejected; integration flows may loop.

use std::collections::HashSet;

use thiserror::Error;

use crate::types::{EdgeId, Flow, NodeId};

/// A single structural violation found in a flow description
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// Two nodes share the same id
    #[error("duplicate node id: {0}")]
    DuplicateNodeId(NodeId),
    /// Two edges share the same id
    #[error("duplicate edge id: {0}")]
    DuplicateEdgeId(EdgeId),
    /// An edge's source does not name an existing node
    #[error("edge {edge} references missing source node {node}")]
    MissingSource { edge: EdgeId, node: NodeId },
    /// An edge's target does not name an existing node
    #[error("edge {edge} references missing target node {node}")]
    MissingTarget { edge: EdgeId, node: NodeId },
}

/// Aggregate of every structural violation found in one flow
#[derive(Debug, Error)]
#[error("invalid flow: {}", render_violations(.violations))]
pub struct InvalidFlow {
    /// All violations, in detection order
    pub violations: Vec<GraphError>,
}

fn render_violations(violations: &[GraphError]) -> String {
    violations
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Check a flow description for structural violations
pub fn validate_flow(flow: &Flow) -> Vec<GraphError> {
    let mut errors = Vec::new();
    check_duplicate_node_ids(flow, &mut errors);
    check_duplicate_edge_ids(flow, &mut errors);
    check_edge_endpoints(flow, &mut errors);
    errors
}

fn check_duplicate_node_ids(flow: &Flow, errors: &mut Vec<GraphError>) {
    let mut seen = HashSet::new();
    for node in &flow.nodes {
        if !seen.insert(node.id.as_str()) {
            errors.push(GraphError::DuplicateNodeId(node.id.clone()));
        }
    }
}

fn check_duplicate_edge_ids(flow: &Flow, errors: &mut Vec<GraphError>) {
    let mut seen = HashSet::new();
    for edge in &flow.edges {
        if !seen.insert(edge.id.as_str()) {
            errors.push(GraphError::DuplicateEdgeId(edge.id.clone()));
        }
    }
}

fn check_edge_endpoints(flow: &Flow, errors: &mut Vec<GraphError>) {
    let node_ids: HashSet<&str> = flow.nodes.iter().map(|n| n.id.as_str()).collect();
    for edge in &flow.edges {
        if !node_ids.contains(edge.source.as_str()) {
            errors.push(GraphError::MissingSource {
                edge: edge.id.clone(),
                node: edge.source.clone(),
            });
        }
        if !node_ids.contains(edge.target.as_str()) {
            errors.push(GraphError::MissingTarget {
                edge: edge.id.clone(),
                node: edge.target.clone(),
            });
        }
    }
}
