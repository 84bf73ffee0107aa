//! Encoder for content-based router nodes.
//!
//! A router fans one input out to several targets. The designer configures
//! it with `mapping` children whose `channel` attribute names the target
//! node; encoding rewrites each of those references to the channel the
//! corresponding outgoing edge resolves to.

use flow_model::{ChildElement, EdgeKind, FlowGraph, FlowNode};
use serde_json::Value;
use xml_engine::{EncodeError, EncodeResult, NodeEncoder, XmlElement};

use crate::channels::{implicit_channels, incoming_channel_ref, outgoing_channel_ref};
use crate::default_node::{attribute_string, child_to_element, DefaultNodeEncoder};

/// Encodes a router node with resolved mapping children.
///
/// Each `mapping` child must name a target node the router has a plain
/// outgoing edge to; the mapping's `channel` attribute is replaced with
/// that edge's channel. A discard edge becomes `default-output-channel`,
/// the route taken when no mapping matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouterNodeEncoder;

impl RouterNodeEncoder {
    /// Child element carrying one route
    pub const MAPPING_CHILD: &'static str = "mapping";
    /// Mapping attribute naming the route's target
    pub const MAPPING_CHANNEL_ATTR: &'static str = "channel";
    /// Wiring attribute naming the incoming channel
    pub const INPUT_CHANNEL_ATTR: &'static str = "input-channel";
    /// Wiring attribute for the route taken when no mapping matches
    pub const DEFAULT_OUTPUT_CHANNEL_ATTR: &'static str = "default-output-channel";

    /// Create the encoder
    pub fn new() -> Self {
        Self
    }

    fn mapping_element(
        node: &FlowNode,
        child: &ChildElement,
        graph: &dyn FlowGraph,
    ) -> Result<XmlElement, EncodeError> {
        let mut element = XmlElement::new(node.type_id.namespace.as_str(), child.name.as_str());
        for (name, value) in &child.attributes {
            if name == Self::MAPPING_CHANNEL_ATTR {
                continue;
            }
            if let Some(text) = attribute_string(name, value)? {
                element.attributes.insert(name.clone(), text);
            }
        }

        let target = child
            .attributes
            .get(Self::MAPPING_CHANNEL_ATTR)
            .and_then(Value::as_str)
            .ok_or_else(|| EncodeError::MissingAttribute(Self::MAPPING_CHANNEL_ATTR.to_string()))?;
        let edge = graph
            .outgoing_edges(&node.id)
            .into_iter()
            .find(|e| e.kind == EdgeKind::Default && e.target == target)
            .ok_or_else(|| EncodeError::MissingChannel(target.to_string()))?;
        element.attributes.insert(
            Self::MAPPING_CHANNEL_ATTR.to_string(),
            outgoing_channel_ref(edge, graph),
        );

        for nested in &child.children {
            element
                .children
                .push(child_to_element(&node.type_id.namespace, nested)?);
        }
        Ok(element)
    }
}

impl NodeEncoder for RouterNodeEncoder {
    fn encode(&self, node: &FlowNode, graph: &dyn FlowGraph) -> EncodeResult {
        let mut element =
            XmlElement::new(node.type_id.namespace.as_str(), node.type_id.name.as_str())
                .with_attribute(DefaultNodeEncoder::ID_ATTR, node.id.clone());

        for (name, value) in &node.attributes {
            if let Some(text) = attribute_string(name, value)? {
                element.attributes.insert(name.clone(), text);
            }
        }

        let incoming = graph.incoming_edges(&node.id);
        if let Some(edge) = incoming.iter().copied().find(|e| e.kind == EdgeKind::Default) {
            element.attributes.insert(
                Self::INPUT_CHANNEL_ATTR.to_string(),
                incoming_channel_ref(edge, graph),
            );
        }
        let outgoing = graph.outgoing_edges(&node.id);
        if let Some(edge) = outgoing.iter().copied().find(|e| e.kind == EdgeKind::Discard) {
            element.attributes.insert(
                Self::DEFAULT_OUTPUT_CHANNEL_ATTR.to_string(),
                outgoing_channel_ref(edge, graph),
            );
        }

        for child in &node.children {
            let converted = if child.name == Self::MAPPING_CHILD {
                Self::mapping_element(node, child, graph)?
            } else {
                child_to_element(&node.type_id.namespace, child)?
            };
            element.children.push(converted);
        }

        let mut elements = vec![element];
        elements.extend(implicit_channels(node, graph));
        Ok(elements)
    }
}
