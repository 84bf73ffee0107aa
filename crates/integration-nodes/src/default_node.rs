//! Fallback encoder for ordinary nodes.
//!
//! Covers every node type without bespoke treatment: the node becomes a
//! single element named after its type, carrying the configured attributes
//! plus channel wiring derived from the surrounding edges.

use flow_model::{ChildElement, ConnectionKind, EdgeKind, FlowGraph, FlowNode, NodeRole};
use serde_json::Value;
use xml_engine::{EncodeError, EncodeResult, NodeEncoder, XmlElement};

use crate::channels::{implicit_channels, incoming_channel_ref, outgoing_channel_ref};

/// Encodes a node as one element named after its qualified type.
///
/// Channel wiring follows the node's connection shape:
///
/// * `source` endpoints reference their outgoing channel as `channel`
/// * `sink` endpoints reference their incoming channel as `channel`
/// * everything else gets `input-channel` / `output-channel`
/// * a discard edge adds `discard-channel`
///
/// Channel-role nodes carry no wiring; their element is the channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNodeEncoder;

impl DefaultNodeEncoder {
    /// Attribute carrying the node id
    pub const ID_ATTR: &'static str = "id";
    /// Wiring attribute of source and sink endpoints
    pub const CHANNEL_ATTR: &'static str = "channel";
    /// Wiring attribute naming the incoming channel
    pub const INPUT_CHANNEL_ATTR: &'static str = "input-channel";
    /// Wiring attribute naming the outgoing channel
    pub const OUTPUT_CHANNEL_ATTR: &'static str = "output-channel";
    /// Wiring attribute naming the discard flow
    pub const DISCARD_CHANNEL_ATTR: &'static str = "discard-channel";

    /// Create the encoder
    pub fn new() -> Self {
        Self
    }

    fn base_element(node: &FlowNode) -> Result<XmlElement, EncodeError> {
        let mut element =
            XmlElement::new(node.type_id.namespace.as_str(), node.type_id.name.as_str())
                .with_attribute(Self::ID_ATTR, node.id.clone());

        for (name, value) in &node.attributes {
            if let Some(text) = attribute_string(name, value)? {
                element.attributes.insert(name.clone(), text);
            }
        }
        for child in &node.children {
            element
                .children
                .push(child_to_element(&node.type_id.namespace, child)?);
        }
        Ok(element)
    }

    fn apply_wiring(element: &mut XmlElement, node: &FlowNode, graph: &dyn FlowGraph) {
        if node.role == NodeRole::Channel {
            return;
        }

        let incoming = graph.incoming_edges(&node.id);
        let outgoing = graph.outgoing_edges(&node.id);
        let first_in = incoming.iter().copied().find(|e| e.kind == EdgeKind::Default);
        let first_out = outgoing.iter().copied().find(|e| e.kind == EdgeKind::Default);

        match node.connection {
            ConnectionKind::Source => {
                if let Some(edge) = first_out {
                    element.attributes.insert(
                        Self::CHANNEL_ATTR.to_string(),
                        outgoing_channel_ref(edge, graph),
                    );
                }
            }
            ConnectionKind::Sink => {
                if let Some(edge) = first_in {
                    element.attributes.insert(
                        Self::CHANNEL_ATTR.to_string(),
                        incoming_channel_ref(edge, graph),
                    );
                }
            }
            ConnectionKind::Passthru | ConnectionKind::Tee | ConnectionKind::RequestReply => {
                if let Some(edge) = first_in {
                    element.attributes.insert(
                        Self::INPUT_CHANNEL_ATTR.to_string(),
                        incoming_channel_ref(edge, graph),
                    );
                }
                if let Some(edge) = first_out {
                    element.attributes.insert(
                        Self::OUTPUT_CHANNEL_ATTR.to_string(),
                        outgoing_channel_ref(edge, graph),
                    );
                }
            }
        }

        if let Some(edge) = outgoing.iter().copied().find(|e| e.kind == EdgeKind::Discard) {
            element.attributes.insert(
                Self::DISCARD_CHANNEL_ATTR.to_string(),
                outgoing_channel_ref(edge, graph),
            );
        }
    }
}

impl NodeEncoder for DefaultNodeEncoder {
    fn encode(&self, node: &FlowNode, graph: &dyn FlowGraph) -> EncodeResult {
        let mut element = Self::base_element(node)?;
        Self::apply_wiring(&mut element, node, graph);

        let mut elements = vec![element];
        elements.extend(implicit_channels(node, graph));
        Ok(elements)
    }
}

/// Render a configured value as an attribute string.
///
/// Scalars map directly and `null` means "not set". Arrays and objects
/// have no attribute form and are rejected with the attribute's name.
pub(crate) fn attribute_string(name: &str, value: &Value) -> Result<Option<String>, EncodeError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(flag) => Ok(Some(flag.to_string())),
        Value::Number(number) => Ok(Some(number.to_string())),
        Value::String(text) => Ok(Some(text.clone())),
        Value::Array(_) | Value::Object(_) => {
            Err(EncodeError::UnsupportedAttribute(name.to_string()))
        }
    }
}

/// Convert a configured child into an element under the node's prefix.
pub(crate) fn child_to_element(
    prefix: &str,
    child: &ChildElement,
) -> Result<XmlElement, EncodeError> {
    let mut element = XmlElement::new(prefix, child.name.as_str());
    for (name, value) in &child.attributes {
        if let Some(text) = attribute_string(name, value)? {
            element.attributes.insert(name.clone(), text);
        }
    }
    for nested in &child.children {
        element.children.push(child_to_element(prefix, nested)?);
    }
    Ok(element)
}
