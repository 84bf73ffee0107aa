//! Graph translator
//!
//! The engine's orchestrator. A translation call makes two passes over
//! the graph: namespace discovery first, so every declaration can be
//! placed on the root before a single node is written, then the
//! encode-and-write pass. Per-node encoding failures are collected and
//! returned; structural failures abort the call.

use std::collections::HashSet;
use std::io::Write;
use std::sync::Arc;

use flow_model::{FlowGraph, NodeTypeId};

use crate::encoder::{EncoderRegistry, NodeEncoder};
use crate::error::{EncodeError, EngineError, Result, TranslationError};
use crate::namespace::{NamespaceRegistry, NamespaceSpec};
use crate::writer::{RootStart, XmlStreamWriter};

/// Namespace URI behind the fixed `xsi` prefix
pub const XSI_NAMESPACE_URI: &str = "http://www.w3.org/2001/XMLSchema-instance";

const XSI_PREFIX: &str = "xsi";

/// Two-pass graph-to-XML translator
///
/// Holds the process-lifetime configuration: root element name,
/// namespace registry, encoder registry. All of it is read-only once
/// built, so a single instance can serve concurrent calls; everything
/// mutable lives inside one `translate` invocation.
pub struct GraphTranslator {
    root_name: String,
    namespaces: NamespaceRegistry,
    encoders: EncoderRegistry,
}

impl GraphTranslator {
    /// Create a translator
    pub fn new(
        root_name: impl Into<String>,
        namespaces: NamespaceRegistry,
        encoders: EncoderRegistry,
    ) -> Self {
        Self {
            root_name: root_name.into(),
            namespaces,
            encoders,
        }
    }

    /// Register an encoder for a node type
    pub fn register_encoder(&mut self, type_id: NodeTypeId, encoder: Arc<dyn NodeEncoder>) {
        self.encoders.register(type_id, encoder);
    }

    /// The namespace registry in use
    pub fn namespaces(&self) -> &NamespaceRegistry {
        &self.namespaces
    }

    /// Translate a graph into one XML document written to `sink`
    ///
    /// On success the document is complete and well-formed for every
    /// node that encoded cleanly, and the returned list holds one
    /// entry per node that did not (empty list = full success). A
    /// structural failure aborts the whole call instead: an
    /// unregistered namespace is detected before the sink is touched,
    /// and the sink is flushed on every exit path after writing began.
    pub fn translate<W: Write>(
        &self,
        graph: &dyn FlowGraph,
        sink: W,
    ) -> Result<Vec<TranslationError>> {
        let discovered = self.discover_namespaces(graph)?;

        let mut writer = XmlStreamWriter::new(sink);
        match self.write_document(graph, &discovered, &mut writer) {
            Ok(errors) => {
                writer.finish()?;
                Ok(errors)
            }
            Err(e) => {
                let _ = writer.flush();
                Err(e)
            }
        }
    }

    /// Translate a graph into an in-memory document
    pub fn translate_to_string(
        &self,
        graph: &dyn FlowGraph,
    ) -> Result<(String, Vec<TranslationError>)> {
        let mut buffer = Vec::new();
        let errors = self.translate(graph, &mut buffer)?;
        let document = String::from_utf8(buffer)?;
        Ok((document, errors))
    }

    /// First pass: collect each node's namespace, deduplicated in
    /// first-seen order, resolving every id against the registry
    fn discover_namespaces(&self, graph: &dyn FlowGraph) -> Result<Vec<&NamespaceSpec>> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut discovered = Vec::new();
        for node in graph.traverse() {
            let ns = node.type_id.namespace.as_str();
            if seen.insert(ns) {
                match self.namespaces.resolve(ns) {
                    Some(spec) => discovered.push(spec),
                    None => return Err(EngineError::UnregisteredNamespace(ns.to_string())),
                }
            }
        }
        log::debug!(
            "discovered {} namespace(s): {:?}",
            discovered.len(),
            discovered.iter().map(|s| s.id.as_str()).collect::<Vec<_>>()
        );
        Ok(discovered)
    }

    /// Root start tag: default and xsi declarations, one prefixed
    /// declaration per discovered namespace, and the schema-location
    /// attribute listing the default pair followed by each discovered
    /// pair in discovery order
    fn root_start(&self, discovered: &[&NamespaceSpec]) -> RootStart {
        let default = self.namespaces.default_spec();

        let mut namespaces = Vec::with_capacity(discovered.len() + 1);
        namespaces.push((XSI_PREFIX.to_string(), XSI_NAMESPACE_URI.to_string()));
        for spec in discovered {
            namespaces.push((spec.id.clone(), spec.uri.clone()));
        }

        let mut pairs = Vec::with_capacity(discovered.len() + 1);
        pairs.push(format!("{} {}", default.uri, default.schema_location));
        for spec in discovered {
            pairs.push(format!("{} {}", spec.uri, spec.schema_location));
        }

        RootStart {
            name: self.root_name.clone(),
            default_namespace: default.uri.clone(),
            namespaces,
            attributes: vec![("xsi:schemaLocation".to_string(), pairs.join("\n"))],
        }
    }

    /// Second pass: write the root, then every node in traversal
    /// order, recording a per-node error for each lookup miss or
    /// encoder failure and carrying on with the rest
    fn write_document<W: Write>(
        &self,
        graph: &dyn FlowGraph,
        discovered: &[&NamespaceSpec],
        writer: &mut XmlStreamWriter<W>,
    ) -> Result<Vec<TranslationError>> {
        writer.start_document(&self.root_start(discovered))?;

        let mut errors = Vec::new();
        for node in graph.traverse() {
            let encoded = match self.encoders.lookup(&node.type_id) {
                Some(encoder) => encoder.encode(node, graph),
                None => Err(EncodeError::UnregisteredType(node.type_id.clone())),
            };
            match encoded {
                Ok(elements) => {
                    for element in &elements {
                        writer.write_element(element)?;
                    }
                }
                Err(cause) => {
                    log::warn!("failed to encode node {}: {}", node.id, cause);
                    errors.push(TranslationError::new(node.id.clone(), cause));
                }
            }
        }
        Ok(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::XmlElement;
    use flow_model::{ConnectionKind, Flow, FlowNode, NodeRole, SequencedFlowGraph};

    fn node(id: &str, ns: &str, name: &str) -> FlowNode {
        FlowNode::new(
            id,
            NodeTypeId::new(ns, name),
            NodeRole::Endpoint,
            ConnectionKind::Passthru,
        )
    }

    fn graph_of(nodes: Vec<FlowNode>) -> SequencedFlowGraph {
        SequencedFlowGraph::from_flow(Flow {
            nodes,
            edges: vec![],
        })
        .unwrap()
    }

    fn test_namespaces() -> NamespaceRegistry {
        NamespaceRegistry::new(
            NamespaceSpec::new(
                "app",
                "http://example.org/default",
                "https://example.org/default.xsd",
            ),
            vec![
                NamespaceSpec::new(
                    "core",
                    "http://example.org/core",
                    "https://example.org/core.xsd",
                ),
                NamespaceSpec::new(
                    "amqp",
                    "http://example.org/amqp",
                    "https://example.org/amqp.xsd",
                ),
            ],
        )
    }

    fn test_translator() -> GraphTranslator {
        let mut encoders = EncoderRegistry::new();
        encoders.register_fn(NodeTypeId::new("core", "filter"), |_node, _graph| {
            Ok(vec![
                XmlElement::new("core", "filter").with_attribute("expression", "true")
            ])
        });
        encoders.register_fn(NodeTypeId::new("core", "transformer"), |node, _graph| {
            Ok(vec![
                XmlElement::new("core", "transformer").with_attribute("id", node.id.clone())
            ])
        });
        encoders.register_fn(NodeTypeId::new("amqp", "queue"), |node, _graph| {
            Ok(vec![
                XmlElement::new("amqp", "queue").with_attribute("id", node.id.clone())
            ])
        });
        encoders.register_fn(NodeTypeId::new("app", "bridge"), |node, _graph| {
            Ok(vec![
                XmlElement::new("app", "bridge").with_attribute("id", node.id.clone())
            ])
        });
        GraphTranslator::new("default-root", test_namespaces(), encoders)
    }

    #[test]
    fn test_single_filter_node_document() {
        let translator = test_translator();
        let graph = graph_of(vec![node("n1", "core", "filter")]);

        let (document, errors) = translator.translate_to_string(&graph).unwrap();
        assert!(errors.is_empty());
        assert_eq!(
            document,
            "<?xml version=\"1.0\"?>\
             <default-root xmlns=\"http://example.org/default\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xmlns:core=\"http://example.org/core\" \
             xsi:schemaLocation=\"http://example.org/default https://example.org/default.xsd\n\
             http://example.org/core https://example.org/core.xsd\">\
             <core:filter expression=\"true\"/>\
             </default-root>"
        );
    }

    #[test]
    fn test_empty_graph_document() {
        let translator = test_translator();
        let graph = graph_of(vec![]);

        let (document, errors) = translator.translate_to_string(&graph).unwrap();
        assert!(errors.is_empty());
        assert_eq!(
            document,
            "<?xml version=\"1.0\"?>\
             <default-root xmlns=\"http://example.org/default\" \
             xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" \
             xsi:schemaLocation=\"http://example.org/default https://example.org/default.xsd\">\
             </default-root>"
        );
    }

    #[test]
    fn test_repeat_translation_is_byte_identical() {
        let translator = test_translator();
        let graph = graph_of(vec![
            node("n1", "core", "filter"),
            node("n2", "amqp", "queue"),
            node("n3", "core", "transformer"),
        ]);

        let mut first = Vec::new();
        let mut second = Vec::new();
        translator.translate(&graph, &mut first).unwrap();
        translator.translate(&graph, &mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_each_namespace_declared_exactly_once() {
        let translator = test_translator();
        let graph = graph_of(vec![
            node("n1", "core", "filter"),
            node("n2", "amqp", "queue"),
            node("n3", "core", "transformer"),
        ]);

        let (document, _) = translator.translate_to_string(&graph).unwrap();
        assert_eq!(
            document
                .matches("xmlns:core=\"http://example.org/core\"")
                .count(),
            1
        );
        assert_eq!(
            document
                .matches("xmlns:amqp=\"http://example.org/amqp\"")
                .count(),
            1
        );
        // Discovery order: core first, amqp second
        assert!(
            document.find("xmlns:core").unwrap() < document.find("xmlns:amqp").unwrap()
        );
        assert!(document.contains(
            "http://example.org/core https://example.org/core.xsd\n\
             http://example.org/amqp https://example.org/amqp.xsd"
        ));
    }

    #[test]
    fn test_unencodable_node_is_isolated() {
        let translator = test_translator();
        let graph = graph_of(vec![
            node("n1", "core", "filter"),
            node("n2", "core", "splitter"),
            node("n3", "core", "transformer"),
        ]);

        let (document, errors) = translator.translate_to_string(&graph).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].node_id, "n2");
        assert!(matches!(errors[0].cause, EncodeError::UnregisteredType(_)));

        // Neighbours still made it into a well-formed document
        assert!(document.contains("<core:filter expression=\"true\"/>"));
        assert!(document.contains("<core:transformer id=\"n3\"/>"));
        assert!(!document.contains("splitter"));
        assert!(document.ends_with("</default-root>"));
    }

    #[test]
    fn test_two_nodes_second_unregistered() {
        let translator = test_translator();
        let graph = graph_of(vec![
            node("n1", "core", "filter"),
            node("n2", "core", "no-such-type"),
        ]);

        let (document, errors) = translator.translate_to_string(&graph).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].node_id, "n2");
        assert_eq!(document.matches("<core:").count(), 1);
    }

    #[test]
    fn test_encoder_failure_is_isolated() {
        let mut encoders = EncoderRegistry::new();
        encoders.register_fn(NodeTypeId::new("core", "filter"), |_node, _graph| {
            Ok(vec![
                XmlElement::new("core", "filter").with_attribute("expression", "true")
            ])
        });
        encoders.register_fn(NodeTypeId::new("core", "broken"), |_node, _graph| {
            Err(EncodeError::MissingAttribute("expression".into()))
        });
        let translator = GraphTranslator::new("default-root", test_namespaces(), encoders);

        let graph = graph_of(vec![
            node("n1", "core", "broken"),
            node("n2", "core", "filter"),
        ]);
        let (document, errors) = translator.translate_to_string(&graph).unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].node_id, "n1");
        assert!(matches!(errors[0].cause, EncodeError::MissingAttribute(_)));
        assert!(document.contains("<core:filter"));
    }

    #[test]
    fn test_errors_follow_traversal_order() {
        let translator = test_translator();
        let graph = graph_of(vec![
            node("n1", "core", "unknown-a"),
            node("n2", "core", "filter"),
            node("n3", "core", "unknown-b"),
        ]);

        let (_, errors) = translator.translate_to_string(&graph).unwrap();
        let ids: Vec<&str> = errors.iter().map(|e| e.node_id.as_str()).collect();
        assert_eq!(ids, vec!["n1", "n3"]);
    }

    #[test]
    fn test_unregistered_namespace_aborts_before_output() {
        let translator = test_translator();
        let graph = graph_of(vec![
            node("n1", "core", "filter"),
            node("n2", "ghost", "queue"),
        ]);

        let mut sink = Vec::new();
        let err = translator.translate(&graph, &mut sink).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnregisteredNamespace(ref ns) if ns == "ghost"
        ));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_default_namespace_repeats_when_discovered() {
        let translator = test_translator();
        let graph = graph_of(vec![node("n1", "app", "bridge")]);

        let (document, errors) = translator.translate_to_string(&graph).unwrap();
        assert!(errors.is_empty());
        assert!(document.contains("xmlns:app=\"http://example.org/default\""));
        assert!(document.contains(
            "xsi:schemaLocation=\"http://example.org/default https://example.org/default.xsd\n\
             http://example.org/default https://example.org/default.xsd\""
        ));
        assert!(document.contains("<app:bridge id=\"n1\"/>"));
    }

    #[test]
    fn test_register_encoder_after_construction() {
        let mut translator =
            GraphTranslator::new("default-root", test_namespaces(), EncoderRegistry::new());
        translator.register_encoder(
            NodeTypeId::new("core", "filter"),
            Arc::new(crate::encoder::CallbackEncoder::new(|_node, _graph| {
                Ok(vec![
                    XmlElement::new("core", "filter").with_attribute("expression", "true")
                ])
            })),
        );

        let graph = graph_of(vec![node("n1", "core", "filter")]);
        let (document, errors) = translator.translate_to_string(&graph).unwrap();
        assert!(errors.is_empty());
        assert!(document.contains("<core:filter"));
    }

    #[test]
    fn test_multi_element_encoders_write_in_returned_order() {
        let mut encoders = EncoderRegistry::new();
        encoders.register_fn(NodeTypeId::new("core", "tee"), |node, _graph| {
            Ok(vec![
                XmlElement::new("core", "tee").with_attribute("id", node.id.clone()),
                XmlElement::unprefixed("channel").with_attribute("id", format!("{}-out", node.id)),
            ])
        });
        let translator = GraphTranslator::new("default-root", test_namespaces(), encoders);

        let graph = graph_of(vec![node("n1", "core", "tee")]);
        let (document, errors) = translator.translate_to_string(&graph).unwrap();
        assert!(errors.is_empty());
        assert!(document.contains("<core:tee id=\"n1\"/><channel id=\"n1-out\"/>"));
    }
}
