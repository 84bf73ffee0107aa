//! Error types for the translation engine
//!
//! Failures fall into two tiers. Structural errors ([`EngineError`])
//! abort the whole call. Per-node errors ([`TranslationError`], with an
//! [`EncodeError`] cause) are collected and returned alongside the
//! document; one bad node never blocks the rest of a flow.

use thiserror::Error;

use flow_model::{NodeId, NodeTypeId};

/// Result type alias using EngineError
pub type Result<T> = std::result::Result<T, EngineError>;

/// Structural errors that abort an entire translation call
#[derive(Debug, Error)]
pub enum EngineError {
    /// A node's type names a namespace with no registry entry
    #[error("Unregistered namespace: {0}")]
    UnregisteredNamespace(String),

    /// An element uses a prefix that was not declared on the root
    #[error("Undeclared namespace prefix '{prefix}' on element '{element}'")]
    UndeclaredPrefix { prefix: String, element: String },

    /// XML writing error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// I/O error on the sink
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document bytes were not valid UTF-8
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Reasons a single node could not be encoded
#[derive(Debug, Error)]
pub enum EncodeError {
    /// No encoder registered for the node's type
    #[error("No encoder registered for node type {0}")]
    UnregisteredType(NodeTypeId),

    /// A required attribute was absent from the node
    #[error("Missing required attribute: {0}")]
    MissingAttribute(String),

    /// An attribute value has no XML representation
    #[error("Unsupported value for attribute '{0}'")]
    UnsupportedAttribute(String),

    /// A channel reference could not be resolved
    #[error("No channel found for '{0}'")]
    MissingChannel(String),

    /// Encoder-specific failure
    #[error("{0}")]
    Custom(String),
}

impl EncodeError {
    /// Create an encoder-specific failure with a message
    pub fn custom(msg: impl Into<String>) -> Self {
        Self::Custom(msg.into())
    }
}

/// A failure encoding one node, reported without aborting the call
#[derive(Debug, Error)]
#[error("node {node_id}: {cause}")]
pub struct TranslationError {
    /// Id of the node whose encoding failed
    pub node_id: NodeId,
    /// What went wrong
    pub cause: EncodeError,
}

impl TranslationError {
    /// Attribute a per-node failure to a node
    pub fn new(node_id: impl Into<String>, cause: EncodeError) -> Self {
        Self {
            node_id: node_id.into(),
            cause,
        }
    }
}
