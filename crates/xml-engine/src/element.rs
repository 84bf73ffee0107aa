//! Intermediate element tree
//!
//! Encoders produce these trees and the serializer consumes them. A
//! tree stays namespace-agnostic until written: its prefixes are only
//! resolved against the declarations made on the document root.

use std::collections::BTreeMap;

/// One XML element with attributes and ordered children
///
/// An empty prefix places the element in the document's default
/// namespace. Attributes are kept sorted so that repeated translations
/// of an unchanged flow emit identical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlElement {
    /// Namespace prefix; empty for the default namespace
    pub prefix: String,
    /// Local element name
    pub local_name: String,
    /// Attribute values keyed by attribute name
    pub attributes: BTreeMap<String, String>,
    /// Child elements, in document order
    pub children: Vec<XmlElement>,
}

impl XmlElement {
    /// Create an element under a namespace prefix
    pub fn new(prefix: impl Into<String>, local_name: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            local_name: local_name.into(),
            attributes: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Create an element in the default namespace
    pub fn unprefixed(local_name: impl Into<String>) -> Self {
        Self::new("", local_name)
    }

    /// Set an attribute
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Append a child element
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    /// Tag name as written to the document, prefix included
    pub fn qualified_name(&self) -> String {
        if self.prefix.is_empty() {
            self.local_name.clone()
        } else {
            format!("{}:{}", self.prefix, self.local_name)
        }
    }
}
