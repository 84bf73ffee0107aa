//! Streaming XML serializer
//!
//! Writes one document to a byte sink: declaration, root start tag
//! carrying every namespace declaration, element trees, root end tag.
//! Element prefixes are checked against the root's declarations before
//! the first byte of an element is written, so a rejected tree never
//! leaves a truncated element behind.

use std::collections::HashSet;
use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};
use quick_xml::Writer;

use crate::element::XmlElement;
use crate::error::{EngineError, Result};

/// Root start tag descriptor
///
/// The root element lives in the default namespace; prefixed
/// declarations and plain attributes are written in the order given.
#[derive(Debug, Clone)]
pub struct RootStart {
    /// Root element name
    pub name: String,
    /// Default namespace URI (the `xmlns` declaration)
    pub default_namespace: String,
    /// Prefixed namespace declarations as (prefix, uri)
    pub namespaces: Vec<(String, String)>,
    /// Plain attributes as (name, value)
    pub attributes: Vec<(String, String)>,
}

/// Streaming writer producing one XML document
pub struct XmlStreamWriter<W: Write> {
    writer: Writer<W>,
    root_name: Option<String>,
    declared_prefixes: HashSet<String>,
}

enum WriteOp<'a> {
    Open(&'a XmlElement),
    Close(&'a XmlElement),
}

impl<W: Write> XmlStreamWriter<W> {
    /// Create a writer over a sink
    pub fn new(sink: W) -> Self {
        Self {
            writer: Writer::new(sink),
            root_name: None,
            declared_prefixes: HashSet::new(),
        }
    }

    /// Write the XML declaration and the root start tag
    pub fn start_document(&mut self, root: &RootStart) -> Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))?;

        let mut start = BytesStart::new(&root.name);
        start.push_attribute(("xmlns", root.default_namespace.as_str()));
        for (prefix, uri) in &root.namespaces {
            let declaration = format!("xmlns:{prefix}");
            start.push_attribute((declaration.as_str(), uri.as_str()));
        }
        for (name, value) in &root.attributes {
            start.push_attribute((name.as_str(), value.as_str()));
        }
        self.writer.write_event(Event::Start(start))?;

        self.declared_prefixes = root.namespaces.iter().map(|(p, _)| p.clone()).collect();
        self.root_name = Some(root.name.clone());
        Ok(())
    }

    /// Write one element tree under the root
    ///
    /// The whole tree is validated first: any prefix not declared on
    /// the root fails the document before a single byte of this tree
    /// reaches the sink. Writing then walks an explicit work stack, so
    /// arbitrarily deep nesting cannot overflow the call stack and
    /// every opened tag is closed. Childless elements are written
    /// self-closing.
    pub fn write_element(&mut self, element: &XmlElement) -> Result<()> {
        self.check_prefixes(element)?;

        let mut stack = vec![WriteOp::Open(element)];
        while let Some(op) = stack.pop() {
            match op {
                WriteOp::Open(el) => {
                    let name = el.qualified_name();
                    let mut start = BytesStart::new(&name);
                    for (key, value) in &el.attributes {
                        start.push_attribute((key.as_str(), value.as_str()));
                    }
                    if el.children.is_empty() {
                        self.writer.write_event(Event::Empty(start))?;
                    } else {
                        self.writer.write_event(Event::Start(start))?;
                        stack.push(WriteOp::Close(el));
                        for child in el.children.iter().rev() {
                            stack.push(WriteOp::Open(child));
                        }
                    }
                }
                WriteOp::Close(el) => {
                    self.writer
                        .write_event(Event::End(BytesEnd::new(el.qualified_name())))?;
                }
            }
        }
        Ok(())
    }

    fn check_prefixes(&self, element: &XmlElement) -> Result<()> {
        let mut stack = vec![element];
        while let Some(el) = stack.pop() {
            if !el.prefix.is_empty() && !self.declared_prefixes.contains(&el.prefix) {
                return Err(EngineError::UndeclaredPrefix {
                    prefix: el.prefix.clone(),
                    element: el.qualified_name(),
                });
            }
            stack.extend(el.children.iter());
        }
        Ok(())
    }

    /// Close the root element and flush the sink
    pub fn finish(&mut self) -> Result<()> {
        if let Some(name) = self.root_name.take() {
            self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        }
        self.flush()
    }

    /// Flush the sink without closing open elements
    ///
    /// Abort paths use this once the document is already known broken.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.get_mut().flush()?;
        Ok(())
    }

    /// Consume the writer, returning the sink
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}
