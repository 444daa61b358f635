//! Document loading
//!
//! `roxmltree` gives a read-only view borrowed from the source text; it is
//! copied into owned `Element`s so the transformers can edit freely.

use thiserror::Error;

use super::element::{Attribute, Element, Node};
use super::namespaces;
use super::writer;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error(transparent)]
    Syntax(#[from] roxmltree::Error),
}

/// An owned XML document: root element plus the nodes around it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    prolog: Vec<Node>,
    root: Option<Element>,
    epilog: Vec<Node>,
}

impl Document {
    pub fn new(root: Element) -> Self {
        Self {
            root: Some(root),
            ..Self::default()
        }
    }

    /// Document without a root element
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self, XmlError> {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        let parsed = roxmltree::Document::parse(text)?;

        let mut document = Document::empty();
        for node in parsed.root().children() {
            if node.is_element() {
                document.root = Some(copy_element(text, node));
            } else if let Some(copied) = copy_leaf(node) {
                match document.root {
                    None => document.prolog.push(copied),
                    Some(_) => document.epilog.push(copied),
                }
            }
        }
        Ok(document)
    }

    pub fn root(&self) -> Option<&Element> {
        self.root.as_ref()
    }

    pub fn root_mut(&mut self) -> Option<&mut Element> {
        self.root.as_mut()
    }

    /// Comments and instructions before the root element
    pub fn prolog(&self) -> &[Node] {
        &self.prolog
    }

    pub fn epilog(&self) -> &[Node] {
        &self.epilog
    }

    /// Serialize with an XML declaration and two-space indentation
    pub fn to_xml_string(&self) -> String {
        writer::write_document(self)
    }
}

fn copy_element(source: &str, node: roxmltree::Node<'_, '_>) -> Element {
    let tag = node.tag_name();
    let mut element = match tag.namespace() {
        Some(uri) => Element::new_ns(uri, tag.name()),
        None => Element::new(tag.name()),
    }
    .with_prefix(source_prefix(source, &node));

    for ns in node.namespaces() {
        if ns.name() == Some("xml") || inherited(&node, ns.name(), ns.uri()) {
            continue;
        }
        element.declare_namespace(ns.name(), ns.uri());
    }

    for attr in node.attributes() {
        let prefix = attr
            .namespace()
            .and_then(|uri| attribute_prefix(&node, uri));
        element.push_attribute(
            Attribute::new(attr.namespace(), attr.name(), attr.value()).with_prefix(prefix),
        );
    }

    for child in node.children() {
        if child.is_element() {
            element.append_child(copy_element(source, child));
        } else if let Some(copied) = copy_leaf(child) {
            element.append_child(copied);
        }
    }
    element
}

fn copy_leaf(node: roxmltree::Node<'_, '_>) -> Option<Node> {
    if node.is_text() {
        let text = node.text()?;
        // Indentation only; the writer re-indents.
        if text.trim().is_empty() {
            return None;
        }
        return Some(Node::Text(text.to_string()));
    }
    if node.is_comment() {
        return node.text().map(|text| Node::Comment(text.to_string()));
    }
    node.pi().map(|pi| Node::ProcessingInstruction {
        target: pi.target.to_string(),
        data: pi.value.map(str::to_string),
    })
}

/// The element's prefix as spelled in the source (`<asmv1:assembly` → `asmv1`)
fn source_prefix<'s>(source: &'s str, node: &roxmltree::Node<'_, '_>) -> Option<&'s str> {
    let start = node.range().start;
    let qname = source
        .get(start + 1..)?
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()?;
    qname.split_once(':').map(|(prefix, _)| prefix)
}

fn inherited(node: &roxmltree::Node<'_, '_>, prefix: Option<&str>, uri: &str) -> bool {
    node.parent_element().is_some_and(|parent| {
        parent
            .namespaces()
            .any(|ns| ns.name() == prefix && ns.uri() == uri)
    })
}

/// Attributes only take prefixed namespaces
fn attribute_prefix<'a>(node: &roxmltree::Node<'a, '_>, uri: &str) -> Option<&'a str> {
    if uri == namespaces::XML {
        return Some("xml");
    }
    node.namespaces()
        .find(|ns| ns.uri() == uri && ns.name().is_some())
        .and_then(|ns| ns.name())
}
