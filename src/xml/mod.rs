//! Owned XML tree
//!
//! Just enough XML to load the descriptors the generator writes, edit them
//! with namespace awareness, and save them again:
//!
//! - `Document::parse` copies a `roxmltree` view into owned nodes
//! - `Element` offers lookup, attribute edits and child insertion/removal
//! - `Document::to_xml_string` re-indents and resolves prefixes

mod document;
mod element;
pub mod namespaces;
mod writer;

pub use document::{Document, XmlError};
pub use element::{Attribute, Element, NamespaceDecl, Node};
