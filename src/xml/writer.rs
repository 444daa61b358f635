//! Serializer
//!
//! Prefixes are resolved against the declarations in scope. A namespace
//! that is not in scope gets declared on the element that needs it, using
//! the element's own prefix or the generator's usual one.

use super::document::Document;
use super::element::{Attribute, Element, Node};
use super::namespaces;

const DECLARATION: &str = r#"<?xml version="1.0" encoding="utf-8"?>"#;
const INDENT: &str = "  ";

type Binding = (Option<String>, String);

pub(super) fn write_document(document: &Document) -> String {
    let mut writer = Writer::default();
    writer.out.push_str(DECLARATION);

    for node in document.prolog() {
        writer.out.push('\n');
        writer.write_node(node, 0, false);
    }
    if let Some(root) = document.root() {
        writer.out.push('\n');
        writer.write_element(root, 0, false);
    }
    for node in document.epilog() {
        writer.out.push('\n');
        writer.write_node(node, 0, false);
    }
    writer.out
}

#[derive(Default)]
struct Writer {
    out: String,
    scopes: Vec<Vec<Binding>>,
}

impl Writer {
    fn write_node(&mut self, node: &Node, depth: usize, inline: bool) {
        match node {
            Node::Element(element) => self.write_element(element, depth, inline),
            Node::Text(text) => self.out.push_str(&escape(text, false)),
            Node::Comment(text) => {
                self.out.push_str("<!--");
                self.out.push_str(text);
                self.out.push_str("-->");
            }
            Node::ProcessingInstruction { target, data } => {
                self.out.push_str("<?");
                self.out.push_str(target);
                if let Some(data) = data {
                    self.out.push(' ');
                    self.out.push_str(data);
                }
                self.out.push_str("?>");
            }
        }
    }

    fn write_element(&mut self, element: &Element, depth: usize, inline: bool) {
        self.scopes.push(
            element
                .namespace_declarations()
                .iter()
                .map(|d| (d.prefix.clone(), d.uri.clone()))
                .collect(),
        );

        let qname = self.element_name(element);
        let attributes: Vec<(String, &str)> = element
            .attributes()
            .iter()
            .map(|a| (self.attribute_name(a), a.value()))
            .collect();

        self.out.push('<');
        self.out.push_str(&qname);
        for (name, value) in &attributes {
            self.out.push(' ');
            self.out.push_str(name);
            self.out.push_str("=\"");
            self.out.push_str(&escape(value, true));
            self.out.push('"');
        }
        let declarations = self.scopes.last().cloned().unwrap_or_default();
        for (prefix, uri) in &declarations {
            match prefix {
                Some(prefix) => {
                    self.out.push_str(" xmlns:");
                    self.out.push_str(prefix);
                }
                None => self.out.push_str(" xmlns"),
            }
            self.out.push_str("=\"");
            self.out.push_str(&escape(uri, true));
            self.out.push('"');
        }

        if element.children().is_empty() {
            self.out.push_str(" />");
        } else {
            self.out.push('>');
            let mixed = inline
                || element
                    .children()
                    .iter()
                    .any(|n| matches!(n, Node::Text(_)));
            for child in element.children() {
                if !mixed {
                    self.newline(depth + 1);
                }
                self.write_node(child, depth + 1, mixed);
            }
            if !mixed {
                self.newline(depth);
            }
            self.out.push_str("</");
            self.out.push_str(&qname);
            self.out.push('>');
        }

        self.scopes.pop();
    }

    fn newline(&mut self, depth: usize) {
        self.out.push('\n');
        for _ in 0..depth {
            self.out.push_str(INDENT);
        }
    }

    fn element_name(&mut self, element: &Element) -> String {
        let local = element.name();
        let Some(uri) = element.namespace() else {
            if self.lookup(None).is_some_and(|bound| !bound.is_empty()) {
                self.declare(None, "");
            }
            return local.to_string();
        };

        if let Some(prefix) = element.prefix() {
            if self.lookup(Some(prefix)) == Some(uri) {
                return qualify(prefix, local);
            }
        }
        if self.lookup(None) == Some(uri) {
            return local.to_string();
        }
        if let Some(prefix) = self.bound_prefix(uri) {
            return qualify(&prefix, local);
        }

        match element.prefix() {
            Some(prefix) if !self.declared_here(Some(prefix)) => {
                self.declare(Some(prefix), uri);
                qualify(prefix, local)
            }
            _ if !self.declared_here(None) => {
                self.declare(None, uri);
                local.to_string()
            }
            _ => {
                let prefix = self.fresh_prefix();
                self.declare(Some(&prefix), uri);
                qualify(&prefix, local)
            }
        }
    }

    fn attribute_name(&mut self, attribute: &Attribute) -> String {
        let local = attribute.name();
        let Some(uri) = attribute.namespace() else {
            return local.to_string();
        };
        if uri == namespaces::XML {
            return qualify("xml", local);
        }

        if let Some(prefix) = attribute.prefix() {
            if self.lookup(Some(prefix)) == Some(uri) {
                return qualify(prefix, local);
            }
        }
        if let Some(prefix) = self.bound_prefix(uri) {
            return qualify(&prefix, local);
        }

        let wanted = attribute
            .prefix()
            .or_else(|| namespaces::preferred_prefix(uri))
            .filter(|p| !self.declared_here(Some(*p)))
            .map(str::to_string);
        let prefix = wanted.unwrap_or_else(|| self.fresh_prefix());
        self.declare(Some(&prefix), uri);
        qualify(&prefix, local)
    }

    /// Innermost binding of `prefix`
    fn lookup(&self, prefix: Option<&str>) -> Option<&str> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .find(|(p, _)| p.as_deref() == prefix)
            .map(|(_, uri)| uri.as_str())
    }

    /// A non-default prefix currently bound to `uri`
    fn bound_prefix(&self, uri: &str) -> Option<String> {
        self.scopes
            .iter()
            .rev()
            .flat_map(|frame| frame.iter())
            .filter_map(|(p, u)| p.as_deref().filter(|_| u == uri))
            .find(|p| self.lookup(Some(*p)) == Some(uri))
            .map(str::to_string)
    }

    fn declared_here(&self, prefix: Option<&str>) -> bool {
        self.scopes
            .last()
            .is_some_and(|frame| frame.iter().any(|(p, _)| p.as_deref() == prefix))
    }

    fn declare(&mut self, prefix: Option<&str>, uri: &str) {
        if let Some(frame) = self.scopes.last_mut() {
            frame.push((prefix.map(str::to_string), uri.to_string()));
        }
    }

    fn fresh_prefix(&self) -> String {
        (0..)
            .map(|n| format!("ns{}", n))
            .find(|p| self.lookup(Some(p.as_str())).is_none())
            .unwrap_or_default()
    }
}

fn qualify(prefix: &str, local: &str) -> String {
    format!("{}:{}", prefix, local)
}

fn escape(text: &str, attribute: bool) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' if attribute => escaped.push_str("&quot;"),
            '\r' => escaped.push_str("&#13;"),
            '\n' if attribute => escaped.push_str("&#10;"),
            '\t' if attribute => escaped.push_str("&#9;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xml::namespaces::{ASM_V1, ASM_V2, CLICKONCE_V1, CLICKONCE_V2};

    #[test]
    fn empty_document_is_just_the_declaration() {
        assert_eq!(Document::empty().to_xml_string(), DECLARATION);
    }

    #[test]
    fn nested_elements_are_indented() {
        let doc = Document::new(
            Element::new("a").with_child(Element::new("b").with_child(Element::new("c"))),
        );
        assert_eq!(
            doc.to_xml_string(),
            format!("{}\n<a>\n  <b>\n    <c />\n  </b>\n</a>", DECLARATION)
        );
    }

    #[test]
    fn text_content_stays_inline() {
        let doc = Document::new(
            Element::new("a").with_child(Node::Text("x < y & \"z\"".to_string())),
        );
        assert!(doc
            .to_xml_string()
            .ends_with("<a>x &lt; y &amp; \"z\"</a>"));
    }

    #[test]
    fn attribute_values_are_escaped() {
        let doc = Document::new(Element::new("a").with_attribute("v", "\"<&>\""));
        assert!(doc
            .to_xml_string()
            .ends_with(r#"<a v="&quot;&lt;&amp;&gt;&quot;" />"#));
    }

    #[test]
    fn attribute_whitespace_survives_reparse() {
        let doc = Document::new(
            Element::new("a")
                .with_attribute("v", "line1\nline2\r\tend")
                .with_child(Node::Text("one\r\ntwo".to_string())),
        );
        let xml = doc.to_xml_string();
        assert!(xml.contains(r#"v="line1&#10;line2&#13;&#9;end""#));

        let reparsed = Document::parse(&xml).unwrap();
        let root = reparsed.root().unwrap();
        assert_eq!(root.attribute("v"), Some("line1\nline2\r\tend"));
        assert_eq!(root.children(), [Node::Text("one\r\ntwo".to_string())]);
    }

    #[test]
    fn missing_namespace_is_declared_with_preferred_prefix() {
        let doc = Document::new(
            Element::new("deployment").with_attribute_ns(CLICKONCE_V1, "createDesktopShortcut", "true"),
        );
        assert!(doc.to_xml_string().ends_with(
            r#"<deployment co.v1:createDesktopShortcut="true" xmlns:co.v1="urn:schemas-microsoft-com:clickonce.v1" />"#
        ));
    }

    #[test]
    fn new_namespaced_element_uses_default_namespace() {
        let doc = Document::new(
            Element::new("compatibleFrameworks")
                .with_child(Element::new_ns(CLICKONCE_V2, "framework").with_attribute("targetVersion", "4.0")),
        );
        assert!(doc.to_xml_string().contains(
            r#"<framework targetVersion="4.0" xmlns="urn:schemas-microsoft-com:clickonce.v2" />"#
        ));
    }

    #[test]
    fn in_scope_prefix_is_reused() {
        let mut root = Element::new_ns(ASM_V1, "assembly").with_prefix(Some("asmv1"));
        root.declare_namespace(Some("asmv1"), ASM_V1);
        root.declare_namespace(Some("asmv2"), ASM_V2);
        root.append_child(
            Element::new_ns(ASM_V1, "description")
                .with_prefix(Some("asmv1"))
                .with_attribute_ns(ASM_V2, "iconFile", "app.ico"),
        );

        let xml = Document::new(root).to_xml_string();
        assert!(xml.contains(r#"<asmv1:description asmv2:iconFile="app.ico" />"#));
    }

    #[test]
    fn unnamespaced_child_of_default_namespace_resets_it() {
        let mut root = Element::new_ns(ASM_V2, "root");
        root.declare_namespace(None, ASM_V2);
        root.append_child(Element::new("plain"));

        let xml = Document::new(root).to_xml_string();
        assert!(xml.contains(r#"<plain xmlns="" />"#));
    }

    #[test]
    fn generator_output_round_trips() {
        let source = r#"<?xml version="1.0" encoding="utf-8"?>
<asmv1:assembly manifestVersion="1.0" xmlns:asmv1="urn:schemas-microsoft-com:asm.v1" xmlns="urn:schemas-microsoft-com:asm.v2" xmlns:asmv2="urn:schemas-microsoft-com:asm.v2">
  <asmv1:assemblyIdentity name="App.application" version="1.0.0.0" />
  <description asmv2:publisher="Example" />
  <deployment install="true">
    <subscription>
      <update>
        <beforeApplicationStartup />
      </update>
    </subscription>
  </deployment>
  <compatibleFrameworks xmlns="urn:schemas-microsoft-com:clickonce.v2">
    <framework targetVersion="3.5" supportedRuntime="2.0.50727" />
  </compatibleFrameworks>
</asmv1:assembly>"#;

        let doc = Document::parse(source).unwrap();
        assert_eq!(doc.to_xml_string(), source);
    }
}
