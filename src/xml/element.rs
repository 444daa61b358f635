//! Elements, attributes and the other node kinds of an owned tree

/// `xmlns` / `xmlns:prefix` declaration carried by an element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceDecl {
    /// `None` for the default namespace
    pub prefix: Option<String>,
    pub uri: String,
}

impl NamespaceDecl {
    pub fn new(prefix: Option<&str>, uri: &str) -> Self {
        Self {
            prefix: prefix.map(str::to_string),
            uri: uri.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    namespace: Option<String>,
    name: String,
    prefix: Option<String>,
    value: String,
}

impl Attribute {
    pub fn new(namespace: Option<&str>, name: &str, value: &str) -> Self {
        Self {
            namespace: namespace.map(str::to_string),
            name: name.to_string(),
            prefix: None,
            value: value.to_string(),
        }
    }

    pub(crate) fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        self.prefix = prefix.map(str::to_string);
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Prefix the attribute was written with, if known
    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn matches(&self, namespace: Option<&str>, name: &str) -> bool {
        self.namespace.as_deref() == namespace && self.name == name
    }
}

/// Any node that can appear as a child
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment(String),
    ProcessingInstruction { target: String, data: Option<String> },
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An element with namespace-qualified name, attributes and children
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    namespace: Option<String>,
    name: String,
    prefix: Option<String>,
    attributes: Vec<Attribute>,
    namespace_decls: Vec<NamespaceDecl>,
    children: Vec<Node>,
}

impl Element {
    /// Element with no namespace
    pub fn new(name: &str) -> Self {
        Self {
            namespace: None,
            name: name.to_string(),
            prefix: None,
            attributes: Vec::new(),
            namespace_decls: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Element in `namespace`, written with whatever prefix is in scope
    pub fn new_ns(namespace: &str, name: &str) -> Self {
        Self {
            namespace: Some(namespace.to_string()),
            ..Self::new(name)
        }
    }

    /// Prefer `prefix` when writing; `None` prefers the default namespace
    pub fn with_prefix(mut self, prefix: Option<&str>) -> Self {
        self.prefix = prefix.map(str::to_string);
        self
    }

    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.set_attribute(name, value);
        self
    }

    pub fn with_attribute_ns(mut self, namespace: &str, name: &str, value: &str) -> Self {
        self.set_attribute_ns(namespace, name, value);
        self
    }

    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.append_child(child);
        self
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    /// Local name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    /// True when this element is `{namespace}name`
    pub fn is(&self, namespace: &str, name: &str) -> bool {
        self.namespace.as_deref() == Some(namespace) && self.name == name
    }

    // -- attributes ---------------------------------------------------------

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    /// Value of the un-namespaced attribute `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.find_attribute(None, name).map(Attribute::value)
    }

    pub fn attribute_ns(&self, namespace: &str, name: &str) -> Option<&str> {
        self.find_attribute(Some(namespace), name)
            .map(Attribute::value)
    }

    pub fn set_attribute(&mut self, name: &str, value: &str) {
        self.put_attribute(None, name, value);
    }

    pub fn set_attribute_ns(&mut self, namespace: &str, name: &str, value: &str) {
        self.put_attribute(Some(namespace), name, value);
    }

    pub fn remove_attribute(&mut self, name: &str) -> Option<String> {
        let index = self
            .attributes
            .iter()
            .position(|a| a.matches(None, name))?;
        Some(self.attributes.remove(index).value)
    }

    pub(crate) fn push_attribute(&mut self, attribute: Attribute) {
        self.attributes.push(attribute);
    }

    fn find_attribute(&self, namespace: Option<&str>, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.matches(namespace, name))
    }

    fn put_attribute(&mut self, namespace: Option<&str>, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.matches(namespace, name))
        {
            Some(existing) => existing.value = value.to_string(),
            None => self
                .attributes
                .push(Attribute::new(namespace, name, value)),
        }
    }

    // -- namespace declarations ---------------------------------------------

    pub fn namespace_declarations(&self) -> &[NamespaceDecl] {
        &self.namespace_decls
    }

    /// Declare `prefix` (or the default namespace) on this element
    pub fn declare_namespace(&mut self, prefix: Option<&str>, uri: &str) {
        match self
            .namespace_decls
            .iter_mut()
            .find(|d| d.prefix.as_deref() == prefix)
        {
            Some(existing) => existing.uri = uri.to_string(),
            None => self.namespace_decls.push(NamespaceDecl::new(prefix, uri)),
        }
    }

    // -- children -----------------------------------------------------------

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Child elements, skipping text, comments and instructions
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(Node::as_element_mut)
    }

    /// First child element `{namespace}name`
    pub fn child(&self, namespace: &str, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.is(namespace, name))
    }

    /// Index into `children()` of the first child element `{namespace}name`
    pub fn child_position(&self, namespace: &str, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|n| n.as_element().is_some_and(|e| e.is(namespace, name)))
    }

    /// Index of the first child element with local name `name`, any namespace
    pub fn child_position_local(&self, name: &str) -> Option<usize> {
        self.children
            .iter()
            .position(|n| n.as_element().is_some_and(|e| e.name == name))
    }

    pub fn append_child(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    pub fn insert_child(&mut self, index: usize, child: impl Into<Node>) {
        self.children.insert(index, child.into());
    }

    pub fn remove_child(&mut self, index: usize) -> Node {
        self.children.remove(index)
    }

    pub fn clear_children(&mut self) {
        self.children.clear();
    }

    /// Concatenated text of the direct text children
    pub fn text(&self) -> String {
        self.children
            .iter()
            .filter_map(|n| match n {
                Node::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    // -- traversal ----------------------------------------------------------

    /// First element in document order (this one included) matching `predicate`
    pub fn find_descendant<P>(&self, predicate: P) -> Option<&Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.find_by(&predicate)
    }

    pub fn find_descendant_mut<P>(&mut self, predicate: P) -> Option<&mut Element>
    where
        P: Fn(&Element) -> bool,
    {
        self.find_by_mut(&predicate)
    }

    /// Visit this element and every descendant element, parents first
    pub fn visit_mut<F>(&mut self, visitor: &mut F)
    where
        F: FnMut(&mut Element),
    {
        visitor(self);
        for child in self.elements_mut() {
            child.visit_mut(visitor);
        }
    }

    fn find_by(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.elements().find_map(|child| child.find_by(predicate))
    }

    fn find_by_mut(&mut self, predicate: &dyn Fn(&Element) -> bool) -> Option<&mut Element> {
        if predicate(self) {
            return Some(self);
        }
        for child in self.elements_mut() {
            if let Some(found) = child.find_by_mut(predicate) {
                return Some(found);
            }
        }
        None
    }
}
