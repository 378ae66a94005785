//! Arena-based DOM tree.
//!
//! Nodes are stored in a flat `Vec` arena and linked by index. Detached
//! nodes stay in the arena; [`Document::is_connected`] tells them apart.

use serde::Serialize;

/// Index into the [`Document`]'s node arena.
pub type NodeId = usize;

// ------------------------------------------------------------------
// Node types
// ------------------------------------------------------------------

/// A page document plus the focus pointer.
#[derive(Debug, Clone)]
pub struct Document {
    pub nodes: Vec<Node>,
    pub root: NodeId,
    active_element: Option<NodeId>,
}

/// A single node in the DOM tree.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

/// The kind of DOM node.
#[derive(Debug, Clone)]
pub enum NodeKind {
    Document,
    Element(ElementData),
    Text(String),
}

/// Layout box reported by the host, in document pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Geometry {
    /// Distance from the top of the document (`offsetTop`).
    pub top: i32,
    /// Rendered height (`clientHeight`).
    pub height: i32,
}

/// Data associated with an Element node.
#[derive(Debug, Clone)]
pub struct ElementData {
    pub tag: TagName,
    pub attributes: Vec<Attribute>,
    /// Inline style declarations in insertion order.
    pub style: Vec<(String, String)>,
    pub geometry: Geometry,
    /// Internal scroll offset of a scrollable element.
    pub scroll_top: i32,
    /// Trusted author markup assigned through `innerHTML`.
    pub markup: Option<String>,
}

/// An element attribute.
#[derive(Debug, Clone, PartialEq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

// ------------------------------------------------------------------
// TagName
// ------------------------------------------------------------------

/// HTML tags a portfolio page is built from.
///
/// Anything else is stored as `Unknown(String)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TagName {
    Html,
    Head,
    Body,
    Div,
    Span,
    P,
    A,
    Button,
    Img,
    H1,
    H2,
    H3,
    Ul,
    Li,
    Nav,
    Header,
    Footer,
    Main,
    Section,
    Article,
    Form,
    Input,
    Textarea,
    Label,
    Unknown(String),
}

impl TagName {
    /// Parse a tag name, ignoring ASCII case.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "html" => Self::Html,
            "head" => Self::Head,
            "body" => Self::Body,
            "div" => Self::Div,
            "span" => Self::Span,
            "p" => Self::P,
            "a" => Self::A,
            "button" => Self::Button,
            "img" => Self::Img,
            "h1" => Self::H1,
            "h2" => Self::H2,
            "h3" => Self::H3,
            "ul" => Self::Ul,
            "li" => Self::Li,
            "nav" => Self::Nav,
            "header" => Self::Header,
            "footer" => Self::Footer,
            "main" => Self::Main,
            "section" => Self::Section,
            "article" => Self::Article,
            "form" => Self::Form,
            "input" => Self::Input,
            "textarea" => Self::Textarea,
            "label" => Self::Label,
            other => Self::Unknown(other.to_string()),
        }
    }

    /// Get the string representation of this tag name.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Html => "html",
            Self::Head => "head",
            Self::Body => "body",
            Self::Div => "div",
            Self::Span => "span",
            Self::P => "p",
            Self::A => "a",
            Self::Button => "button",
            Self::Img => "img",
            Self::H1 => "h1",
            Self::H2 => "h2",
            Self::H3 => "h3",
            Self::Ul => "ul",
            Self::Li => "li",
            Self::Nav => "nav",
            Self::Header => "header",
            Self::Footer => "footer",
            Self::Main => "main",
            Self::Section => "section",
            Self::Article => "article",
            Self::Form => "form",
            Self::Input => "input",
            Self::Textarea => "textarea",
            Self::Label => "label",
            Self::Unknown(s) => s.as_str(),
        }
    }

    /// Elements that take keyboard focus without a `tabindex`.
    pub fn is_focusable(&self) -> bool {
        matches!(
            self,
            Self::A | Self::Button | Self::Input | Self::Textarea
        )
    }
}

// ------------------------------------------------------------------
// ElementData
// ------------------------------------------------------------------

impl ElementData {
    /// Create a new `ElementData` with the given tag and no attributes.
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            style: Vec::new(),
            geometry: Geometry::default(),
            scroll_top: 0,
            markup: None,
        }
    }

    /// Get an attribute value by name.
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Set an attribute, replacing any previous value.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attr) => attr.value = value.to_string(),
            None => self.attributes.push(Attribute {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Remove an attribute if present.
    pub fn remove_attribute(&mut self, name: &str) {
        self.attributes.retain(|a| a.name != name);
    }

    /// Check if this element has a given CSS class.
    ///
    /// The `class` attribute value is split on ASCII whitespace and each
    /// token is compared to `class`.
    pub fn has_class(&self, class: &str) -> bool {
        self.get_attribute("class")
            .map(|v| v.split_ascii_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Class tokens in attribute order.
    pub fn class_list(&self) -> Vec<&str> {
        self.get_attribute("class")
            .map(|v| v.split_ascii_whitespace().collect())
            .unwrap_or_default()
    }

    /// Add a class token. Returns `true` if it was not already present.
    pub fn add_class(&mut self, class: &str) -> bool {
        if self.has_class(class) {
            return false;
        }
        let mut tokens: Vec<String> = self.class_list().iter().map(|s| s.to_string()).collect();
        tokens.push(class.to_string());
        self.set_attribute("class", &tokens.join(" "));
        true
    }

    /// Remove a class token. Returns `true` if it was present.
    pub fn remove_class(&mut self, class: &str) -> bool {
        if !self.has_class(class) {
            return false;
        }
        let tokens: Vec<String> = self
            .class_list()
            .into_iter()
            .filter(|c| *c != class)
            .map(|s| s.to_string())
            .collect();
        self.set_attribute("class", &tokens.join(" "));
        true
    }

    /// Flip a class token. Returns whether it is present afterwards.
    pub fn toggle_class(&mut self, class: &str) -> bool {
        if self.remove_class(class) {
            false
        } else {
            self.add_class(class)
        }
    }

    /// Get an inline style property.
    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Set an inline style property.
    pub fn set_style_property(&mut self, property: &str, value: &str) {
        match self.style.iter_mut().find(|(p, _)| p == property) {
            Some(entry) => entry.1 = value.to_string(),
            None => self.style.push((property.to_string(), value.to_string())),
        }
    }

    /// Get the `id` attribute if present.
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// Get the `href` attribute if present (for links).
    pub fn href(&self) -> Option<&str> {
        self.get_attribute("href")
    }

    /// Get the `src` attribute if present (for images).
    pub fn src(&self) -> Option<&str> {
        self.get_attribute("src")
    }

    /// Get a `data-*` attribute by its suffix.
    pub fn dataset(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name.strip_prefix("data-") == Some(key))
            .map(|a| a.value.as_str())
    }
}

// ------------------------------------------------------------------
// Document
// ------------------------------------------------------------------

impl Document {
    /// Create an empty document with a synthetic `Document` root node.
    pub fn new() -> Self {
        let root_node = Node {
            kind: NodeKind::Document,
            parent: None,
            children: Vec::new(),
        };
        Self {
            nodes: vec![root_node],
            root: 0,
            active_element: None,
        }
    }

    /// Add a new node to the arena and return its [`NodeId`].
    pub fn add_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node {
            kind,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a detached element.
    pub fn create_element(&mut self, tag: TagName) -> NodeId {
        self.add_node(NodeKind::Element(ElementData::new(tag)))
    }

    /// Append `child_id` as the last child of `parent_id`.
    ///
    /// A child that already has a parent is moved.
    pub fn append_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        if let Some(old) = self.nodes[child_id].parent {
            self.nodes[old].children.retain(|&c| c != child_id);
        }
        self.nodes[parent_id].children.push(child_id);
        self.nodes[child_id].parent = Some(parent_id);
    }

    /// Detach `child_id` from `parent_id`. The subtree stays in the arena.
    pub fn remove_child(&mut self, parent_id: NodeId, child_id: NodeId) {
        let before = self.nodes[parent_id].children.len();
        self.nodes[parent_id].children.retain(|&c| c != child_id);
        if self.nodes[parent_id].children.len() != before {
            self.nodes[child_id].parent = None;
            if self
                .active_element
                .is_some_and(|f| !self.is_connected(f))
            {
                self.active_element = None;
            }
        }
    }

    /// Detach every child of `id`.
    pub fn clear_children(&mut self, id: NodeId) {
        let children = std::mem::take(&mut self.nodes[id].children);
        for child in children {
            self.nodes[child].parent = None;
        }
        if self.active_element.is_some_and(|f| !self.is_connected(f)) {
            self.active_element = None;
        }
    }

    /// Get a reference to a node by ID.
    pub fn get(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// Get the [`ElementData`] for a node, if it is an `Element`.
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        match self.nodes.get(id).map(|n| &n.kind) {
            Some(NodeKind::Element(data)) => Some(data),
            _ => None,
        }
    }

    /// Mutable [`ElementData`] for a node, if it is an `Element`.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        match self.nodes.get_mut(id).map(|n| &mut n.kind) {
            Some(NodeKind::Element(data)) => Some(data),
            _ => None,
        }
    }

    /// Whether `id` is reachable from the document root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut current = Some(id);
        while let Some(node) = current {
            if node == self.root {
                return true;
            }
            current = self.nodes.get(node).and_then(|n| n.parent);
        }
        false
    }

    /// Add a class to an element. Non-elements are ignored.
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.add_class(class);
        }
    }

    /// Remove a class from an element. Non-elements are ignored.
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.remove_class(class);
        }
    }

    /// Toggle a class; returns whether it is now present.
    pub fn toggle_class(&mut self, id: NodeId, class: &str) -> bool {
        self.element_mut(id)
            .map(|el| el.toggle_class(class))
            .unwrap_or(false)
    }

    /// Whether element `id` carries `class`.
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    /// Attribute lookup on an element.
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.get_attribute(name))
    }

    /// Set an attribute on an element.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_attribute(name, value);
        }
    }

    /// Set an inline style property on an element.
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(el) = self.element_mut(id) {
            el.set_style_property(property, value);
        }
    }

    /// Read an inline style property.
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.style_property(property))
    }

    /// Layout box of an element (zeroed for non-elements).
    pub fn geometry(&self, id: NodeId) -> Geometry {
        self.element(id).map(|el| el.geometry).unwrap_or_default()
    }

    /// Record the layout box the host computed for an element.
    pub fn set_geometry(&mut self, id: NodeId, top: i32, height: i32) {
        if let Some(el) = self.element_mut(id) {
            el.geometry = Geometry { top, height };
        }
    }

    /// Get the concatenated text content of a node and all its
    /// descendants.
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    /// Recursive text collection helper.
    fn collect_text(&self, id: NodeId, out: &mut String) {
        match &self.nodes[id].kind {
            NodeKind::Text(s) => out.push_str(s),
            _ => {
                for i in 0..self.nodes[id].children.len() {
                    let child = self.nodes[id].children[i];
                    self.collect_text(child, out);
                }
            },
        }
    }

    /// Replace the children of `id` with a single text node.
    pub fn set_text_content(&mut self, id: NodeId, text: &str) {
        self.clear_children(id);
        if let Some(el) = self.element_mut(id) {
            el.markup = None;
        }
        if !text.is_empty() {
            let t = self.add_node(NodeKind::Text(text.to_string()));
            self.append_child(id, t);
        }
    }

    /// Append text to the last text child of `id`, creating one if needed.
    pub fn append_text(&mut self, id: NodeId, text: &str) {
        if let Some(&last) = self.nodes[id].children.last()
            && let NodeKind::Text(ref mut existing) = self.nodes[last].kind
        {
            existing.push_str(text);
            return;
        }
        let t = self.add_node(NodeKind::Text(text.to_string()));
        self.append_child(id, t);
    }

    /// Assign trusted markup to an element, dropping its children.
    pub fn set_inner_html(&mut self, id: NodeId, markup: &str) {
        self.clear_children(id);
        if let Some(el) = self.element_mut(id) {
            el.markup = Some(markup.to_string());
        }
    }

    /// Markup last assigned through [`Document::set_inner_html`].
    pub fn inner_html(&self, id: NodeId) -> Option<&str> {
        self.element(id).and_then(|el| el.markup.as_deref())
    }

    /// Find the first connected element whose `id` attribute matches.
    pub fn get_element_by_id(&self, target: &str) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&n| self.element(n).is_some_and(|el| el.id() == Some(target)))
    }

    /// Find the `<body>` element.
    pub fn body(&self) -> Option<NodeId> {
        self.descendants(self.root)
            .find(|&n| self.element(n).is_some_and(|el| el.tag == TagName::Body))
    }

    /// Pre-order walk of `from` and everything below it.
    pub fn descendants(&self, from: NodeId) -> Descendants<'_> {
        Descendants {
            doc: self,
            stack: vec![from],
        }
    }

    /// Walk from `id` up to the root, starting with `id` itself.
    pub fn ancestors_inclusive(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(Some(id), move |&n| self.nodes[n].parent)
    }

    // -- focus -------------------------------------------------------

    /// The element holding focus, if any.
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move focus to `id`. Returns `false` for detached nodes and for
    /// elements that are neither focusable by tag nor carry a `tabindex`,
    /// leaving focus unchanged.
    pub fn focus(&mut self, id: NodeId) -> bool {
        let focusable = self
            .element(id)
            .is_some_and(|el| el.tag.is_focusable() || el.get_attribute("tabindex").is_some());
        if !focusable || !self.is_connected(id) {
            return false;
        }
        self.active_element = Some(id);
        true
    }

    /// Drop focus back to the document.
    pub fn blur(&mut self) {
        self.active_element = None;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// Pre-order iterator returned by [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        self.stack
            .extend(self.doc.nodes[id].children.iter().rev().copied());
        Some(id)
    }
}

// ------------------------------------------------------------------
// Tests
// ------------------------------------------------------------------
