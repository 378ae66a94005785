//! Fluent construction of element subtrees.
//!
//! Hosts and tests describe a page with this instead of parsing HTML:
//!
//! ```
//! use folio_dom::{Document, ElementBuilder, TagName};
//!
//! let mut doc = Document::new();
//! let root = doc.root;
//! let about = ElementBuilder::new(TagName::Section)
//!     .id("about")
//!     .class("about animate-on-scroll")
//!     .geometry(700, 600)
//!     .text("About me")
//!     .append_to(&mut doc, root);
//! assert_eq!(doc.get_element_by_id("about"), Some(about));
//! ```

use crate::dom::{Document, NodeId, TagName};

/// Accumulates an element's attributes before inserting it.
#[derive(Debug, Clone)]
pub struct ElementBuilder {
    tag: TagName,
    attributes: Vec<(String, String)>,
    geometry: Option<(i32, i32)>,
    text: Option<String>,
}

impl ElementBuilder {
    pub fn new(tag: TagName) -> Self {
        Self {
            tag,
            attributes: Vec::new(),
            geometry: None,
            text: None,
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    /// Set the whole `class` attribute.
    pub fn class(self, classes: &str) -> Self {
        self.attr("class", classes)
    }

    pub fn href(self, href: &str) -> Self {
        self.attr("href", href)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.retain(|(n, _)| n != name);
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Layout box as the host would report it.
    pub fn geometry(mut self, top: i32, height: i32) -> Self {
        self.geometry = Some((top, height));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    /// Create the element detached from the tree.
    pub fn build(self, doc: &mut Document) -> NodeId {
        let id = doc.create_element(self.tag);
        for (name, value) in &self.attributes {
            doc.set_attribute(id, name, value);
        }
        if let Some((top, height)) = self.geometry {
            doc.set_geometry(id, top, height);
        }
        if let Some(text) = &self.text {
            doc.set_text_content(id, text);
        }
        id
    }

    /// Create the element and append it to `parent`.
    pub fn append_to(self, doc: &mut Document, parent: NodeId) -> NodeId {
        let id = self.build(doc);
        doc.append_child(parent, id);
        id
    }
}
