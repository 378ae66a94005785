//! Marks the navigation entry for the section currently in view.

use folio_dom::{Document, NodeId};
use folio_types::error::Result;

pub const NAV_LINK_SELECTOR: &str = ".nav-link";
pub const ACTIVE_CLASS: &str = "active";

/// Keeps `active` on at most one navigation link.
#[derive(Debug, Clone)]
pub struct SectionHighlighter {
    links: Vec<NodeId>,
}

impl SectionHighlighter {
    pub fn new(doc: &Document) -> Result<Self> {
        Ok(Self {
            links: doc.query_selector_all(NAV_LINK_SELECTOR)?,
        })
    }

    pub fn links(&self) -> &[NodeId] {
        &self.links
    }

    /// Activate the first link whose `href` is `#current`, clearing the
    /// rest. With no (or an empty) current section every link ends up
    /// inactive.
    pub fn apply(&self, doc: &mut Document, current: Option<&str>) {
        let wanted = current
            .filter(|id| !id.is_empty())
            .map(|id| format!("#{id}"));
        let mut marked = false;
        for &link in &self.links {
            let is_current =
                !marked && wanted.is_some() && doc.attribute(link, "href") == wanted.as_deref();
            if is_current {
                marked = true;
                doc.add_class(link, ACTIVE_CLASS);
            } else {
                doc.remove_class(link, ACTIVE_CLASS);
            }
        }
    }

    /// The link currently marked active, if any.
    pub fn active(&self, doc: &Document) -> Option<NodeId> {
        self.links
            .iter()
            .copied()
            .find(|&l| doc.has_class(l, ACTIVE_CLASS))
    }
}
