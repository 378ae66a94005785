//! In-page anchor jumps and the back-to-top control.

use folio_dom::{Document, NodeId};
use folio_types::config::PageConfig;
use folio_types::error::{FolioError, Result};
use folio_types::input::{Key, ScrollBehavior};

use crate::event::EventOutcome;
use crate::host::Host;

pub const ANCHOR_SELECTOR: &str = r##"a[href^="#"]"##;
pub const BACK_TO_TOP_ID: &str = "backToTop";
pub const HOME_ID: &str = "home";
pub const SHOW_CLASS: &str = "show";

/// Smooth scrolling for `#fragment` links.
#[derive(Debug, Clone, Copy)]
pub struct SmoothAnchors {
    offset: i32,
}

impl SmoothAnchors {
    pub fn new(config: &PageConfig) -> Self {
        Self {
            offset: config.anchor_offset_px as i32,
        }
    }

    /// Scroll to the link's target, leaving room for the fixed header.
    ///
    /// Bare `#` links and links whose target is missing keep their
    /// default navigation.
    pub fn handle_click<H: Host>(&self, doc: &Document, host: &mut H, target: NodeId) -> Result<EventOutcome> {
        let Some(link) = doc.closest(target, ANCHOR_SELECTOR)? else {
            return Ok(EventOutcome::default());
        };
        let Some(fragment) = doc
            .attribute(link, "href")
            .and_then(|h| h.strip_prefix('#'))
            .filter(|f| !f.is_empty())
        else {
            return Ok(EventOutcome::default());
        };
        let Some(section) = doc.get_element_by_id(fragment) else {
            log::debug!("Anchor target #{fragment} not found; using default navigation");
            return Ok(EventOutcome::default());
        };
        let top = (doc.geometry(section).top - self.offset).max(0);
        host.scroll_to(top, ScrollBehavior::Smooth);
        Ok(EventOutcome::prevented())
    }
}

/// The floating "back to top" button.
#[derive(Debug, Clone, Copy)]
pub struct BackToTop {
    button: NodeId,
}

impl BackToTop {
    pub fn new(doc: &Document) -> Result<Self> {
        doc.get_element_by_id(BACK_TO_TOP_ID)
            .map(|button| Self { button })
            .ok_or_else(|| FolioError::MissingElement(format!("#{BACK_TO_TOP_ID}")))
    }

    pub fn node(&self) -> NodeId {
        self.button
    }

    pub fn apply(&self, doc: &mut Document, visible: bool) {
        if visible {
            doc.add_class(self.button, SHOW_CLASS);
        } else {
            doc.remove_class(self.button, SHOW_CLASS);
        }
    }

    /// Clicks on the button scroll to the top and focus the hero.
    pub fn handle_click<H: Host>(&self, doc: &mut Document, host: &mut H, target: NodeId) -> EventOutcome {
        if !doc.ancestors_inclusive(target).any(|n| n == self.button) {
            return EventOutcome::default();
        }
        self.activate(doc, host)
    }

    /// Enter and Space on the focused button act as a click.
    pub fn handle_key<H: Host>(
        &self,
        doc: &mut Document,
        host: &mut H,
        key: &Key,
        target: Option<NodeId>,
    ) -> EventOutcome {
        if target != Some(self.button) || !key.is_activation() {
            return EventOutcome::default();
        }
        self.activate(doc, host)
    }

    fn activate<H: Host>(&self, doc: &mut Document, host: &mut H) -> EventOutcome {
        host.scroll_to(0, ScrollBehavior::Smooth);
        if let Some(home) = doc.get_element_by_id(HOME_ID) {
            doc.focus(home);
        }
        EventOutcome::prevented()
    }
}
