//! Collapsible navigation menu and navbar background swap.

use folio_dom::{Document, NodeId};
use folio_types::config::PageConfig;
use folio_types::error::{FolioError, Result};

use crate::highlight::{ACTIVE_CLASS, NAV_LINK_SELECTOR};

pub const HAMBURGER_SELECTOR: &str = ".hamburger";
pub const NAV_MENU_SELECTOR: &str = ".nav-menu";
pub const NAVBAR_SELECTOR: &str = ".navbar";

/// Open/closed state of the mobile menu.
///
/// The toggle and the menu both carry `active` while open.
#[derive(Debug, Clone)]
pub struct NavigationMenuToggle {
    hamburger: NodeId,
    menu: NodeId,
    open: bool,
}

impl NavigationMenuToggle {
    pub fn new(doc: &Document) -> Result<Self> {
        let hamburger = doc
            .query_selector(HAMBURGER_SELECTOR)?
            .ok_or_else(|| FolioError::MissingElement(HAMBURGER_SELECTOR.into()))?;
        let menu = doc
            .query_selector(NAV_MENU_SELECTOR)?
            .ok_or_else(|| FolioError::MissingElement(NAV_MENU_SELECTOR.into()))?;
        Ok(Self {
            hamburger,
            menu,
            open: doc.has_class(menu, ACTIVE_CLASS),
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self, doc: &mut Document) {
        self.set_open(doc, !self.open);
    }

    pub fn close(&mut self, doc: &mut Document) {
        self.set_open(doc, false);
    }

    fn set_open(&mut self, doc: &mut Document, open: bool) {
        for node in [self.hamburger, self.menu] {
            if open {
                doc.add_class(node, ACTIVE_CLASS);
            } else {
                doc.remove_class(node, ACTIVE_CLASS);
            }
        }
        self.open = open;
    }

    /// Route a click. The toggle flips the menu; any navigation link
    /// closes it. Returns whether the click was handled.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> Result<bool> {
        if doc.ancestors_inclusive(target).any(|n| n == self.hamburger) {
            self.toggle(doc);
            return Ok(true);
        }
        if doc.closest(target, NAV_LINK_SELECTOR)?.is_some() {
            self.close(doc);
            return Ok(true);
        }
        Ok(false)
    }
}

/// Swaps the navbar's inline background past the scroll threshold.
#[derive(Debug, Clone)]
pub struct NavbarBackground {
    navbar: NodeId,
    solid: String,
    clear: String,
}

impl NavbarBackground {
    pub fn new(doc: &Document, config: &PageConfig) -> Result<Self> {
        let navbar = doc
            .query_selector(NAVBAR_SELECTOR)?
            .ok_or_else(|| FolioError::MissingElement(NAVBAR_SELECTOR.into()))?;
        Ok(Self {
            navbar,
            solid: config.navbar_solid_background.clone(),
            clear: config.navbar_clear_background.clone(),
        })
    }

    pub fn apply(&self, doc: &mut Document, solid: bool) {
        let value = if solid { &self.solid } else { &self.clear };
        doc.set_style(self.navbar, "background", value);
    }
}
