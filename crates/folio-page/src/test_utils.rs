//! Shared fixtures for page tests.
//!
//! Builds the demo page on a [`HeadlessHost`] sized to the document, with
//! helpers that move the window and click elements the way a user would.

use folio_dom::NodeId;
use folio_types::config::PageConfig;
use folio_types::input::Key;

use crate::catalog::ContentCatalog;
use crate::demo::demo_document;
use crate::event::{EventOutcome, PageEvent};
use crate::host::HeadlessHost;
use crate::portfolio::Portfolio;

pub const VIEWPORT_HEIGHT: i32 = 800;

/// The demo page with every host capability available.
pub fn demo_portfolio(config: PageConfig) -> Portfolio<HeadlessHost> {
    let catalog = ContentCatalog::builtin();
    let doc = demo_document(&catalog);
    let host = HeadlessHost::fit_document(VIEWPORT_HEIGHT, &doc);
    Portfolio::new(doc, catalog, config, host)
}

/// The demo page on a host with neither viewport observation nor native
/// lazy loading.
pub fn legacy_portfolio() -> Portfolio<HeadlessHost> {
    let catalog = ContentCatalog::builtin();
    let doc = demo_document(&catalog);
    let mut host = HeadlessHost::fit_document(VIEWPORT_HEIGHT, &doc);
    host.intersection_observer = false;
    host.native_lazy_loading = false;
    Portfolio::new(doc, catalog, PageConfig::default(), host)
}

/// Move the window to `y` and deliver the scroll event.
pub fn scroll(page: &mut Portfolio<HeadlessHost>, y: i32) {
    page.host_mut().set_scroll_y(y);
    page.dispatch(PageEvent::Scroll);
}

pub fn click(page: &mut Portfolio<HeadlessHost>, target: NodeId) -> EventOutcome {
    page.dispatch(PageEvent::Click { target })
}

pub fn press(page: &mut Portfolio<HeadlessHost>, key: Key) -> EventOutcome {
    let target = page.document().active_element();
    page.dispatch(PageEvent::KeyDown { key, target })
}

/// First element matching `selector`.
pub fn find(page: &Portfolio<HeadlessHost>, selector: &str) -> NodeId {
    page.document()
        .query_selector(selector)
        .unwrap()
        .unwrap_or_else(|| panic!("no element matches {selector}"))
}
