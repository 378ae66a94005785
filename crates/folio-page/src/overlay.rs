//! Article overlay: the modal that shows one catalog record at a time.
//!
//! [`OverlayController`] owns the only [`OverlayState`] on the page. Every
//! transition is a fixed sequence of [`OverlayStep`]s applied to the
//! document; the sequence of the most recent transition is kept so the
//! ordering contract can be checked:
//!
//! - opening locks page scroll *before* the overlay gets `show`;
//! - closing removes `show` *before* the scroll lock is lifted.

use serde::Serialize;

use folio_dom::{Document, ElementBuilder, NodeId, TagName};
use folio_types::error::{FolioError, Result};
use folio_types::input::Key;

use crate::catalog::ContentCatalog;

/// Class on `<body>` that suppresses page scrolling.
pub const NO_SCROLL_CLASS: &str = "no-scroll";
/// Class on the overlay container while it is visible.
pub const SHOW_CLASS: &str = "show";
/// Id of the overlay container.
pub const OVERLAY_ID: &str = "article-modal";

// -----------------------------------------------------------------------
// State
// -----------------------------------------------------------------------

/// Whether the overlay is open, and for which article.
///
/// `active_article_id` is `Some` exactly when `is_open` is true, and
/// always names a catalog key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OverlayState {
    is_open: bool,
    active_article_id: Option<String>,
}

impl OverlayState {
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn active_article_id(&self) -> Option<&str> {
        self.active_article_id.as_deref()
    }
}

/// One side effect of an overlay transition, in application order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayStep {
    /// Fill title, body and tags from the catalog record.
    Render(String),
    /// Add `no-scroll` to the body.
    LockScroll,
    /// Add `show` to the container.
    Show,
    /// Focus the dismiss control.
    FocusDismiss,
    /// Scroll the overlay's own content back to the top.
    ResetScroll,
    /// Remove `show` from the container.
    Hide,
    /// Remove `no-scroll` from the body.
    UnlockScroll,
    /// Return focus to the element focused before opening, or drop focus
    /// when that element is gone.
    RestoreFocus(Option<NodeId>),
}

/// Result of [`OverlayController::open`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenOutcome {
    /// The overlay was closed and is now showing the article.
    Opened,
    /// The same article was already showing; nothing changed.
    AlreadyOpen,
    /// A different article was showing and its content was swapped in place.
    Replaced,
    /// A different article is showing and replacement is disabled.
    Busy,
    /// The id is not in the catalog.
    UnknownArticle,
}

// -----------------------------------------------------------------------
// Surface
// -----------------------------------------------------------------------

/// The overlay's elements in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlaySurface {
    /// Full-page dimmed backdrop; clicks on it dismiss.
    pub container: NodeId,
    /// The panel inside the backdrop.
    pub content: NodeId,
    pub close: NodeId,
    pub title: NodeId,
    pub body: NodeId,
    pub tags: NodeId,
}

impl OverlaySurface {
    /// Use the `#article-modal` markup if the page has it, otherwise
    /// append a fresh overlay to `page_body`.
    pub fn bind_or_build(doc: &mut Document, page_body: NodeId) -> Result<Self> {
        match doc.get_element_by_id(OVERLAY_ID) {
            Some(container) => Self::bind(doc, container),
            None => Ok(Self::build(doc, page_body)),
        }
    }

    fn bind(doc: &Document, container: NodeId) -> Result<Self> {
        let part = |class: &str| -> Result<NodeId> {
            doc.query_selector(&format!("#{OVERLAY_ID} .{class}"))?
                .ok_or_else(|| FolioError::MissingElement(format!("#{OVERLAY_ID} .{class}")))
        };
        Ok(Self {
            container,
            content: part("modal-content")?,
            close: part("close")?,
            title: part("modal-title")?,
            body: part("modal-body")?,
            tags: part("modal-tags")?,
        })
    }

    fn build(doc: &mut Document, page_body: NodeId) -> Self {
        let container = ElementBuilder::new(TagName::Div)
            .id(OVERLAY_ID)
            .class("modal")
            .attr("role", "dialog")
            .attr("aria-modal", "true")
            .attr("aria-hidden", "true")
            .append_to(doc, page_body);
        let content = ElementBuilder::new(TagName::Div)
            .class("modal-content")
            .append_to(doc, container);
        let close = ElementBuilder::new(TagName::Button)
            .class("close")
            .attr("aria-label", "Close")
            .text("\u{00d7}")
            .append_to(doc, content);
        let title = ElementBuilder::new(TagName::H2)
            .class("modal-title")
            .append_to(doc, content);
        let tags = ElementBuilder::new(TagName::Div)
            .class("modal-tags")
            .append_to(doc, content);
        let body = ElementBuilder::new(TagName::Div)
            .class("modal-body")
            .append_to(doc, content);
        Self {
            container,
            content,
            close,
            title,
            body,
            tags,
        }
    }
}

// -----------------------------------------------------------------------
// Controller
// -----------------------------------------------------------------------

/// Owner of the overlay state and its document side effects.
#[derive(Debug)]
pub struct OverlayController {
    state: OverlayState,
    surface: OverlaySurface,
    page_body: NodeId,
    return_focus: Option<NodeId>,
    replace_when_open: bool,
    last_steps: Vec<OverlayStep>,
}

impl OverlayController {
    /// Attach to (or construct) the overlay markup under `page_body`.
    pub fn new(doc: &mut Document, page_body: NodeId, replace_when_open: bool) -> Result<Self> {
        let surface = OverlaySurface::bind_or_build(doc, page_body)?;
        doc.remove_class(surface.container, SHOW_CLASS);
        doc.set_attribute(surface.container, "aria-hidden", "true");
        Ok(Self {
            state: OverlayState::default(),
            surface,
            page_body,
            return_focus: None,
            replace_when_open,
            last_steps: Vec::new(),
        })
    }

    pub fn state(&self) -> &OverlayState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open
    }

    pub fn surface(&self) -> &OverlaySurface {
        &self.surface
    }

    /// Steps applied by the most recent state-changing call.
    pub fn last_steps(&self) -> &[OverlayStep] {
        &self.last_steps
    }

    /// Show `article_id`.
    ///
    /// Unknown ids and (unless replacement is enabled) a different id
    /// while open leave everything untouched.
    pub fn open(&mut self, doc: &mut Document, catalog: &ContentCatalog, article_id: &str) -> OpenOutcome {
        if !catalog.contains(article_id) {
            log::warn!("Overlay: no article with id {article_id:?}");
            return OpenOutcome::UnknownArticle;
        }

        if self.state.is_open {
            if self.state.active_article_id.as_deref() == Some(article_id) {
                return OpenOutcome::AlreadyOpen;
            }
            if !self.replace_when_open {
                log::warn!(
                    "Overlay: {article_id:?} requested while {:?} is open",
                    self.state.active_article_id
                );
                return OpenOutcome::Busy;
            }
            self.run(
                doc,
                catalog,
                vec![
                    OverlayStep::Render(article_id.to_string()),
                    OverlayStep::ResetScroll,
                ],
            );
            self.state.active_article_id = Some(article_id.to_string());
            log::debug!("Overlay: replaced content with {article_id}");
            return OpenOutcome::Replaced;
        }

        self.return_focus = doc.active_element();
        self.run(
            doc,
            catalog,
            vec![
                OverlayStep::Render(article_id.to_string()),
                OverlayStep::LockScroll,
                OverlayStep::Show,
                OverlayStep::FocusDismiss,
                OverlayStep::ResetScroll,
            ],
        );
        self.state = OverlayState {
            is_open: true,
            active_article_id: Some(article_id.to_string()),
        };
        log::debug!("Overlay: opened {article_id}");
        OpenOutcome::Opened
    }

    /// Hide the overlay. Returns `false` if it was already closed.
    pub fn close(&mut self, doc: &mut Document) -> bool {
        if !self.state.is_open {
            return false;
        }
        let restore = self.return_focus.take();
        // Rendering needs no catalog on the way out.
        let steps = vec![
            OverlayStep::Hide,
            OverlayStep::UnlockScroll,
            OverlayStep::RestoreFocus(restore),
        ];
        for step in &steps {
            self.apply(doc, None, step);
        }
        self.last_steps = steps;
        self.state = OverlayState::default();
        log::debug!("Overlay: closed");
        true
    }

    /// Route a click. Returns `true` when it dismissed the overlay.
    ///
    /// The close control (or anything inside it) and the backdrop itself
    /// dismiss; clicks inside the content panel do not.
    pub fn handle_click(&mut self, doc: &mut Document, target: NodeId) -> bool {
        if !self.state.is_open {
            return false;
        }
        let on_close = doc
            .ancestors_inclusive(target)
            .any(|n| n == self.surface.close);
        if on_close || target == self.surface.container {
            return self.close(doc);
        }
        false
    }

    /// Route a key press. Escape dismisses while open.
    pub fn handle_key(&mut self, doc: &mut Document, key: &Key) -> bool {
        *key == Key::Escape && self.close(doc)
    }

    fn run(&mut self, doc: &mut Document, catalog: &ContentCatalog, steps: Vec<OverlayStep>) {
        for step in &steps {
            self.apply(doc, Some(catalog), step);
        }
        self.last_steps = steps;
    }

    fn apply(&self, doc: &mut Document, catalog: Option<&ContentCatalog>, step: &OverlayStep) {
        let s = self.surface;
        match step {
            OverlayStep::Render(id) => {
                let Some(record) = catalog.and_then(|c| c.get(id)) else {
                    return;
                };
                doc.set_text_content(s.title, &record.title);
                doc.set_inner_html(s.body, &record.body_markup);
                doc.clear_children(s.tags);
                for tag in &record.tags {
                    ElementBuilder::new(TagName::Span)
                        .class("tag")
                        .text(tag)
                        .append_to(doc, s.tags);
                }
            },
            OverlayStep::LockScroll => doc.add_class(self.page_body, NO_SCROLL_CLASS),
            OverlayStep::Show => {
                doc.add_class(s.container, SHOW_CLASS);
                doc.set_attribute(s.container, "aria-hidden", "false");
            },
            OverlayStep::FocusDismiss => {
                doc.focus(s.close);
            },
            OverlayStep::ResetScroll => {
                for node in [s.container, s.content, s.body] {
                    if let Some(el) = doc.element_mut(node) {
                        el.scroll_top = 0;
                    }
                }
            },
            OverlayStep::Hide => {
                doc.remove_class(s.container, SHOW_CLASS);
                doc.set_attribute(s.container, "aria-hidden", "true");
            },
            OverlayStep::UnlockScroll => doc.remove_class(self.page_body, NO_SCROLL_CLASS),
            OverlayStep::RestoreFocus(previous) => match previous {
                Some(prev) if doc.focus(*prev) => {},
                _ => doc.blur(),
            },
        }
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixture {
        doc: Document,
        body: NodeId,
        trigger: NodeId,
        catalog: ContentCatalog,
        overlay: OverlayController,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let root = doc.root;
        let body = ElementBuilder::new(TagName::Body).append_to(&mut doc, root);
        let trigger = ElementBuilder::new(TagName::A)
            .class("read-more")
            .href("#")
            .attr("data-article", "article2")
            .append_to(&mut doc, body);
        let overlay = OverlayController::new(&mut doc, body, false).unwrap();
        Fixture {
            doc,
            body,
            trigger,
            catalog: ContentCatalog::builtin(),
            overlay,
        }
    }

    fn title(f: &Fixture) -> String {
        f.doc.text_content(f.overlay.surface().title)
    }

    fn tags(f: &Fixture) -> Vec<String> {
        let tags = f.overlay.surface().tags;
        f.doc
            .get(tags)
            .children
            .iter()
            .map(|&t| f.doc.text_content(t))
            .collect()
    }

    #[test]
    fn builds_surface_when_absent() {
        let f = fixture();
        let s = f.overlay.surface();
        assert_eq!(f.doc.get_element_by_id(OVERLAY_ID), Some(s.container));
        assert_eq!(f.doc.get(s.container).parent, Some(f.body));
        assert_eq!(f.doc.attribute(s.container, "role"), Some("dialog"));
        assert_eq!(f.doc.attribute(s.container, "aria-hidden"), Some("true"));
        assert!(!f.doc.has_class(s.container, SHOW_CLASS));
    }

    #[test]
    fn binds_existing_markup() {
        let mut doc = Document::new();
        let root = doc.root;
        let body = ElementBuilder::new(TagName::Body).append_to(&mut doc, root);
        let modal = ElementBuilder::new(TagName::Div)
            .id(OVERLAY_ID)
            .class("modal show")
            .append_to(&mut doc, body);
        let content = ElementBuilder::new(TagName::Div)
            .class("modal-content")
            .append_to(&mut doc, modal);
        let close = ElementBuilder::new(TagName::Button)
            .class("close")
            .append_to(&mut doc, content);
        for class in ["modal-title", "modal-tags", "modal-body"] {
            ElementBuilder::new(TagName::Div)
                .class(class)
                .append_to(&mut doc, content);
        }
        let overlay = OverlayController::new(&mut doc, body, false).unwrap();
        assert_eq!(overlay.surface().container, modal);
        assert_eq!(overlay.surface().close, close);
        // Starts hidden even if the markup said otherwise.
        assert!(!doc.has_class(modal, SHOW_CLASS));
        assert_eq!(doc.query_selector_all(".modal").unwrap().len(), 1);
    }

    #[test]
    fn incomplete_markup_is_missing_element() {
        let mut doc = Document::new();
        let root = doc.root;
        let body = ElementBuilder::new(TagName::Body).append_to(&mut doc, root);
        ElementBuilder::new(TagName::Div)
            .id(OVERLAY_ID)
            .append_to(&mut doc, body);
        let err = OverlayController::new(&mut doc, body, false).unwrap_err();
        assert!(matches!(err, FolioError::MissingElement(_)));
    }

    #[test]
    fn open_renders_and_locks() {
        let mut f = fixture();
        let outcome = f.overlay.open(&mut f.doc, &f.catalog, "article2");
        assert_eq!(outcome, OpenOutcome::Opened);
        assert!(f.overlay.state().is_open());
        assert_eq!(f.overlay.state().active_article_id(), Some("article2"));
        assert_eq!(title(&f), "Legal Aid in India");
        assert_eq!(
            tags(&f),
            vec!["Human Rights", "Access to Justice", "Legal Aid"]
        );
        let s = *f.overlay.surface();
        assert!(f.doc.inner_html(s.body).unwrap().contains("Article 39A"));
        assert!(f.doc.has_class(f.body, NO_SCROLL_CLASS));
        assert!(f.doc.has_class(s.container, SHOW_CLASS));
        assert_eq!(f.doc.attribute(s.container, "aria-hidden"), Some("false"));
        assert_eq!(f.doc.active_element(), Some(s.close));
    }

    #[test]
    fn lock_precedes_show_and_hide_precedes_unlock() {
        let mut f = fixture();
        f.overlay.open(&mut f.doc, &f.catalog, "article1");
        let steps = f.overlay.last_steps();
        let lock = steps.iter().position(|s| *s == OverlayStep::LockScroll).unwrap();
        let show = steps.iter().position(|s| *s == OverlayStep::Show).unwrap();
        let focus = steps.iter().position(|s| *s == OverlayStep::FocusDismiss).unwrap();
        assert!(lock < show);
        assert!(show < focus);

        f.overlay.close(&mut f.doc);
        let steps = f.overlay.last_steps();
        assert_eq!(steps[0], OverlayStep::Hide);
        assert_eq!(steps[1], OverlayStep::UnlockScroll);
    }

    #[test]
    fn open_then_close_resets_state() {
        let mut f = fixture();
        f.overlay.open(&mut f.doc, &f.catalog, "article3");
        assert!(f.overlay.close(&mut f.doc));
        assert_eq!(*f.overlay.state(), OverlayState::default());
        assert!(!f.doc.has_class(f.body, NO_SCROLL_CLASS));
        assert!(!f.doc.has_class(f.overlay.surface().container, SHOW_CLASS));
    }

    #[test]
    fn close_when_closed_is_noop() {
        let mut f = fixture();
        assert!(!f.overlay.close(&mut f.doc));
        assert!(f.overlay.last_steps().is_empty());
        assert_eq!(*f.overlay.state(), OverlayState::default());
    }

    #[test]
    fn unknown_id_leaves_state() {
        let mut f = fixture();
        assert_eq!(
            f.overlay.open(&mut f.doc, &f.catalog, "article9"),
            OpenOutcome::UnknownArticle
        );
        assert_eq!(*f.overlay.state(), OverlayState::default());
        assert!(!f.doc.has_class(f.body, NO_SCROLL_CLASS));

        f.overlay.open(&mut f.doc, &f.catalog, "article2");
        let before = f.overlay.state().clone();
        f.overlay.open(&mut f.doc, &f.catalog, "article9");
        assert_eq!(*f.overlay.state(), before);
        assert_eq!(title(&f), "Legal Aid in India");
    }

    #[test]
    fn reopen_same_id_is_idempotent() {
        let mut f = fixture();
        f.overlay.open(&mut f.doc, &f.catalog, "article2");
        let tag_count = tags(&f).len();
        assert_eq!(
            f.overlay.open(&mut f.doc, &f.catalog, "article2"),
            OpenOutcome::AlreadyOpen
        );
        assert_eq!(tags(&f).len(), tag_count);
        assert_eq!(f.overlay.state().active_article_id(), Some("article2"));
    }

    #[test]
    fn different_id_while_open_is_ignored_by_default() {
        let mut f = fixture();
        f.overlay.open(&mut f.doc, &f.catalog, "article2");
        assert_eq!(
            f.overlay.open(&mut f.doc, &f.catalog, "article4"),
            OpenOutcome::Busy
        );
        assert_eq!(f.overlay.state().active_article_id(), Some("article2"));
        assert_eq!(title(&f), "Legal Aid in India");
    }

    #[test]
    fn replacement_swaps_in_place() {
        let mut f = fixture();
        f.overlay = OverlayController::new(&mut f.doc, f.body, true).unwrap();
        f.doc.focus(f.trigger);
        f.overlay.open(&mut f.doc, &f.catalog, "article2");
        let s = *f.overlay.surface();
        f.doc.element_mut(s.body).unwrap().scroll_top = 400;

        assert_eq!(
            f.overlay.open(&mut f.doc, &f.catalog, "article4"),
            OpenOutcome::Replaced
        );
        assert_eq!(title(&f), "Legal Framework for Environment in India");
        assert_eq!(tags(&f).len(), 3);
        assert_eq!(f.doc.element(s.body).unwrap().scroll_top, 0);
        assert_eq!(f.doc.query_selector_all(".modal").unwrap().len(), 1);

        // Focus still returns to the original trigger.
        f.overlay.close(&mut f.doc);
        assert_eq!(f.doc.active_element(), Some(f.trigger));
    }

    #[test]
    fn focus_restored_to_trigger() {
        let mut f = fixture();
        f.doc.focus(f.trigger);
        f.overlay.open(&mut f.doc, &f.catalog, "article1");
        f.overlay.close(&mut f.doc);
        assert_eq!(f.doc.active_element(), Some(f.trigger));
    }

    #[test]
    fn focus_dropped_when_trigger_removed() {
        let mut f = fixture();
        f.doc.focus(f.trigger);
        f.overlay.open(&mut f.doc, &f.catalog, "article1");
        f.doc.remove_child(f.body, f.trigger);
        f.overlay.close(&mut f.doc);
        assert_eq!(f.doc.active_element(), None);
    }

    #[test]
    fn backdrop_click_dismisses_but_panel_click_does_not() {
        let mut f = fixture();
        f.overlay.open(&mut f.doc, &f.catalog, "article1");
        let s = *f.overlay.surface();
        assert!(!f.overlay.handle_click(&mut f.doc, s.content));
        assert!(!f.overlay.handle_click(&mut f.doc, s.title));
        assert!(f.overlay.is_open());
        assert!(f.overlay.handle_click(&mut f.doc, s.container));
        assert!(!f.overlay.is_open());
    }

    #[test]
    fn close_control_click_dismisses() {
        let mut f = fixture();
        f.overlay.open(&mut f.doc, &f.catalog, "article1");
        let close = f.overlay.surface().close;
        assert!(f.overlay.handle_click(&mut f.doc, close));
        assert!(!f.overlay.is_open());
    }

    #[test]
    fn escape_dismisses_only_when_open() {
        let mut f = fixture();
        assert!(!f.overlay.handle_key(&mut f.doc, &Key::Escape));
        f.overlay.open(&mut f.doc, &f.catalog, "article1");
        assert!(!f.overlay.handle_key(&mut f.doc, &Key::Enter));
        assert!(f.overlay.is_open());
        assert!(f.overlay.handle_key(&mut f.doc, &Key::Escape));
        assert!(!f.overlay.is_open());
    }

    #[test]
    fn reopen_after_close_renders_fresh_tags() {
        let mut f = fixture();
        f.overlay.open(&mut f.doc, &f.catalog, "article1");
        f.overlay.close(&mut f.doc);
        f.overlay.open(&mut f.doc, &f.catalog, "article2");
        assert_eq!(
            tags(&f),
            vec!["Human Rights", "Access to Justice", "Legal Aid"]
        );
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        fn arb_id() -> impl Strategy<Value = String> {
            prop_oneof![
                Just("article1".to_string()),
                Just("article2".to_string()),
                Just("article3".to_string()),
                Just("article4".to_string()),
                "[a-z0-9]{0,10}",
            ]
        }

        #[derive(Debug, Clone)]
        enum Op {
            Open(String),
            Close,
            Escape,
        }

        fn arb_op() -> impl Strategy<Value = Op> {
            prop_oneof![
                arb_id().prop_map(Op::Open),
                Just(Op::Close),
                Just(Op::Escape),
            ]
        }

        proptest! {
            #[test]
            fn state_invariant_holds(ops in proptest::collection::vec(arb_op(), 0..30)) {
                let mut f = fixture();
                for op in ops {
                    match op {
                        Op::Open(id) => { f.overlay.open(&mut f.doc, &f.catalog, &id); },
                        Op::Close => { f.overlay.close(&mut f.doc); },
                        Op::Escape => { f.overlay.handle_key(&mut f.doc, &Key::Escape); },
                    }
                    let state = f.overlay.state();
                    prop_assert_eq!(state.is_open(), state.active_article_id().is_some());
                    if let Some(id) = state.active_article_id() {
                        prop_assert!(f.catalog.contains(id));
                    }
                    // Scroll lock and visibility always agree with the state.
                    prop_assert_eq!(f.doc.has_class(f.body, NO_SCROLL_CLASS), state.is_open());
                    prop_assert_eq!(
                        f.doc.has_class(f.overlay.surface().container, SHOW_CLASS),
                        state.is_open()
                    );
                }
            }

            #[test]
            fn open_close_roundtrip(idx in 1usize..=4) {
                let mut f = fixture();
                let id = format!("article{idx}");
                prop_assert_eq!(f.overlay.open(&mut f.doc, &f.catalog, &id), OpenOutcome::Opened);
                prop_assert!(f.overlay.close(&mut f.doc));
                prop_assert_eq!(f.overlay.state().clone(), OverlayState::default());
            }
        }
    }
}
