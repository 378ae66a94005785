//! Scroll-driven page state: current section, progress, and thresholds.

use serde::Serialize;

use folio_dom::{Document, ElementBuilder, NodeId, TagName};
use folio_types::config::PageConfig;
use folio_types::error::{FolioError, Result};

use crate::host::Viewport;

/// Sections that take part in highlighting, in document order.
pub const SECTION_SELECTOR: &str = "section[id], header[id]";

/// Everything derived from one scroll position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScrollSnapshot {
    pub scroll_y: i32,
    /// Deepest section scrolled past, if any.
    pub current_section_id: Option<String>,
    /// Progress through the scrollable range, `0.0..=100.0`.
    pub scroll_percent: f32,
    pub navbar_solid: bool,
    pub back_to_top_visible: bool,
}

/// Progress through the scrollable range as a percentage.
///
/// A document that fits in the viewport has nothing to scroll and
/// reports 0.
pub fn scroll_percent(scroll_y: i32, document_height: i32, viewport_height: i32) -> f32 {
    let max = document_height - viewport_height;
    if max <= 0 {
        return 0.0;
    }
    (scroll_y as f32 / max as f32 * 100.0).clamp(0.0, 100.0)
}

/// Recomputes the [`ScrollSnapshot`] on every scroll event.
#[derive(Debug, Clone)]
pub struct ViewportScrollTracker {
    sections: Vec<NodeId>,
    lookahead: i32,
    navbar_solid_after: i32,
    back_to_top_after: i32,
    snapshot: ScrollSnapshot,
}

impl ViewportScrollTracker {
    /// Register every `section[id]` and `header[id]` in the document.
    pub fn new(doc: &Document, config: &PageConfig) -> Result<Self> {
        let sections = doc.query_selector_all(SECTION_SELECTOR)?;
        Ok(Self::with_sections(sections, config))
    }

    /// Track an explicit list of sections, top to bottom.
    pub fn with_sections(sections: Vec<NodeId>, config: &PageConfig) -> Self {
        Self {
            sections,
            lookahead: config.section_lookahead_px as i32,
            navbar_solid_after: config.navbar_solid_after_px as i32,
            back_to_top_after: config.back_to_top_after_px as i32,
            snapshot: ScrollSnapshot::default(),
        }
    }

    pub fn sections(&self) -> &[NodeId] {
        &self.sections
    }

    pub fn snapshot(&self) -> &ScrollSnapshot {
        &self.snapshot
    }

    /// The last section, in document order, whose top minus the
    /// look-ahead lies at or above `scroll_y`.
    pub fn current_section(&self, doc: &Document, scroll_y: i32) -> Option<String> {
        let mut current = None;
        for &section in &self.sections {
            if scroll_y >= doc.geometry(section).top - self.lookahead
                && let Some(id) = doc.attribute(section, "id")
                && !id.is_empty()
            {
                current = Some(id.to_string());
            }
        }
        current
    }

    /// Take a new snapshot for `viewport`.
    pub fn update(&mut self, doc: &Document, viewport: Viewport) -> &ScrollSnapshot {
        let y = viewport.scroll_y;
        self.snapshot = ScrollSnapshot {
            scroll_y: y,
            current_section_id: self.current_section(doc, y),
            scroll_percent: scroll_percent(y, viewport.document_height, viewport.height),
            navbar_solid: y > self.navbar_solid_after,
            back_to_top_visible: y > self.back_to_top_after,
        };
        &self.snapshot
    }
}

// -----------------------------------------------------------------------
// Progress bar
// -----------------------------------------------------------------------

/// Thin bar under the header whose width follows scroll progress.
#[derive(Debug, Clone, Copy)]
pub struct ScrollProgressBar {
    bar: NodeId,
}

impl ScrollProgressBar {
    /// Append the bar to the page body.
    pub fn attach(doc: &mut Document) -> Result<Self> {
        let body = doc
            .body()
            .ok_or_else(|| FolioError::MissingElement("body".into()))?;
        let bar = ElementBuilder::new(TagName::Div)
            .class("scroll-progress")
            .append_to(doc, body);
        doc.set_style(bar, "width", "0%");
        Ok(Self { bar })
    }

    pub fn node(&self) -> NodeId {
        self.bar
    }

    pub fn apply(&self, doc: &mut Document, percent: f32) {
        doc.set_style(self.bar, "width", &format!("{percent}%"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(tops: &[(&str, i32)]) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.root;
        let body = ElementBuilder::new(TagName::Body).append_to(&mut doc, root);
        let mut ids = Vec::new();
        for (i, (id, top)) in tops.iter().enumerate() {
            let tag = if i == 0 { TagName::Header } else { TagName::Section };
            ids.push(
                ElementBuilder::new(tag)
                    .id(id)
                    .geometry(*top, 500)
                    .append_to(&mut doc, body),
            );
        }
        (doc, ids)
    }

    fn viewport(scroll_y: i32) -> Viewport {
        Viewport {
            scroll_y,
            height: 800,
            document_height: 3000,
        }
    }

    #[test]
    fn registers_sections_in_document_order() {
        let (doc, ids) = page(&[("home", 0), ("about", 700), ("contact", 1400)]);
        let tracker = ViewportScrollTracker::new(&doc, &PageConfig::default()).unwrap();
        assert_eq!(tracker.sections(), ids.as_slice());
    }

    #[test]
    fn sections_without_id_are_ignored() {
        let (mut doc, _) = page(&[("home", 0)]);
        let body = doc.body().unwrap();
        ElementBuilder::new(TagName::Section)
            .geometry(100, 100)
            .append_to(&mut doc, body);
        let tracker = ViewportScrollTracker::new(&doc, &PageConfig::default()).unwrap();
        assert_eq!(tracker.sections().len(), 1);
    }

    #[test]
    fn deepest_scrolled_past_section_wins() {
        let (doc, _) = page(&[("a", 0), ("b", 700), ("c", 1400)]);
        let mut tracker = ViewportScrollTracker::new(&doc, &PageConfig::default()).unwrap();
        // 500 >= 700 - 200 holds for a and b, fails for c.
        let snap = tracker.update(&doc, viewport(500));
        assert_eq!(snap.current_section_id.as_deref(), Some("b"));
        let snap = tracker.update(&doc, viewport(499));
        assert_eq!(snap.current_section_id.as_deref(), Some("a"));
        let snap = tracker.update(&doc, viewport(1200));
        assert_eq!(snap.current_section_id.as_deref(), Some("c"));
    }

    #[test]
    fn no_section_before_first() {
        let (doc, _) = page(&[("a", 600)]);
        let mut tracker = ViewportScrollTracker::new(&doc, &PageConfig::default()).unwrap();
        assert_eq!(tracker.update(&doc, viewport(0)).current_section_id, None);
    }

    #[test]
    fn lookahead_is_configurable() {
        let (doc, _) = page(&[("a", 0), ("b", 700)]);
        let config = PageConfig {
            section_lookahead_px: 0,
            ..PageConfig::default()
        };
        let mut tracker = ViewportScrollTracker::new(&doc, &config).unwrap();
        assert_eq!(
            tracker.update(&doc, viewport(600)).current_section_id.as_deref(),
            Some("a")
        );
    }

    #[test]
    fn thresholds_are_strict() {
        let (doc, _) = page(&[("a", 0)]);
        let mut tracker = ViewportScrollTracker::new(&doc, &PageConfig::default()).unwrap();
        let snap = tracker.update(&doc, viewport(100)).clone();
        assert!(!snap.navbar_solid);
        let snap = tracker.update(&doc, viewport(101)).clone();
        assert!(snap.navbar_solid);
        assert!(!snap.back_to_top_visible);
        let snap = tracker.update(&doc, viewport(301)).clone();
        assert!(snap.back_to_top_visible);
    }

    #[test]
    fn percent_endpoints() {
        assert_eq!(scroll_percent(0, 3000, 800), 0.0);
        assert_eq!(scroll_percent(2200, 3000, 800), 100.0);
        assert!((scroll_percent(1100, 3000, 800) - 50.0).abs() < 1e-4);
    }

    #[test]
    fn percent_guarded_without_overflow() {
        let p = scroll_percent(0, 800, 800);
        assert_eq!(p, 0.0);
        assert!(!p.is_nan());
        assert_eq!(scroll_percent(10, 600, 800), 0.0);
    }

    #[test]
    fn percent_clamped() {
        assert_eq!(scroll_percent(5000, 3000, 800), 100.0);
        assert_eq!(scroll_percent(-40, 3000, 800), 0.0);
    }

    #[test]
    fn progress_bar_width_follows_percent() {
        let (mut doc, _) = page(&[("a", 0)]);
        let bar = ScrollProgressBar::attach(&mut doc).unwrap();
        assert_eq!(doc.style(bar.node(), "width"), Some("0%"));
        bar.apply(&mut doc, 42.5);
        assert_eq!(doc.style(bar.node(), "width"), Some("42.5%"));
        assert!(doc.has_class(bar.node(), "scroll-progress"));
    }

    #[test]
    fn progress_bar_needs_body() {
        let mut doc = Document::new();
        assert!(ScrollProgressBar::attach(&mut doc).is_err());
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn percent_in_range(y in -1000i32..10000, doc_h in 0i32..10000, view_h in 1i32..2000) {
                let p = scroll_percent(y, doc_h, view_h);
                prop_assert!(p.is_finite());
                prop_assert!((0.0..=100.0).contains(&p));
            }

            #[test]
            fn current_section_is_last_match(
                mut tops in proptest::collection::vec(0i32..5000, 1..8),
                y in 0i32..6000,
            ) {
                tops.sort_unstable();
                let names: Vec<String> = (0..tops.len()).map(|i| format!("s{i}")).collect();
                let layout: Vec<(&str, i32)> =
                    names.iter().map(String::as_str).zip(tops.iter().copied()).collect();
                let (doc, _) = page(&layout);
                let tracker = ViewportScrollTracker::new(&doc, &PageConfig::default()).unwrap();
                let expected = tops
                    .iter()
                    .rposition(|&t| y >= t - 200)
                    .map(|i| names[i].clone());
                prop_assert_eq!(tracker.current_section(&doc, y), expected);
            }
        }
    }
}
