//! Typewriter effect for the hero subtitle.
//!
//! The subtitle's text is captured and cleared at start; character `k`
//! reappears `start_delay + k * interval` milliseconds later. Time only
//! advances through [`TypingEffect::tick`].

use folio_dom::{Document, NodeId};
use folio_types::config::PageConfig;
use folio_types::error::{FolioError, Result};

pub const SUBTITLE_SELECTOR: &str = ".hero-subtitle";

#[derive(Debug, Clone)]
pub struct TypingEffect {
    node: NodeId,
    text: Vec<char>,
    typed: usize,
    elapsed_ms: u64,
    start_delay_ms: u64,
    interval_ms: u64,
    cancelled: bool,
}

impl TypingEffect {
    pub fn start(doc: &mut Document, config: &PageConfig) -> Result<Self> {
        let node = doc
            .query_selector(SUBTITLE_SELECTOR)?
            .ok_or_else(|| FolioError::MissingElement(SUBTITLE_SELECTOR.into()))?;
        let text = doc.text_content(node).chars().collect();
        doc.set_text_content(node, "");
        Ok(Self {
            node,
            text,
            typed: 0,
            elapsed_ms: 0,
            start_delay_ms: u64::from(config.typing_start_delay_ms),
            interval_ms: u64::from(config.typing_char_interval_ms.max(1)),
            cancelled: false,
        })
    }

    /// Characters due after `elapsed` milliseconds.
    fn due(&self, elapsed: u64) -> usize {
        if elapsed < self.start_delay_ms {
            return 0;
        }
        let steps = (elapsed - self.start_delay_ms) / self.interval_ms + 1;
        usize::try_from(steps).unwrap_or(usize::MAX).min(self.text.len())
    }

    /// Advance the clock and append every character now due. Returns how
    /// many were appended.
    pub fn tick(&mut self, doc: &mut Document, elapsed_ms: u32) -> usize {
        if self.cancelled || self.is_finished() {
            return 0;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(elapsed_ms));
        let due = self.due(self.elapsed_ms);
        if due <= self.typed {
            return 0;
        }
        let chunk: String = self.text[self.typed..due].iter().collect();
        doc.append_text(self.node, &chunk);
        let appended = due - self.typed;
        self.typed = due;
        appended
    }

    /// Stop typing; the subtitle keeps whatever has been typed so far.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.typed == self.text.len()
    }

    pub fn node(&self) -> NodeId {
        self.node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_dom::{ElementBuilder, TagName};

    fn page(text: &str) -> (Document, NodeId) {
        let mut doc = Document::new();
        let root = doc.root;
        let p = ElementBuilder::new(TagName::P)
            .class("hero-subtitle")
            .text(text)
            .append_to(&mut doc, root);
        (doc, p)
    }

    #[test]
    fn clears_then_types_on_schedule() {
        let (mut doc, p) = page("Law");
        let config = PageConfig::default();
        let mut typing = TypingEffect::start(&mut doc, &config).unwrap();
        assert_eq!(doc.text_content(p), "");

        assert_eq!(typing.tick(&mut doc, 999), 0);
        assert_eq!(typing.tick(&mut doc, 1), 1);
        assert_eq!(doc.text_content(p), "L");
        assert_eq!(typing.tick(&mut doc, 49), 0);
        assert_eq!(typing.tick(&mut doc, 1), 1);
        assert_eq!(doc.text_content(p), "La");
        assert_eq!(typing.tick(&mut doc, 5000), 1);
        assert_eq!(doc.text_content(p), "Law");
        assert!(typing.is_finished());
        assert_eq!(typing.tick(&mut doc, 50), 0);
    }

    #[test]
    fn large_tick_catches_up() {
        let (mut doc, p) = page("héllo");
        let mut typing = TypingEffect::start(&mut doc, &PageConfig::default()).unwrap();
        assert_eq!(typing.tick(&mut doc, 1100), 3);
        assert_eq!(doc.text_content(p), "hél");
    }

    #[test]
    fn cancel_freezes_text() {
        let (mut doc, p) = page("Advocate");
        let mut typing = TypingEffect::start(&mut doc, &PageConfig::default()).unwrap();
        typing.tick(&mut doc, 1000);
        typing.cancel();
        assert_eq!(typing.tick(&mut doc, 10_000), 0);
        assert_eq!(doc.text_content(p), "A");
        assert!(typing.is_cancelled());
    }

    #[test]
    fn missing_subtitle_is_error() {
        let mut doc = Document::new();
        assert!(TypingEffect::start(&mut doc, &PageConfig::default()).is_err());
    }
}
