//! One-shot fade-in of `.animate-on-scroll` elements.
//!
//! Each element gets `fade-in` the first time it enters the viewport and
//! is then dropped from observation. The set of waiting elements only
//! shrinks.

use folio_dom::{Document, NodeId};
use folio_types::config::PageConfig;
use folio_types::error::Result;

use crate::host::Viewport;
use crate::observer::{ObserverOptions, ViewportObserver};

pub const ANIMATE_SELECTOR: &str = ".animate-on-scroll";
pub const FADE_IN_CLASS: &str = "fade-in";

/// Reveal-on-scroll driver.
#[derive(Debug, Clone)]
pub struct RevealController {
    observer: ViewportObserver,
    revealed: usize,
}

impl RevealController {
    /// Track every `.animate-on-scroll` element.
    ///
    /// When the host cannot report viewport entry, everything is revealed
    /// right away and nothing is tracked.
    pub fn new(doc: &mut Document, config: &PageConfig, observation_supported: bool) -> Result<Self> {
        let targets = doc.query_selector_all(ANIMATE_SELECTOR)?;
        let options = ObserverOptions {
            threshold: config.reveal_threshold,
            bottom_margin: config.reveal_bottom_margin_px as i32,
        };
        let mut controller = Self {
            observer: ViewportObserver::new(options),
            revealed: 0,
        };

        if !observation_supported {
            log::warn!("IntersectionObserver not supported. Applying animations immediately.");
            for target in targets {
                doc.add_class(target, FADE_IN_CLASS);
                controller.revealed += 1;
            }
            return Ok(controller);
        }

        for target in targets {
            controller.observer.observe(target);
        }
        Ok(controller)
    }

    /// `target` entered the viewport. Returns `true` only for its first
    /// reveal; repeats and untracked elements are ignored.
    pub fn notify(&mut self, doc: &mut Document, target: NodeId) -> bool {
        if !self.observer.unobserve(target) {
            return false;
        }
        doc.add_class(target, FADE_IN_CLASS);
        self.revealed += 1;
        true
    }

    /// Reveal everything that is inside `viewport`.
    pub fn on_scroll(&mut self, doc: &mut Document, viewport: Viewport) -> Vec<NodeId> {
        let entered = self.observer.intersecting(doc, viewport);
        entered
            .into_iter()
            .filter(|&t| self.notify(doc, t))
            .collect()
    }

    /// Elements still waiting to be revealed.
    pub fn pending(&self) -> usize {
        self.observer.len()
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    /// Nothing left to observe.
    pub fn is_idle(&self) -> bool {
        self.observer.is_empty()
    }
}
