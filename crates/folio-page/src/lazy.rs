//! Lazy image loading for hosts without native `loading="lazy"`.

use folio_dom::{Document, NodeId};
use folio_types::error::Result;

use crate::host::Viewport;
use crate::observer::{ObserverOptions, ViewportObserver};

pub const LAZY_IMAGE_SELECTOR: &str = r#"img[loading="lazy"]"#;
pub const LAZY_CLASS: &str = "lazy";

/// How images get their real source.
#[derive(Debug, Clone)]
pub enum LazyImages {
    /// The host defers loading itself; nothing to do.
    Native,
    /// Swap sources as images enter the viewport.
    Observed(ViewportObserver),
    /// Everything was loaded at startup.
    Eager,
}

impl LazyImages {
    pub fn new(doc: &mut Document, native_supported: bool, observation_supported: bool) -> Result<Self> {
        if native_supported {
            log::info!("Native lazy loading supported");
            return Ok(Self::Native);
        }

        let images = doc.query_selector_all(LAZY_IMAGE_SELECTOR)?;
        if observation_supported {
            let mut observer = ViewportObserver::new(ObserverOptions::default());
            for img in images {
                observer.observe(img);
            }
            return Ok(Self::Observed(observer));
        }

        for img in images {
            load_image(doc, img);
        }
        Ok(Self::Eager)
    }

    /// `img` entered the viewport. Returns whether it was loaded now.
    pub fn notify(&mut self, doc: &mut Document, img: NodeId) -> bool {
        let Self::Observed(observer) = self else {
            return false;
        };
        if !observer.unobserve(img) {
            return false;
        }
        load_image(doc, img);
        doc.remove_class(img, LAZY_CLASS);
        true
    }

    /// Load every observed image inside `viewport`.
    pub fn on_scroll(&mut self, doc: &mut Document, viewport: Viewport) -> Vec<NodeId> {
        let entered = match self {
            Self::Observed(observer) => observer.intersecting(doc, viewport),
            _ => return Vec::new(),
        };
        entered
            .into_iter()
            .filter(|&img| self.notify(doc, img))
            .collect()
    }

    /// Images not loaded yet.
    pub fn pending(&self) -> usize {
        match self {
            Self::Observed(observer) => observer.len(),
            _ => 0,
        }
    }
}

/// Copy `data-src` into `src`, keeping `src` when `data-src` is absent
/// or empty.
fn load_image(doc: &mut Document, img: NodeId) {
    let Some(el) = doc.element_mut(img) else {
        return;
    };
    if let Some(real) = el
        .dataset("src")
        .filter(|s| !s.is_empty())
        .map(str::to_string)
    {
        el.set_attribute("src", &real);
    }
}
