//! The window the page runs in.
//!
//! Everything the page needs from the browser beyond the document itself
//! goes through [`Host`]: viewport metrics, programmatic scrolling,
//! capability probes and file downloads.

use folio_dom::Document;
use folio_types::input::ScrollBehavior;

/// Viewport metrics sampled at the time of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    /// `window.scrollY`.
    pub scroll_y: i32,
    /// `window.innerHeight`.
    pub height: i32,
    /// `document.documentElement.scrollHeight`.
    pub document_height: i32,
}

/// Browser-side services consumed by the page.
pub trait Host {
    fn viewport(&self) -> Viewport;

    /// Request a scroll to `top`. Hosts clamp to their scrollable range.
    fn scroll_to(&mut self, top: i32, behavior: ScrollBehavior);

    /// Whether element-entered-viewport notifications are available.
    fn supports_intersection_observer(&self) -> bool {
        true
    }

    /// Whether `<img loading="lazy">` is honored natively.
    fn supports_native_lazy_loading(&self) -> bool {
        true
    }

    /// Trigger a file download of `href`, saved as `filename`.
    fn download(&mut self, href: &str, filename: &str);
}

/// A programmatic scroll recorded by [`HeadlessHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollRequest {
    pub top: i32,
    pub behavior: ScrollBehavior,
}

/// A download recorded by [`HeadlessHost`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadRequest {
    pub href: String,
    pub filename: String,
}

/// An in-memory window with no rendering.
///
/// Programmatic scrolls land immediately (smooth or not) and are recorded
/// together with downloads so callers can inspect what the page asked for.
#[derive(Debug, Clone)]
pub struct HeadlessHost {
    scroll_y: i32,
    viewport_height: i32,
    document_height: i32,
    pub intersection_observer: bool,
    pub native_lazy_loading: bool,
    pub scroll_requests: Vec<ScrollRequest>,
    pub downloads: Vec<DownloadRequest>,
}

impl HeadlessHost {
    pub fn new(viewport_height: i32, document_height: i32) -> Self {
        Self {
            scroll_y: 0,
            viewport_height,
            document_height,
            intersection_observer: true,
            native_lazy_loading: true,
            scroll_requests: Vec::new(),
            downloads: Vec::new(),
        }
    }

    /// Size the document to the lowest element box in `doc`.
    pub fn fit_document(viewport_height: i32, doc: &Document) -> Self {
        let extent = doc
            .descendants(doc.root)
            .map(|n| {
                let g = doc.geometry(n);
                g.top + g.height
            })
            .max()
            .unwrap_or(0);
        Self::new(viewport_height, extent.max(viewport_height))
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll(&self) -> i32 {
        (self.document_height - self.viewport_height).max(0)
    }

    /// Move the window as a user would. The caller dispatches the
    /// resulting scroll event.
    pub fn set_scroll_y(&mut self, y: i32) {
        self.scroll_y = y.clamp(0, self.max_scroll());
    }

    pub fn set_viewport_height(&mut self, height: i32) {
        self.viewport_height = height;
        self.set_scroll_y(self.scroll_y);
    }
}

impl Host for HeadlessHost {
    fn viewport(&self) -> Viewport {
        Viewport {
            scroll_y: self.scroll_y,
            height: self.viewport_height,
            document_height: self.document_height,
        }
    }

    fn scroll_to(&mut self, top: i32, behavior: ScrollBehavior) {
        self.scroll_requests.push(ScrollRequest { top, behavior });
        self.set_scroll_y(top);
    }

    fn supports_intersection_observer(&self) -> bool {
        self.intersection_observer
    }

    fn supports_native_lazy_loading(&self) -> bool {
        self.native_lazy_loading
    }

    fn download(&mut self, href: &str, filename: &str) {
        self.downloads.push(DownloadRequest {
            href: href.to_string(),
            filename: filename.to_string(),
        });
    }
}
