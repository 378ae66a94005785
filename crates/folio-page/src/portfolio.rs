//! The page driver.
//!
//! [`Portfolio`] owns the document, the catalog and the host, brings up
//! every behavior once at construction, and routes each [`PageEvent`] to
//! the components that react to it. A feature whose markup is missing is
//! logged and left out; the rest of the page keeps working.

use serde::Serialize;

use folio_dom::{Document, NodeId};
use folio_types::config::PageConfig;
use folio_types::error::{FolioError, Result};
use folio_types::input::Key;

use crate::anchor::{BackToTop, SmoothAnchors};
use crate::catalog::ContentCatalog;
use crate::diagnostics;
use crate::download;
use crate::event::{EventOutcome, PageEvent};
use crate::highlight::SectionHighlighter;
use crate::host::Host;
use crate::lazy::LazyImages;
use crate::nav::{NavbarBackground, NavigationMenuToggle};
use crate::overlay::{NO_SCROLL_CLASS, OpenOutcome, OverlayController, OverlayState};
use crate::reveal::RevealController;
use crate::scroll::{ScrollProgressBar, ScrollSnapshot, ViewportScrollTracker};
use crate::typing::TypingEffect;

pub const READ_MORE_SELECTOR: &str = ".read-more[data-article]";

/// Serializable view of the whole page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSnapshot {
    pub overlay: OverlayState,
    pub scroll: ScrollSnapshot,
    pub scroll_locked: bool,
    pub menu_open: bool,
    pub pending_reveals: usize,
    pub pending_images: usize,
    /// `#id` (or tag name) of the focused element.
    pub focused: Option<String>,
    /// Hero subtitle as currently typed, when the typing effect runs.
    pub subtitle: Option<String>,
}

/// Behaviors that came up successfully.
#[derive(Debug, Default)]
struct Features {
    reveal: Option<RevealController>,
    tracker: Option<ViewportScrollTracker>,
    navbar: Option<NavbarBackground>,
    highlighter: Option<SectionHighlighter>,
    menu: Option<NavigationMenuToggle>,
    back_to_top: Option<BackToTop>,
    progress: Option<ScrollProgressBar>,
    lazy: Option<LazyImages>,
    overlay: Option<OverlayController>,
    typing: Option<TypingEffect>,
}

pub struct Portfolio<H: Host> {
    doc: Document,
    catalog: ContentCatalog,
    config: PageConfig,
    host: H,
    anchors: SmoothAnchors,
    observation: bool,
    features: Features,
}

/// Keep a feature's value, or log why it is unavailable.
fn enable<T>(feature: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            log::error!("Error initializing {feature}: {e}");
            None
        },
    }
}

impl<H: Host> Portfolio<H> {
    /// Initialize every behavior against `doc`, in page-script order.
    pub fn new(mut doc: Document, catalog: ContentCatalog, config: PageConfig, host: H) -> Self {
        diagnostics::missing_required(&doc, &config.required_selectors);

        let observation = host.supports_intersection_observer();
        let mut features = Features {
            reveal: enable(
                "scroll animations",
                RevealController::new(&mut doc, &config, observation),
            ),
            tracker: enable("scroll tracking", ViewportScrollTracker::new(&doc, &config)),
            navbar: enable("navbar", NavbarBackground::new(&doc, &config)),
            highlighter: enable("section highlighting", SectionHighlighter::new(&doc)),
            menu: enable("mobile menu", NavigationMenuToggle::new(&doc)),
            ..Features::default()
        };
        features.lazy = enable(
            "lazy loading",
            LazyImages::new(&mut doc, host.supports_native_lazy_loading(), observation),
        );
        features.back_to_top = match BackToTop::new(&doc) {
            Ok(button) => Some(button),
            Err(_) => {
                log::warn!("Back to top button not found");
                None
            },
        };
        features.progress = enable("scroll progress", ScrollProgressBar::attach(&mut doc));
        let overlay = doc
            .body()
            .ok_or_else(|| FolioError::MissingElement("body".into()))
            .and_then(|body| OverlayController::new(&mut doc, body, config.replace_open_overlay));
        features.overlay = enable("article overlay", overlay);
        if config.typing_effect {
            features.typing = enable("typing animation", TypingEffect::start(&mut doc, &config));
        }

        let mut portfolio = Self {
            doc,
            catalog,
            anchors: SmoothAnchors::new(&config),
            config,
            host,
            observation,
            features,
        };
        portfolio.on_scroll();
        log::info!("Portfolio loaded successfully");
        portfolio
    }

    /// Route one browser event.
    pub fn dispatch(&mut self, event: PageEvent) -> EventOutcome {
        match event {
            PageEvent::Scroll => {
                self.on_scroll();
                EventOutcome::default()
            },
            PageEvent::Click { target } => self.on_click(target).unwrap_or_else(|e| {
                log::error!("Error handling click: {e}");
                EventOutcome::default()
            }),
            PageEvent::KeyDown { key, target } => self.on_key(&key, target),
            PageEvent::Intersection { targets } => {
                for target in targets {
                    if let Some(reveal) = &mut self.features.reveal {
                        reveal.notify(&mut self.doc, target);
                    }
                    if let Some(lazy) = &mut self.features.lazy {
                        lazy.notify(&mut self.doc, target);
                    }
                }
                EventOutcome::default()
            },
            PageEvent::Tick { elapsed_ms } => {
                if let Some(typing) = &mut self.features.typing {
                    typing.tick(&mut self.doc, elapsed_ms);
                }
                EventOutcome::default()
            },
            PageEvent::Load { elapsed_ms } => {
                log::info!("Page loaded in {elapsed_ms:.2}ms");
                EventOutcome::default()
            },
        }
    }

    fn on_scroll(&mut self) {
        let viewport = self.host.viewport();
        let f = &mut self.features;
        if let Some(tracker) = &mut f.tracker {
            let snap = tracker.update(&self.doc, viewport);
            if let Some(navbar) = &f.navbar {
                navbar.apply(&mut self.doc, snap.navbar_solid);
            }
            if let Some(highlighter) = &f.highlighter {
                highlighter.apply(&mut self.doc, snap.current_section_id.as_deref());
            }
            if let Some(progress) = &f.progress {
                progress.apply(&mut self.doc, snap.scroll_percent);
            }
            if let Some(button) = &f.back_to_top {
                button.apply(&mut self.doc, snap.back_to_top_visible);
            }
        }
        if self.observation {
            if let Some(reveal) = &mut f.reveal {
                reveal.on_scroll(&mut self.doc, viewport);
            }
            if let Some(lazy) = &mut f.lazy {
                lazy.on_scroll(&mut self.doc, viewport);
            }
        }
    }

    fn on_click(&mut self, target: NodeId) -> Result<EventOutcome> {
        if let Some(overlay) = &mut self.features.overlay
            && overlay.handle_click(&mut self.doc, target)
        {
            return Ok(EventOutcome::default());
        }

        if let Some(trigger) = self.doc.closest(target, READ_MORE_SELECTOR)? {
            let id = self
                .doc
                .attribute(trigger, "data-article")
                .unwrap_or_default()
                .to_string();
            self.open_article(&id);
            return Ok(EventOutcome::prevented());
        }

        if download::handle_click(&self.doc, &self.catalog, &mut self.host, target)?.is_some() {
            return Ok(EventOutcome::default());
        }

        let mut outcome = EventOutcome::default();
        if let Some(menu) = &mut self.features.menu {
            menu.handle_click(&mut self.doc, target)?;
        }
        if let Some(button) = &self.features.back_to_top {
            outcome.merge(button.handle_click(&mut self.doc, &mut self.host, target));
        }
        if !outcome.default_prevented {
            outcome.merge(self.anchors.handle_click(&self.doc, &mut self.host, target)?);
        }
        Ok(outcome)
    }

    fn on_key(&mut self, key: &Key, target: Option<NodeId>) -> EventOutcome {
        if let Some(overlay) = &mut self.features.overlay
            && overlay.handle_key(&mut self.doc, key)
        {
            return EventOutcome::default();
        }
        match &self.features.back_to_top {
            Some(button) => button.handle_key(&mut self.doc, &mut self.host, key, target),
            None => EventOutcome::default(),
        }
    }

    /// Show an article in the overlay. `None` when the overlay could not
    /// be set up.
    pub fn open_article(&mut self, article_id: &str) -> Option<OpenOutcome> {
        let overlay = self.features.overlay.as_mut()?;
        Some(overlay.open(&mut self.doc, &self.catalog, article_id))
    }

    /// Dismiss the overlay. Returns whether it was open.
    pub fn close_article(&mut self) -> bool {
        self.features
            .overlay
            .as_mut()
            .is_some_and(|overlay| overlay.close(&mut self.doc))
    }

    pub fn overlay(&self) -> Option<&OverlayController> {
        self.features.overlay.as_ref()
    }

    pub fn scroll_locked(&self) -> bool {
        self.doc
            .body()
            .is_some_and(|body| self.doc.has_class(body, NO_SCROLL_CLASS))
    }

    pub fn menu_open(&self) -> bool {
        self.features.menu.as_ref().is_some_and(|m| m.is_open())
    }

    pub fn snapshot(&self) -> PageSnapshot {
        let f = &self.features;
        PageSnapshot {
            overlay: f
                .overlay
                .as_ref()
                .map(|o| o.state().clone())
                .unwrap_or_default(),
            scroll: f
                .tracker
                .as_ref()
                .map(|t| t.snapshot().clone())
                .unwrap_or_default(),
            scroll_locked: self.scroll_locked(),
            menu_open: self.menu_open(),
            pending_reveals: f.reveal.as_ref().map_or(0, |r| r.pending()),
            pending_images: f.lazy.as_ref().map_or(0, |l| l.pending()),
            focused: self.doc.active_element().map(|n| self.describe(n)),
            subtitle: f.typing.as_ref().map(|t| self.doc.text_content(t.node())),
        }
    }

    fn describe(&self, node: NodeId) -> String {
        match self.doc.element(node) {
            Some(el) => match el.id() {
                Some(id) => format!("#{id}"),
                None => el.tag.as_str().to_string(),
            },
            None => String::new(),
        }
    }

    /// Stop pending timers. The page stays as it is.
    pub fn teardown(&mut self) {
        if let Some(typing) = &mut self.features.typing {
            typing.cancel();
        }
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn catalog(&self) -> &ContentCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
}
