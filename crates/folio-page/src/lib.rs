//! Page behaviors for a single-page portfolio site.
//!
//! Each behavior is a small component over a [`folio_dom::Document`]:
//! the article overlay, scroll tracking and section highlighting,
//! reveal-on-scroll, the mobile menu, anchor scrolling, lazy images,
//! downloads and the typing effect. [`Portfolio`] brings them up against
//! a [`Host`] and routes [`PageEvent`]s to them.

pub mod anchor;
pub mod catalog;
pub mod demo;
pub mod diagnostics;
pub mod download;
pub mod event;
pub mod form;
pub mod highlight;
pub mod host;
pub mod lazy;
pub mod nav;
pub mod observer;
pub mod overlay;
pub mod portfolio;
pub mod reveal;
pub mod scroll;
pub mod typing;

#[cfg(test)]
pub(crate) mod test_utils;

// -----------------------------------------------------------------------
// Public re-exports
// -----------------------------------------------------------------------

pub use catalog::{ArticleRecord, ContentCatalog, PdfAsset};
pub use event::{EventOutcome, PageEvent};
pub use form::{ContactForm, FormError, validate_contact_form};
pub use host::{HeadlessHost, Host, Viewport};
pub use overlay::{OpenOutcome, OverlayController, OverlayState};
pub use portfolio::{PageSnapshot, Portfolio};
pub use scroll::{ScrollSnapshot, ViewportScrollTracker};
