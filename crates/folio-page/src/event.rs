//! Events a host dispatches into the page.

use folio_dom::NodeId;
use folio_types::input::Key;

/// One browser event, already stripped to what the page reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// The window scrolled; read the new offset from the host.
    Scroll,
    /// Pointer activation on `target` (bubbles to ancestors).
    Click { target: NodeId },
    /// Key press, with the focused element as target if any.
    KeyDown { key: Key, target: Option<NodeId> },
    /// Elements the host observed entering the viewport.
    Intersection { targets: Vec<NodeId> },
    /// Timer progress since the previous tick.
    Tick { elapsed_ms: u32 },
    /// The window finished loading.
    Load { elapsed_ms: f64 },
}

/// What the page did with an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    /// The host must skip its default action (navigation, scrolling).
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn prevented() -> Self {
        Self {
            default_prevented: true,
        }
    }

    /// Merge the outcome of another listener for the same event.
    pub fn merge(&mut self, other: EventOutcome) {
        self.default_prevented |= other.default_prevented;
    }
}
