//! Geometry-based viewport entry detection.
//!
//! Mirrors the subset of `IntersectionObserver` the page relies on: a
//! root equal to the viewport, an optional bottom root margin, and a
//! single visibility threshold. Observed targets are kept in
//! registration order.

use folio_dom::{Document, Geometry, NodeId};

use crate::host::Viewport;

/// Observation parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverOptions {
    /// Minimum visible fraction of the target, `0.0..=1.0`.
    pub threshold: f32,
    /// Pixels trimmed off the bottom of the viewport before testing.
    pub bottom_margin: i32,
}

impl Default for ObserverOptions {
    fn default() -> Self {
        Self {
            threshold: 0.0,
            bottom_margin: 0,
        }
    }
}

/// Whether a target with `geometry` counts as inside `viewport`.
pub fn is_intersecting(geometry: Geometry, viewport: Viewport, options: ObserverOptions) -> bool {
    let root_top = viewport.scroll_y;
    let root_bottom = viewport.scroll_y + (viewport.height - options.bottom_margin).max(0);
    let top = geometry.top;
    let bottom = geometry.top + geometry.height.max(0);

    if geometry.height <= 0 {
        return top >= root_top && top <= root_bottom;
    }

    let overlap = bottom.min(root_bottom) - top.max(root_top);
    if overlap <= 0 {
        return false;
    }
    overlap as f32 / geometry.height as f32 >= options.threshold
}

/// A set of targets waiting to enter the viewport.
#[derive(Debug, Clone, Default)]
pub struct ViewportObserver {
    options: ObserverOptions,
    targets: Vec<NodeId>,
}

impl ViewportObserver {
    pub fn new(options: ObserverOptions) -> Self {
        Self {
            options,
            targets: Vec::new(),
        }
    }

    pub fn options(&self) -> ObserverOptions {
        self.options
    }

    /// Start observing `target`. Already-observed targets are ignored.
    pub fn observe(&mut self, target: NodeId) {
        if !self.targets.contains(&target) {
            self.targets.push(target);
        }
    }

    /// Stop observing `target`. Returns whether it was observed.
    pub fn unobserve(&mut self, target: NodeId) -> bool {
        let before = self.targets.len();
        self.targets.retain(|&t| t != target);
        self.targets.len() != before
    }

    pub fn is_observing(&self, target: NodeId) -> bool {
        self.targets.contains(&target)
    }

    pub fn targets(&self) -> &[NodeId] {
        &self.targets
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Observed targets currently inside `viewport`.
    pub fn intersecting(&self, doc: &Document, viewport: Viewport) -> Vec<NodeId> {
        self.targets
            .iter()
            .copied()
            .filter(|&t| doc.is_connected(t) && is_intersecting(doc.geometry(t), viewport, self.options))
            .collect()
    }
}
