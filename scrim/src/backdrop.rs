//! Backdrop scrim elements.
//!
//! Each overlay instance owns at most one backdrop. Creation assigns a
//! z-index pair proportional to the instance's depth in its stacking
//! registry at that moment; indices are not reassigned when intermediate
//! overlays close later. The fade-in happens as a second class toggle on
//! the next paint tick so the browser does not coalesce insertion and
//! visibility into one style flush.

use std::time::{Duration, Instant};

use overdom::{Document, NodeId};

use crate::contract::{CLASS_FADE, CLASS_SHOW};
use crate::transition::{Delay, PAINT_TICK};

/// Base z-index for overlay containers.
pub const BASE_OVERLAY_Z: i32 = 1050;
/// Base z-index for backdrops, one band below the overlays they dim.
pub const BASE_BACKDROP_Z: i32 = 1040;
/// Distance between consecutive stack depths.
pub const STACK_STEP: i32 = 20;

/// Z-index pair for an overlay opened at the given stack depth.
pub fn z_pair(depth: usize) -> (i32, i32) {
    let offset = depth as i32 * STACK_STEP;
    (BASE_BACKDROP_Z + offset, BASE_OVERLAY_Z + offset)
}

/// The dimming element behind one overlay instance.
#[derive(Debug)]
pub struct Backdrop {
    class: &'static str,
    grace: Duration,
    node: Option<NodeId>,
    pending_show: Option<Delay>,
    pending_detach: Vec<(NodeId, Delay)>,
}

impl Backdrop {
    /// A backdrop slot for one overlay, styled by `class` and detached
    /// `grace` after fade-out starts.
    pub fn new(class: &'static str, grace: Duration) -> Self {
        Self {
            class,
            grace,
            node: None,
            pending_show: None,
            pending_detach: Vec::new(),
        }
    }

    /// Create the scrim element at the given stack depth and raise the
    /// overlay container into the matching z-index band.
    ///
    /// No-op if this backdrop already has a live scrim.
    pub fn create(&mut self, doc: &mut Document, depth: usize, overlay: &NodeId, now: Instant) {
        if self.node.is_some() {
            return;
        }
        let (backdrop_z, overlay_z) = z_pair(depth);
        if let Some(node) = doc.node_mut(overlay) {
            node.z_index = Some(overlay_z);
        }

        let scrim = doc.create_element("div");
        doc.add_class(&scrim, self.class);
        doc.add_class(&scrim, CLASS_FADE);
        doc.set_attr(&scrim, "data-overlay-id", overlay.as_str());
        if let Some(node) = doc.node_mut(&scrim) {
            node.z_index = Some(backdrop_z);
        }
        let body = doc.body().clone();
        doc.append_child(&body, &scrim);

        self.node = Some(scrim);
        self.pending_show = Some(Delay::after(now, PAINT_TICK));
    }

    /// Start the fade-out; the scrim detaches after the grace period.
    ///
    /// Idempotent and safe without a live scrim.
    pub fn remove(&mut self, doc: &mut Document, now: Instant) {
        let Some(scrim) = self.node.take() else {
            return;
        };
        self.pending_show = None;
        doc.remove_class(&scrim, CLASS_SHOW);
        self.pending_detach.push((scrim, Delay::after(now, self.grace)));
    }

    /// The live scrim node, if one exists.
    pub fn node(&self) -> Option<&NodeId> {
        self.node.as_ref()
    }

    /// Check if `id` is this backdrop's scrim (live or fading out).
    pub fn owns(&self, id: &NodeId) -> bool {
        self.node.as_ref() == Some(id) || self.pending_detach.iter().any(|(n, _)| n == id)
    }

    /// Advance deferred work: the paint-tick fade-in and grace-period
    /// detachment.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        if let Some(delay) = &mut self.pending_show
            && delay.poll(now)
        {
            self.pending_show = None;
            if let Some(scrim) = &self.node {
                doc.add_class(scrim, CLASS_SHOW);
            }
        }
        let mut kept = Vec::new();
        for (scrim, mut delay) in self.pending_detach.drain(..) {
            if delay.poll(now) {
                doc.detach(&scrim);
            } else {
                kept.push((scrim, delay));
            }
        }
        self.pending_detach = kept;
    }
}
