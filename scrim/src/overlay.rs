//! The shared overlay state machine behind Modal and Drawer.
//!
//! States cycle `hidden → showing → shown → hiding → hidden`. `show()` is a
//! no-op unless hidden and `hide()` a no-op unless shown, so a rapid double
//! invocation is dropped rather than interleaved and a `hide()` issued
//! mid-show is ignored. Registry membership, backdrop ownership, the focus
//! trap and the body marker class are all side effects of these two
//! transitions and nothing else.

use std::time::{Duration, Instant};

use overdom::{Document, NodeId};

use crate::backdrop::Backdrop;
use crate::contract::{
    CLASS_DRAWER_BACKDROP, CLASS_DRAWER_OPEN, CLASS_MODAL_BACKDROP, CLASS_MODAL_OPEN, CLASS_SHOW,
};
use crate::focus_trap::FocusTrap;
use crate::registry::OverlayRegistry;
use crate::transition::{DRAWER_TRANSITION, MODAL_TRANSITION, Transition};

/// Overlay family. Drawers animate width/offset instead of a centered fade
/// but share the state names and registry discipline exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayKind {
    Modal,
    Drawer,
}

impl OverlayKind {
    /// Event-name prefix for this family.
    pub fn family(self) -> &'static str {
        match self {
            OverlayKind::Modal => "modal",
            OverlayKind::Drawer => "drawer",
        }
    }

    /// Transition duration, also the backdrop detach grace.
    pub fn transition(self) -> Duration {
        match self {
            OverlayKind::Modal => MODAL_TRANSITION,
            OverlayKind::Drawer => DRAWER_TRANSITION,
        }
    }

    pub fn backdrop_class(self) -> &'static str {
        match self {
            OverlayKind::Modal => CLASS_MODAL_BACKDROP,
            OverlayKind::Drawer => CLASS_DRAWER_BACKDROP,
        }
    }

    /// Body-level "an overlay of this family is open" marker. Families use
    /// independent markers so one family's close cannot clear state the
    /// other still needs.
    pub fn body_marker(self) -> &'static str {
        match self {
            OverlayKind::Modal => CLASS_MODAL_OPEN,
            OverlayKind::Drawer => CLASS_DRAWER_OPEN,
        }
    }
}

/// Lifecycle state of one overlay instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    Showing,
    Shown,
    Hiding,
}

/// Per-instance behavior switches.
#[derive(Debug, Clone, Copy)]
pub struct OverlayOptions {
    /// Create a dimming backdrop behind the overlay.
    pub backdrop: bool,
    /// Let Escape close the instance when it is top of stack.
    pub keyboard: bool,
    /// Trap Tab focus inside the container while open.
    pub focus: bool,
    /// Open immediately on construction.
    pub auto_show: bool,
}

impl Default for OverlayOptions {
    fn default() -> Self {
        Self {
            backdrop: true,
            keyboard: true,
            focus: true,
            auto_show: false,
        }
    }
}

/// One modal or drawer instance bound to a container node.
#[derive(Debug)]
pub struct Overlay {
    pub node: NodeId,
    kind: OverlayKind,
    options: OverlayOptions,
    state: OverlayState,
    backdrop: Backdrop,
    focus_trap: FocusTrap,
    transition: Option<Transition>,
}

impl Overlay {
    pub fn new(node: NodeId, kind: OverlayKind, options: OverlayOptions) -> Self {
        Self {
            node,
            kind,
            options,
            state: OverlayState::Hidden,
            backdrop: Backdrop::new(kind.backdrop_class(), kind.transition()),
            focus_trap: FocusTrap::new(),
            transition: None,
        }
    }

    pub fn kind(&self) -> OverlayKind {
        self.kind
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn options(&self) -> &OverlayOptions {
        &self.options
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, OverlayState::Showing | OverlayState::Shown)
    }

    /// The focus trap, for Tab routing while this instance is active.
    pub fn focus_trap(&self) -> &FocusTrap {
        &self.focus_trap
    }

    /// Check if `id` is this instance's backdrop scrim.
    pub fn owns_backdrop(&self, id: &NodeId) -> bool {
        self.backdrop.owns(id)
    }

    /// Open the overlay. No-op unless currently hidden.
    ///
    /// The backdrop depth is the registry length at call time, captured
    /// before this instance is pushed. The `show` event fires synchronously;
    /// `shown` follows when the open transition completes.
    pub fn show(&mut self, doc: &mut Document, registry: &mut OverlayRegistry, now: Instant) {
        if self.state != OverlayState::Hidden {
            log::debug!("{} {} show ignored in {:?}", self.kind.family(), self.node, self.state);
            return;
        }

        if self.options.backdrop {
            let depth = registry.len();
            self.backdrop.create(doc, depth, &self.node, now);
        }

        if let Some(node) = doc.node_mut(&self.node) {
            node.displayed = true;
        }
        doc.add_class(&self.node, CLASS_SHOW);

        if self.options.focus {
            self.focus_trap.activate(doc, &self.node);
        }

        self.state = OverlayState::Showing;
        registry.push(&self.node);
        doc.emit(format!("{}.show", self.kind.family()), &self.node);

        let body = doc.body().clone();
        doc.add_class(&body, self.kind.body_marker());

        self.transition = Some(Transition::start(now, self.kind.transition()));
    }

    /// Close the overlay. No-op unless currently shown, which also covers
    /// re-entrant calls while already hiding.
    ///
    /// The `hide` event fires synchronously; `hidden` follows when the close
    /// transition completes and the container leaves the render tree.
    pub fn hide(&mut self, doc: &mut Document, registry: &mut OverlayRegistry, now: Instant) {
        if self.state != OverlayState::Shown {
            log::debug!("{} {} hide ignored in {:?}", self.kind.family(), self.node, self.state);
            return;
        }

        doc.remove_class(&self.node, CLASS_SHOW);
        self.state = OverlayState::Hiding;
        registry.remove(&self.node);
        self.focus_trap.deactivate();
        doc.emit(format!("{}.hide", self.kind.family()), &self.node);

        if registry.is_empty() {
            let body = doc.body().clone();
            doc.remove_class(&body, self.kind.body_marker());
        }

        self.backdrop.remove(doc, now);
        self.transition = Some(Transition::start(now, self.kind.transition()));
    }

    /// Show if hidden, hide if shown.
    pub fn toggle(&mut self, doc: &mut Document, registry: &mut OverlayRegistry, now: Instant) {
        match self.state {
            OverlayState::Hidden => self.show(doc, registry, now),
            OverlayState::Shown => self.hide(doc, registry, now),
            OverlayState::Showing | OverlayState::Hiding => {}
        }
    }

    /// Host-reported end of the container's CSS transition.
    pub fn transition_ended(&mut self) {
        if let Some(transition) = &mut self.transition {
            transition.signal_end();
        }
    }

    /// Advance deferred work: backdrop fades and transition completion.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        self.backdrop.tick(doc, now);

        let completed = match &mut self.transition {
            Some(transition) => transition.poll(now),
            None => false,
        };
        if !completed {
            return;
        }
        self.transition = None;

        match self.state {
            OverlayState::Showing => {
                self.state = OverlayState::Shown;
                doc.emit(format!("{}.shown", self.kind.family()), &self.node);
            }
            OverlayState::Hiding => {
                self.state = OverlayState::Hidden;
                if let Some(node) = doc.node_mut(&self.node) {
                    node.displayed = false;
                }
                doc.emit(format!("{}.hidden", self.kind.family()), &self.node);
            }
            OverlayState::Hidden | OverlayState::Shown => {}
        }
    }
}
