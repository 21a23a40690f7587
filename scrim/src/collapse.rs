//! Height-animated collapse panels.
//!
//! A panel animates between an explicit height of zero and its natural
//! content height, carrying the `collapsing` class while in flight. The
//! explicit height is cleared on completion so later content changes are
//! not clipped. Transitions are gated: show/hide calls while one is in
//! flight are dropped, not queued.

use std::time::Instant;

use overdom::{Document, NodeId};

use crate::contract::{ATTR_EXPANDED, CLASS_COLLAPSE, CLASS_COLLAPSING, CLASS_SHOW, resolve_target};
use crate::error::WireError;
use crate::transition::{COLLAPSE_TRANSITION, Transition};

/// Lifecycle state of a collapse panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapseState {
    Collapsed,
    Expanding,
    Expanded,
    Collapsing,
}

/// Collapse behavior switches.
#[derive(Debug, Clone, Default)]
pub struct CollapseOptions {
    /// Accordion group selector; at most one member of the group shows at a
    /// time when toggled through it.
    pub parent: Option<String>,
}

/// One collapse instance: a trigger controlling a target panel.
#[derive(Debug)]
pub struct Collapse {
    pub trigger: NodeId,
    pub target: NodeId,
    options: CollapseOptions,
    state: CollapseState,
    transition: Option<Transition>,
}

impl Collapse {
    /// Bind a collapse to its trigger, resolving the target panel from
    /// `data-target`/`href`. The panel's existing `show` class decides the
    /// initial state.
    pub fn attach(
        doc: &mut Document,
        trigger: &NodeId,
        options: CollapseOptions,
    ) -> Result<Self, WireError> {
        let target = resolve_target(doc, trigger)?;
        let state = if doc.has_class(&target, CLASS_SHOW) {
            CollapseState::Expanded
        } else {
            CollapseState::Collapsed
        };
        let collapse = Self {
            trigger: trigger.clone(),
            target,
            options,
            state,
            transition: None,
        };
        collapse.update_aria(doc);
        Ok(collapse)
    }

    pub fn state(&self) -> CollapseState {
        self.state
    }

    pub fn is_shown(&self) -> bool {
        self.state == CollapseState::Expanded
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, CollapseState::Expanding | CollapseState::Collapsing)
    }

    /// The accordion group selector, if this panel belongs to one.
    pub fn group(&self) -> Option<&str> {
        self.options.parent.as_deref()
    }

    /// Expand the panel. No-op unless currently collapsed.
    ///
    /// Accordion sibling exclusion is the coordinator's job; it hides other
    /// shown group members before calling this.
    pub fn show(&mut self, doc: &mut Document, now: Instant) {
        if self.state != CollapseState::Collapsed {
            return;
        }

        let content_height = doc.node(&self.target).map(|n| n.content_height).unwrap_or(0);
        if let Some(node) = doc.node_mut(&self.target) {
            node.height = Some(0);
        }
        doc.remove_class(&self.target, CLASS_COLLAPSE);
        doc.add_class(&self.target, CLASS_COLLAPSING);

        self.state = CollapseState::Expanding;
        doc.emit("collapse.show", &self.target);

        // Animate from zero to the measured natural height.
        if let Some(node) = doc.node_mut(&self.target) {
            node.height = Some(content_height);
        }
        self.transition = Some(Transition::start(now, COLLAPSE_TRANSITION));
    }

    /// Collapse the panel. No-op unless currently expanded.
    pub fn hide(&mut self, doc: &mut Document, now: Instant) {
        if self.state != CollapseState::Expanded {
            return;
        }

        // Pin the current height so the animation has a starting value.
        let content_height = doc.node(&self.target).map(|n| n.content_height).unwrap_or(0);
        if let Some(node) = doc.node_mut(&self.target) {
            node.height = Some(content_height);
        }
        doc.remove_class(&self.target, CLASS_COLLAPSE);
        doc.remove_class(&self.target, CLASS_SHOW);
        doc.add_class(&self.target, CLASS_COLLAPSING);

        self.state = CollapseState::Collapsing;
        doc.emit("collapse.hide", &self.target);

        if let Some(node) = doc.node_mut(&self.target) {
            node.height = Some(0);
        }
        self.transition = Some(Transition::start(now, COLLAPSE_TRANSITION));
    }

    /// Show if collapsed, hide if expanded; dropped while transitioning.
    pub fn toggle(&mut self, doc: &mut Document, now: Instant) {
        match self.state {
            CollapseState::Collapsed => self.show(doc, now),
            CollapseState::Expanded => self.hide(doc, now),
            CollapseState::Expanding | CollapseState::Collapsing => {}
        }
    }

    /// Host-reported end of the panel's height transition.
    pub fn transition_ended(&mut self) {
        if let Some(transition) = &mut self.transition {
            transition.signal_end();
        }
    }

    /// Advance the in-flight transition, finishing the expand or collapse.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        let completed = match &mut self.transition {
            Some(transition) => transition.poll(now),
            None => false,
        };
        if !completed {
            return;
        }
        self.transition = None;

        doc.remove_class(&self.target, CLASS_COLLAPSING);
        doc.add_class(&self.target, CLASS_COLLAPSE);
        // Revert to natural height so content changes are not clipped.
        if let Some(node) = doc.node_mut(&self.target) {
            node.height = None;
        }

        match self.state {
            CollapseState::Expanding => {
                doc.add_class(&self.target, CLASS_SHOW);
                self.state = CollapseState::Expanded;
                self.update_aria(doc);
                doc.emit("collapse.shown", &self.target);
            }
            CollapseState::Collapsing => {
                self.state = CollapseState::Collapsed;
                self.update_aria(doc);
                doc.emit("collapse.hidden", &self.target);
            }
            CollapseState::Collapsed | CollapseState::Expanded => {}
        }
    }

    fn update_aria(&self, doc: &mut Document) {
        let expanded = if self.is_shown() { "true" } else { "false" };
        doc.set_attr(&self.trigger, ATTR_EXPANDED, expanded);
        doc.set_attr(&self.target, ATTR_EXPANDED, expanded);
    }
}
