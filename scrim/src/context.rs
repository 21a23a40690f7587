//! The coordinator context: instance ownership, input routing and
//! declarative wiring.
//!
//! [`Ui`] is the explicit element-to-instance map: it owns the document,
//! one stacking registry per overlay family, every component instance, and
//! the toast containers. Instance accessors are get-or-create and
//! idempotent per container node. Ambient input (Escape, backdrop clicks)
//! is routed through the registries' top-of-stack queries here; instances
//! never install their own global listeners.

use std::time::Instant;

use overdom::{Document, Key, LifecycleEvent, Modifiers, NodeId};

use crate::collapse::{Collapse, CollapseOptions, CollapseState};
use crate::contract::{
    ATTR_ACCORDION, ATTR_DISMISS, ATTR_PARENT, ATTR_TOGGLE, CLASS_DRAWER, CLASS_DRAWER_BACKDROP,
    CLASS_DROPDOWN, CLASS_MODAL, CLASS_MODAL_BACKDROP, CLASS_SHOW, Family, resolve_target,
};
use crate::dropdown::{Dropdown, DropdownOptions, KeyOutcome};
use crate::overlay::{Overlay, OverlayKind, OverlayOptions, OverlayState};
use crate::registry::OverlayRegistry;
use crate::toast::{Toast, ToastManager};

/// The overlay coordinator for one page session.
pub struct Ui {
    doc: Document,
    modals: Vec<Overlay>,
    drawers: Vec<Overlay>,
    modal_stack: OverlayRegistry,
    drawer_stack: OverlayRegistry,
    dropdowns: Vec<Dropdown>,
    collapses: Vec<Collapse>,
    toasts: ToastManager,
}

impl Ui {
    /// Take ownership of a document and start from a clean slate: stray
    /// `show` classes, body markers and leftover backdrops from previous
    /// sessions are swept away.
    pub fn new(doc: Document) -> Self {
        let mut ui = Self {
            doc,
            modals: Vec::new(),
            drawers: Vec::new(),
            modal_stack: OverlayRegistry::new(),
            drawer_stack: OverlayRegistry::new(),
            dropdowns: Vec::new(),
            collapses: Vec::new(),
            toasts: ToastManager::new(),
        };
        ui.normalize();
        ui
    }

    fn normalize(&mut self) {
        let body = self.doc.body().clone();
        let mut stray_backdrops = Vec::new();
        for id in self.doc.descendants(&body) {
            let Some(node) = self.doc.node(&id) else { continue };
            if node.has_class(CLASS_MODAL_BACKDROP) || node.has_class(CLASS_DRAWER_BACKDROP) {
                stray_backdrops.push(id);
            } else if node.has_class(CLASS_MODAL) || node.has_class(CLASS_DRAWER) {
                self.doc.remove_class(&id, CLASS_SHOW);
                if let Some(node) = self.doc.node_mut(&id) {
                    node.displayed = false;
                }
            }
        }
        for id in stray_backdrops {
            self.doc.detach(&id);
        }
        self.doc
            .remove_class(&body, OverlayKind::Modal.body_marker());
        self.doc
            .remove_class(&body, OverlayKind::Drawer.body_marker());
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    /// Take all lifecycle events emitted since the last drain.
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        self.doc.drain_events()
    }

    // =========================================================================
    // Modal / Drawer
    // =========================================================================

    fn overlays(&mut self, kind: OverlayKind) -> (&mut Vec<Overlay>, &mut OverlayRegistry) {
        match kind {
            OverlayKind::Modal => (&mut self.modals, &mut self.modal_stack),
            OverlayKind::Drawer => (&mut self.drawers, &mut self.drawer_stack),
        }
    }

    /// Get or create the overlay instance bound to `container`. Options
    /// apply only on first creation; re-requesting returns the existing
    /// instance untouched.
    pub fn ensure_overlay(
        &mut self,
        kind: OverlayKind,
        container: &NodeId,
        options: OverlayOptions,
        now: Instant,
    ) {
        if !self.doc.contains_node(container) {
            log::warn!("{} container {container} does not exist", kind.family());
            return;
        }
        let auto_show = options.auto_show;
        let (overlays, _) = self.overlays(kind);
        if overlays.iter().any(|o| &o.node == container) {
            return;
        }
        overlays.push(Overlay::new(container.clone(), kind, options));
        if auto_show {
            self.show_overlay(kind, container, now);
        }
    }

    pub fn show_overlay(&mut self, kind: OverlayKind, container: &NodeId, now: Instant) {
        self.ensure_overlay(kind, container, OverlayOptions::default(), now);
        let doc = &mut self.doc;
        let (overlays, stack) = match kind {
            OverlayKind::Modal => (&mut self.modals, &mut self.modal_stack),
            OverlayKind::Drawer => (&mut self.drawers, &mut self.drawer_stack),
        };
        if let Some(overlay) = overlays.iter_mut().find(|o| &o.node == container) {
            overlay.show(doc, stack, now);
        }
    }

    pub fn hide_overlay(&mut self, kind: OverlayKind, container: &NodeId, now: Instant) {
        let doc = &mut self.doc;
        let (overlays, stack) = match kind {
            OverlayKind::Modal => (&mut self.modals, &mut self.modal_stack),
            OverlayKind::Drawer => (&mut self.drawers, &mut self.drawer_stack),
        };
        if let Some(overlay) = overlays.iter_mut().find(|o| &o.node == container) {
            overlay.hide(doc, stack, now);
        }
    }

    pub fn toggle_overlay(&mut self, kind: OverlayKind, container: &NodeId, now: Instant) {
        self.ensure_overlay(kind, container, OverlayOptions::default(), now);
        let doc = &mut self.doc;
        let (overlays, stack) = match kind {
            OverlayKind::Modal => (&mut self.modals, &mut self.modal_stack),
            OverlayKind::Drawer => (&mut self.drawers, &mut self.drawer_stack),
        };
        if let Some(overlay) = overlays.iter_mut().find(|o| &o.node == container) {
            overlay.toggle(doc, stack, now);
        }
    }

    pub fn overlay_state(&self, kind: OverlayKind, container: &NodeId) -> Option<OverlayState> {
        let overlays = match kind {
            OverlayKind::Modal => &self.modals,
            OverlayKind::Drawer => &self.drawers,
        };
        overlays
            .iter()
            .find(|o| &o.node == container)
            .map(|o| o.state())
    }

    /// Top of the family's stacking registry.
    pub fn top_of(&self, kind: OverlayKind) -> Option<&NodeId> {
        match kind {
            OverlayKind::Modal => self.modal_stack.top(),
            OverlayKind::Drawer => self.drawer_stack.top(),
        }
    }

    pub fn registry(&self, kind: OverlayKind) -> &OverlayRegistry {
        match kind {
            OverlayKind::Modal => &self.modal_stack,
            OverlayKind::Drawer => &self.drawer_stack,
        }
    }

    // =========================================================================
    // Dropdown
    // =========================================================================

    /// Get or create a dropdown bound to `container`. A container missing
    /// its toggle or menu logs a warning and creates nothing.
    pub fn ensure_dropdown(&mut self, container: &NodeId, options: DropdownOptions) {
        if self.dropdowns.iter().any(|d| &d.node == container) {
            return;
        }
        match Dropdown::attach(&self.doc, container, options) {
            Ok(dropdown) => self.dropdowns.push(dropdown),
            Err(err) => log::warn!("dropdown: {err}"),
        }
    }

    pub fn show_dropdown(&mut self, container: &NodeId, now: Instant) {
        self.ensure_dropdown(container, DropdownOptions::default());
        if let Some(dropdown) = self.dropdowns.iter_mut().find(|d| &d.node == container) {
            dropdown.show(&mut self.doc, now);
        }
    }

    pub fn hide_dropdown(&mut self, container: &NodeId, now: Instant) {
        if let Some(dropdown) = self.dropdowns.iter_mut().find(|d| &d.node == container) {
            dropdown.hide(&mut self.doc, now);
        }
    }

    pub fn toggle_dropdown(&mut self, container: &NodeId, now: Instant) {
        self.ensure_dropdown(container, DropdownOptions::default());
        if let Some(dropdown) = self.dropdowns.iter_mut().find(|d| &d.node == container) {
            dropdown.toggle(&mut self.doc, now);
        }
    }

    pub fn dropdown_open(&self, container: &NodeId) -> bool {
        self.dropdowns
            .iter()
            .find(|d| &d.node == container)
            .map(|d| d.is_open())
            .unwrap_or(false)
    }

    /// Close open dropdowns whose container does not contain `clicked`.
    ///
    /// Dropdowns with `auto_close` disabled only ever close explicitly.
    fn sweep_dropdowns(&mut self, clicked: &NodeId, now: Instant) {
        let doc = &mut self.doc;
        for dropdown in &mut self.dropdowns {
            if !dropdown.is_open() || !dropdown.auto_close() {
                continue;
            }
            if doc.is_within(&dropdown.node, clicked) {
                continue;
            }
            dropdown.hide(doc, now);
        }
    }

    // =========================================================================
    // Collapse
    // =========================================================================

    /// Get or create a collapse bound to `trigger`. A dangling target
    /// selector logs a warning and creates nothing.
    pub fn ensure_collapse(&mut self, trigger: &NodeId, options: CollapseOptions) {
        if self.collapses.iter().any(|c| &c.trigger == trigger) {
            return;
        }
        match Collapse::attach(&mut self.doc, trigger, options) {
            Ok(collapse) => self.collapses.push(collapse),
            Err(err) => log::warn!("collapse: {err}"),
        }
    }

    /// Expand the panel, first hiding every other shown member of its
    /// accordion group.
    pub fn show_collapse(&mut self, trigger: &NodeId, now: Instant) {
        let Some(collapse) = self.collapses.iter().find(|c| &c.trigger == trigger) else {
            return;
        };
        let target = collapse.target.clone();
        let group = collapse.group().map(str::to_string);

        if let Some(selector) = group
            && let Some(parent) = self.doc.get_element(&selector)
        {
            let doc = &mut self.doc;
            for sibling in &mut self.collapses {
                if sibling.target != target
                    && sibling.is_shown()
                    && doc.is_within(&parent, &sibling.target)
                {
                    sibling.hide(doc, now);
                }
            }
        }

        if let Some(collapse) = self.collapses.iter_mut().find(|c| &c.trigger == trigger) {
            collapse.show(&mut self.doc, now);
        }
    }

    pub fn hide_collapse(&mut self, trigger: &NodeId, now: Instant) {
        if let Some(collapse) = self.collapses.iter_mut().find(|c| &c.trigger == trigger) {
            collapse.hide(&mut self.doc, now);
        }
    }

    pub fn toggle_collapse(&mut self, trigger: &NodeId, now: Instant) {
        let Some(collapse) = self.collapses.iter().find(|c| &c.trigger == trigger) else {
            return;
        };
        match collapse.state() {
            CollapseState::Collapsed => self.show_collapse(trigger, now),
            CollapseState::Expanded => self.hide_collapse(trigger, now),
            CollapseState::Expanding | CollapseState::Collapsing => {}
        }
    }

    pub fn collapse_state(&self, trigger: &NodeId) -> Option<CollapseState> {
        self.collapses
            .iter()
            .find(|c| &c.trigger == trigger)
            .map(|c| c.state())
    }

    // =========================================================================
    // Toast
    // =========================================================================

    /// Show a toast; returns its element id.
    pub fn toast(&mut self, toast: Toast, now: Instant) -> NodeId {
        self.toasts.show(&mut self.doc, toast, now)
    }

    pub fn hide_toast(&mut self, toast: &NodeId, now: Instant) {
        self.toasts.hide(&mut self.doc, toast, now);
    }

    pub fn toasts(&self) -> &ToastManager {
        &self.toasts
    }

    /// Pointer entered `node`: pause the owning toast's countdown, if any.
    pub fn pointer_enter(&mut self, node: &NodeId) {
        if let Some(toast) = self.toasts.owning_toast(&self.doc, node) {
            self.toasts.pause(&toast);
        }
    }

    /// Pointer left `node`: restart the owning toast's full countdown.
    pub fn pointer_leave(&mut self, node: &NodeId, now: Instant) {
        if let Some(toast) = self.toasts.owning_toast(&self.doc, node) {
            self.toasts.resume(&toast, now);
        }
    }

    // =========================================================================
    // Input routing
    // =========================================================================

    /// Route a key press.
    ///
    /// Escape fans out to each family's top of stack (never to buried
    /// instances), open dropdowns and shown collapse panels. Tab goes to
    /// the focus trap of the overlay containing the focused node, after
    /// the dropdown navigation got its chance.
    pub fn key(&mut self, key: Key, modifiers: Modifiers, now: Instant) {
        if key == Key::Escape {
            self.escape(now);
            return;
        }

        // Keyboard navigation inside an open menu.
        if let Some(index) = self.dropdown_with_focus() {
            let outcome = self.dropdowns[index].handle_key(&mut self.doc, key, now);
            match outcome {
                KeyOutcome::Consumed => return,
                KeyOutcome::Activate(item) => {
                    self.click_on(&item, now);
                    return;
                }
                KeyOutcome::Ignored => {}
            }
        }

        if key == Key::Tab || key == Key::BackTab {
            let shift = modifiers.shift || key == Key::BackTab;
            if let Some(kind_and_node) = self.overlay_containing_focus() {
                let (kind, container) = kind_and_node;
                let doc = &mut self.doc;
                let overlays = match kind {
                    OverlayKind::Modal => &mut self.modals,
                    OverlayKind::Drawer => &mut self.drawers,
                };
                if let Some(overlay) = overlays.iter_mut().find(|o| o.node == container) {
                    overlay.focus_trap().handle_tab(doc, shift);
                }
            }
        }
    }

    /// Escape routing: only ever the top of each overlay stack, plus open
    /// dropdowns (refocusing their toggles) and shown collapse panels.
    pub fn escape(&mut self, now: Instant) {
        for index in 0..self.dropdowns.len() {
            if self.dropdowns[index].is_open() {
                self.dropdowns[index].hide(&mut self.doc, now);
                let toggle = self.dropdowns[index].toggle_node().clone();
                self.doc.set_focus(&toggle);
            }
        }

        for kind in [OverlayKind::Modal, OverlayKind::Drawer] {
            let top = self.top_of(kind).cloned();
            if let Some(top) = top {
                let doc = &mut self.doc;
                let (overlays, stack) = match kind {
                    OverlayKind::Modal => (&mut self.modals, &mut self.modal_stack),
                    OverlayKind::Drawer => (&mut self.drawers, &mut self.drawer_stack),
                };
                if let Some(overlay) = overlays.iter_mut().find(|o| o.node == top)
                    && overlay.options().keyboard
                {
                    overlay.hide(doc, stack, now);
                }
            }
        }

        let doc = &mut self.doc;
        for collapse in &mut self.collapses {
            if collapse.is_shown() {
                collapse.hide(doc, now);
            }
        }
    }

    /// Route a click by page coordinates, hit-testing the document first.
    ///
    /// A click that lands on nothing still counts as outside interaction
    /// and closes open auto-close dropdowns.
    pub fn click(&mut self, x: i32, y: i32, now: Instant) {
        match self.doc.hit_test(x, y) {
            Some(target) => self.click_on(&target, now),
            None => {
                let doc = &mut self.doc;
                for dropdown in &mut self.dropdowns {
                    if dropdown.is_open() && dropdown.auto_close() {
                        dropdown.hide(doc, now);
                    }
                }
            }
        }
    }

    /// Route a click landing on `target` (the host's hit-test result).
    ///
    /// Order: dismiss buttons, declarative toggles, backdrop-region clicks
    /// (top of stack only), then the dropdown outside-click sweep.
    pub fn click_on(&mut self, target: &NodeId, now: Instant) {
        if self.handle_dismiss(target, now) {
            self.sweep_dropdowns(target, now);
            return;
        }
        self.handle_toggle_trigger(target, now);
        self.handle_backdrop_click(target, now);
        self.sweep_dropdowns(target, now);
    }

    fn handle_dismiss(&mut self, target: &NodeId, now: Instant) -> bool {
        let Some(dismisser) = self.doc.closest_with_attr(target, ATTR_DISMISS) else {
            return false;
        };
        let value = self
            .doc
            .attr(&dismisser, ATTR_DISMISS)
            .unwrap_or_default()
            .to_string();
        match value.as_str() {
            "modal" => {
                if let Some(container) = self.owning_overlay(OverlayKind::Modal, &dismisser) {
                    self.hide_overlay(OverlayKind::Modal, &container, now);
                }
            }
            "drawer" => {
                if let Some(container) = self.owning_overlay(OverlayKind::Drawer, &dismisser) {
                    self.hide_overlay(OverlayKind::Drawer, &container, now);
                }
            }
            "toast" => {
                if let Some(toast) = self.toasts.owning_toast(&self.doc, &dismisser) {
                    self.toasts.hide(&mut self.doc, &toast, now);
                }
            }
            other => log::warn!("unknown dismiss family '{other}'"),
        }
        true
    }

    fn handle_toggle_trigger(&mut self, target: &NodeId, now: Instant) {
        let Some(trigger) = self.doc.closest_with_attr(target, ATTR_TOGGLE) else {
            return;
        };
        let value = self
            .doc
            .attr(&trigger, ATTR_TOGGLE)
            .unwrap_or_default()
            .to_string();
        let family = match value.parse::<Family>() {
            Ok(family) => family,
            Err(err) => {
                log::warn!("trigger {trigger}: {err}");
                return;
            }
        };
        match family {
            Family::Modal | Family::Drawer => {
                let kind = if family == Family::Modal {
                    OverlayKind::Modal
                } else {
                    OverlayKind::Drawer
                };
                match resolve_target(&self.doc, &trigger) {
                    Ok(container) => self.show_overlay(kind, &container, now),
                    Err(err) => log::warn!("{} trigger {trigger}: {err}", kind.family()),
                }
            }
            Family::Dropdown => {
                let container = self
                    .doc
                    .closest_with_class(&trigger, CLASS_DROPDOWN)
                    .unwrap_or_else(|| trigger.clone());
                self.toggle_dropdown(&container, now);
            }
            Family::Collapse => {
                let parent = self
                    .doc
                    .attr(&trigger, ATTR_PARENT)
                    .map(str::to_string)
                    .or_else(|| self.accordion_scope(&trigger));
                self.ensure_collapse(&trigger, CollapseOptions { parent });
                self.toggle_collapse(&trigger, now);
            }
        }
    }

    /// Accordion group selector from an enclosing `data-accordion` scope.
    fn accordion_scope(&self, trigger: &NodeId) -> Option<String> {
        let scope = self.doc.closest_with_attr(trigger, ATTR_ACCORDION)?;
        Some(format!("#{scope}"))
    }

    fn handle_backdrop_click(&mut self, target: &NodeId, now: Instant) {
        for kind in [OverlayKind::Modal, OverlayKind::Drawer] {
            // Click on the dimmed container region itself.
            let is_container = match kind {
                OverlayKind::Modal => self.modals.iter().any(|o| &o.node == target),
                OverlayKind::Drawer => self.drawers.iter().any(|o| &o.node == target),
            };
            // Click on the owned backdrop scrim element.
            let backdrop_owner = match kind {
                OverlayKind::Modal => self.modals.iter().find(|o| o.owns_backdrop(target)),
                OverlayKind::Drawer => self.drawers.iter().find(|o| o.owns_backdrop(target)),
            }
            .map(|o| o.node.clone());

            let container = if is_container {
                Some(target.clone())
            } else {
                backdrop_owner
            };
            let Some(container) = container else { continue };

            let backdrop_enabled = self
                .overlay_options(kind, &container)
                .map(|o| o.backdrop)
                .unwrap_or(false);
            // Stale input targeting a buried overlay is ignored by design.
            if backdrop_enabled && self.registry(kind).is_top(&container) {
                self.hide_overlay(kind, &container, now);
            }
        }
    }

    fn overlay_options(&self, kind: OverlayKind, container: &NodeId) -> Option<&OverlayOptions> {
        let overlays = match kind {
            OverlayKind::Modal => &self.modals,
            OverlayKind::Drawer => &self.drawers,
        };
        overlays
            .iter()
            .find(|o| &o.node == container)
            .map(|o| o.options())
    }

    /// First registered overlay container that is an ancestor of `node`.
    fn owning_overlay(&self, kind: OverlayKind, node: &NodeId) -> Option<NodeId> {
        let overlays = match kind {
            OverlayKind::Modal => &self.modals,
            OverlayKind::Drawer => &self.drawers,
        };
        overlays
            .iter()
            .find(|o| self.doc.is_within(&o.node, node))
            .map(|o| o.node.clone())
    }

    fn dropdown_with_focus(&self) -> Option<usize> {
        let focused = self.doc.focused()?;
        self.dropdowns.iter().position(|d| {
            d.is_open()
                && (self.doc.is_within(d.menu_node(), focused)
                    || self.doc.is_within(&d.node, focused))
        })
    }

    /// The open overlay whose container holds the focused node, preferring
    /// the modal stack over the drawer stack.
    fn overlay_containing_focus(&self) -> Option<(OverlayKind, NodeId)> {
        let focused = self.doc.focused()?;
        for kind in [OverlayKind::Modal, OverlayKind::Drawer] {
            if let Some(top) = self.top_of(kind)
                && self.doc.is_within(top, focused)
            {
                return Some((kind, top.clone()));
            }
        }
        None
    }

    // =========================================================================
    // Time and transition signals
    // =========================================================================

    /// Host-reported CSS transition end on `node`.
    pub fn transition_ended(&mut self, node: &NodeId) {
        for overlay in self.modals.iter_mut().chain(self.drawers.iter_mut()) {
            if &overlay.node == node {
                overlay.transition_ended();
            }
        }
        for collapse in &mut self.collapses {
            if &collapse.target == node {
                collapse.transition_ended();
            }
        }
    }

    /// Advance every pending transition, countdown and deferred toggle.
    pub fn tick(&mut self, now: Instant) {
        let doc = &mut self.doc;
        for overlay in self.modals.iter_mut().chain(self.drawers.iter_mut()) {
            overlay.tick(doc, now);
        }
        for dropdown in &mut self.dropdowns {
            dropdown.tick(doc, now);
        }
        for collapse in &mut self.collapses {
            collapse.tick(doc, now);
        }
        self.toasts.tick(doc, now);
    }
}
