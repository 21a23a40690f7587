//! Tab focus containment for active overlays.
//!
//! The trap snapshots the container's focusable descendants at activation
//! (document order), focuses the first, and wraps Tab/Shift+Tab between the
//! ends. Focus is not restored to the invoking trigger on deactivation; that
//! is a documented limitation, not an oversight.

use overdom::{Document, NodeId};

/// Focus containment for one overlay container.
#[derive(Debug, Default)]
pub struct FocusTrap {
    active: bool,
    focusables: Vec<NodeId>,
}

impl FocusTrap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot the container's focusable descendants and focus the first.
    pub fn activate(&mut self, doc: &mut Document, container: &NodeId) {
        self.focusables = doc.focusables(container);
        self.active = true;
        if let Some(first) = self.focusables.first() {
            doc.set_focus(first);
        }
    }

    /// Stop trapping. The current focus is left where it is.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.focusables.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Handle a Tab (or Shift+Tab) press while the trap is active.
    ///
    /// Returns `true` when the press was consumed by wrapping; any other Tab
    /// press passes through untouched.
    pub fn handle_tab(&self, doc: &mut Document, shift: bool) -> bool {
        if !self.active || self.focusables.is_empty() {
            return false;
        }
        let first = &self.focusables[0];
        let last = &self.focusables[self.focusables.len() - 1];
        let focused = doc.focused().cloned();

        if shift {
            if focused.as_ref() == Some(first) {
                doc.set_focus(last);
                return true;
            }
        } else if focused.as_ref() == Some(last) {
            doc.set_focus(first);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document_with_buttons(n: usize) -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let body = doc.body().clone();
        let container = doc.create_element_with_id("div", "dialog");
        doc.append_child(&body, &container);
        let mut buttons = Vec::new();
        for i in 0..n {
            let button = doc.create_element_with_id("button", format!("btn-{i}"));
            doc.node_mut(&button).unwrap().focusable = true;
            doc.append_child(&container, &button);
            buttons.push(button);
        }
        (doc, container, buttons)
    }

    #[test]
    fn activate_focuses_first() {
        let (mut doc, container, buttons) = document_with_buttons(3);
        let mut trap = FocusTrap::new();
        trap.activate(&mut doc, &container);
        assert_eq!(doc.focused(), Some(&buttons[0]));
    }

    #[test]
    fn tab_wraps_last_to_first() {
        let (mut doc, container, buttons) = document_with_buttons(3);
        let mut trap = FocusTrap::new();
        trap.activate(&mut doc, &container);

        doc.set_focus(&buttons[2]);
        assert!(trap.handle_tab(&mut doc, false));
        assert_eq!(doc.focused(), Some(&buttons[0]));
    }

    #[test]
    fn shift_tab_wraps_first_to_last() {
        let (mut doc, container, buttons) = document_with_buttons(3);
        let mut trap = FocusTrap::new();
        trap.activate(&mut doc, &container);

        assert!(trap.handle_tab(&mut doc, true));
        assert_eq!(doc.focused(), Some(&buttons[2]));
    }

    #[test]
    fn interior_tab_passes_through() {
        let (mut doc, container, buttons) = document_with_buttons(3);
        let mut trap = FocusTrap::new();
        trap.activate(&mut doc, &container);

        doc.set_focus(&buttons[1]);
        assert!(!trap.handle_tab(&mut doc, false));
        assert_eq!(doc.focused(), Some(&buttons[1]));
    }

    #[test]
    fn empty_container_is_inert() {
        let (mut doc, container, _) = document_with_buttons(0);
        let mut trap = FocusTrap::new();
        trap.activate(&mut doc, &container);
        assert_eq!(doc.focused(), None);
        assert!(!trap.handle_tab(&mut doc, false));
    }
}
