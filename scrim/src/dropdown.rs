//! Viewport-aware dropdown menus.
//!
//! Dropdowns do not participate in a stacking registry: a global sweep
//! closes open menus on outside interaction instead of top-of-stack
//! tracking. Placement is a best-effort four-direction flip-and-clamp, not
//! a constraint solver.

use std::time::{Duration, Instant};

use overdom::{Document, Key, NodeId, Rect, Viewport};

use crate::contract::{
    ATTR_EXPANDED, ATTR_TOGGLE, CLASS_DROPDOWN_ITEM, CLASS_DROPDOWN_MENU, CLASS_DROPUP, CLASS_SHOW,
};
use crate::error::WireError;
use crate::transition::{DROPDOWN_TRANSITION, Delay};

/// Z-index for open dropdown menus; below the overlay bands.
const MENU_Z: i32 = 1000;

/// Delay before moving focus into a freshly opened menu, letting layout
/// settle first.
const FOCUS_DELAY: Duration = Duration::from_millis(100);

/// Computed menu placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub left: i32,
    pub top: i32,
    /// The menu flipped above the toggle.
    pub dropup: bool,
}

/// Place a menu relative to its toggle.
///
/// Default anchor is bottom-left of the toggle. If the menu's bottom edge
/// would leave the viewport it flips above the toggle, clamping to the
/// viewport top if that does not fit either. Horizontal overflow right-aligns
/// to the toggle, clamping to the viewport left as a last resort. All
/// coordinates are page-relative, so scroll offsets are part of the bounds.
pub fn place_menu(toggle: Rect, menu_width: i32, menu_height: i32, viewport: Viewport) -> Placement {
    let mut top = toggle.bottom();
    let mut dropup = false;
    if top + menu_height > viewport.visible_bottom() {
        let above = toggle.y - menu_height;
        if above >= viewport.scroll_y {
            top = above;
            dropup = true;
        } else {
            top = viewport.scroll_y;
        }
    }

    let mut left = toggle.x;
    if left + menu_width > viewport.visible_right() {
        let right_aligned = toggle.right() - menu_width;
        if right_aligned >= viewport.scroll_x {
            left = right_aligned;
        } else {
            left = viewport.scroll_x;
        }
    }

    Placement { left, top, dropup }
}

/// Dropdown behavior switches.
#[derive(Debug, Clone, Copy)]
pub struct DropdownOptions {
    /// Close on outside interaction.
    pub auto_close: bool,
}

impl Default for DropdownOptions {
    fn default() -> Self {
        Self { auto_close: true }
    }
}

/// Result of routing a key press into an open menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The key was not for this menu; let it pass through.
    Ignored,
    /// The key moved focus inside the menu.
    Consumed,
    /// Enter/Space on a menu item; the caller should activate it.
    Activate(NodeId),
}

/// One dropdown instance bound to a container node.
#[derive(Debug)]
pub struct Dropdown {
    pub node: NodeId,
    toggle: NodeId,
    menu: NodeId,
    options: DropdownOptions,
    open: bool,
    pending_focus: Option<Delay>,
    pending_shown: Option<Delay>,
    pending_hidden: Option<Delay>,
}

impl Dropdown {
    /// Bind a dropdown to `container`, locating its toggle
    /// (`data-toggle="dropdown"` descendant) and menu (`dropdown-menu`
    /// class descendant).
    pub fn attach(
        doc: &Document,
        container: &NodeId,
        options: DropdownOptions,
    ) -> Result<Self, WireError> {
        let descendants = doc.descendants(container);
        let toggle = descendants
            .iter()
            .find(|id| doc.attr(id, ATTR_TOGGLE) == Some("dropdown"))
            .cloned()
            .ok_or(WireError::MissingPart {
                container: container.to_string(),
                part: "toggle",
            })?;
        let menu = descendants
            .iter()
            .find(|id| doc.has_class(id, CLASS_DROPDOWN_MENU))
            .cloned()
            .ok_or(WireError::MissingPart {
                container: container.to_string(),
                part: "menu",
            })?;
        Ok(Self {
            node: container.clone(),
            toggle,
            menu,
            options,
            open: false,
            pending_focus: None,
            pending_shown: None,
            pending_hidden: None,
        })
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn auto_close(&self) -> bool {
        self.options.auto_close
    }

    pub fn toggle_node(&self) -> &NodeId {
        &self.toggle
    }

    pub fn menu_node(&self) -> &NodeId {
        &self.menu
    }

    /// Open the menu: place it, mark ARIA expanded, and schedule focus of
    /// the first enabled item once layout settles.
    pub fn show(&mut self, doc: &mut Document, now: Instant) {
        if self.open {
            return;
        }

        self.position_menu(doc);

        doc.add_class(&self.menu, CLASS_SHOW);
        doc.set_attr(&self.menu, ATTR_EXPANDED, "true");
        doc.add_class(&self.toggle, CLASS_SHOW);
        doc.set_attr(&self.toggle, ATTR_EXPANDED, "true");

        self.open = true;
        doc.emit("dropdown.show", &self.node);

        self.pending_focus = Some(Delay::after(now, FOCUS_DELAY));
        self.pending_shown = Some(Delay::after(now, DROPDOWN_TRANSITION));
    }

    /// Close the menu, reversing the open-state side effects.
    pub fn hide(&mut self, doc: &mut Document, now: Instant) {
        if !self.open {
            return;
        }

        doc.remove_class(&self.menu, CLASS_SHOW);
        doc.set_attr(&self.menu, ATTR_EXPANDED, "false");
        doc.remove_class(&self.toggle, CLASS_SHOW);
        doc.set_attr(&self.toggle, ATTR_EXPANDED, "false");

        self.open = false;
        doc.emit("dropdown.hide", &self.node);

        self.pending_focus = None;
        self.pending_shown = None;
        self.pending_hidden = Some(Delay::after(now, DROPDOWN_TRANSITION));
    }

    pub fn toggle(&mut self, doc: &mut Document, now: Instant) {
        if self.open {
            self.hide(doc, now);
        } else {
            self.show(doc, now);
        }
    }

    fn position_menu(&self, doc: &mut Document) {
        let toggle_rect = doc
            .node(&self.toggle)
            .and_then(|n| n.rect)
            .unwrap_or_default();
        let (menu_w, menu_h) = doc
            .node(&self.menu)
            .and_then(|n| n.rect)
            .map(|r| (r.width, r.height))
            .unwrap_or((0, 0));
        let placement = place_menu(toggle_rect, menu_w, menu_h, doc.viewport);

        if placement.dropup {
            doc.add_class(&self.menu, CLASS_DROPUP);
        } else {
            doc.remove_class(&self.menu, CLASS_DROPUP);
        }
        if let Some(menu) = doc.node_mut(&self.menu) {
            menu.left = Some(placement.left);
            menu.top = Some(placement.top);
            menu.z_index = Some(MENU_Z);
        }
    }

    /// Enabled menu items in document order.
    fn items(&self, doc: &Document) -> Vec<NodeId> {
        doc.descendants(&self.menu)
            .into_iter()
            .filter(|id| {
                doc.node(id)
                    .map(|n| n.has_class(CLASS_DROPDOWN_ITEM) && !n.disabled)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Route a key press into the open menu.
    ///
    /// ArrowDown/ArrowUp cycle with wraparound, Home/End jump to the ends,
    /// Enter/Space activate the focused item. Tab closes the menu when
    /// `auto_close` is set but still passes through to the host.
    pub fn handle_key(&mut self, doc: &mut Document, key: Key, now: Instant) -> KeyOutcome {
        if !self.open {
            return KeyOutcome::Ignored;
        }
        let items = self.items(doc);
        if items.is_empty() {
            return KeyOutcome::Ignored;
        }
        let current = doc
            .focused()
            .and_then(|focused| items.iter().position(|id| id == focused));

        match key {
            Key::Down => {
                let next = match current {
                    Some(i) if i + 1 < items.len() => i + 1,
                    _ => 0,
                };
                doc.set_focus(&items[next]);
                KeyOutcome::Consumed
            }
            Key::Up => {
                let prev = match current {
                    Some(i) if i > 0 => i - 1,
                    _ => items.len() - 1,
                };
                doc.set_focus(&items[prev]);
                KeyOutcome::Consumed
            }
            Key::Home => {
                doc.set_focus(&items[0]);
                KeyOutcome::Consumed
            }
            Key::End => {
                doc.set_focus(&items[items.len() - 1]);
                KeyOutcome::Consumed
            }
            Key::Enter | Key::Char(' ') => match current {
                Some(i) => KeyOutcome::Activate(items[i].clone()),
                None => KeyOutcome::Ignored,
            },
            Key::Tab | Key::BackTab => {
                if self.options.auto_close {
                    self.hide(doc, now);
                }
                KeyOutcome::Ignored
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Advance deferred work: first-item focus and shown/hidden emission.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        if let Some(delay) = &mut self.pending_focus
            && delay.poll(now)
        {
            self.pending_focus = None;
            if self.open {
                let items = self.items(doc);
                if let Some(first) = items.first() {
                    doc.set_focus(first);
                }
            }
        }
        if let Some(delay) = &mut self.pending_shown
            && delay.poll(now)
        {
            self.pending_shown = None;
            doc.emit("dropdown.shown", &self.node);
        }
        if let Some(delay) = &mut self.pending_hidden
            && delay.poll(now)
        {
            self.pending_hidden = None;
            doc.emit("dropdown.hidden", &self.node);
        }
    }
}
