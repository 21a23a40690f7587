//! Self-dismissing toast notifications.
//!
//! Toasts live in position-keyed containers created lazily on first use and
//! kept for the whole session; the container count is bounded by the small
//! fixed set of positions. Each toast runs a pausable countdown: hovering
//! clears the pending timer, and leaving restarts the full delay rather
//! than resuming the remainder (an accepted simplification).

use std::collections::HashMap;
use std::time::{Duration, Instant};

use overdom::{Document, NodeId};

use crate::contract::{ATTR_POSITION, CLASS_SHOW, CLASS_TOAST, CLASS_TOAST_CONTAINER};
use crate::transition::{Delay, TOAST_TRANSITION, Transition};

/// Default countdown before a toast auto-hides.
pub const DEFAULT_TOAST_DELAY: Duration = Duration::from_secs(4);

/// Toast severity, mapped to a `toast-<kind>` class and an icon glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastKind {
    pub fn class(self) -> &'static str {
        match self {
            ToastKind::Info => "toast-info",
            ToastKind::Success => "toast-success",
            ToastKind::Warning => "toast-warning",
            ToastKind::Error => "toast-error",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            ToastKind::Info => "i",
            ToastKind::Success => "✓",
            ToastKind::Warning | ToastKind::Error => "!",
        }
    }
}

/// Screen corner a toast container is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ToastPosition {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
}

impl ToastPosition {
    pub fn key(self) -> &'static str {
        match self {
            ToastPosition::TopRight => "top-right",
            ToastPosition::TopLeft => "top-left",
            ToastPosition::BottomRight => "bottom-right",
            ToastPosition::BottomLeft => "bottom-left",
        }
    }
}

/// A toast description. Build one with the severity constructors and show
/// it through [`ToastManager::show`].
///
/// # Example
///
/// ```ignore
/// ui.toast(Toast::success("Saved").with_delay(Duration::from_secs(2)), now);
/// ```
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub delay: Duration,
    pub autohide: bool,
    pub position: ToastPosition,
}

impl Toast {
    fn new(kind: ToastKind, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind,
            delay: DEFAULT_TOAST_DELAY,
            autohide: true,
            position: ToastPosition::default(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Info, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Success, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Warning, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(ToastKind::Error, message)
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn with_position(mut self, position: ToastPosition) -> Self {
        self.position = position;
        self
    }

    /// Keep the toast until dismissed manually.
    pub fn sticky(mut self) -> Self {
        self.autohide = false;
        self
    }
}

/// Countdown state of one shown toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimerState {
    Running { deadline: Instant },
    Paused,
    Stopped,
}

#[derive(Debug)]
struct ToastEntry {
    node: NodeId,
    delay: Duration,
    autohide: bool,
    timer: TimerState,
    pending_shown: Option<Delay>,
    removal: Option<Transition>,
}

/// Owns toast containers and live toast instances.
#[derive(Debug, Default)]
pub struct ToastManager {
    containers: HashMap<ToastPosition, NodeId>,
    entries: Vec<ToastEntry>,
}

impl ToastManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// The container for a position, created on first use and never
    /// destroyed afterwards, even when empty.
    pub fn container(&mut self, doc: &mut Document, position: ToastPosition) -> NodeId {
        if let Some(existing) = self.containers.get(&position) {
            if doc.contains_node(existing) {
                return existing.clone();
            }
        }
        let container = doc.create_element("div");
        doc.add_class(&container, CLASS_TOAST_CONTAINER);
        doc.set_attr(&container, ATTR_POSITION, position.key());
        let body = doc.body().clone();
        doc.append_child(&body, &container);
        self.containers.insert(position, container.clone());
        container
    }

    /// Materialize and show a toast, starting its countdown if it
    /// auto-hides. Returns the toast's element id.
    pub fn show(&mut self, doc: &mut Document, toast: Toast, now: Instant) -> NodeId {
        let container = self.container(doc, toast.position);

        let node = doc.create_element("div");
        doc.add_class(&node, CLASS_TOAST);
        doc.add_class(&node, toast.kind.class());
        if let Some(n) = doc.node_mut(&node) {
            n.text = Some(format!("{} {}", toast.kind.icon(), toast.message));
        }
        doc.append_child(&container, &node);
        doc.add_class(&node, CLASS_SHOW);
        doc.emit("toast.show", &node);

        let timer = if toast.autohide {
            TimerState::Running {
                deadline: now + toast.delay,
            }
        } else {
            TimerState::Stopped
        };
        self.entries.push(ToastEntry {
            node: node.clone(),
            delay: toast.delay,
            autohide: toast.autohide,
            timer,
            pending_shown: Some(Delay::after(now, TOAST_TRANSITION)),
            removal: None,
        });
        node
    }

    /// Check if `id` is (inside) a live toast.
    pub fn owning_toast(&self, doc: &Document, id: &NodeId) -> Option<NodeId> {
        self.entries
            .iter()
            .find(|entry| doc.is_within(&entry.node, id))
            .map(|entry| entry.node.clone())
    }

    /// Pointer entered the toast: pause the countdown.
    pub fn pause(&mut self, toast: &NodeId) {
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.node == toast) {
            if matches!(entry.timer, TimerState::Running { .. }) {
                entry.timer = TimerState::Paused;
            }
        }
    }

    /// Pointer left the toast: restart the full countdown. Elapsed time
    /// before the pause is not carried over.
    pub fn resume(&mut self, toast: &NodeId, now: Instant) {
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.node == toast) {
            if entry.autohide && entry.timer == TimerState::Paused {
                entry.timer = TimerState::Running {
                    deadline: now + entry.delay,
                };
            }
        }
    }

    /// Hide a toast now, clearing any pending countdown. The element
    /// detaches after the removal grace period.
    pub fn hide(&mut self, doc: &mut Document, toast: &NodeId, now: Instant) {
        if let Some(entry) = self.entries.iter_mut().find(|e| &e.node == toast) {
            if entry.removal.is_some() {
                return;
            }
            entry.timer = TimerState::Stopped;
            doc.remove_class(&entry.node, CLASS_SHOW);
            doc.emit("toast.hide", &entry.node);
            entry.removal = Some(Transition::start(now, TOAST_TRANSITION));
        }
    }

    /// Advance countdowns and removals.
    pub fn tick(&mut self, doc: &mut Document, now: Instant) {
        let mut expired = Vec::new();
        for entry in &mut self.entries {
            if let Some(delay) = &mut entry.pending_shown
                && delay.poll(now)
            {
                entry.pending_shown = None;
                doc.emit("toast.shown", &entry.node);
            }
            if let TimerState::Running { deadline } = entry.timer
                && now >= deadline
            {
                expired.push(entry.node.clone());
            }
        }
        for node in expired {
            self.hide(doc, &node, now);
        }

        let mut finished = Vec::new();
        for entry in &mut self.entries {
            if let Some(removal) = &mut entry.removal
                && removal.poll(now)
            {
                finished.push(entry.node.clone());
            }
        }
        for node in finished {
            doc.detach(&node);
            doc.emit("toast.hidden", &node);
            self.entries.retain(|e| e.node != node);
        }
    }

    /// Live (not yet removed) toast count, for diagnostics.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
