//! The retained document: an id-keyed node arena with a body root, a focus
//! slot, viewport state and a lifecycle-event log.
//!
//! The overlay coordinator mutates this structure; the host renders from it
//! and feeds measured geometry back in.

use std::collections::HashMap;

use crate::geometry::Viewport;
use crate::node::{generate_id, Node, NodeId};

/// A lifecycle notification emitted by a component (CustomEvent analogue).
///
/// Names follow the `<family>.<phase>` convention, e.g. `modal.shown`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub name: String,
    pub target: NodeId,
}

/// The document tree.
pub struct Document {
    nodes: HashMap<NodeId, Node>,
    body: NodeId,
    focused: Option<NodeId>,
    pub viewport: Viewport,
    events: Vec<LifecycleEvent>,
}

impl Document {
    pub fn new() -> Self {
        let body_id = NodeId::new("body");
        let mut nodes = HashMap::new();
        nodes.insert(body_id.clone(), Node::new("body", body_id.clone()));
        Self {
            nodes,
            body: body_id,
            focused: None,
            viewport: Viewport::default(),
            events: Vec::new(),
        }
    }

    pub fn body(&self) -> &NodeId {
        &self.body
    }

    // =========================================================================
    // Node creation and tree structure
    // =========================================================================

    /// Create a detached element with a generated id.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId::new(generate_id(tag));
        self.nodes.insert(id.clone(), Node::new(tag, id.clone()));
        id
    }

    /// Create a detached element with an explicit id.
    ///
    /// If a node with that id already exists, it is returned unchanged.
    pub fn create_element_with_id(&mut self, tag: &str, id: impl Into<NodeId>) -> NodeId {
        let id = id.into();
        if !self.nodes.contains_key(&id) {
            self.nodes.insert(id.clone(), Node::new(tag, id.clone()));
        }
        id
    }

    /// Append a detached node as the last child of `parent`.
    pub fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent.clone());
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            if !node.children.contains(child) {
                node.children.push(child.clone());
            }
        }
    }

    /// Detach a node and drop its whole subtree from the arena.
    pub fn detach(&mut self, id: &NodeId) {
        let parent = match self.nodes.get(id) {
            Some(node) => node.parent.clone(),
            None => return,
        };
        if let Some(parent) = parent {
            if let Some(node) = self.nodes.get_mut(&parent) {
                node.children.retain(|c| c != id);
            }
        }
        let mut pending = vec![id.clone()];
        while let Some(next) = pending.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                pending.extend(node.children);
            }
            if self.focused.as_ref() == Some(&next) {
                self.focused = None;
            }
        }
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn contains_node(&self, id: &NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Check if `node` is `ancestor` or one of its descendants.
    pub fn is_within(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(node.clone());
        while let Some(id) = current {
            if &id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent.clone());
        }
        false
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Resolve a `#id` fragment selector (a bare id works too).
    pub fn get_element(&self, selector: &str) -> Option<NodeId> {
        let id = selector.strip_prefix('#').unwrap_or(selector);
        if id.is_empty() {
            return None;
        }
        let id = NodeId::new(id);
        self.nodes.contains_key(&id).then_some(id)
    }

    /// All descendants of `root` in document (preorder) order, excluding
    /// `root` itself.
    pub fn descendants(&self, root: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.collect_descendants(root, &mut out);
        out
    }

    fn collect_descendants(&self, id: &NodeId, out: &mut Vec<NodeId>) {
        let children = match self.nodes.get(id) {
            Some(node) => node.children.clone(),
            None => return,
        };
        for child in children {
            out.push(child.clone());
            self.collect_descendants(&child, out);
        }
    }

    /// Focusable descendants of `root` in document order (focusable and not
    /// disabled).
    pub fn focusables(&self, root: &NodeId) -> Vec<NodeId> {
        self.descendants(root)
            .into_iter()
            .filter(|id| {
                self.nodes
                    .get(id)
                    .map(|n| n.focusable && !n.disabled)
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Check if `id` is rendered: attached under the body with every
    /// ancestor on the `display` axis.
    pub fn is_visible(&self, id: &NodeId) -> bool {
        let mut current = Some(id.clone());
        while let Some(node_id) = current {
            let Some(node) = self.nodes.get(&node_id) else {
                return false;
            };
            if !node.displayed {
                return false;
            }
            if node_id == self.body {
                return true;
            }
            current = node.parent.clone();
        }
        false
    }

    /// Topmost visible node whose measured rect contains the point.
    ///
    /// Ties on z-index go to the later node in document order, matching
    /// paint order for siblings.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<NodeId> {
        let mut best: Option<(i32, usize, NodeId)> = None;
        for (index, id) in self.descendants(&self.body).into_iter().enumerate() {
            let Some(node) = self.nodes.get(&id) else {
                continue;
            };
            let Some(rect) = node.rect else { continue };
            if !rect.contains(x, y) || !self.is_visible(&id) {
                continue;
            }
            let z = node.z_index.unwrap_or(0);
            if best
                .as_ref()
                .map(|(bz, bi, _)| (z, index) >= (*bz, *bi))
                .unwrap_or(true)
            {
                best = Some((z, index, id));
            }
        }
        best.map(|(_, _, id)| id)
    }

    /// Walk up from `from` (inclusive) and return the first node carrying
    /// the given attribute.
    pub fn closest_with_attr(&self, from: &NodeId, name: &str) -> Option<NodeId> {
        let mut current = Some(from.clone());
        while let Some(id) = current {
            let node = self.nodes.get(&id)?;
            if node.has_attr(name) {
                return Some(id);
            }
            current = node.parent.clone();
        }
        None
    }

    /// Walk up from `from` (inclusive) and return the first node carrying
    /// the given class.
    pub fn closest_with_class(&self, from: &NodeId, class: &str) -> Option<NodeId> {
        let mut current = Some(from.clone());
        while let Some(id) = current {
            let node = self.nodes.get(&id)?;
            if node.has_class(class) {
                return Some(id);
            }
            current = node.parent.clone();
        }
        None
    }

    // =========================================================================
    // Class and attribute convenience accessors
    // =========================================================================

    pub fn add_class(&mut self, id: &NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: &NodeId, class: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.remove_class(class);
        }
    }

    /// Toggle a class; returns whether the node now carries it.
    pub fn toggle_class(&mut self, id: &NodeId, class: &str) -> bool {
        match self.nodes.get_mut(id) {
            Some(node) => {
                if node.has_class(class) {
                    node.remove_class(class);
                    false
                } else {
                    node.add_class(class);
                    true
                }
            }
            None => false,
        }
    }

    pub fn has_class(&self, id: &NodeId, class: &str) -> bool {
        self.nodes.get(id).map(|n| n.has_class(class)).unwrap_or(false)
    }

    pub fn set_attr(&mut self, id: &NodeId, name: &str, value: &str) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.set_attr(name, value);
        }
    }

    pub fn attr(&self, id: &NodeId, name: &str) -> Option<&str> {
        self.nodes.get(id).and_then(|n| n.attr(name))
    }

    // =========================================================================
    // Focus
    // =========================================================================

    pub fn focused(&self) -> Option<&NodeId> {
        self.focused.as_ref()
    }

    pub fn set_focus(&mut self, id: &NodeId) {
        if self.nodes.contains_key(id) {
            self.focused = Some(id.clone());
        }
    }

    pub fn clear_focus(&mut self) {
        self.focused = None;
    }

    // =========================================================================
    // Lifecycle events
    // =========================================================================

    /// Append a lifecycle notification to the event log.
    pub fn emit(&mut self, name: impl Into<String>, target: &NodeId) {
        let name = name.into();
        log::debug!("event {name} on {target}");
        self.events.push(LifecycleEvent {
            name,
            target: target.clone(),
        });
    }

    /// Events emitted so far, in order.
    pub fn events(&self) -> &[LifecycleEvent] {
        &self.events
    }

    /// Take all pending events, clearing the log.
    pub fn drain_events(&mut self) -> Vec<LifecycleEvent> {
        std::mem::take(&mut self.events)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}
