//! Document nodes.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::geometry::Rect;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

pub(crate) fn generate_id(prefix: &str) -> String {
    let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{id}")
}

/// Unique identifier for a node in a document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NodeId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

/// A single element in the document tree.
///
/// Nodes carry everything the overlay coordinator reads or writes: class
/// list, attributes, focusability, the `display` axis, explicit style
/// overrides and measured geometry. Layout itself is the host's concern;
/// measured rects are provided from outside.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    pub tag: String,
    classes: Vec<String>,
    attrs: HashMap<String, String>,
    /// Text content, for leaf nodes that carry a message.
    pub text: Option<String>,

    /// Whether this node can receive focus.
    pub focusable: bool,
    /// Disabled nodes don't receive input and are skipped by focus walks.
    pub disabled: bool,
    /// The `display: none` axis; detached from rendering when false.
    pub displayed: bool,

    // Explicit style overrides written by the coordinator.
    pub left: Option<i32>,
    pub top: Option<i32>,
    pub z_index: Option<i32>,
    pub height: Option<i32>,

    /// Natural content height (scrollHeight analogue), set by the host.
    pub content_height: i32,
    /// Measured geometry, set by the host after layout.
    pub rect: Option<Rect>,

    pub(crate) children: Vec<NodeId>,
    pub(crate) parent: Option<NodeId>,
}

impl Node {
    pub(crate) fn new(tag: impl Into<String>, id: NodeId) -> Self {
        Self {
            id,
            tag: tag.into(),
            classes: Vec::new(),
            attrs: HashMap::new(),
            text: None,
            focusable: false,
            disabled: false,
            displayed: true,
            left: None,
            top: None,
            z_index: None,
            height: None,
            content_height: 0,
            rect: None,
            children: Vec::new(),
            parent: None,
        }
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.remove(name);
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.contains_key(name)
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn parent(&self) -> Option<&NodeId> {
        self.parent.as_ref()
    }
}
