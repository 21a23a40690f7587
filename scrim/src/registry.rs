//! Stacking registries.
//!
//! One registry exists per overlay family (modal, drawer) and records the
//! currently open instances in insertion order; the last element is the top
//! of the stack and the only instance ambient input may close. Registries
//! are constructed explicitly and injected into the coordinator, never read
//! from shared global state.

use overdom::NodeId;

/// An ordered stack of open overlay containers.
#[derive(Debug, Default)]
pub struct OverlayRegistry {
    stack: Vec<NodeId>,
}

impl OverlayRegistry {
    pub fn new() -> Self {
        Self { stack: Vec::new() }
    }

    /// Push an instance onto the top of the stack.
    ///
    /// An instance already present is moved to the top rather than
    /// duplicated.
    pub fn push(&mut self, id: &NodeId) {
        self.stack.retain(|entry| entry != id);
        self.stack.push(id.clone());
    }

    /// Remove an instance wherever it sits in the stack.
    pub fn remove(&mut self, id: &NodeId) {
        self.stack.retain(|entry| entry != id);
    }

    /// The instance on top of the stack, if any.
    pub fn top(&self) -> Option<&NodeId> {
        self.stack.last()
    }

    pub fn is_top(&self, id: &NodeId) -> bool {
        self.top() == Some(id)
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.stack.contains(id)
    }

    /// Stack depth of an open instance, zero at the bottom.
    pub fn depth_of(&self, id: &NodeId) -> Option<usize> {
        self.stack.iter().position(|entry| entry == id)
    }

    /// Number of open instances; also the depth assigned to the next one.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Instances bottom-to-top.
    pub fn iter(&self) -> impl Iterator<Item = &NodeId> {
        self.stack.iter()
    }

    pub fn clear(&mut self) {
        self.stack.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifo_top_tracking() {
        let mut registry = OverlayRegistry::new();
        let a = NodeId::new("a");
        let b = NodeId::new("b");
        let c = NodeId::new("c");
        registry.push(&a);
        registry.push(&b);
        registry.push(&c);
        assert_eq!(registry.top(), Some(&c));
        registry.remove(&c);
        assert_eq!(registry.top(), Some(&b));
        registry.remove(&a);
        assert_eq!(registry.top(), Some(&b));
        registry.remove(&b);
        assert!(registry.is_empty());
    }

    #[test]
    fn push_moves_existing_to_top() {
        let mut registry = OverlayRegistry::new();
        let a = NodeId::new("a");
        let b = NodeId::new("b");
        registry.push(&a);
        registry.push(&b);
        registry.push(&a);
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.top(), Some(&a));
    }

    #[test]
    fn depth_tracks_position_from_bottom() {
        let mut registry = OverlayRegistry::new();
        let a = NodeId::new("a");
        let b = NodeId::new("b");
        registry.push(&a);
        registry.push(&b);
        assert_eq!(registry.depth_of(&a), Some(0));
        assert_eq!(registry.depth_of(&b), Some(1));
        registry.remove(&a);
        assert_eq!(registry.depth_of(&b), Some(0));
        assert_eq!(registry.depth_of(&a), None);
    }
}
