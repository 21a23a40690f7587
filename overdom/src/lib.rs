pub mod document;
pub mod event;
pub mod geometry;
pub mod node;

pub use document::{Document, LifecycleEvent};
pub use event::{Key, Modifiers};
pub use geometry::{Rect, Viewport};
pub use node::{Node, NodeId};
