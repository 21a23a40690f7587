//! Overlay lifecycle and stacking coordinator.
//!
//! `scrim` decides when an overlay may open or close, how concurrently open
//! overlays are stacked and torn down, how focus and keyboard input are
//! routed among them, and how transition completion, backdrops, toast
//! timers and dropdown placement are synchronized with state changes.
//!
//! The coordinator mutates an [`overdom::Document`]; the host renders it,
//! feeds measured geometry back in, and drives time by calling
//! [`Ui::tick`] with the current instant.

pub mod backdrop;
pub mod collapse;
pub mod context;
pub mod contract;
pub mod dropdown;
pub mod error;
pub mod focus_trap;
pub mod logging;
pub mod overlay;
pub mod registry;
pub mod toast;
pub mod transition;

pub use context::Ui;
pub use error::WireError;

pub mod prelude {
    pub use crate::backdrop::Backdrop;
    pub use crate::collapse::{Collapse, CollapseOptions, CollapseState};
    pub use crate::context::Ui;
    pub use crate::contract::Family;
    pub use crate::dropdown::{Dropdown, DropdownOptions, KeyOutcome};
    pub use crate::error::WireError;
    pub use crate::focus_trap::FocusTrap;
    pub use crate::overlay::{Overlay, OverlayKind, OverlayOptions, OverlayState};
    pub use crate::registry::OverlayRegistry;
    pub use crate::toast::{Toast, ToastKind, ToastManager, ToastPosition};
    pub use crate::transition::{Delay, Transition};

    pub use overdom::{Document, Key, LifecycleEvent, Modifiers, NodeId, Rect, Viewport};
}
