//! The declarative attribute and class contract.
//!
//! These names are the wire format between markup and the coordinator, and
//! the class hooks stylesheets attach to.

use std::str::FromStr;

use overdom::{Document, NodeId};

use crate::error::WireError;

// Attributes read from markup.
pub const ATTR_TOGGLE: &str = "data-toggle";
pub const ATTR_TARGET: &str = "data-target";
pub const ATTR_HREF: &str = "href";
pub const ATTR_DISMISS: &str = "data-dismiss";
pub const ATTR_PARENT: &str = "data-parent";
pub const ATTR_ACCORDION: &str = "data-accordion";
pub const ATTR_EXPANDED: &str = "aria-expanded";
pub const ATTR_POSITION: &str = "data-position";

// Classes consumers style.
pub const CLASS_SHOW: &str = "show";
pub const CLASS_FADE: &str = "fade";
pub const CLASS_COLLAPSE: &str = "collapse";
pub const CLASS_COLLAPSING: &str = "collapsing";
pub const CLASS_DROPUP: &str = "dropup";
pub const CLASS_MODAL: &str = "modal";
pub const CLASS_DRAWER: &str = "drawer";
pub const CLASS_MODAL_BACKDROP: &str = "modal-backdrop";
pub const CLASS_DRAWER_BACKDROP: &str = "drawer-backdrop";
pub const CLASS_MODAL_OPEN: &str = "modal-open";
pub const CLASS_DRAWER_OPEN: &str = "drawer-open";
pub const CLASS_DROPDOWN: &str = "dropdown";
pub const CLASS_DROPDOWN_MENU: &str = "dropdown-menu";
pub const CLASS_DROPDOWN_ITEM: &str = "dropdown-item";
pub const CLASS_TOAST: &str = "toast";
pub const CLASS_TOAST_CONTAINER: &str = "toast-container";

/// Component family declared by a `data-toggle` value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Family {
    Modal,
    Drawer,
    Dropdown,
    Collapse,
}

impl FromStr for Family {
    type Err = WireError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "modal" => Ok(Family::Modal),
            "drawer" => Ok(Family::Drawer),
            "dropdown" => Ok(Family::Dropdown),
            "collapse" => Ok(Family::Collapse),
            other => Err(WireError::UnknownFamily(other.to_string())),
        }
    }
}

/// Resolve a trigger's target element from `data-target` or, failing that,
/// its `href` fragment. `data-target` wins when both are present.
pub fn resolve_target(doc: &Document, trigger: &NodeId) -> Result<NodeId, WireError> {
    let selector = doc
        .attr(trigger, ATTR_TARGET)
        .or_else(|| doc.attr(trigger, ATTR_HREF))
        .ok_or_else(|| WireError::MissingTarget {
            trigger: trigger.to_string(),
        })?;
    let selector = selector.to_string();
    doc.get_element(&selector)
        .ok_or(WireError::TargetNotFound { selector })
}
