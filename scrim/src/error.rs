//! Wiring error types.
//!
//! Configuration problems never propagate past the wiring layer: the caller
//! logs them at warn level and skips the offending trigger, leaving no
//! partial instance behind.

use thiserror::Error;

/// Errors raised while resolving the declarative attribute contract.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    /// A trigger references a selector that resolves to nothing.
    #[error("target selector '{selector}' did not resolve to an element")]
    TargetNotFound { selector: String },

    /// A trigger carries neither `data-target` nor an `href` fragment.
    #[error("trigger '{trigger}' has no target selector")]
    MissingTarget { trigger: String },

    /// A dropdown container is missing its toggle or menu element.
    #[error("dropdown '{container}' is missing its {part} element")]
    MissingPart {
        container: String,
        part: &'static str,
    },

    /// An unrecognized `data-toggle` family value.
    #[error("unknown component family '{0}'")]
    UnknownFamily(String),
}
