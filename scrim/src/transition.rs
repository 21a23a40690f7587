//! Transition completion tracking.
//!
//! A CSS transition either reports completion (the `transitionend` signal)
//! or never does, so every state change that waits on one races the signal
//! against a fallback deadline. [`Transition`] is that race expressed as a
//! cancellable one-shot: whichever trigger fires first resolves it, exactly
//! once, and the loser is disarmed. Resolution is observed by polling from
//! the host's tick, the same frame-driven model `tuidom` uses for property
//! animation.

use std::time::{Duration, Instant};

/// A one-shot transition-end-or-timeout race.
#[derive(Debug, Clone)]
pub struct Transition {
    started: Instant,
    fallback: Duration,
    end_signaled: bool,
    resolved: bool,
}

impl Transition {
    /// Start tracking a transition with the given fallback deadline.
    pub fn start(now: Instant, fallback: Duration) -> Self {
        Self {
            started: now,
            fallback,
            end_signaled: false,
            resolved: false,
        }
    }

    /// Record the host-reported end of the underlying transition.
    ///
    /// Ignored once resolved; signaling twice has no extra effect.
    pub fn signal_end(&mut self) {
        if !self.resolved {
            self.end_signaled = true;
        }
    }

    /// Poll for completion. Returns `true` exactly once, when either the
    /// end signal has arrived or the fallback deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.resolved {
            return false;
        }
        if self.end_signaled || now.duration_since(self.started) >= self.fallback {
            self.resolved = true;
            return true;
        }
        false
    }

    /// Cancel the race; neither trigger will resolve it afterwards.
    pub fn cancel(&mut self) {
        self.resolved = true;
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved
    }
}

/// A plain one-shot delay (setTimeout analogue), polled like [`Transition`]
/// but with no end signal.
#[derive(Debug, Clone)]
pub struct Delay {
    deadline: Instant,
    fired: bool,
}

impl Delay {
    pub fn until(deadline: Instant) -> Self {
        Self {
            deadline,
            fired: false,
        }
    }

    pub fn after(now: Instant, duration: Duration) -> Self {
        Self::until(now + duration)
    }

    /// Returns `true` exactly once, when the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.fired || now < self.deadline {
            return false;
        }
        self.fired = true;
        true
    }
}

// Observed transition fallbacks per component family.
pub const MODAL_TRANSITION: Duration = Duration::from_millis(150);
pub const DRAWER_TRANSITION: Duration = Duration::from_millis(200);
pub const DROPDOWN_TRANSITION: Duration = Duration::from_millis(150);
pub const COLLAPSE_TRANSITION: Duration = Duration::from_millis(350);
pub const TOAST_TRANSITION: Duration = Duration::from_millis(200);

/// Deferred second class toggle that defeats transition coalescing when a
/// node is inserted and made visible in the same frame.
pub const PAINT_TICK: Duration = Duration::from_millis(10);
