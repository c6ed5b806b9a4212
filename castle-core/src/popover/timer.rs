//! Grace timer slot for hover-opened popovers.
//!
//! The machine never sleeps itself. It hands out a [`GraceTimer`] to be
//! scheduled by the UI and later receives [`TimerId`] back when it fires.
//! Only the most recently started timer is live; anything else is stale.

use std::fmt;
use std::time::Duration;

/// Grace period after the pointer leaves a target.
pub const TARGET_LEAVE_GRACE: Duration = Duration::from_millis(140);

/// Grace period after the pointer leaves the popover body.
pub const POPOVER_LEAVE_GRACE: Duration = Duration::from_millis(180);

/// Identifies one scheduled grace timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A pending delayed close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GraceTimer {
    pub id: TimerId,
    pub delay: Duration,
}

/// Single-slot holder for the pending grace timer; latest wins.
#[derive(Debug, Default)]
pub(crate) struct GraceSlot {
    pending: Option<GraceTimer>,
    next_id: u64,
}

impl GraceSlot {
    pub(crate) fn pending(&self) -> Option<GraceTimer> {
        self.pending
    }

    /// Replace any pending timer with a fresh one.
    ///
    /// Returns the new timer and the one it superseded, if any.
    pub(crate) fn start(&mut self, delay: Duration) -> (GraceTimer, Option<GraceTimer>) {
        self.next_id += 1;
        let timer = GraceTimer {
            id: TimerId(self.next_id),
            delay,
        };
        (timer, self.pending.replace(timer))
    }

    pub(crate) fn cancel(&mut self) -> Option<GraceTimer> {
        self.pending.take()
    }

    /// Consume the pending timer if `id` is the live one.
    pub(crate) fn fire(&mut self, id: TimerId) -> bool {
        if self.pending.is_some_and(|timer| timer.id == id) {
            self.pending = None;
            true
        } else {
            false
        }
    }
}
