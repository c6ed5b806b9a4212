//! Viewport reconciliation: scroll the window so the popover and its anchor
//! stay clear of the viewport edges.
//!
//! The popover is handled first; the anchor point then overrides whatever the
//! popover asked for, so the anchor is never scrolled out of view to make room
//! for the popover. All coordinates are viewport pixels.

use crate::geometry::{Point, Rect, Size};

/// Distance kept between the viewport edges and the popover or anchor.
pub const SCROLL_BUFFER: f64 = 20.0;

/// Something that can scroll the window, `window.scrollBy` in the webview.
pub trait ScrollPort {
    fn scroll_by(&self, dx: f64, dy: f64, smooth: bool);
}

/// Scroll offsets to apply; positive values scroll right/down.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollDelta {
    pub dx: f64,
    pub dy: f64,
}

impl ScrollDelta {
    pub const ZERO: Self = Self { dx: 0.0, dy: 0.0 };

    pub fn is_zero(&self) -> bool {
        self.dx == 0.0 && self.dy == 0.0
    }

    /// Ask `port` for a smooth scroll, unless there is nothing to do.
    ///
    /// Returns whether a scroll was requested.
    pub fn request(self, port: &impl ScrollPort) -> bool {
        if self.is_zero() {
            return false;
        }
        tracing::debug!(dx = self.dx, dy = self.dy, "requesting smooth scroll");
        port.scroll_by(self.dx, self.dy, true);
        true
    }

    /// Where a viewport box ends up once this delta has been scrolled.
    #[must_use]
    pub fn apply_to(&self, rect: &Rect) -> Rect {
        rect.translate(-self.dx, -self.dy)
    }
}

/// Compute the scroll needed for `popover` and `anchor` with the contract
/// [`SCROLL_BUFFER`].
pub fn reconcile(popover: &Rect, anchor: Point, viewport: Size) -> ScrollDelta {
    reconcile_with_buffer(popover, anchor, viewport, SCROLL_BUFFER)
}

pub fn reconcile_with_buffer(
    popover: &Rect,
    anchor: Point,
    viewport: Size,
    buffer: f64,
) -> ScrollDelta {
    ScrollDelta {
        dx: axis(popover.left, popover.right(), anchor.x, viewport.width, buffer),
        dy: axis(popover.top, popover.bottom(), anchor.y, viewport.height, buffer),
    }
}

/// Delta along one axis for a popover spanning `start..end` and an anchor
/// coordinate, in a viewport of length `extent`.
fn axis(start: f64, end: f64, anchor: f64, extent: f64, buffer: f64) -> f64 {
    let far = extent - buffer;

    let mut delta = if start < buffer {
        start - buffer
    } else if end > far {
        // Never push the near edge past the buffer, so a popover larger than
        // the viewport settles instead of bouncing between its edges.
        (end - far).min(start - buffer)
    } else {
        0.0
    };

    let anchor_after = anchor - delta;
    if anchor_after < buffer {
        delta = anchor - buffer;
    } else if anchor_after > far {
        delta = anchor - far;
    }

    delta
}
