//! Placement engine for the target popover.
//!
//! Picks the side of the anchor with enough room for the popover, in the
//! preference order top, bottom, right, left, and falls back to a clamped
//! bottom placement when nothing fits. Results are expressed in the anchor
//! container's local coordinates, ready to be written as `left`/`top` CSS.

use std::fmt;

use crate::geometry::{clamp_low, Point, Rect, Size};

/// Spacing between the anchor and the popover.
pub const GAP: f64 = 12.0;

/// Minimum distance between the popover and the container edges.
pub const MARGIN: f64 = 16.0;

/// Half the arrow's width; the arrow box is offset by this to centre its tip.
pub const ARROW_HALF: f64 = 6.0;

/// Smallest arrow offset, keeps the arrow off the rounded corner.
pub const ARROW_MIN: f64 = 6.0;

/// Room kept at the far end of the popover for the arrow footprint.
pub const ARROW_FAR_INSET: f64 = 18.0;

/// Which side of the anchor the popover is drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Value of the popover's `data-placement` attribute.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Whether the popover sits above or below the anchor, so the arrow
    /// runs along the horizontal axis.
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Measured geometry needed to place the popover.
///
/// `container` and `anchor` are viewport boxes as returned by
/// `getBoundingClientRect()`; `popover` is the rendered popover size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementInput {
    pub container: Rect,
    pub anchor: Rect,
    pub popover: Size,
    pub gap: f64,
    pub margin: f64,
}

impl PlacementInput {
    /// Input with the contract `GAP` and `MARGIN`.
    pub const fn new(container: Rect, anchor: Rect, popover: Size) -> Self {
        Self {
            container,
            anchor,
            popover,
            gap: GAP,
            margin: MARGIN,
        }
    }
}

/// Where to draw the popover, relative to the container's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub side: Side,
    pub left: f64,
    pub top: f64,
    /// Offset of the arrow along the popover edge facing the anchor: from the
    /// popover's left edge for top/bottom, from its top edge for left/right.
    pub arrow_offset: f64,
}

impl Placement {
    /// Popover box in container-local coordinates.
    pub fn local_rect(&self, size: Size) -> Rect {
        Rect::new(self.left, self.top, size.width, size.height)
    }

    /// Popover box in viewport coordinates.
    pub fn viewport_rect(&self, container: &Rect, size: Size) -> Rect {
        self.local_rect(size).translate(container.left, container.top)
    }

    /// Inline style for the popover element.
    pub fn popover_style(&self) -> String {
        format!("left: {}px; top: {}px;", self.left, self.top)
    }

    /// Inline style for the arrow element.
    pub fn arrow_style(&self) -> String {
        if self.side.is_vertical() {
            format!("left: {}px;", self.arrow_offset)
        } else {
            format!("top: {}px;", self.arrow_offset)
        }
    }
}

/// Room around the anchor centre, each already reduced by the margin.
#[derive(Debug, Clone, Copy)]
struct Space {
    above: f64,
    below: f64,
    left: f64,
    right: f64,
}

/// Compute the popover placement. Pure and deterministic.
pub fn place(input: &PlacementInput) -> Placement {
    let PlacementInput {
        container,
        anchor,
        popover,
        gap,
        margin,
    } = *input;

    let anchor = anchor.relative_to(container.origin());
    let center = anchor.center();
    let space = Space {
        above: center.y - margin,
        below: container.height - center.y - margin,
        left: center.x - margin,
        right: container.width - center.x - margin,
    };

    let needed_v = popover.height + gap;
    let needed_h = popover.width + gap;

    // Budgets are measured from the centre but offsets from the anchor's
    // edges, so the main axis is kept inside the margin band as well.
    let far_top = container.height - popover.height - margin;
    let far_left = container.width - popover.width - margin;

    let (side, left, top) = if space.above >= needed_v && space.above >= space.below {
        let top = (anchor.top - popover.height - gap).max(margin);
        (Side::Top, centered_x(center, popover, &container, margin), top)
    } else if space.below >= needed_v {
        let top = (anchor.bottom() + gap).min(far_top);
        (Side::Bottom, centered_x(center, popover, &container, margin), top)
    } else if space.right >= needed_h {
        let left = (anchor.right() + gap).min(far_left);
        (Side::Right, left, centered_y(center, popover, &container, margin))
    } else if space.left >= needed_h {
        let left = (anchor.left - popover.width - gap).max(margin);
        (Side::Left, left, centered_y(center, popover, &container, margin))
    } else {
        // Nothing fits: bottom, pulled up as far as the margin allows.
        let top = (anchor.bottom() + gap).min(far_top);
        (Side::Bottom, centered_x(center, popover, &container, margin), top)
    };

    let arrow_offset = if side.is_vertical() {
        arrow(center.x - left, popover.width)
    } else {
        arrow(center.y - top, popover.height)
    };

    Placement {
        side,
        left,
        top,
        arrow_offset,
    }
}

fn centered_x(center: Point, popover: Size, container: &Rect, margin: f64) -> f64 {
    clamp_low(
        center.x - popover.width / 2.0,
        margin,
        container.width - popover.width - margin,
    )
}

fn centered_y(center: Point, popover: Size, container: &Rect, margin: f64) -> f64 {
    clamp_low(
        center.y - popover.height / 2.0,
        margin,
        container.height - popover.height - margin,
    )
}

fn arrow(center_offset: f64, extent: f64) -> f64 {
    clamp_low(center_offset - ARROW_HALF, ARROW_MIN, extent - ARROW_FAR_INSET)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONTAINER: Rect = Rect::new(100.0, 100.0, 400.0, 300.0);
    const POPOVER: Size = Size::new(200.0, 100.0);

    fn anchor_at(x: f64, y: f64) -> Rect {
        // 20x20 marker centred on a container-local point
        Rect::new(CONTAINER.left + x - 10.0, CONTAINER.top + y - 10.0, 20.0, 20.0)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn prefers_top_when_room_above() {
        let placement = place(&PlacementInput::new(CONTAINER, anchor_at(200.0, 200.0), POPOVER));
        assert_eq!(placement.side, Side::Top);
        // anchor top is 190, minus height and gap
        assert!(approx(placement.top, 190.0 - 100.0 - GAP));
        assert!(approx(placement.left, 100.0));
    }

    #[test]
    fn bottom_when_more_room_below() {
        let placement = place(&PlacementInput::new(CONTAINER, anchor_at(200.0, 130.0), POPOVER));
        assert_eq!(placement.side, Side::Bottom);
        assert!(approx(placement.top, 140.0 + GAP));
    }

    #[test]
    fn top_wins_ties_with_bottom() {
        let container = Rect::new(0.0, 0.0, 400.0, 400.0);
        let anchor = Rect::new(190.0, 190.0, 20.0, 20.0);
        let placement = place(&PlacementInput::new(container, anchor, POPOVER));
        assert_eq!(placement.side, Side::Top);
    }

    #[test]
    fn right_when_no_vertical_room() {
        let container = Rect::new(0.0, 0.0, 600.0, 150.0);
        let anchor = Rect::new(90.0, 65.0, 20.0, 20.0);
        let placement = place(&PlacementInput::new(container, anchor, POPOVER));
        assert_eq!(placement.side, Side::Right);
        assert!(approx(placement.left, 110.0 + GAP));
        // centred on y = 75
        assert!(approx(placement.top, 25.0));
    }

    #[test]
    fn left_when_only_left_has_room() {
        let container = Rect::new(0.0, 0.0, 600.0, 150.0);
        let anchor = Rect::new(490.0, 65.0, 20.0, 20.0);
        let placement = place(&PlacementInput::new(container, anchor, POPOVER));
        assert_eq!(placement.side, Side::Left);
        assert!(approx(placement.left, 490.0 - 200.0 - GAP));
    }

    #[test]
    fn falls_back_to_clamped_bottom() {
        let container = Rect::new(0.0, 0.0, 220.0, 120.0);
        let anchor = Rect::new(100.0, 50.0, 20.0, 20.0);
        let placement = place(&PlacementInput::new(container, anchor, POPOVER));
        assert_eq!(placement.side, Side::Bottom);
        // min(70 + 12, 120 - 100 - 16)
        assert!(approx(placement.top, 4.0));
        assert!(approx(placement.left, MARGIN));
    }

    #[test]
    fn main_axis_stays_inside_margin() {
        // The centre has exactly enough room above; the anchor's top edge does not.
        let container = Rect::new(0.0, 0.0, 400.0, 240.0);
        let anchor = Rect::new(190.0, 118.0, 20.0, 20.0);
        let placement = place(&PlacementInput::new(container, anchor, POPOVER));
        assert_eq!(placement.side, Side::Top);
        assert!(approx(placement.top, MARGIN));

        // Same on the far side: room below the centre, not below the edge.
        let anchor = Rect::new(190.0, 98.0, 20.0, 20.0);
        let placement = place(&PlacementInput::new(container, anchor, POPOVER));
        assert_eq!(placement.side, Side::Bottom);
        assert!(approx(placement.top + POPOVER.height, container.height - MARGIN));

        let container = Rect::new(0.0, 0.0, 440.0, 150.0);
        let anchor = Rect::new(222.0, 65.0, 20.0, 20.0);
        let placement = place(&PlacementInput::new(container, anchor, POPOVER));
        assert_eq!(placement.side, Side::Left);
        assert!(approx(placement.left, MARGIN));
    }

    #[test]
    fn horizontal_offset_clamped_to_margin() {
        let placement = place(&PlacementInput::new(CONTAINER, anchor_at(20.0, 250.0), POPOVER));
        assert_eq!(placement.side, Side::Top);
        assert!(approx(placement.left, MARGIN));

        let placement = place(&PlacementInput::new(CONTAINER, anchor_at(390.0, 250.0), POPOVER));
        assert!(approx(placement.left, 400.0 - 200.0 - MARGIN));
    }

    #[test]
    fn arrow_points_at_anchor_center() {
        let placement = place(&PlacementInput::new(CONTAINER, anchor_at(200.0, 250.0), POPOVER));
        // popover spans 100..300, centre 200, arrow box starts 6px before it
        assert!(approx(placement.arrow_offset, 100.0 - ARROW_HALF));
    }

    #[test]
    fn arrow_clamped_near_edges() {
        let near_left = place(&PlacementInput::new(CONTAINER, anchor_at(16.0, 250.0), POPOVER));
        assert!(approx(near_left.arrow_offset, ARROW_MIN));

        let near_right = place(&PlacementInput::new(CONTAINER, anchor_at(399.0, 250.0), POPOVER));
        assert!(approx(near_right.arrow_offset, POPOVER.width - ARROW_FAR_INSET));
    }

    #[test]
    fn deterministic_for_fixed_input() {
        let input = PlacementInput::new(CONTAINER, anchor_at(123.0, 234.0), POPOVER);
        assert_eq!(place(&input), place(&input));
    }

    #[test]
    fn styles_follow_side() {
        let placement = Placement {
            side: Side::Left,
            left: 10.0,
            top: 20.0,
            arrow_offset: 30.0,
        };
        assert_eq!(placement.popover_style(), "left: 10px; top: 20px;");
        assert_eq!(placement.arrow_style(), "top: 30px;");
        assert_eq!(placement.side.to_string(), "left");
    }

    #[test]
    fn viewport_rect_adds_container_origin() {
        let placement = Placement {
            side: Side::Top,
            left: 110.0,
            top: 48.0,
            arrow_offset: 94.0,
        };
        assert_eq!(
            placement.viewport_rect(&CONTAINER, POPOVER),
            Rect::new(210.0, 148.0, 200.0, 100.0)
        );
    }
}
