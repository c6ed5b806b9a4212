//! Integration tests for popover interaction and layout.
//!
//! These drive the state machine, the view and the layout functions together
//! on a virtual clock, the way the UI does with real events.

use crate::geometry::{Point, Rect, Size};
use crate::placement::{place, PlacementInput, Side, GAP};
use crate::popover::{Hit, InputEvent, OpenMode, POPOVER_LEAVE_GRACE, TARGET_LEAVE_GRACE};
use crate::render::{IconMaterializer, PopoverContent};
use crate::test_helpers::{id, ms, sample_targets, VirtualTimeline};
use crate::viewport::{reconcile, ScrollDelta};

// --- Opening and closing ---

#[test]
fn at_most_one_popover_open() {
    let mut timeline = VirtualTimeline::new();
    let events = [
        InputEvent::TargetEnter(id("t1")),
        InputEvent::TargetEnter(id("t2")),
        InputEvent::Click(Hit::Target(id("t1"))),
        InputEvent::Click(Hit::Target(id("t2"))),
        InputEvent::TargetEnter(id("t1")),
        InputEvent::Click(Hit::Target(id("t2"))),
        InputEvent::Click(Hit::Outside),
        InputEvent::TargetEnter(id("t2")),
    ];
    for event in events {
        timeline.dispatch(event);
        let state = timeline.machine.state();
        // A single Option slot, open exactly when the mode says so.
        assert_eq!(state.open_for.is_some(), state.mode != OpenMode::Closed);
        assert_eq!(state.open_for.is_some(), timeline.is_visible());
    }
}

#[test]
fn hover_open_closes_after_target_grace() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::TargetEnter(id("t1")));
    assert!(timeline.is_visible());

    timeline.dispatch(InputEvent::TargetLeave(id("t1")));
    timeline.advance(TARGET_LEAVE_GRACE - ms(1));
    assert!(timeline.is_visible(), "still open inside the grace window");

    timeline.advance(ms(2));
    assert!(!timeline.is_visible(), "closed once the grace window elapsed");
    assert_eq!(timeline.pending_timers(), 0);
}

#[test]
fn entering_popover_cancels_grace() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::TargetEnter(id("t1")));
    timeline.dispatch(InputEvent::TargetLeave(id("t1")));
    timeline.advance(ms(100));
    assert!(timeline.is_visible());

    timeline.dispatch(InputEvent::PopoverEnter);
    timeline.advance(ms(10_000));
    assert!(timeline.is_visible(), "popover stays while the pointer is on it");

    timeline.dispatch(InputEvent::PopoverLeave);
    timeline.advance(POPOVER_LEAVE_GRACE - ms(1));
    assert!(timeline.is_visible());
    timeline.advance(ms(1));
    assert!(!timeline.is_visible());
}

#[test]
fn reentering_target_survives_old_timer() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::TargetEnter(id("t1")));
    timeline.dispatch(InputEvent::TargetLeave(id("t1")));
    timeline.advance(ms(50));
    timeline.dispatch(InputEvent::TargetEnter(id("t1")));
    timeline.advance(ms(500));
    assert!(timeline.is_visible());
    assert!(timeline.machine.hover_inside());
}

#[test]
fn moving_between_targets_keeps_single_timer() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::TargetEnter(id("t1")));
    timeline.dispatch(InputEvent::TargetLeave(id("t1")));
    timeline.dispatch(InputEvent::PopoverEnter);
    timeline.dispatch(InputEvent::PopoverLeave);
    assert_eq!(timeline.pending_timers(), 1);

    timeline.dispatch(InputEvent::TargetEnter(id("t2")));
    assert_eq!(timeline.pending_timers(), 0);
    assert_eq!(timeline.view.content().title, "Mayor O’Connell");
    assert_eq!(timeline.placed, [id("t1"), id("t2")]);
}

#[test]
fn outside_click_closes_click_mode_only() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::Click(Hit::Target(id("t1"))));
    assert!(timeline.is_visible());
    timeline.dispatch(InputEvent::Click(Hit::Outside));
    assert!(!timeline.is_visible());

    timeline.dispatch(InputEvent::TargetEnter(id("t1")));
    timeline.dispatch(InputEvent::Click(Hit::Outside));
    assert!(timeline.is_visible(), "hover-opened popover ignores outside clicks");
    assert_eq!(timeline.machine.mode(), OpenMode::Hover);
}

#[test]
fn leaving_container_closes_without_grace() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::TargetEnter(id("t1")));
    timeline.dispatch(InputEvent::ContainerLeave);
    assert!(!timeline.is_visible());
    assert_eq!(timeline.pending_timers(), 0);
}

#[test]
fn resize_places_current_anchor_again() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::Click(Hit::Target(id("t2"))));
    timeline.dispatch(InputEvent::Resize);
    timeline.dispatch(InputEvent::Resize);
    assert_eq!(timeline.placed, [id("t2"), id("t2"), id("t2")]);
}

#[test]
fn resize_after_navigating_away_and_back_places_once() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::Click(Hit::Target(id("t1"))));
    // leaving the map screen
    timeline.dispatch(InputEvent::Dismiss);
    timeline.dispatch(InputEvent::Resize);
    assert_eq!(timeline.placed, [id("t1")]);

    timeline.dispatch(InputEvent::Click(Hit::Target(id("t2"))));
    timeline.dispatch(InputEvent::Resize);
    assert_eq!(timeline.placed, [id("t1"), id("t2"), id("t2")]);
}

#[test]
fn dismiss_closes_and_keeps_content() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::Click(Hit::Target(id("t1"))));
    timeline.dispatch(InputEvent::Dismiss);
    assert!(!timeline.is_visible());
    assert_eq!(timeline.view.content().title, "Sheriff Callahan");
}

// --- Rendering ---

#[test]
fn rows_render_values_without_labels() {
    let mut timeline = VirtualTimeline::new();
    timeline.dispatch(InputEvent::Click(Hit::Target(id("t1"))));
    let text = timeline.view.content().text();
    assert!(text.contains("325 Colton Rd"));
    assert!(text.contains("County Sheriff"));
    assert!(text.contains("Keeps irregular hours."));
    for label in ["Address:", "Work:", "Notes:"] {
        assert!(!text.contains(label), "unexpected label {label}");
    }
}

#[test]
fn icon_materializer_is_safe_without_placeholders() {
    struct Counting(std::cell::Cell<usize>);
    impl IconMaterializer for Counting {
        fn materialize(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    let icons = Counting(std::cell::Cell::new(0));
    let targets = sample_targets();
    let sheriff = targets.get(&id("t1")).expect("t1 exists");
    let content = PopoverContent::for_target(sheriff);
    icons.materialize();
    icons.materialize();
    assert_eq!(icons.0.get(), 2);
    assert_eq!(content.rows.len(), 3);
}

// --- Layout ---

#[test]
fn placement_centers_above_anchor() {
    let container = Rect::new(100.0, 100.0, 400.0, 300.0);
    let anchor = Rect::new(300.0, 260.0, 20.0, 20.0);
    let size = Size::new(200.0, 100.0);
    let placement = place(&PlacementInput::new(container, anchor, size));

    assert_eq!(placement.side, Side::Top);

    let anchor_center_x = anchor.center().x - container.left;
    let popover_center_x = placement.left + size.width / 2.0;
    assert!((popover_center_x - anchor_center_x).abs() <= 4.0);

    let popover_bottom = placement.top + size.height;
    let anchor_top = anchor.top - container.top;
    assert!((anchor_top - popover_bottom - GAP).abs() < 0.5);
}

#[test]
fn reconciliation_is_idempotent() {
    let viewport = Size::new(800.0, 600.0);
    let popover = Rect::new(650.0, -30.0, 200.0, 100.0);
    let anchor = Point::new(720.0, 100.0);

    let first = reconcile(&popover, anchor, viewport);
    assert!(!first.is_zero());

    // Scrolling moves everything the opposite way in viewport coordinates.
    let popover = first.apply_to(&popover);
    let anchor = Point::new(anchor.x - first.dx, anchor.y - first.dy);
    assert_eq!(reconcile(&popover, anchor, viewport), ScrollDelta::ZERO);
}
