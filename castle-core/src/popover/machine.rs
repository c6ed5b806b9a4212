//! Interaction state machine for the target popover.
//!
//! The machine owns which target the popover is open for, whether it was
//! opened by hover or click, and the hover grace timer. Each input event is
//! applied synchronously and the machine answers with the [`Effect`]s the UI
//! has to carry out. It never touches the DOM itself.

use std::time::Duration;

use tracing::debug;

use super::hit::Hit;
use super::timer::{GraceSlot, GraceTimer, TimerId, POPOVER_LEAVE_GRACE, TARGET_LEAVE_GRACE};
use crate::target::TargetId;

/// How the popover is currently open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    #[default]
    Closed,
    Hover,
    Click,
}

/// Inputs the UI feeds into the machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// Pointer entered a target (`mouseenter`/`pointerenter`).
    TargetEnter(TargetId),
    /// Focus moved into a target.
    TargetFocus(TargetId),
    /// Pointer left a target.
    TargetLeave(TargetId),
    /// Pointer or focus entered the popover body (`mouseenter`, `mouseover`,
    /// `pointerenter`, `pointerover`, `focusin`).
    PopoverEnter,
    /// Pointer left the popover body.
    PopoverLeave,
    /// Pointer moved inside the anchor container.
    PointerMove(Hit),
    /// Pointer left the anchor container entirely.
    ContainerLeave,
    /// Click anywhere on the page, classified by hit testing.
    Click(Hit),
    /// Touch start anywhere on the page.
    Touch(Hit),
    /// Escape key.
    Escape,
    /// The popover must go away regardless of mode, e.g. the map screen was left.
    Dismiss,
    /// The window was resized.
    Resize,
    /// A grace timer elapsed.
    GraceExpired(TimerId),
}

/// Side effects requested by a transition, in the order they must run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fill the popover with this target's content and show it.
    Render(TargetId),
    /// Measure and position the popover against this target.
    Place(TargetId),
    /// Hide the popover.
    Hide,
    /// Schedule a grace timer; report back with [`InputEvent::GraceExpired`].
    StartTimer(GraceTimer),
    /// Drop a previously scheduled timer.
    CancelTimer(TimerId),
}

/// Snapshot of the interaction state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PopoverState {
    pub open_for: Option<TargetId>,
    pub mode: OpenMode,
    pub hover_inside: bool,
    pub grace_timer: Option<GraceTimer>,
}

impl PopoverState {
    /// Check the structural invariants of the state.
    ///
    /// # Errors
    ///
    /// Returns a description of the first violated invariant.
    pub fn check_invariants(&self) -> Result<(), &'static str> {
        if (self.mode == OpenMode::Closed) != self.open_for.is_none() {
            return Err("mode is Closed exactly when no target is open");
        }
        if self.grace_timer.is_some() && self.mode != OpenMode::Hover {
            return Err("grace timer only pending in hover mode");
        }
        Ok(())
    }
}

/// The popover interaction state machine.
#[derive(Debug, Default)]
pub struct PopoverMachine {
    open_for: Option<TargetId>,
    mode: OpenMode,
    hover_inside: bool,
    grace: GraceSlot,
}

impl PopoverMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_for(&self) -> Option<&TargetId> {
        self.open_for.as_ref()
    }

    pub fn mode(&self) -> OpenMode {
        self.mode
    }

    pub fn is_open(&self) -> bool {
        self.open_for.is_some()
    }

    pub fn hover_inside(&self) -> bool {
        self.hover_inside
    }

    pub fn pending_timer(&self) -> Option<GraceTimer> {
        self.grace.pending()
    }

    pub fn state(&self) -> PopoverState {
        PopoverState {
            open_for: self.open_for.clone(),
            mode: self.mode,
            hover_inside: self.hover_inside,
            grace_timer: self.grace.pending(),
        }
    }

    /// Apply one input event and return the effects to perform.
    pub fn handle(&mut self, event: InputEvent) -> Vec<Effect> {
        let mut effects = Vec::new();
        let before = self.mode;

        match event {
            InputEvent::TargetEnter(id) => self.on_target_enter(id, &mut effects),
            InputEvent::TargetFocus(_) | InputEvent::PopoverEnter => {
                if self.mode == OpenMode::Hover {
                    self.engage(&mut effects);
                }
            }
            InputEvent::TargetLeave(id) => {
                if self.mode == OpenMode::Hover && self.open_for.as_ref() == Some(&id) {
                    self.disengage(TARGET_LEAVE_GRACE, &mut effects);
                }
            }
            InputEvent::PopoverLeave => {
                if self.mode == OpenMode::Hover {
                    self.disengage(POPOVER_LEAVE_GRACE, &mut effects);
                }
            }
            InputEvent::PointerMove(hit) => {
                if self.mode == OpenMode::Hover && self.is_engaging(&hit) {
                    self.engage(&mut effects);
                }
            }
            InputEvent::ContainerLeave => {
                if self.mode == OpenMode::Hover {
                    self.close(&mut effects);
                }
            }
            InputEvent::Click(hit) => self.on_click(hit, &mut effects),
            InputEvent::Touch(hit) => {
                if self.mode == OpenMode::Click && hit.is_outside_engagement() {
                    self.close(&mut effects);
                }
            }
            InputEvent::Escape | InputEvent::Dismiss => {
                if self.is_open() {
                    self.close(&mut effects);
                }
            }
            InputEvent::Resize => {
                if let Some(id) = &self.open_for {
                    effects.push(Effect::Place(id.clone()));
                }
            }
            InputEvent::GraceExpired(timer) => self.on_grace_expired(timer, &mut effects),
        }

        if before != self.mode {
            debug!(from = ?before, to = ?self.mode, open_for = ?self.open_for, "popover transition");
        }
        effects
    }

    fn on_target_enter(&mut self, id: TargetId, effects: &mut Vec<Effect>) {
        match self.mode {
            OpenMode::Closed => {
                self.hover_inside = true;
                self.open(id, OpenMode::Hover, effects);
            }
            OpenMode::Hover => {
                self.engage(effects);
                if self.open_for.as_ref() != Some(&id) {
                    self.open(id, OpenMode::Hover, effects);
                }
            }
            // A click-opened popover stays put until clicked away.
            OpenMode::Click => {}
        }
    }

    fn on_click(&mut self, hit: Hit, effects: &mut Vec<Effect>) {
        match hit {
            Hit::Target(id) => {
                if self.mode == OpenMode::Click && self.open_for.as_ref() == Some(&id) {
                    self.close(effects);
                } else {
                    self.hover_inside = false;
                    self.open(id, OpenMode::Click, effects);
                }
            }
            Hit::Popover => {}
            Hit::Container | Hit::Outside => {
                if self.mode == OpenMode::Click {
                    self.close(effects);
                }
            }
        }
    }

    fn on_grace_expired(&mut self, timer: TimerId, effects: &mut Vec<Effect>) {
        if !self.grace.fire(timer) {
            debug!(%timer, "ignoring stale grace timer");
            return;
        }
        // The state may have moved on between scheduling and firing.
        if self.mode == OpenMode::Hover && !self.hover_inside {
            self.close(effects);
        }
    }

    fn is_engaging(&self, hit: &Hit) -> bool {
        match hit {
            Hit::Popover => true,
            Hit::Target(id) => self.open_for.as_ref() == Some(id),
            Hit::Container | Hit::Outside => false,
        }
    }

    /// Open (or switch) the popover to `id` in `mode`.
    ///
    /// Content is only rebuilt when the target actually changes.
    fn open(&mut self, id: TargetId, mode: OpenMode, effects: &mut Vec<Effect>) {
        if mode != OpenMode::Hover {
            self.cancel_timer(effects);
        }
        self.mode = mode;
        if self.open_for.as_ref() != Some(&id) {
            self.open_for = Some(id.clone());
            effects.push(Effect::Render(id.clone()));
            effects.push(Effect::Place(id));
        }
    }

    fn close(&mut self, effects: &mut Vec<Effect>) {
        self.cancel_timer(effects);
        self.open_for = None;
        self.mode = OpenMode::Closed;
        self.hover_inside = false;
        effects.push(Effect::Hide);
    }

    fn engage(&mut self, effects: &mut Vec<Effect>) {
        self.hover_inside = true;
        self.cancel_timer(effects);
    }

    fn disengage(&mut self, delay: Duration, effects: &mut Vec<Effect>) {
        self.hover_inside = false;
        let (timer, previous) = self.grace.start(delay);
        if let Some(previous) = previous {
            effects.push(Effect::CancelTimer(previous.id));
        }
        effects.push(Effect::StartTimer(timer));
    }

    fn cancel_timer(&mut self, effects: &mut Vec<Effect>) {
        if let Some(timer) = self.grace.cancel() {
            effects.push(Effect::CancelTimer(timer.id));
        }
    }
}
