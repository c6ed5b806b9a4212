//! Test helpers for popover interaction tests.
//!
//! [`VirtualTimeline`] plays the part of the UI: it applies every effect the
//! machine returns to a [`PopoverView`], keeps scheduled grace timers on a
//! virtual clock, and fires them when time is advanced.

use std::time::Duration;

use crate::popover::{Effect, InputEvent, PopoverMachine, TimerId};
use crate::render::PopoverView;
use crate::target::{TargetId, TargetSet};

/// The two targets of the map fixture.
pub(crate) const SAMPLE_TARGETS: &str = r#"
[[target]]
id = "t1"
title = "Sheriff Callahan"
label = "Sheriff Callahan"
x = 50
y = 50
address = "325 Colton Rd"
work = "County Sheriff"
notes = "Keeps irregular hours."

[[target]]
id = "t2"
title = "Mayor O’Connell"
x = 60
y = 50
address = "3540 Maple Ave"
work = "City Hall"
notes = "Security detail Mon–Fri."
"#;

pub(crate) fn sample_targets() -> TargetSet {
    TargetSet::from_toml_str(SAMPLE_TARGETS).expect("sample targets should parse")
}

pub(crate) fn id(value: &str) -> TargetId {
    TargetId::from(value)
}

pub(crate) fn ms(value: u64) -> Duration {
    Duration::from_millis(value)
}

/// Machine plus view driven on a virtual clock.
pub(crate) struct VirtualTimeline {
    pub machine: PopoverMachine,
    pub view: PopoverView,
    pub placed: Vec<TargetId>,
    targets: TargetSet,
    now: Duration,
    timers: Vec<(Duration, TimerId)>,
}

impl VirtualTimeline {
    pub(crate) fn new() -> Self {
        Self {
            machine: PopoverMachine::new(),
            view: PopoverView::default(),
            placed: Vec::new(),
            targets: sample_targets(),
            now: Duration::ZERO,
            timers: Vec::new(),
        }
    }

    /// Feed one event and apply its effects. Invariants are checked after
    /// every transition.
    pub(crate) fn dispatch(&mut self, event: InputEvent) {
        let effects = self.machine.handle(event);
        for effect in effects {
            self.apply(effect);
        }
        self.machine
            .state()
            .check_invariants()
            .expect("state invariants should hold");
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::Render(target) => {
                let target = self.targets.get(&target).expect("rendered target exists");
                self.view.render(target);
            }
            Effect::Place(target) => self.placed.push(target),
            Effect::Hide => self.view.hide(),
            Effect::StartTimer(timer) => self.timers.push((self.now + timer.delay, timer.id)),
            Effect::CancelTimer(timer) => self.timers.retain(|(_, id)| *id != timer),
        }
    }

    /// Move the clock forward, firing due timers in order.
    pub(crate) fn advance(&mut self, by: Duration) {
        let end = self.now + by;
        while let Some(index) = self.next_due(end) {
            let (due, timer) = self.timers.remove(index);
            self.now = due;
            self.dispatch(InputEvent::GraceExpired(timer));
        }
        self.now = end;
    }

    fn next_due(&self, end: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, (due, _))| *due <= end)
            .min_by_key(|(_, (due, _))| *due)
            .map(|(index, _)| index)
    }

    pub(crate) fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub(crate) fn is_visible(&self) -> bool {
        !self.view.is_hidden()
    }
}
