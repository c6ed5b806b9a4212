//! Popover interaction: state machine, grace timers and hit testing.

mod hit;
mod machine;
mod timer;

pub use hit::{Hit, SceneGeometry};
pub use machine::{Effect, InputEvent, OpenMode, PopoverMachine, PopoverState};
pub use timer::{GraceTimer, TimerId, POPOVER_LEAVE_GRACE, TARGET_LEAVE_GRACE};
