//! Castle Core - the renderer-free half of The Castle front-end
//!
//! Everything in here is plain data and pure functions so it can be driven
//! directly from tests, without a webview:
//!
//! - [`placement`]: choose the popover side and offsets around an anchor
//! - [`viewport`]: compute the scroll needed to keep popover and anchor visible
//! - [`popover`]: the hover/click interaction state machine and its timers
//! - [`render`]: popover content built from a target's data record
//! - [`target`]: target records and their loading from TOML
//! - [`route`]: screen ids for the hash router
//! - [`clock`]: the status bar clock text
//!
//! ## Flow
//!
//! 1. The UI translates a DOM event into a [`popover::InputEvent`]
//! 2. [`popover::PopoverMachine::handle`] applies the transition and returns
//!    the [`popover::Effect`]s to perform
//! 3. The UI paints [`render::PopoverContent`], materializes icons, measures
//!    the popover and calls [`placement::place`]
//! 4. [`viewport::reconcile`] turns the result into a scroll request

pub mod clock;
pub mod geometry;
pub mod placement;
pub mod popover;
pub mod render;
pub mod route;
pub mod target;
pub mod viewport;

#[cfg(test)]
mod integration_tests;
#[cfg(test)]
mod test_helpers;

pub use geometry::{Point, Rect, Size};
pub use placement::{place, Placement, Side};
pub use popover::{Effect, Hit, InputEvent, OpenMode, PopoverMachine, PopoverState};
pub use render::{PopoverContent, PopoverView};
pub use route::Screen;
pub use target::{Target, TargetId, TargetSet};
pub use viewport::{reconcile, ScrollDelta};
