//! UI components for the Castle.
//!
//! Screens are plain components; the map screens host the target markers and
//! the single popover, which talk to the shared [`crate::popover::PopoverController`].

mod bottom_nav;
mod popover;
mod screens;
mod status_bar;
mod target_map;

pub use bottom_nav::BottomNav;
pub use popover::Popover;
pub use screens::{AreaScreen, Dashboard, Manifesto, MapScreen, Messages};
pub use status_bar::StatusBar;
pub use target_map::TargetMap;
