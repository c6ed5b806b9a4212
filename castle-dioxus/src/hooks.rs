//! Custom Dioxus hooks for Castle components.

use std::sync::Arc;

use castle_core::TargetSet;
use dioxus::prelude::*;

use crate::popover::PopoverController;
use crate::AppState;

/// Get the popover controller provided by the app root.
#[must_use]
pub fn use_popover() -> PopoverController {
    use_context::<PopoverController>()
}

/// Get the targets shown on the map screens.
#[must_use]
pub fn use_targets() -> Arc<TargetSet> {
    use_context::<AppState>().targets
}
