//! Status bar clock.

use std::time::Duration;

/// How often the clock text is refreshed.
pub const TICK: Duration = Duration::from_secs(15);

/// Format a wall-clock time as zero-padded `HH:MM`.
pub fn format_hhmm(hour: u32, minute: u32) -> String {
    format!("{hour:02}:{minute:02}")
}
