//! Status bar with the wall clock.

use castle_core::clock::{format_hhmm, TICK};
use chrono::Timelike;
use dioxus::prelude::*;

fn now_hhmm() -> String {
    let now = chrono::Local::now();
    format_hhmm(now.hour(), now.minute())
}

/// Top status bar. The clock refreshes on a fixed tick.
#[component]
pub fn StatusBar() -> Element {
    let mut clock = use_signal(now_hhmm);

    use_future(move || async move {
        loop {
            tokio::time::sleep(TICK).await;
            clock.set(now_hhmm());
        }
    });

    rsx! {
        div {
            class: "status",
            span { class: "callsign", "The Castle" }
            span { class: "clock", id: "clock", "{clock}" }
        }
    }
}
