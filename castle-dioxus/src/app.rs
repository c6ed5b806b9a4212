//! Main application component.
//!
//! Owns the current screen and shot mode, provides the popover controller,
//! and routes the document-level events: Escape, the shot-mode shortcut, and
//! clicks or touches that may land outside the popover.

use castle_core::{InputEvent, OpenMode, Point, Screen};
use dioxus::prelude::*;

use crate::components::{
    AreaScreen, BottomNav, Dashboard, Manifesto, MapScreen, Messages, StatusBar,
};
use crate::popover::dom::{HASH_LISTENER, RESIZE_LISTENER};
use crate::popover::{use_popover_provider, PopoverController};
use crate::AppState;

/// `s` with meta, shift or alt toggles screenshot mode.
fn is_shot_toggle(key: &str, meta: bool, shift: bool, alt: bool) -> bool {
    key.eq_ignore_ascii_case("s") && (meta || shift || alt)
}

/// Make `screen` the location hash without adding history noise when it
/// already is.
fn sync_hash(screen: Screen) {
    let hash = screen.hash();
    document::eval(&format!(
        "if (location.hash !== '{hash}') {{ location.hash = '{hash}'; }}"
    ));
}

/// Classify a click or touch point and feed it to the machine.
///
/// Only a click-opened popover reacts to outside hits, so nothing is
/// measured otherwise.
fn route_pointer(controller: PopoverController, point: Point, touch: bool) {
    if controller.mode() != OpenMode::Click {
        return;
    }
    spawn(async move {
        let hit = controller.classify(point).await;
        log::debug!("Pointer at ({}, {}) hit {hit:?}", point.x, point.y);
        let event = if touch {
            InputEvent::Touch(hit)
        } else {
            InputEvent::Click(hit)
        };
        controller.dispatch(event);
    });
}

/// Main application component.
#[component]
pub fn App() -> Element {
    let app_state = use_context::<AppState>();
    let controller = use_popover_provider(app_state.targets.clone());

    let startup = app_state.startup;
    let mut screen = use_signal(|| startup.screen);
    let mut shot = use_signal(|| startup.shot);

    // Auto-focus the app container on mount
    use_effect(|| {
        document::eval(
            r"
            requestAnimationFrame(() => {
                const container = document.querySelector('.app');
                if (container) {
                    container.focus();
                }
            });
        ",
        );
    });

    // An existing hash wins over the startup screen; afterwards the hash
    // drives the screen.
    use_future(move || async move {
        let initial = document::eval("return location.hash;")
            .await
            .ok()
            .and_then(|value| value.as_str().map(str::to_string))
            .unwrap_or_default();
        if initial.is_empty() {
            sync_hash(startup.screen);
        } else {
            screen.set(Screen::from_hash(&initial));
        }

        let mut changes = document::eval(HASH_LISTENER);
        while let Ok(hash) = changes.recv::<String>().await {
            let next = Screen::from_hash(&hash);
            if *screen.peek() != next {
                log::info!("Navigated to {next}");
                screen.set(next);
            }
        }
    });

    // One window resize listener for the app's lifetime; the machine ignores
    // resizes while nothing is open.
    use_future(move || async move {
        let mut resize = document::eval(RESIZE_LISTENER);
        while resize.recv::<serde_json::Value>().await.is_ok() {
            controller.dispatch(InputEvent::Resize);
        }
    });

    // Any screen change takes the popover's map away.
    use_effect(move || {
        let current = screen();
        log::debug!("Showing {current}");
        controller.dispatch(InputEvent::Dismiss);
    });

    let onkeydown = move |evt: KeyboardEvent| match evt.key() {
        Key::Escape => controller.dispatch(InputEvent::Escape),
        Key::Character(ref c) => {
            let modifiers = evt.modifiers();
            if is_shot_toggle(c, modifiers.meta(), modifiers.shift(), modifiers.alt()) {
                let next = !shot();
                log::info!("Screenshot mode {}", if next { "on" } else { "off" });
                shot.set(next);
                evt.prevent_default();
            }
        }
        _ => {}
    };

    let onclick = move |evt: MouseEvent| {
        let coordinates = evt.client_coordinates();
        route_pointer(controller, Point::new(coordinates.x, coordinates.y), false);
    };

    let ontouchstart = move |evt: TouchEvent| {
        if let Some(touch) = evt.touches().first() {
            let coordinates = touch.client_coordinates();
            route_pointer(controller, Point::new(coordinates.x, coordinates.y), true);
        }
    };

    let current = screen();

    rsx! {
        document::Title { "The Castle - {current.title()}" }

        div {
            class: if shot() { "app shot" } else { "app" },
            tabindex: 0,
            onkeydown,
            onclick,
            ontouchstart,

            StatusBar {}

            {match current {
                Screen::Dashboard => rsx! { Dashboard {} },
                Screen::Manifesto => rsx! { Manifesto {} },
                Screen::Map => rsx! { MapScreen {} },
                Screen::Map2 => rsx! { AreaScreen {} },
                Screen::Messages => rsx! { Messages {} },
            }}

            BottomNav {
                current,
                on_navigate: move |next: Screen| {
                    screen.set(next);
                    sync_hash(next);
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shot_toggle_needs_a_modifier() {
        assert!(is_shot_toggle("s", true, false, false));
        assert!(is_shot_toggle("S", false, true, false));
        assert!(is_shot_toggle("s", false, false, true));
        assert!(!is_shot_toggle("s", false, false, false));
        assert!(!is_shot_toggle("d", true, true, true));
    }
}
