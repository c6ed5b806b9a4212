//! Bottom navigation between screens.

use castle_core::Screen;
use dioxus::prelude::*;

/// One button per screen; the current one is marked active.
#[component]
pub fn BottomNav(current: Screen, on_navigate: EventHandler<Screen>) -> Element {
    rsx! {
        nav {
            class: "bottom-nav",
            for screen in Screen::ALL {
                a {
                    key: "{screen}",
                    class: if screen == current { "navbtn active" } else { "navbtn" },
                    href: "{screen.hash()}",
                    "data-nav": screen.id(),
                    onclick: move |evt: MouseEvent| {
                        evt.prevent_default();
                        on_navigate.call(screen);
                    },
                    "{screen.title()}"
                }
            }
        }
    }
}
