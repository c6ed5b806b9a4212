//! Screen bodies.

use dioxus::prelude::*;

use crate::components::TargetMap;
use crate::config::MapCenter;
use crate::{bundled_map_image, AppState};

/// Restarts the urgency animation on the newest urgent message.
const PULSE_URGENCY: &str = r"
    const last = document.querySelector('#messages .msg.urgent');
    if (last) {
        last.classList.remove('urgent');
        void last.offsetWidth;
        last.classList.add('urgent');
    }
";

#[component]
pub fn Dashboard() -> Element {
    let targets = crate::hooks::use_targets();
    let count = targets.len();

    rsx! {
        section {
            id: "dashboard",
            class: "screen",
            h1 { "Dashboard" }
            div {
                class: "tiles",
                div { class: "tile", div { class: "label", "Targets" } div { class: "value", "{count}" } }
                div { class: "tile", div { class: "label", "Perimeter" } div { class: "value", "Secure" } }
                div { class: "tile", div { class: "label", "Comms" } div { class: "value", "Nominal" } }
            }
        }
    }
}

#[component]
pub fn Manifesto() -> Element {
    rsx! {
        section {
            id: "manifesto",
            class: "screen",
            h1 { "Manifesto" }
            p { "Hold the line. Keep the lights on. Know every road in and out." }
            p { "Nobody is left outside the walls." }
        }
    }
}

#[component]
pub fn Messages() -> Element {
    use_effect(|| {
        document::eval(PULSE_URGENCY);
    });

    rsx! {
        section {
            id: "messages",
            class: "screen",
            h1 { "Messages" }
            div { class: "msg", div { class: "from", "Gatehouse" } "North gate checked, all quiet." }
            div { class: "msg", div { class: "from", "Supply" } "Generator fuel at 60%." }
            div { class: "msg urgent", div { class: "from", "Watch" } "Movement on Colton Rd. Eyes up." }
        }
    }
}

/// The static target map, on the configured image.
#[component]
pub fn MapScreen() -> Element {
    let map = use_context::<AppState>().map;
    let image = map.image.unwrap_or_else(bundled_map_image);

    rsx! {
        section {
            id: "map",
            class: "screen",
            TargetMap { image, hud: None }
        }
    }
}

/// The area map with a coordinate HUD.
#[component]
pub fn AreaScreen() -> Element {
    let map = use_context::<AppState>().map;
    let hud = hud_text(map.center, map.zoom);

    rsx! {
        section {
            id: "map2",
            class: "screen",
            TargetMap { image: bundled_map_image(), hud: Some(hud) }
        }
    }
}

fn hud_text(center: MapCenter, zoom: f64) -> String {
    format!("{:.4}, {:.4} · z{zoom}", center.lat, center.lng)
}
