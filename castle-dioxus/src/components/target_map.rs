//! Map with target markers and the popover.
//!
//! Markers translate pointer, focus and click events into popover input
//! events. Clicks on a marker stop there; clicks anywhere else bubble to the
//! app root, which classifies them geometrically.

use castle_core::{Hit, InputEvent, Target};
use dioxus::prelude::*;

use crate::components::Popover;
use crate::hooks::{use_popover, use_targets};

/// Image with absolutely positioned target markers, plus the popover.
#[component]
pub fn TargetMap(image: String, #[props(!optional)] hud: Option<String>) -> Element {
    let controller = use_popover();
    let targets = use_targets();

    rsx! {
        div {
            class: "map-wrap",
            onmounted: move |evt: MountedEvent| controller.set_container(evt.data()),
            onmouseleave: move |_| controller.dispatch(InputEvent::ContainerLeave),

            img { class: "map-image", src: "{image}", alt: "", draggable: "false" }

            if let Some(hud) = hud {
                div { class: "hud", "aria-hidden": "true", "{hud}" }
            }

            div {
                class: "targets",
                for target in targets.iter() {
                    TargetMarker { key: "{target.id}", target: target.clone() }
                }
            }

            Popover {}
        }
    }
}

#[component]
fn TargetMarker(target: Target) -> Element {
    let controller = use_popover();
    let style = target.marker_style();

    let id = target.id.clone();
    let onmounted = move |evt: MountedEvent| controller.set_anchor(id.clone(), evt.data());
    let id = target.id.clone();
    let onmouseenter =
        move |_: MouseEvent| controller.dispatch(InputEvent::TargetEnter(id.clone()));
    let id = target.id.clone();
    let onpointerenter =
        move |_: PointerEvent| controller.dispatch(InputEvent::TargetEnter(id.clone()));
    let id = target.id.clone();
    let onmousemove =
        move |_: MouseEvent| controller.dispatch(InputEvent::PointerMove(Hit::Target(id.clone())));
    let id = target.id.clone();
    let onfocusin = move |_: FocusEvent| controller.dispatch(InputEvent::TargetFocus(id.clone()));
    let id = target.id.clone();
    let onmouseleave =
        move |_: MouseEvent| controller.dispatch(InputEvent::TargetLeave(id.clone()));
    let id = target.id.clone();
    let onclick = move |evt: MouseEvent| {
        evt.stop_propagation();
        controller.dispatch(InputEvent::Click(Hit::Target(id.clone())));
    };

    rsx! {
        button {
            class: "target",
            r#type: "button",
            style: "{style}",
            "data-id": "{target.id}",
            "aria-label": "{target.title}",
            onmounted,
            onmouseenter,
            onpointerenter,
            onmousemove,
            onfocusin,
            onmouseleave,
            onclick,
        }
    }
}
