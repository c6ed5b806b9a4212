//! The single target popover.

use castle_core::{Hit, InputEvent};
use dioxus::prelude::*;

use crate::hooks::use_popover;

/// Popover showing the details of the open target.
///
/// Rows are keyed by icon so an icon placeholder, once swapped for an SVG,
/// is never patched in place.
#[component]
pub fn Popover() -> Element {
    let controller = use_popover();
    let view = controller.view();

    // Place after the render that painted the new content.
    use_effect(move || {
        if let Some(request) = controller.placement_request() {
            spawn(controller.place(request));
        }
    });

    let style = match view.placement() {
        Some(placement) => placement.popover_style(),
        None if view.is_measuring() => "visibility: hidden;".to_string(),
        None => String::new(),
    };
    let arrow_style = view
        .placement()
        .map(|placement| placement.arrow_style())
        .unwrap_or_default();
    let content = view.content();

    rsx! {
        div {
            id: "popover",
            class: "popover",
            role: "dialog",
            "aria-modal": "false",
            "aria-labelledby": "popover-title",
            "aria-hidden": view.aria_hidden(),
            "data-placement": view.data_placement(),
            style: "{style}",
            onmounted: move |evt: MountedEvent| controller.set_popover(evt.data()),
            onmouseenter: move |_| controller.dispatch(InputEvent::PopoverEnter),
            onmouseover: move |_| controller.dispatch(InputEvent::PopoverEnter),
            onpointerenter: move |_| controller.dispatch(InputEvent::PopoverEnter),
            onpointerover: move |_| controller.dispatch(InputEvent::PopoverEnter),
            onfocusin: move |_| controller.dispatch(InputEvent::PopoverEnter),
            onmousemove: move |_| controller.dispatch(InputEvent::PointerMove(Hit::Popover)),
            onmouseleave: move |_| controller.dispatch(InputEvent::PopoverLeave),

            div { class: "popover__arrow", "aria-hidden": "true", style: "{arrow_style}" }
            div { class: "popover__header", id: "popover-title", "{content.title}" }
            div {
                class: "popover__body",
                id: "popover-body",
                for row in content.rows.iter() {
                    div {
                        key: "{row.icon.lucide_name()}",
                        class: "popover__row",
                        i { "data-lucide": row.icon.lucide_name(), "aria-hidden": "true" }
                        span { "{row.value}" }
                    }
                }
            }
        }
    }
}
