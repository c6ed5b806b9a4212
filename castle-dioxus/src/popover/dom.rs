//! Webview side of the popover: measuring, scrolling and icons.

use std::rc::Rc;

use castle_core::render::IconMaterializer;
use castle_core::viewport::ScrollPort;
use castle_core::{Rect, Size};
use dioxus::html::geometry::PixelsRect;
use dioxus::prelude::*;

/// Script that reports window resizes over the eval channel.
pub(crate) const RESIZE_LISTENER: &str = r"
    window.addEventListener('resize', () => dioxus.send(true));
    await new Promise(() => {});
";

/// Script that reports location hash changes over the eval channel.
pub(crate) const HASH_LISTENER: &str = r"
    window.addEventListener('hashchange', () => dioxus.send(location.hash));
    await new Promise(() => {});
";

/// Scrolls the webview window.
pub struct WindowScroll;

impl ScrollPort for WindowScroll {
    fn scroll_by(&self, dx: f64, dy: f64, smooth: bool) {
        let behavior = if smooth { "smooth" } else { "auto" };
        document::eval(&format!(
            "window.scrollBy({{ left: {dx}, top: {dy}, behavior: '{behavior}' }});"
        ));
    }
}

/// Replaces `data-lucide` placeholders with SVG glyphs.
///
/// Does nothing when the lucide script failed to load.
pub struct LucideIcons;

impl IconMaterializer for LucideIcons {
    fn materialize(&self) {
        document::eval(
            "if (window.lucide && typeof window.lucide.createIcons === 'function') { window.lucide.createIcons(); }",
        );
    }
}

pub(crate) fn to_rect(rect: PixelsRect) -> Rect {
    Rect::new(rect.origin.x, rect.origin.y, rect.size.width, rect.size.height)
}

/// Viewport-relative box of a mounted element.
pub(crate) async fn measure(element: &Rc<MountedData>) -> Option<Rect> {
    match element.get_client_rect().await {
        Ok(rect) => Some(to_rect(rect)),
        Err(err) => {
            log::warn!("Failed to measure element: {err:?}");
            None
        }
    }
}

/// Inner size of the window.
pub(crate) async fn viewport_size() -> Option<Size> {
    let value = document::eval("return [window.innerWidth, window.innerHeight];")
        .await
        .ok()?;
    parse_viewport(value)
}

fn parse_viewport(value: serde_json::Value) -> Option<Size> {
    let (width, height) = serde_json::from_value::<(f64, f64)>(value).ok()?;
    (width > 0.0 && height > 0.0).then_some(Size::new(width, height))
}
