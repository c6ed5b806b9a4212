//! Castle Dioxus - the desktop front-end of The Castle
//!
//! A Dioxus desktop app with a handful of hash-routed screens. The map
//! screens show target markers; hovering, focusing or clicking a marker opens
//! a single popover with the target's details, placed around the marker and
//! scrolled into view. All interaction rules live in `castle-core`; this
//! crate translates DOM events into core input events and performs the
//! effects the core hands back.
//!
//! ## Quick Start
//!
//! ```no_run
//! use castle_dioxus::{CastleConfig, StartupOptions};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = CastleConfig::load_default()?;
//!     let runtime = tokio::runtime::Runtime::new()?;
//!     let _guard = runtime.enter();
//!     castle_dioxus::launch(config, StartupOptions::default())
//! }
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use castle_core::{Screen, TargetSet};

pub mod components;
pub mod config;
pub mod hooks;
pub mod popover;

mod app;

pub use config::{CastleConfig, MapCenter, MapConfig};

/// Stylesheet and icon script for the webview head.
const CUSTOM_HEAD: &str = include_str!("../assets/head.html");

/// Targets shown when no targets file is configured.
const BUNDLED_TARGETS: &str = include_str!("../assets/targets.toml");

/// Area map drawn behind the targets when no map image is configured.
const BUNDLED_MAP_SVG: &str = include_str!("../assets/map-area.svg");

/// The bundled area map as a `data:` URI, usable as an `img` source without
/// any asset lookup.
pub fn bundled_map_image() -> String {
    let mut uri = String::from("data:image/svg+xml;utf8,");
    for ch in BUNDLED_MAP_SVG.chars() {
        match ch {
            '%' => uri.push_str("%25"),
            '#' => uri.push_str("%23"),
            '"' => uri.push_str("%22"),
            '<' => uri.push_str("%3C"),
            '>' => uri.push_str("%3E"),
            '\n' | '\r' | '\t' => uri.push(' '),
            _ => uri.push(ch),
        }
    }
    uri
}

/// Command-line choices that only apply to one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StartupOptions {
    /// Screen shown first, unless the page already carries a hash.
    pub screen: Screen,
    /// Start with the chrome hidden for screenshots.
    pub shot: bool,
}

/// Application state shared with Dioxus through context.
#[derive(Clone)]
pub struct AppState {
    pub targets: Arc<TargetSet>,
    pub map: MapConfig,
    pub startup: StartupOptions,
}

fn bundled_targets() -> TargetSet {
    TargetSet::from_toml_str(BUNDLED_TARGETS).unwrap_or_else(|err| {
        log::error!("Bundled targets do not parse: {err}");
        TargetSet::default()
    })
}

/// Load the configured targets file, or the bundled targets.
///
/// A targets file that cannot be read or parsed is logged and replaced by
/// the bundled set.
pub fn load_targets(map: &MapConfig) -> TargetSet {
    let targets = match &map.targets {
        Some(path) => match TargetSet::load(path)
            .with_context(|| format!("loading targets from {}", path.display()))
        {
            Ok(targets) => targets,
            Err(err) => {
                log::error!("{err:#}; showing the bundled targets");
                bundled_targets()
            }
        },
        None => bundled_targets(),
    };
    if targets.is_empty() {
        log::warn!("No targets to show on the map");
    } else {
        log::info!("Loaded {} targets", targets.len());
    }
    targets
}

/// Launch the Dioxus desktop application.
///
/// Before calling this, ensure a Tokio runtime is active (via
/// `Runtime::enter()`); grace timers and the clock sleep on it.
pub fn launch(config: CastleConfig, startup: StartupOptions) -> Result<()> {
    let targets = load_targets(&config.map);

    let app_state = AppState {
        targets: Arc::new(targets),
        map: config.map.clone(),
        startup,
    };

    dioxus::LaunchBuilder::desktop()
        .with_cfg(
            dioxus::desktop::Config::new()
                .with_window(
                    dioxus::desktop::WindowBuilder::new()
                        .with_title(&config.window.title)
                        .with_inner_size(dioxus::desktop::LogicalSize::new(
                            config.window.width,
                            config.window.height,
                        )),
                )
                .with_custom_head(CUSTOM_HEAD.to_string()),
        )
        .with_context(app_state)
        .launch(app::App);

    Ok(())
}
