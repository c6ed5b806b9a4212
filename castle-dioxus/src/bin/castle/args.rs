//! Command-line argument parsing.
//!
//! ```text
//! castle [--screen <id>] [--shot] [--map-image <path>] [--center <lat,lng>]
//!        [--zoom <n>] [--targets <file>]
//! ```
//!
//! Flags accept `--flag value` and `--flag=value`. Bad values are logged and
//! ignored so the app still starts.

use std::path::PathBuf;

use castle_core::Screen;
use castle_dioxus::{CastleConfig, MapCenter, StartupOptions};

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub startup: StartupOptions,
    pub map_image: Option<String>,
    pub center: Option<MapCenter>,
    pub zoom: Option<f64>,
    pub targets: Option<PathBuf>,
}

impl CliArgs {
    /// Override `config` with the flags that were given.
    pub fn apply(&self, mut config: CastleConfig) -> CastleConfig {
        if let Some(image) = &self.map_image {
            config = config.with_map_image(image.clone());
        }
        if let Some(center) = self.center {
            config = config.with_map_center(center);
        }
        if let Some(zoom) = self.zoom {
            config = config.with_map_zoom(zoom);
        }
        if let Some(targets) = &self.targets {
            config = config.with_targets_file(targets.clone());
        }
        config
    }
}

/// Parse the process arguments.
pub fn parse_args() -> CliArgs {
    parse_from(std::env::args().skip(1))
}

fn parse_from(args: impl IntoIterator<Item = String>) -> CliArgs {
    let mut cli = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let (flag, inline) = match arg.split_once('=') {
            Some((flag, value)) if flag.starts_with("--") => (flag.to_string(), Some(value.to_string())),
            _ => (arg, None),
        };

        if flag == "--shot" {
            cli.startup.shot = inline.as_deref().is_none_or(|value| value != "0");
            continue;
        }

        if !matches!(
            flag.as_str(),
            "--screen" | "--map-image" | "--center" | "--zoom" | "--targets"
        ) {
            log::warn!("Ignoring unknown argument: {flag}");
            continue;
        }

        let Some(value) = inline.or_else(|| args.next()) else {
            log::warn!("Missing value for {flag}");
            continue;
        };

        match flag.as_str() {
            "--screen" => match Screen::from_id(value.trim_start_matches('#')) {
                Some(screen) => cli.startup.screen = screen,
                None => log::warn!("Unknown screen {value:?}, starting on the dashboard"),
            },
            "--map-image" => cli.map_image = Some(value),
            "--center" => match MapCenter::parse(&value) {
                Some(center) => cli.center = Some(center),
                None => log::warn!("Invalid --center {value:?}, expected lat,lng"),
            },
            "--zoom" => match value.parse::<f64>() {
                Ok(zoom) if zoom.is_finite() && zoom > 0.0 => cli.zoom = Some(zoom),
                _ => log::warn!("Invalid --zoom {value:?}"),
            },
            "--targets" => cli.targets = Some(PathBuf::from(value)),
            _ => {}
        }
    }

    cli
}
