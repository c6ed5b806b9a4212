//! Entry point for the castle binary.

mod args;
mod tracing_setup;

use anyhow::Result;

fn main() -> Result<()> {
    // Load castle.toml
    let config = castle_dioxus::CastleConfig::load_default().unwrap_or_else(|err| {
        eprintln!("Warning: failed to load castle.toml: {err:#}");
        eprintln!("Using default configuration");
        castle_dioxus::CastleConfig::default()
    });

    // Set up tracing subscriber BEFORE Dioxus to prevent dioxus-logger from setting its own.
    tracing_setup::init(&config.logging);

    // Command-line flags override the file
    let cli = args::parse_args();
    let config = cli.apply(config);

    log::info!("Starting castle on {}", cli.startup.screen);

    // Grace timers and the clock sleep on tokio
    let runtime = tokio::runtime::Runtime::new()?;
    let _guard = runtime.enter();

    castle_dioxus::launch(config, cli.startup)
}
