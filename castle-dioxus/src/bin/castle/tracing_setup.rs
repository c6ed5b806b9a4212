//! Tracing configuration for the castle binary.
//!
//! Installs one subscriber for both `tracing` events from `castle-core` and
//! `log` records from this crate and Dioxus. Webview chatter (selection
//! changes, pointer moves) is dropped by substring before it is written.
//!
//! Must be initialized BEFORE Dioxus launch to prevent dioxus-logger from
//! setting its own subscriber.

use std::fs::File;
use std::io;
use std::sync::Mutex;

use castle_dioxus::config::LoggingConfig;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::{self, FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Event formatter that drops lines containing any suppressed pattern.
struct SuppressingFormatter {
    inner: fmt::format::Format,
    patterns: Vec<String>,
}

impl SuppressingFormatter {
    fn new(patterns: Vec<String>, ansi: bool) -> Self {
        Self {
            inner: fmt::format::Format::default()
                .with_target(false)
                .with_ansi(ansi),
            patterns,
        }
    }
}

fn is_suppressed(line: &str, patterns: &[String]) -> bool {
    patterns.iter().any(|pattern| line.contains(pattern.as_str()))
}

impl<S, N> FormatEvent<S, N> for SuppressingFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let mut line = String::new();
        self.inner.format_event(ctx, Writer::new(&mut line), event)?;

        if is_suppressed(&line, &self.patterns) {
            return Ok(());
        }
        write!(writer, "{line}")
    }
}

/// Initialize the global subscriber from `LoggingConfig`.
///
/// - `RUST_LOG` takes precedence over the configured level
/// - the configured log file is truncated on start; stderr is used when
///   there is none or it cannot be created
pub fn init(config: &LoggingConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let log_file = config.log_file.as_ref().and_then(|path| match File::create(path) {
        Ok(file) => Some((path, file)),
        Err(err) => {
            eprintln!("Cannot create log file {}: {err}", path.display());
            None
        }
    });

    let (writer, ansi) = match log_file {
        Some((path, file)) => {
            eprintln!("Logging to {}", path.display());
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    let fmt_layer = fmt::layer()
        .with_writer(writer)
        .event_format(SuppressingFormatter::new(
            config.suppressed_patterns.clone(),
            ansi,
        ));

    if let Err(err) = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()
    {
        eprintln!("Tracing already initialized: {err}");
    }
}
