//! Tracing subscriber setup: CI-aware console formatter and initialisation.
use tracing_subscriber::EnvFilter;

use crate::constants::GITHUB_ACTIONS_VAR;

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

/// Escape a message for a workflow command (`::warning::<msg>`).
pub(super) fn escape_workflow_data(msg: &str) -> String {
    msg.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Render one event as a console line.
///
/// Inside GitHub Actions, warnings, errors and debug messages become workflow
/// commands so they show up as annotations or in the step debug log.
pub(super) fn render_line(level: tracing::Level, msg: &str, github_actions: bool) -> String {
    match (level, github_actions) {
        (tracing::Level::ERROR, true) => format!("::error::{}", escape_workflow_data(msg)),
        (tracing::Level::WARN, true) => format!("::warning::{}", escape_workflow_data(msg)),
        (tracing::Level::DEBUG | tracing::Level::TRACE, true) => {
            format!("::debug::{}", escape_workflow_data(msg))
        }
        (tracing::Level::ERROR, false) => format!("ERROR {msg}"),
        (tracing::Level::WARN, false) => format!("WARN  {msg}"),
        (tracing::Level::INFO, _) => format!("  {msg}"),
        _ => format!("  [debug] {msg}"),
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] that emits CI-friendly lines.
struct CiFormatter {
    github_actions: bool,
}

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for CiFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        let mut extractor = MessageExtractor::default();
        event.record(&mut extractor);
        let line = render_line(*event.metadata().level(), &extractor.message, self.github_actions);
        writeln!(writer, "{line}")
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Console verbosity is `debug` when `verbose` is set and `info` otherwise;
/// `RUST_LOG` overrides both. Warnings and errors go to stderr, everything
/// else to stdout. Calling this more than once is a no-op.
pub fn init_subscriber(verbose: bool) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _,
    };

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let github_actions = std::env::var(GITHUB_ACTIONS_VAR).is_ok_and(|v| v == "true");

    let make_writer = std::io::stderr
        .with_max_level(tracing::Level::WARN)
        .and(std::io::stdout.with_min_level(tracing::Level::INFO));

    let console_layer = fmt::layer()
        .event_format(CiFormatter { github_actions })
        .with_writer(make_writer)
        .with_filter(filter);

    // Another subscriber may already be installed by the host program.
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
