use colored::*;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::format::{self, Writer};
use tracing_subscriber::registry::LookupSpan;

/// `[+]` lines are the run summary and stay bare. Everything else names the
/// module it came from, so a data-quality warning points at the adapter that
/// raised it.
pub struct HostrankFormatter;

impl<S, N> FormatEvent<S, N> for HostrankFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> format::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let level: Level = *meta.level();

        let (symbol, color_func): (&str, fn(ColoredString) -> ColoredString) = match level {
            Level::TRACE => ("[ ]", |s| s.dimmed()),
            Level::DEBUG => ("[?]", |s| s.blue()),
            Level::INFO => ("[+]", |s| s.green().bold()),
            Level::WARN => ("[*]", |s| s.yellow().bold()),
            Level::ERROR => ("[-]", |s| s.red().bold()),
        };

        write!(writer, "{} ", color_func(symbol.into()))?;
        if level != Level::INFO {
            write!(writer, "{} ", format!("{}:", source(meta.target())).as_str().dimmed())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}

/// Last path segment of a tracing target: `hostrank_core::ingest::tabular` -> `tabular`.
fn source(target: &str) -> &str {
    target.rsplit("::").next().unwrap_or(target)
}

/// Installs the global subscriber. Logs go to stderr; stdout carries the matrix.
///
/// `RUST_LOG` wins over `verbosity` when set.
pub fn init_logging(verbosity: u8) {
    let filter: EnvFilter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbosity > 0 {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .event_format(HostrankFormatter)
        .with_writer(std::io::stderr)
        .init();
}
