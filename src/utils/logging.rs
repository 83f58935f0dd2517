//! Logging initialisation
//!
//! JSON lines to stdout and to a daily rolling file under `LOG_DIR`.

use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{
    fmt::{self, time::UtcTime, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::config::LogConfig;

const LOG_FILE_PREFIX: &str = "station-watch.log";
const DEFAULT_FILTER: &str = "info,station_watch=debug";

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the default filter. Keep the returned guard alive
/// for the life of the process or buffered file lines are dropped.
pub fn init_logging(config: &LogConfig) -> WorkerGuard {
    let (file_writer, guard) =
        tracing_appender::non_blocking(rolling::daily(&config.dir, LOG_FILE_PREFIX));

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(json_layer(std::io::stdout))
        .with(json_layer(file_writer))
        .try_init();

    if let Err(err) = installed {
        eprintln!("tracing subscriber not installed: {}", err);
    }

    guard
}

fn json_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .json()
        .with_timer(UtcTime::rfc_3339())
        .with_current_span(true)
        .flatten_event(false)
        .with_ansi(false)
        .with_writer(writer)
}
