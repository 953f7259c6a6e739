use netdns_domain::Config;
use netdns_infrastructure::dns::EVENTS_TARGET;
use tracing::Subscriber;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter, Layer};

/// Global subscriber. `RUST_LOG` wins over the configured level.
///
/// Diagnostics go to stderr. Hook lines go to stdout as plain lines and are
/// gated only by the configured hook set.
pub fn init_logging(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.as_str()));

    registry()
        .with(diagnostics_layer(filter, std::io::stderr))
        .with(events_layer(std::io::stdout))
        .init();
}

fn diagnostics_layer<S, W>(filter: EnvFilter, writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let without_events = Targets::new()
        .with_default(LevelFilter::TRACE)
        .with_target(EVENTS_TARGET, LevelFilter::OFF);

    fmt::layer()
        .with_writer(writer)
        .with_filter(filter)
        .with_filter(without_events)
}

fn events_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .without_time()
        .with_level(false)
        .with_target(false)
        .with_ansi(false)
        .with_writer(writer)
        .with_filter(Targets::new().with_target(EVENTS_TARGET, LevelFilter::TRACE))
}
