use tracing::Subscriber;
use tracing_subscriber::fmt::{self, format::DefaultFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "ito_dealer=info";
const VERBOSE_FILTER: &str = "ito_dealer=debug,info";

/// `RUST_LOG` wins over the built-in directives.
fn env_filter(default_directives: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives))
}

/// Round logs carry their own context, so source locations and thread ids are left out.
fn round_fmt_layer<S>() -> fmt::Layer<S, DefaultFields>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
}

pub fn init_cli_logger(verbose: bool) {
    let directives = if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER };

    tracing_subscriber::registry()
        .with(env_filter(directives))
        .with(round_fmt_layer().compact())
        .init();
}

/// JSON lines for hosted deployments where logs are shipped to a collector.
pub fn init_json_logger() {
    tracing_subscriber::registry()
        .with(env_filter(DEFAULT_FILTER))
        .with(round_fmt_layer().json())
        .init();
}

