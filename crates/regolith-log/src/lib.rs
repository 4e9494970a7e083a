//! Tracing setup shared by the regolith binaries.
//!
//! Console output goes through a human-readable `fmt` layer. Debug builds can
//! additionally write JSON lines to `regolith.log` so a generation run can be
//! inspected after the fact (rock counts, stamp statistics, mesh sizes).

use std::fs::File;
use std::path::Path;

use regolith_config::Config;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "regolith.log";
const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over everything. Otherwise the filter comes from
/// `config.debug.log_level`, falling back to `info`. When `debug_build` is set
/// and `log_dir` can be created, events are also written as JSON to
/// `log_dir/regolith.log`.
///
/// ```no_run
/// use regolith_config::Config;
/// use regolith_log::init_logging;
///
/// let config = Config::default();
/// init_logging(Some(std::path::Path::new("./logs")), true, Some(&config));
/// ```
pub fn init_logging(log_dir: Option<&Path>, debug_build: bool, config: Option<&Config>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| fallback_filter(config));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && std::fs::create_dir_all(log_dir).is_ok()
        && let Ok(log_file) = File::create(log_dir.join(LOG_FILE))
    {
        subscriber.with(json_file_layer(log_file)).init();
        return;
    }

    subscriber.init();
}

/// Filter used when neither `RUST_LOG` nor a config level is set.
pub fn default_env_filter() -> EnvFilter {
    EnvFilter::new(DEFAULT_FILTER)
}

fn configured_level(config: Option<&Config>) -> Option<&str> {
    config
        .map(|config| config.debug.log_level.trim())
        .filter(|level| !level.is_empty())
}

fn fallback_filter(config: Option<&Config>) -> EnvFilter {
    configured_level(config).map_or_else(default_env_filter, EnvFilter::new)
}

fn json_file_layer<S>(file: File) -> impl Layer<S>
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_writer(file)
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::uptime())
        .json()
}
