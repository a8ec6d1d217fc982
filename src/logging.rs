//! Log setup.

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Install the global subscriber.
///
/// Verbosity maps to `info`, `debug` and `trace` for this crate; `RUST_LOG`
/// replaces the directives entirely when set. Logs go to stderr so they
/// interleave with the output of the native build tools.
pub fn configure_logging(verbosity: u8) -> Result<()> {
    let directives = match std::env::var("RUST_LOG") {
        Ok(overrides) => overrides,
        Err(_) => default_directives(verbosity).to_string(),
    };

    let env_filter = tracing_subscriber::filter::EnvFilter::try_new(directives)?;
    let mut fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .without_time();
    if verbosity < 2 {
        fmt_layer = fmt_layer.with_target(false);
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;
    Ok(())
}

fn default_directives(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "mounter_build=info",
        1 => "mounter_build=debug",
        _ => "mounter_build=trace",
    }
}
