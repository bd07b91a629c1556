//! Console logging for the CLI.
//!
//! Logs go to stderr so command output on stdout stays machine readable.
//! `RUST_LOG` takes precedence over the configured `log.level`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

pub fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(filter);

    // A subscriber may already be installed when embedded
    let _ = tracing_subscriber::registry().with(console_layer).try_init();
}
