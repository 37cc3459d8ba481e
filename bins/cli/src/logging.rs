//! Tracing subscriber setup.

use fieldset_config::{LogFormat, LogSettings};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Install the global subscriber. Events go to stderr so stdout stays
/// machine-readable.
///
/// `--no-progress` silences logging entirely. A second call is a no-op.
pub fn init_tracing(log: &LogSettings, no_progress: bool) {
    let directive = if no_progress { "off" } else { log.level.as_str() };
    let filter = EnvFilter::new(directive);
    let registry = tracing_subscriber::registry().with(filter);

    let installed = match log.format {
        LogFormat::Json => registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Text => registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init(),
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
