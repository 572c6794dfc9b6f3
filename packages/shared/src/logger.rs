//! Tracing subscriber setup shared by every binary.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. When it is unset, `default_level` applies to
/// the calling binary and to the workspace crates, and everything else logs
/// at `warn`.
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let crate_name = bin_name.replace('-', "_");
    let default_directive = format!(
        "warn,{crate_name}={default_level},verdant_server={default_level},verdant_client={default_level},tower_http={default_level}"
    );
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // try_init so that tests and repeated calls do not panic
    if tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .try_init()
        .is_ok()
    {
        tracing::debug!("Logger initialized for {}", bin_name);
    }
}
