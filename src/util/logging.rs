//! Logging setup using `tracing` and `tracing-subscriber`.
//!
//! The filter defaults to `port_cargo_form=info` and can be overridden with
//! `RUST_LOG`, e.g. `RUST_LOG=port_cargo_form=debug` to see load generations
//! and discarded stale results.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "port_cargo_form=info";

pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_target(false))
        .try_init();

    if let Err(err) = result {
        eprintln!("logging already initialised: {err}");
    }
}
