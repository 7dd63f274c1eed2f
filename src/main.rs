//! a cpu fan, temperature, and throttle sampler.
//!
//! takes one reading and exits. logs go to stderr and are filtered by `RUST_LOG`.

use {
    thermlog::{App, Error, config::Config},
    tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt},
};

fn main() -> Result<(), Error> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "thermlog=info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    App::new(Config::new())
        .run()
        .inspect_err(|error| tracing::error!(%error, "sampling failed"))
        .map(drop)
}
