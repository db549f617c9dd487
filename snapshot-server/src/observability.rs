//! Logging initialization.

use std::env;

use tracing::Level;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{EnvFilter, prelude::*};

use crate::config::Config;

/// Initializes the `tracing` subscriber, writing to stderr.
pub fn init_tracing(config: &Config) {
    let (level, env_filter) = parse_rust_log(&config.logging.level);

    let format = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true);

    tracing_subscriber::registry()
        .with(format.with_filter(LevelFilter::from(level)))
        .with(env_filter)
        .init();
}

fn parse_rust_log(default_level: &str) -> (Level, EnvFilter) {
    // Try to parse RUST_LOG as a simple level filter and apply default levels
    // internally. Otherwise, use it literally if the user knows which
    // overrides they want to run.
    let level = match env::var(EnvFilter::DEFAULT_ENV) {
        Ok(value) => match value.parse::<Level>() {
            Ok(level) => level,
            Err(_) => return (Level::TRACE, EnvFilter::new(value)),
        },
        Err(_) => default_level.parse().unwrap_or(Level::INFO),
    };

    // This is the maximum verbosity that will be logged, we filter this down
    // to `level`.
    let env_filter = EnvFilter::new(
        "INFO,\
        tower_http=TRACE,\
        snapshot_server=TRACE,\
        snapshot_service=TRACE,\
        ",
    );

    (level, env_filter)
}
