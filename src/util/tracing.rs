use std::io::stderr;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[cfg(debug_assertions)]
const FMT_PRETTY: bool = true;

#[cfg(not(debug_assertions))]
const FMT_PRETTY: bool = false;

// HTTP internals are only interesting at info and above,
// even when debugging relup itself with RUST_LOG=debug
const QUIET_TARGETS: [&str; 5] = ["reqwest", "rustls", "hyper", "hyper_util", "h2"];

pub fn init() {
    let mut tracing_env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    for target in QUIET_TARGETS {
        if let Ok(directive) = format!("{target}=info").parse() {
            tracing_env_filter = tracing_env_filter.add_directive(directive);
        }
    }

    if FMT_PRETTY {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_env_filter)
            .with_writer(stderr)
            .pretty()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_env_filter)
            .with_writer(stderr)
            .with_target(false)
            .without_time()
            .init();
    }
}
