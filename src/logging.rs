//! Logging setup
//!
//! All diagnostics go through `tracing`. `RUST_LOG` is honored; verbose mode
//! additionally turns on the `zabbix` target, which carries every outbound
//! API request and response.

use crate::api::transport::LOG_TARGET;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::EnvFilter;

/// Build the filter for the given verbosity
pub fn filter(verbose: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();

    if !verbose {
        return filter;
    }
    match format!("{LOG_TARGET}=debug").parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// Install the global subscriber writing to stderr
///
/// Does nothing if a subscriber is already installed.
pub fn init(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter(verbose))
        .with_writer(std::io::stderr)
        .try_init();
}
