//! Process-wide tracing setup for the CLI.
//!
//! Events go to stderr so stdout stays reserved for the view model.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

pub const LOG_ENV: &str = "SHIPMENT_RISK_VIEW_LOG";
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Explicit flag, then `SHIPMENT_RISK_VIEW_LOG`, then `warn`.
#[must_use]
pub fn resolve_directive(flag: Option<&str>) -> String {
    choose_directive(flag, std::env::var(LOG_ENV).ok().as_deref())
}

fn choose_directive(flag: Option<&str>, env: Option<&str>) -> String {
    [flag, env]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|directive| !directive.is_empty())
        .unwrap_or(DEFAULT_DIRECTIVE)
        .to_string()
}

/// Unparseable directives fall back to the default level.
#[must_use]
pub fn filter_for(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Returns `false` when one is already set,
/// which happens when `run` is invoked more than once in a process.
pub fn init(flag: Option<&str>, json: bool) -> bool {
    let directive = resolve_directive(flag);
    let registry = tracing_subscriber::registry().with(filter_for(&directive));
    let installed = if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };
    installed.is_ok()
}
