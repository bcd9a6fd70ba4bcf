#![forbid(unsafe_code)]

//! Tracing subscriber bootstrap for hosts and demos.
//!
//! The filter is read from `REEL_LOG` (standard `EnvFilter` syntax) and
//! defaults to `info`. Installing twice is not an error; the second call
//! returns `false`.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "REEL_LOG";

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install a JSON-lines subscriber. Returns `false` if one was already set.
pub fn init_json() -> bool {
    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().json().with_current_span(true))
        .try_init()
        .is_ok()
}

/// Install a human-readable subscriber. Returns `false` if one was already set.
pub fn init_pretty() -> bool {
    tracing_subscriber::registry()
        .with(filter())
        .with(fmt::layer().with_target(false))
        .try_init()
        .is_ok()
}
