//! Subscriber setup for binaries and tests embedding the library

use std::env;

/// Install a global fmt subscriber.
///
/// `level` becomes the default directive for the agrocast crates; a
/// non-empty `RUST_LOG` replaces it entirely. If a global subscriber is
/// already set this does nothing.
pub fn init_tracing(level: &str, json: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default_directive = format!(
        "agrocast={level},demand_forecast={level},supply_ledger={level}",
        level = level
    );
    let directive = env::var("RUST_LOG")
        .ok()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(default_directive);

    let filter = EnvFilter::new(directive);
    if json {
        let _ = fmt().with_env_filter(filter).json().try_init();
    } else {
        let _ = fmt().with_env_filter(filter).try_init();
    }
}

/// [`init_tracing`] with the output format picked by the `json-logs` feature
pub fn init_default_tracing(level: &str) {
    init_tracing(level, cfg!(feature = "json-logs"));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeated_init_is_harmless() {
        init_tracing("debug", false);
        init_tracing("info", true);
        init_default_tracing("warn");
        tracing::info!("still logging after repeated init");
    }
}
