//! Opt-in log output for hosts that have no subscriber of their own.

/// Env var read for filter directives before falling back to `RUST_LOG`.
pub const LOG_FILTER_ENV: &str = "CYBERSHIELD_LOG";

/// Crate events at `info` and above, everything else at `warn`.
pub const DEFAULT_LOG_FILTER: &str = "warn,cybershield_dashboard=info";

/// Installs a compact fmt subscriber for the dashboard's `tracing` events.
///
/// Filter directives come from `CYBERSHIELD_LOG`, then `RUST_LOG`, then
/// [`DEFAULT_LOG_FILTER`]. Returns `false` without the `telemetry` feature or
/// when a global subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_env(LOG_FILTER_ENV)
            .or_else(|_| EnvFilter::try_from_default_env())
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok()
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
