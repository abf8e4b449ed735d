//! Telemetry helpers for hosts embedding `preview-chart`.
//!
//! The engine only emits `tracing` events; installing a subscriber is left to
//! the host. These helpers exist for demos and tests that want readable output
//! without wiring their own subscriber.

/// Installs a compact `tracing` subscriber filtered by `RUST_LOG`, falling back
/// to `info` when the variable is unset or invalid.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber is already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default_filter("info")
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive,
/// for example `"preview_chart=trace"` when inspecting gridline pushes.
#[must_use]
pub fn init_tracing_with_default_filter(default_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = default_directive;
        false
    }
}
