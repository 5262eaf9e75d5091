//! Telemetry helpers for applications embedding `chart-projection`.
//!
//! The crate only emits `tracing` events, under the `chart_projection` target.
//! Range changes are logged at `debug`: `visible records changed` from the
//! date scale and `visible values changed` from each value scale. Scroll and
//! zoom steps are `trace`, and panel or viewport changes on the chart are
//! `debug`. Hosts either call `init_default_tracing` or wire their own
//! subscriber and filters (`RUST_LOG=chart_projection=debug`).

/// Initializes a compact `tracing` subscriber when the `telemetry` feature is enabled.
///
/// The filter is read from `RUST_LOG` and falls back to `info`.
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(true)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
