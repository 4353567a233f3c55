//! Telemetry helpers for applications embedding `waterfall-rs`.
//!
//! Layout passes emit `tracing` events (`debug!` per update cycle, `trace!`
//! for per-item detail). This module only wires an optional default
//! subscriber; hosts are free to install their own instead.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when initialization succeeds.
/// Returns `false` when no initialization is performed (feature disabled) or if a
/// global subscriber was already set by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let builder = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
            )
            .with_target(false)
            .compact();

        return builder.try_init().is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::init_default_tracing;

    #[test]
    fn second_initialization_is_a_no_op() {
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
    }
}
