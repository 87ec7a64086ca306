//! Prometheus metrics for command dispatch.
//!
//! - `bot_command_total{command}` - handler calls by command
//! - `bot_command_duration_seconds{command}` - callback latency histogram
//! - `bot_command_errors_total{command,error}` - failed dispatches by error code
//! - `bot_access_denied_total{command}` - permission denials
//!
//! Nothing is recorded until [`init`] has run.

use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};
use std::sync::OnceLock;

/// Registry for all bot metrics.
pub static REGISTRY: OnceLock<Registry> = OnceLock::new();

pub fn registry() -> &'static Registry {
    REGISTRY.get_or_init(Registry::new)
}

// ========================================================================
// Counters
// ========================================================================

/// Handler calls, by registry key.
pub static COMMAND_COUNTER: OnceLock<IntCounterVec> = OnceLock::new();

/// Dispatch errors by command and error code.
pub static COMMAND_ERRORS: OnceLock<IntCounterVec> = OnceLock::new();

/// Access denials by command.
pub static ACCESS_DENIED: OnceLock<IntCounterVec> = OnceLock::new();

// ========================================================================
// Histograms
// ========================================================================

/// Callback latency by command.
pub static COMMAND_LATENCY: OnceLock<HistogramVec> = OnceLock::new();

/// Initialize the metrics registry.
///
/// Safe to call more than once; later calls do nothing.
pub fn init() {
    let r = registry();

    macro_rules! register {
        ($metric:ident, $init:expr) => {
            if $metric.get().is_none() {
                match $init {
                    Ok(m) => {
                        if let Err(e) = r.register(Box::new(m.clone())) {
                            tracing::warn!(error = %e, concat!("Failed to register metric ", stringify!($metric)));
                        }
                        let _ = $metric.set(m);
                    }
                    Err(e) => {
                        tracing::error!(error = %e, concat!("Failed to create metric ", stringify!($metric)));
                    }
                }
            }
        };
    }

    register!(COMMAND_COUNTER, IntCounterVec::new(Opts::new("bot_command_total", "Chat command handler calls by command"), &["command"]));
    register!(COMMAND_LATENCY, HistogramVec::new(
        HistogramOpts::new("bot_command_duration_seconds", "Chat command latency by command")
            .buckets(vec![0.00005, 0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0]),
        &["command"]));
    register!(COMMAND_ERRORS, IntCounterVec::new(Opts::new("bot_command_errors_total", "Chat command errors by command and kind"), &["command", "error"]));
    register!(ACCESS_DENIED, IntCounterVec::new(Opts::new("bot_access_denied_total", "Chat commands denied for missing permissions"), &["command"]));
}

/// Gather all metrics and encode them in Prometheus text format.
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = registry().gather();
    let mut buffer = vec![];
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode Prometheus metrics");
        return String::new();
    }
    match String::from_utf8(buffer) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Prometheus metrics were not valid UTF-8");
            String::new()
        }
    }
}

// ============================================================================
// Recording helpers
// ============================================================================

/// Record a handler call with latency.
#[inline]
pub fn record_command(command: &str, duration_secs: f64) {
    if let Some(c) = COMMAND_COUNTER.get() {
        c.with_label_values(&[command]).inc();
    }
    if let Some(h) = COMMAND_LATENCY.get() {
        h.with_label_values(&[command]).observe(duration_secs);
    }
}

/// Record a dispatch error.
#[inline]
pub fn record_command_error(command: &str, error: &str) {
    if let Some(c) = COMMAND_ERRORS.get() {
        c.with_label_values(&[command, error]).inc();
    }
}

/// Record a permission denial.
#[inline]
pub fn record_denied(command: &str) {
    if let Some(c) = ACCESS_DENIED.get() {
        c.with_label_values(&[command]).inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_lifecycle() {
        init();
        init();

        record_command("PING", 0.001);
        record_command_error("ECHO", "internal_error");
        record_denied("OPER");

        let output = gather_metrics();
        assert!(output.contains("bot_command_total"));
        assert!(output.contains("bot_command_errors_total"));
        assert!(output.contains("bot_access_denied_total"));
    }
}
