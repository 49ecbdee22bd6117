use log::{debug, error, info, warn};
use std::sync::Once;
use std::time::{Duration, Instant};

static INIT: Once = Once::new();

/// Install the global logger once. `RUST_LOG` overrides the defaults below.
pub fn init_logger() {
    INIT.call_once(|| {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Info)
            .filter_module("manga_hub_lib", log::LevelFilter::Debug)
            .filter_module("reqwest", log::LevelFilter::Warn) // Reduce HTTP noise
            .filter_module("hyper", log::LevelFilter::Warn)
            .filter_module("tokio", log::LevelFilter::Warn)
            .parse_default_env()
            .format_timestamp_secs()
            .format_target(false)
            .format_module_path(false)
            .init();

        debug!("Logging system initialized");
    });
}

/// Structured logging helpers for common patterns
pub struct LogContext;

impl LogContext {
    /// One upstream request; `duration_ms` is `None` when the request starts
    pub fn api_call(source: &str, endpoint: &str, status: &str, duration_ms: Option<u64>) {
        match duration_ms {
            Some(duration) => info!("API: {} {} {} in {}ms", source, endpoint, status, duration),
            None => debug!("API: Starting {} {}", source, endpoint),
        }
    }

    /// An adapter gave up on an operation and degraded to an empty result
    pub fn upstream_failure(source: &str, operation: &str, error: &dyn std::error::Error) {
        error!("{} {} failed: {}", source, operation, error);
    }

    /// An adapter skipped an operation it cannot serve as configured
    pub fn source_unavailable(source: &str, operation: &str, reason: &str) {
        warn!("{} {}: {}", source, operation, reason);
    }

    /// Per-source counts of one fan-out and the merged size
    pub fn aggregation(operation: &str, contributions: &[(&str, usize)], merged: usize) {
        let parts: Vec<String> = contributions
            .iter()
            .map(|(source, count)| format!("{}={}", source, count))
            .collect();
        info!(
            "Aggregate: {} merged {} results ({})",
            operation,
            merged,
            parts.join(", ")
        );
    }
}

/// Logs the elapsed time of an aggregation step when finished
pub struct TimedOperation {
    start: Instant,
    operation: &'static str,
}

impl TimedOperation {
    pub fn new(operation: &'static str) -> Self {
        debug!("Starting: {}", operation);
        Self {
            start: Instant::now(),
            operation,
        }
    }

    pub fn finish(self) -> Duration {
        let elapsed = self.start.elapsed();
        info!("Performance: {} took {}ms", self.operation, elapsed.as_millis());
        elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logger_is_idempotent() {
        init_logger();
        init_logger();
    }

    #[test]
    fn test_timed_operation_reports_elapsed() {
        let timer = TimedOperation::new("noop");
        std::thread::sleep(Duration::from_millis(5));
        assert!(timer.finish() >= Duration::from_millis(5));
    }
}
