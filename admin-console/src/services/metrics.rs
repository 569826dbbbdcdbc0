//! API call metrics and the Prometheus recorder the binary installs.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::Duration;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Install the process-wide Prometheus recorder.
///
/// Calling it again after a successful install is a no-op. Until it runs,
/// [`record_api_call`] records into the `metrics` no-op recorder.
pub fn init_metrics() -> Result<(), BuildError> {
    if METRICS_HANDLE.get().is_some() {
        return Ok(());
    }

    let handle = PrometheusBuilder::new().install_recorder()?;
    if METRICS_HANDLE.set(handle).is_err() {
        tracing::debug!("Metrics handle already set");
    }
    Ok(())
}

/// Current metrics in Prometheus text format, if a recorder is installed.
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

/// Record one API call. `outcome` is `"ok"` or an error kind label.
pub fn record_api_call(method: &str, outcome: &'static str, elapsed: Duration) {
    let labels = [("method", method.to_string()), ("outcome", outcome.to_string())];
    counter!("console_api_requests_total", &labels).increment(1);
    histogram!("console_api_request_duration_seconds", &labels).record(elapsed.as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn installed_recorder_exposes_api_calls() {
        init_metrics().unwrap();
        init_metrics().unwrap();

        record_api_call("GET", "ok", Duration::from_millis(12));

        let text = render_metrics().unwrap();
        assert!(text.contains("console_api_requests_total"));
        assert!(text.contains(r#"outcome="ok""#));
    }
}
