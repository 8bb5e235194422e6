//! Prometheus metrics for the flag API.

use std::time::Duration;

use ::metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};

pub const REQUESTS_TOTAL: &str = "flag_requests_total";
pub const RATE_LIMITED_TOTAL: &str = "flag_rate_limited_total";
pub const CACHE_HITS_TOTAL: &str = "flag_cache_hits_total";
pub const CACHE_MISSES_TOTAL: &str = "flag_cache_misses_total";
pub const RENDER_ERRORS_TOTAL: &str = "flag_render_errors_total";
pub const RENDER_DURATION_MS: &str = "flag_render_duration_ms";

/// Install the global Prometheus recorder and describe every metric.
pub fn install_recorder() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;

    describe_counter!(REQUESTS_TOTAL, "Requests to /generate");
    describe_counter!(RATE_LIMITED_TOTAL, "Requests refused by the rate limiter");
    describe_counter!(CACHE_HITS_TOTAL, "Flags served from the render cache");
    describe_counter!(CACHE_MISSES_TOTAL, "Flags rendered on demand");
    describe_counter!(RENDER_ERRORS_TOTAL, "Renders that failed");
    describe_histogram!(RENDER_DURATION_MS, Unit::Milliseconds, "Time to draw and encode a flag");

    Ok(handle)
}

pub fn record_request() {
    counter!(REQUESTS_TOTAL).increment(1);
}

pub fn record_rate_limited() {
    counter!(RATE_LIMITED_TOTAL).increment(1);
}

pub fn record_cache(hit: bool) {
    if hit {
        counter!(CACHE_HITS_TOTAL).increment(1);
    } else {
        counter!(CACHE_MISSES_TOTAL).increment(1);
    }
}

pub fn record_render_error() {
    counter!(RENDER_ERRORS_TOTAL).increment(1);
}

pub fn record_render_duration(elapsed: Duration) {
    histogram!(RENDER_DURATION_MS).record(elapsed.as_secs_f64() * 1000.0);
}
