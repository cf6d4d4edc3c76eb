//! Metrics collection and Prometheus integration service.

use prometheus::{
    CounterVec, Gauge, Histogram, HistogramOpts, HistogramVec, IntGauge, Opts, Registry,
    TextEncoder,
};
use std::time::{Duration, Instant};

/// Application metrics collector for Prometheus integration
#[derive(Clone)]
pub struct AppMetrics {
    pub registry: Registry,
    pub http_requests_total: CounterVec,
    pub http_request_duration_seconds: HistogramVec,
    pub http_requests_in_flight: IntGauge,
    pub app_uptime_seconds: Gauge,
    pub weather_upstream_requests_total: CounterVec,
    pub weather_upstream_duration_seconds: Histogram,
    pub weather_tracked_locations: IntGauge,
    pub start_time: Instant,
}

impl AppMetrics {
    /// Create a new metrics collector with its own registry
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        // HTTP request counter by method, status, and route
        let http_requests_total = CounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "status", "route"],
        )?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "http_request_duration_seconds",
                "HTTP request duration in seconds",
            )
            .buckets(vec![
                0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0,
            ]),
            &["method", "route"],
        )?;

        let http_requests_in_flight = IntGauge::new(
            "http_requests_in_flight",
            "HTTP requests currently being served",
        )?;

        let app_uptime_seconds = Gauge::new("app_uptime_seconds", "Application uptime in seconds")?;

        // Upstream provider calls by outcome
        let weather_upstream_requests_total = CounterVec::new(
            Opts::new(
                "weather_upstream_requests_total",
                "Total weather provider requests by outcome",
            ),
            &["outcome"],
        )?;

        let weather_upstream_duration_seconds = Histogram::with_opts(
            HistogramOpts::new(
                "weather_upstream_duration_seconds",
                "Weather provider request duration in seconds",
            )
            .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 15.0]),
        )?;

        let weather_tracked_locations = IntGauge::new(
            "weather_tracked_locations",
            "Distinct location buckets seen since startup",
        )?;

        registry.register(Box::new(http_requests_total.clone()))?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;
        registry.register(Box::new(http_requests_in_flight.clone()))?;
        registry.register(Box::new(app_uptime_seconds.clone()))?;
        registry.register(Box::new(weather_upstream_requests_total.clone()))?;
        registry.register(Box::new(weather_upstream_duration_seconds.clone()))?;
        registry.register(Box::new(weather_tracked_locations.clone()))?;

        Ok(Self {
            registry,
            http_requests_total,
            http_request_duration_seconds,
            http_requests_in_flight,
            app_uptime_seconds,
            weather_upstream_requests_total,
            weather_upstream_duration_seconds,
            weather_tracked_locations,
            start_time: Instant::now(),
        })
    }

    /// Record an HTTP request with method, route, status, and duration
    pub fn record_request(&self, method: &str, route: &str, status: u16, duration: Duration) {
        if route == "/api/metrics" {
            // Scrapes would otherwise dominate the request counts
            return;
        }

        self.http_requests_total
            .with_label_values(&[method, &status.to_string(), route])
            .inc();

        self.http_request_duration_seconds
            .with_label_values(&[method, route])
            .observe(duration.as_secs_f64());
    }

    /// Count a request as in flight until the returned guard is dropped
    pub fn start_request(&self) -> InFlightGuard {
        self.http_requests_in_flight.inc();
        InFlightGuard {
            gauge: self.http_requests_in_flight.clone(),
        }
    }

    /// Record one call to the weather provider
    pub fn record_upstream(&self, outcome: &str, duration: Duration) {
        self.weather_upstream_requests_total
            .with_label_values(&[outcome])
            .inc();
        self.weather_upstream_duration_seconds
            .observe(duration.as_secs_f64());
    }

    pub fn set_tracked_locations(&self, count: usize) {
        self.weather_tracked_locations
            .set(i64::try_from(count).unwrap_or(i64::MAX));
    }

    /// Update the application uptime gauge
    pub fn update_uptime(&self) {
        let uptime = self.start_time.elapsed().as_secs_f64();
        self.app_uptime_seconds.set(uptime);
    }

    /// Render metrics in Prometheus text format
    pub fn render(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        encoder.encode_to_string(&metric_families)
    }
}

/// Decrements the in-flight gauge on drop
pub struct InFlightGuard {
    gauge: IntGauge,
}

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        self.gauge.dec();
    }
}
