use once_cell::sync::Lazy;
use prometheus::{
    opts, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Registry, TextEncoder,
};

macro_rules! counter_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| IntCounterVec::new(opts!($name, $help), $labels).unwrap())
    };
}
macro_rules! histogram_vec {
    ($name:expr, $help:expr, $labels:expr) => {
        Lazy::new(|| {
            HistogramVec::new(
                HistogramOpts::new($name, $help).buckets(LATENCY_BUCKETS.to_vec()),
                $labels,
            )
            .unwrap()
        })
    };
}
macro_rules! counter {
    ($name:expr, $help:expr) => {
        Lazy::new(|| IntCounter::new($name, $help).unwrap())
    };
}
const LATENCY_BUCKETS: [f64; 14] = [
    0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0,
];

// ── HTTP ────────────────────────────────────────────────────────────────────
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = counter_vec!(
    "http_requests_total",
    "Total HTTP requests",
    &["method", "path", "status"]
);
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = histogram_vec!(
    "http_request_duration_seconds",
    "HTTP request latency",
    &["method", "path"]
);

// ── Validation ──────────────────────────────────────────────────────────────
pub static VALIDATION_RUNS_TOTAL: Lazy<IntCounter> =
    counter!("validation_runs_total", "Validation runs executed");
pub static VALIDATION_RUNS_REJECTED: Lazy<IntCounter> = counter!(
    "validation_runs_rejected_total",
    "Validation runs that rejected the request"
);
pub static VALIDATION_FIELD_FAILURES: Lazy<IntCounter> = counter!(
    "validation_field_failures_total",
    "Individual field failures across all validation runs"
);

// ── Database ────────────────────────────────────────────────────────────────
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = histogram_vec!(
    "db_query_duration_seconds",
    "Database query latency",
    &["query"]
);
pub static DB_QUERY_ERRORS: Lazy<IntCounter> =
    counter!("db_query_errors_total", "DB query errors");

// ── Listing ─────────────────────────────────────────────────────────────────
pub static POKEMON_PAGES_SERVED: Lazy<IntCounter> =
    counter!("pokemon_pages_served_total", "Listing pages served");
pub static POKEMON_ROWS_RETURNED: Lazy<IntCounter> =
    counter!("pokemon_rows_returned_total", "Listing rows returned");

pub fn register_all(r: &Registry) -> prometheus::Result<()> {
    r.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    r.register(Box::new(HTTP_REQUEST_DURATION.clone()))?;
    r.register(Box::new(VALIDATION_RUNS_TOTAL.clone()))?;
    r.register(Box::new(VALIDATION_RUNS_REJECTED.clone()))?;
    r.register(Box::new(VALIDATION_FIELD_FAILURES.clone()))?;
    r.register(Box::new(DB_QUERY_DURATION.clone()))?;
    r.register(Box::new(DB_QUERY_ERRORS.clone()))?;
    r.register(Box::new(POKEMON_PAGES_SERVED.clone()))?;
    r.register(Box::new(POKEMON_ROWS_RETURNED.clone()))?;
    Ok(())
}

pub fn gather_metrics(r: &Registry) -> String {
    let encoder = TextEncoder::new();
    let families = r.gather();
    let mut buf = Vec::new();
    encoder.encode(&families, &mut buf).unwrap_or_default();
    String::from_utf8(buf).unwrap_or_default()
}

pub fn observe_http(method: &str, path: &str, status: u16, duration_secs: f64) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, path, &status.to_string()])
        .inc();
    HTTP_REQUEST_DURATION
        .with_label_values(&[method, path])
        .observe(duration_secs);
}

pub fn observe_db_query(query: &str, duration_secs: f64) {
    DB_QUERY_DURATION
        .with_label_values(&[query])
        .observe(duration_secs);
}

pub fn observe_validation_rejection(failed_fields: usize) {
    VALIDATION_RUNS_REJECTED.inc();
    VALIDATION_FIELD_FAILURES.inc_by(failed_fields as u64);
}
