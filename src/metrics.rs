use lazy_static::lazy_static;
use prometheus::{Counter, Histogram, register_counter, register_histogram};

lazy_static! {
    pub static ref REQUEST_TOTAL: Counter = register_counter!(
        "imagegen_requests_total",
        "Total number of generation requests"
    )
    .unwrap();
    pub static ref GENERATION_FAILURES: Counter = register_counter!(
        "imagegen_failures_total",
        "Generation requests that ended in an error"
    )
    .unwrap();
    pub static ref REQUEST_LATENCY: Histogram = register_histogram!(
        "imagegen_request_latency_seconds",
        "End-to-end generation latency in seconds"
    )
    .unwrap();
    pub static ref POLL_ATTEMPTS: Histogram = register_histogram!(
        "imagegen_poll_attempts",
        "Status checks performed per asynchronous prediction"
    )
    .unwrap();
}
