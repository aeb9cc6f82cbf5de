//! Prometheus counters for the voting server.

use lazy_static::lazy_static;
use prometheus::{
    register_int_counter, register_int_counter_vec, Encoder, IntCounter, IntCounterVec,
    TextEncoder,
};

lazy_static! {
    static ref HTTP_REQUESTS: IntCounterVec = register_int_counter_vec!(
        "voteroom_http_requests_total",
        "HTTP requests handled, by method and status code.",
        &["method", "status"]
    )
    .unwrap();
    static ref ROOMS_CREATED: IntCounter = register_int_counter!(
        "voteroom_rooms_created_total",
        "Voting rooms created since startup."
    )
    .unwrap();
    static ref VOTES_CAST: IntCounter = register_int_counter!(
        "voteroom_votes_cast_total",
        "Votes accepted since startup."
    )
    .unwrap();
}

pub fn record_http_request(method: &str, status: u16) {
    HTTP_REQUESTS
        .with_label_values(&[method, &status.to_string()])
        .inc();
}

pub fn record_room_created() {
    ROOMS_CREATED.inc();
}

pub fn record_vote_cast() {
    VOTES_CAST.inc();
}

/// Renders the registry in the Prometheus text exposition format.
pub fn render() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!("Failed to encode metrics: {}", e);
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
