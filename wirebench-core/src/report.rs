use crate::Protocol;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationNanoSeconds};
use std::fmt;
use std::time::Duration;
use time::OffsetDateTime;

/// Outcome of a single request, handed once to the recorder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RequestOutcome {
    pub latency: Duration,
    pub payload_size: u64,
    pub success: bool,
}

impl RequestOutcome {
    pub fn new(latency: Duration, payload_size: u64, success: bool) -> Self {
        Self {
            latency,
            payload_size,
            success,
        }
    }

    /// A faulted request: no payload is ever counted.
    pub fn failure(latency: Duration) -> Self {
        Self::new(latency, 0, false)
    }
}

/// Frozen summary statistics for one completed protocol run.
///
/// Durations serialize as integer nanoseconds and timestamps as RFC 3339 strings.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkReport {
    pub protocol: Protocol,
    pub total_requests: u64,
    pub success_requests: u64,
    pub failed_requests: u64,
    #[serde_as(as = "DurationNanoSeconds<u64>")]
    pub average_latency: Duration,
    #[serde_as(as = "DurationNanoSeconds<u64>")]
    pub min_latency: Duration,
    #[serde_as(as = "DurationNanoSeconds<u64>")]
    pub max_latency: Duration,
    #[serde_as(as = "DurationNanoSeconds<u64>")]
    pub total_latency: Duration,
    pub total_bytes: u64,
    pub average_body_size: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub start_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub end_time: OffsetDateTime,
    #[serde_as(as = "DurationNanoSeconds<u64>")]
    pub total_duration: Duration,
    pub requests_per_sec: f64,
    pub bytes_per_sec: f64,
    pub mock_size: usize,
}

impl BenchmarkReport {
    pub fn error_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.
        } else {
            self.failed_requests as f64 / self.total_requests as f64
        }
    }
}

impl fmt::Display for BenchmarkReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: requests={} (ok={}, failed={}) duration={} rps={:.2} B/s={:.2} avg={} min={} max={} body={:.1}B",
            self.protocol,
            self.total_requests,
            self.success_requests,
            self.failed_requests,
            humantime::format_duration(self.total_duration),
            self.requests_per_sec,
            self.bytes_per_sec,
            humantime::format_duration(self.average_latency),
            humantime::format_duration(self.min_latency),
            humantime::format_duration(self.max_latency),
            self.average_body_size,
        )
    }
}
