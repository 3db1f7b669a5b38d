//! Concurrency-safe aggregation of request outcomes.
//!
//! One [`MetricsRecorder`] exists per protocol run. Workers only ever receive a [`RecordHandle`],
//! so every mutation goes through the single locked `record` entry point.
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use time::OffsetDateTime;
use wirebench_core::{BenchmarkReport, Protocol, RequestOutcome};

#[derive(Debug)]
pub struct MetricsRecorder {
    protocol: Protocol,
    metrics: Arc<RwLock<RunMetrics>>,
}

impl MetricsRecorder {
    /// Creates an empty recorder and stamps the run start.
    pub fn new(protocol: Protocol, mock_size: usize) -> Self {
        Self {
            protocol,
            metrics: Arc::new(RwLock::new(RunMetrics::new(protocol, mock_size))),
        }
    }

    /// Handle for a worker task. It can record outcomes but never read them.
    pub fn handle(&self) -> RecordHandle {
        RecordHandle {
            protocol: self.protocol,
            metrics: self.metrics.clone(),
        }
    }

    pub fn record(&self, outcome: RequestOutcome) {
        record(self.protocol, &self.metrics, outcome);
    }

    /// Consistent copy of the aggregates as of the last `record` call.
    ///
    /// Derived fields are computed when an outcome is recorded, so repeated snapshots without an
    /// intervening `record` are identical.
    pub fn snapshot(&self) -> BenchmarkReport {
        self.metrics
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .report()
    }
}

#[derive(Clone, Debug)]
pub struct RecordHandle {
    protocol: Protocol,
    metrics: Arc<RwLock<RunMetrics>>,
}

impl RecordHandle {
    pub fn record(&self, outcome: RequestOutcome) {
        record(self.protocol, &self.metrics, outcome);
    }
}

fn record(protocol: Protocol, metrics: &RwLock<RunMetrics>, outcome: RequestOutcome) {
    // NOTE: The aggregates are plain counters, so a panic in another holder leaves nothing
    // half-written that matters.
    metrics
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .record(&outcome);

    #[cfg(feature = "metrics")]
    emit(protocol, &outcome);
    #[cfg(not(feature = "metrics"))]
    let _ = protocol;
}

#[cfg(feature = "metrics")]
fn emit(protocol: Protocol, outcome: &RequestOutcome) {
    let label = protocol.as_str();
    metrics::histogram!("wirebench_latency", "protocol" => label)
        .record(outcome.latency.as_nanos() as f64);
    metrics::histogram!("wirebench_payload_bytes", "protocol" => label)
        .record(outcome.payload_size as f64);
    if outcome.success {
        metrics::counter!("wirebench_success", "protocol" => label).increment(1);
    } else {
        metrics::counter!("wirebench_error", "protocol" => label).increment(1);
    }
}

#[derive(Debug)]
struct RunMetrics {
    protocol: Protocol,
    mock_size: usize,

    total_requests: u64,
    success_requests: u64,
    failed_requests: u64,
    total_latency: Duration,
    min_latency: Option<Duration>,
    max_latency: Duration,
    total_bytes: u64,

    average_latency: Duration,
    average_body_size: f64,

    started: Instant,
    start_time: OffsetDateTime,
    end_time: OffsetDateTime,
    total_duration: Duration,
    requests_per_sec: f64,
    bytes_per_sec: f64,
}

impl RunMetrics {
    fn new(protocol: Protocol, mock_size: usize) -> Self {
        let start_time = OffsetDateTime::now_utc();
        Self {
            protocol,
            mock_size,
            total_requests: 0,
            success_requests: 0,
            failed_requests: 0,
            total_latency: Duration::ZERO,
            min_latency: None,
            max_latency: Duration::ZERO,
            total_bytes: 0,
            average_latency: Duration::ZERO,
            average_body_size: 0.,
            started: Instant::now(),
            start_time,
            end_time: start_time,
            total_duration: Duration::ZERO,
            requests_per_sec: 0.,
            bytes_per_sec: 0.,
        }
    }

    fn record(&mut self, outcome: &RequestOutcome) {
        self.total_requests += 1;
        if outcome.success {
            self.success_requests += 1;
        } else {
            self.failed_requests += 1;
        }

        self.total_latency = self.total_latency.saturating_add(outcome.latency);
        self.total_bytes += outcome.payload_size;

        if self.min_latency.map_or(true, |min| outcome.latency < min) {
            self.min_latency = Some(outcome.latency);
        }
        if outcome.latency > self.max_latency {
            self.max_latency = outcome.latency;
        }

        self.average_latency = mean_duration(self.total_latency, self.total_requests);
        self.average_body_size = ratio(self.total_bytes as f64, self.total_requests as f64);

        // NOTE: Throughput uses the wall time of the whole run; workers overlap, so summing
        // latencies would undercount it.
        self.total_duration = self.started.elapsed();
        self.end_time = self.start_time + self.total_duration;
        let secs = self.total_duration.as_secs_f64();
        self.requests_per_sec = ratio(self.total_requests as f64, secs);
        self.bytes_per_sec = ratio(self.total_bytes as f64, secs);
    }

    fn report(&self) -> BenchmarkReport {
        BenchmarkReport {
            protocol: self.protocol,
            total_requests: self.total_requests,
            success_requests: self.success_requests,
            failed_requests: self.failed_requests,
            average_latency: self.average_latency,
            min_latency: self.min_latency.unwrap_or_default(),
            max_latency: self.max_latency,
            total_latency: self.total_latency,
            total_bytes: self.total_bytes,
            average_body_size: self.average_body_size,
            start_time: self.start_time,
            end_time: self.end_time,
            total_duration: self.total_duration,
            requests_per_sec: self.requests_per_sec,
            bytes_per_sec: self.bytes_per_sec,
            mock_size: self.mock_size,
        }
    }
}

fn mean_duration(total: Duration, count: u64) -> Duration {
    if count == 0 {
        return Duration::ZERO;
    }
    let nanos = total.as_nanos() / u128::from(count);
    Duration::from_nanos(u64::try_from(nanos).unwrap_or(u64::MAX))
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0. {
        numerator / denominator
    } else {
        0.
    }
}
