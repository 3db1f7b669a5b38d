//! Fixed-size worker pool driving one protocol run.
use crate::client::RequestClient;
use crate::recorder::MetricsRecorder;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
#[allow(unused)]
use tracing::{debug, error, info, instrument, trace, warn, Instrument};
use wirebench_core::{BenchmarkReport, Protocol};

/// Shape of one run: how many workers, how many sequential requests each.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Workload {
    pub concurrency: usize,
    pub requests_per_worker: usize,
    pub request_timeout: Duration,
}

impl Workload {
    pub fn total_requests(&self) -> usize {
        self.concurrency * self.requests_per_worker
    }
}

/// Runs `workload` against `client` and returns the frozen report once every worker has joined.
///
/// Workers are independent tasks on the multi-threaded runtime; the recorder's lock is the only
/// point where they meet. A panicking worker is logged and the join carries on.
#[instrument(name = "run", skip_all, fields(protocol = %protocol))]
pub async fn run_benchmark<C>(
    protocol: Protocol,
    client: C,
    workload: Workload,
    mock_size: usize,
) -> BenchmarkReport
where
    C: RequestClient + Send + Sync + 'static,
{
    info!(
        "Starting {protocol} benchmark with {} concurrent clients, {} requests each",
        workload.concurrency, workload.requests_per_worker
    );
    debug!("{} requests in total", workload.total_requests());

    let client = Arc::new(client);
    let recorder = MetricsRecorder::new(protocol, mock_size);

    let tasks: Vec<JoinHandle<()>> = (0..workload.concurrency)
        .map(|id| {
            let client = client.clone();
            let handle = recorder.handle();

            trace!("Spawning worker {id}.");
            tokio::spawn(
                async move {
                    for _ in 0..workload.requests_per_worker {
                        let outcome = client.perform_request(workload.request_timeout).await;
                        handle.record(outcome);
                    }
                }
                .in_current_span(),
            )
        })
        .collect();

    for (id, task) in tasks.into_iter().enumerate() {
        if let Err(err) = task.await {
            error!("Worker {id} did not finish: {err}");
        }
    }

    let report = recorder.snapshot();
    info!("{report}");
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};
    use wirebench_core::RequestOutcome;

    /// Succeeds with a fixed payload after a fixed delay.
    struct FixedClient {
        delay: Duration,
        payload: u64,
        calls: AtomicU64,
    }

    impl FixedClient {
        fn new(delay: Duration, payload: u64) -> Self {
            Self {
                delay,
                payload,
                calls: AtomicU64::new(0),
            }
        }
    }

    impl RequestClient for FixedClient {
        async fn perform_request(&self, _timeout: Duration) -> RequestOutcome {
            self.calls.fetch_add(1, Ordering::Relaxed);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            RequestOutcome::new(self.delay, self.payload, true)
        }
    }

    /// Every third call is a failed transport call.
    struct FlakyClient {
        calls: AtomicU64,
    }

    impl RequestClient for FlakyClient {
        async fn perform_request(&self, _timeout: Duration) -> RequestOutcome {
            let n = self.calls.fetch_add(1, Ordering::Relaxed);
            if n % 3 == 0 {
                RequestOutcome::failure(Duration::from_micros(50))
            } else {
                RequestOutcome::new(Duration::from_micros(100), 10, true)
            }
        }
    }

    /// Panics on its very first call only.
    struct PanickyClient {
        calls: AtomicU64,
    }

    impl RequestClient for PanickyClient {
        async fn perform_request(&self, _timeout: Duration) -> RequestOutcome {
            if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
                panic!("worker blew up");
            }
            RequestOutcome::new(Duration::from_micros(10), 1, true)
        }
    }

    fn workload(concurrency: usize, requests_per_worker: usize) -> Workload {
        Workload {
            concurrency,
            requests_per_worker,
            request_timeout: Duration::from_secs(1),
        }
    }

    #[tracing_test::traced_test]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ntest::timeout(30_000)]
    async fn fixed_latency_run() {
        let report = run_benchmark(
            Protocol::Rest,
            FixedClient::new(Duration::from_millis(2), 500),
            workload(10, 10),
            1,
        )
        .await;

        assert_eq!(report.total_requests, 100);
        assert_eq!(report.success_requests, 100);
        assert_eq!(report.failed_requests, 0);
        assert_eq!(report.min_latency, Duration::from_millis(2));
        assert_eq!(report.max_latency, Duration::from_millis(2));
        assert_eq!(report.average_latency, Duration::from_millis(2));
        assert_eq!(report.average_body_size, 500.);
        assert_eq!(report.total_bytes, 50_000);
        assert_eq!(report.mock_size, 1);
        assert!(report.requests_per_sec > 0.);
        assert!(logs_contain("Starting rest benchmark with 10 concurrent clients"));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    #[ntest::timeout(60_000)]
    async fn every_request_is_counted() {
        let client = FixedClient::new(Duration::ZERO, 1);
        let workload = workload(200, 50);
        let report = run_benchmark(Protocol::Grpc, client, workload, 1).await;

        assert_eq!(report.total_requests, workload.total_requests() as u64);
        assert_eq!(report.total_requests, 10_000);
        assert_eq!(report.success_requests, 10_000);
        assert_eq!(report.total_bytes, 10_000);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    #[ntest::timeout(30_000)]
    async fn failures_do_not_stop_workers() {
        let client = FlakyClient {
            calls: AtomicU64::new(0),
        };
        let report = run_benchmark(Protocol::GrpcRaw, client, workload(9, 30), 5).await;

        assert_eq!(report.total_requests, 270);
        assert_eq!(report.failed_requests, 90);
        assert_eq!(report.success_requests, 180);
        assert_eq!(report.total_bytes, 1800);
        assert_eq!(report.min_latency, Duration::from_micros(50));
        assert_eq!(report.max_latency, Duration::from_micros(100));
    }

    #[tracing_test::traced_test]
    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    #[ntest::timeout(30_000)]
    async fn panicking_worker_is_logged() {
        let client = PanickyClient {
            calls: AtomicU64::new(0),
        };
        let report = run_benchmark(Protocol::Rest, client, workload(4, 5), 1).await;

        // The panicking worker loses its remaining requests, the others finish.
        assert_eq!(report.total_requests, 15);
        assert_eq!(report.failed_requests, 0);
        assert!(logs_contain("did not finish"));
    }

    #[tokio::test]
    async fn report_is_stable_after_join() {
        let client = FixedClient::new(Duration::ZERO, 8);
        let report = run_benchmark(Protocol::Rest, client, workload(3, 3), 1).await;

        assert_eq!(report.total_requests, 9);
        assert_eq!(report.end_time - report.start_time, report.total_duration);
    }
}
