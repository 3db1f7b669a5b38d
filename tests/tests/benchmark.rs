mod utils;
#[allow(unused)]
use utils::*;

mod tests {
    use super::*;

    use ntest::timeout;
    use wirebench::prelude::*;

    #[tokio::test]
    #[timeout(60_000)]
    async fn all_protocols_against_mock() {
        let service = init(20).await;
        let config = config_for(&service).mock_size(20).workload(4, 5);

        let reports = RunController::new(config).run().await.unwrap();

        let protocols: Vec<_> = reports.iter().map(|r| r.protocol).collect();
        assert_eq!(protocols, Protocol::ALL.to_vec());
        for report in &reports {
            assert_eq!(report.total_requests, 20, "{report}");
            assert_eq!(report.success_requests, 20, "{report}");
            assert_eq!(report.failed_requests, 0);
            assert_eq!(report.mock_size, 20);
            assert!(report.min_latency <= report.average_latency);
            assert!(report.average_latency <= report.max_latency);
            assert_eq!(report.total_bytes as f64 / 20., report.average_body_size);
        }

        let rest = &reports[0];
        let grpc = &reports[1];
        let grpc_raw = &reports[2];
        // JSON is larger than protobuf, the raw envelope is larger than the message it wraps.
        assert!(rest.average_body_size > grpc.average_body_size);
        assert!(grpc_raw.average_body_size > grpc.average_body_size);

        // Every worker request plus one smoke test per RPC protocol.
        assert_eq!(service.rest_hits(), 20);
        assert_eq!(service.grpc_hits(), 42);
    }

    #[tokio::test]
    #[timeout(30_000)]
    async fn rest_body_size_matches_served_json() {
        let service = init(8).await;
        let config = config_for(&service).workload(2, 3);
        let expected = mock_service::Dataset::generate(8, Some(42)).unwrap().json().len();

        let report = RunController::new(config)
            .run_protocol(Protocol::Rest)
            .await
            .unwrap();

        assert_eq!(report.total_bytes, 6 * expected as u64);
        assert_eq!(report.average_body_size, expected as f64);
    }

    #[tokio::test]
    #[timeout(30_000)]
    async fn report_file_is_written() {
        let service = init(5).await;
        let dir = std::env::temp_dir().join(format!("wirebench-it-{}", std::process::id()));
        let config = config_for(&service)
            .workload(2, 2)
            .protocols(&[Protocol::Grpc, Protocol::GrpcRaw])
            .output(dir.join("nested"), "run.json");

        let path = RunController::new(config).run_and_save().await.unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let reports = written.as_array().unwrap();
        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0]["protocol"], "grpc");
        assert_eq!(reports[1]["protocol"], "grpc-raw");
        assert_eq!(reports[1]["total_requests"], 4);
        assert!(reports[0]["start_time"].as_str().unwrap().contains('T'));

        std::fs::remove_dir_all(dir).unwrap();
    }

    #[tokio::test]
    #[timeout(30_000)]
    async fn smoke_failure_stops_before_load() {
        let service = init(5).await;
        let config = config_for(&service)
            .grpc_endpoint("http://127.0.0.1:9")
            .workload(2, 2)
            .protocols(&[Protocol::Grpc, Protocol::Rest]);

        let err = RunController::new(config).run().await.unwrap_err();

        assert!(matches!(
            err,
            BenchmarkError::SmokeTest {
                protocol: Protocol::Grpc,
                ..
            }
        ));
        assert_eq!(service.rest_hits(), 0);
        assert_eq!(service.grpc_hits(), 0);
    }

    #[cfg(feature = "integration")]
    #[tokio::test(flavor = "multi_thread")]
    #[timeout(300_000)]
    async fn default_workload() {
        let service = init(1000).await;
        let config = config_for(&service);
        let expected = config.total_requests() as u64;

        let reports = RunController::new(config).run().await.unwrap();

        for report in reports {
            assert_eq!(report.total_requests, expected, "{report}");
            assert!(report.error_rate() < 0.01, "{report}");
        }
    }
}
