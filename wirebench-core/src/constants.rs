use std::time::Duration;

/// Number of people in the dataset served by the system under test.
pub const DEFAULT_MOCK_SIZE: usize = 1000;

/// Number of concurrent workers spawned per protocol run.
pub const DEFAULT_CONCURRENCY: usize = 100;

/// Number of sequential requests each worker issues.
pub const DEFAULT_REQUESTS_PER_WORKER: usize = 100;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Timeout for the single request issued before an RPC run starts.
pub const DEFAULT_SMOKE_TEST_TIMEOUT: Duration = Duration::from_secs(5);

pub const DEFAULT_REST_URL: &str = "http://localhost:8080/benchmark";
pub const DEFAULT_GRPC_ENDPOINT: &str = "http://localhost:50051";

pub const DEFAULT_OUTPUT_DIR: &str = "./output";
pub const DEFAULT_OUTPUT_FILE: &str = "benchmark.json";
