//! Command line and environment configuration for the `wirebench` binary.
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use wirebench_core::{
    BenchmarkConfig, Protocol, DEFAULT_CONCURRENCY, DEFAULT_GRPC_ENDPOINT, DEFAULT_MOCK_SIZE,
    DEFAULT_OUTPUT_DIR, DEFAULT_OUTPUT_FILE, DEFAULT_REQUESTS_PER_WORKER, DEFAULT_REST_URL,
};

#[derive(Parser, Debug)]
#[command(version, about = "Compare REST, gRPC and raw gRPC throughput against one dataset")]
pub struct BenchCli {
    /// Number of people in the dataset served by the system under test.
    #[arg(long, env = "MOCK_SIZE", default_value_t = DEFAULT_MOCK_SIZE)]
    pub mock_size: usize,

    #[arg(long, env = "OUTPUT_DIR", default_value = DEFAULT_OUTPUT_DIR)]
    pub output_dir: PathBuf,

    #[arg(long, env = "OUTPUT_FILE", default_value = DEFAULT_OUTPUT_FILE)]
    pub output_file: String,

    /// Concurrent workers per protocol run.
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Sequential requests issued by each worker.
    #[arg(short = 'n', long, default_value_t = DEFAULT_REQUESTS_PER_WORKER)]
    pub requests_per_worker: usize,

    /// Per-request timeout, e.g. `10s` or `500ms`.
    #[arg(long, default_value = "10s", value_parser = humantime::parse_duration)]
    pub timeout: Duration,

    /// Timeout of the request issued before an RPC run starts.
    #[arg(long, default_value = "5s", value_parser = humantime::parse_duration)]
    pub smoke_timeout: Duration,

    #[arg(long, default_value = DEFAULT_REST_URL)]
    pub rest_url: String,

    #[arg(long, default_value = DEFAULT_GRPC_ENDPOINT)]
    pub grpc_endpoint: String,

    /// Protocols to run, in order.
    #[arg(
        short,
        long,
        value_delimiter = ',',
        default_value = "rest,grpc,grpc-raw"
    )]
    pub protocols: Vec<Protocol>,
}

impl BenchCli {
    pub fn into_config(self) -> BenchmarkConfig {
        BenchmarkConfig::new()
            .mock_size(self.mock_size)
            .workload(self.concurrency, self.requests_per_worker)
            .request_timeout(self.timeout)
            .smoke_test_timeout(self.smoke_timeout)
            .rest_url(&self.rest_url)
            .grpc_endpoint(&self.grpc_endpoint)
            .protocols(&self.protocols)
            .output(self.output_dir, &self.output_file)
    }
}

impl From<BenchCli> for BenchmarkConfig {
    fn from(cli: BenchCli) -> Self {
        cli.into_config()
    }
}
