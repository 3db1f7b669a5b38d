use crate::{
    Protocol, DEFAULT_CONCURRENCY, DEFAULT_GRPC_ENDPOINT, DEFAULT_MOCK_SIZE, DEFAULT_OUTPUT_DIR,
    DEFAULT_OUTPUT_FILE, DEFAULT_REQUESTS_PER_WORKER, DEFAULT_REQUEST_TIMEOUT, DEFAULT_REST_URL,
    DEFAULT_SMOKE_TEST_TIMEOUT,
};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,

    #[error("Requests per worker must be at least 1")]
    ZeroRequests,

    #[error("No protocol selected")]
    NoProtocols,
}

/// Parameters of a whole benchmark invocation, already loaded and validated by the caller.
#[derive(Clone, Debug)]
pub struct BenchmarkConfig {
    pub mock_size: usize,
    pub concurrency: usize,
    pub requests_per_worker: usize,
    pub request_timeout: Duration,
    pub smoke_test_timeout: Duration,
    pub rest_url: String,
    pub grpc_endpoint: String,
    pub protocols: Vec<Protocol>,
    pub output_dir: PathBuf,
    pub output_file: String,
}

impl Default for BenchmarkConfig {
    fn default() -> Self {
        Self {
            mock_size: DEFAULT_MOCK_SIZE,
            concurrency: DEFAULT_CONCURRENCY,
            requests_per_worker: DEFAULT_REQUESTS_PER_WORKER,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            smoke_test_timeout: DEFAULT_SMOKE_TEST_TIMEOUT,
            rest_url: DEFAULT_REST_URL.to_string(),
            grpc_endpoint: DEFAULT_GRPC_ENDPOINT.to_string(),
            protocols: Protocol::ALL.to_vec(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
        }
    }
}

impl BenchmarkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mock_size(mut self, mock_size: usize) -> Self {
        self.mock_size = mock_size;
        self
    }

    pub fn workload(mut self, concurrency: usize, requests_per_worker: usize) -> Self {
        self.concurrency = concurrency;
        self.requests_per_worker = requests_per_worker;
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn smoke_test_timeout(mut self, timeout: Duration) -> Self {
        self.smoke_test_timeout = timeout;
        self
    }

    pub fn rest_url(mut self, url: &str) -> Self {
        self.rest_url = url.to_string();
        self
    }

    pub fn grpc_endpoint(mut self, endpoint: &str) -> Self {
        self.grpc_endpoint = endpoint.to_string();
        self
    }

    pub fn protocols(mut self, protocols: &[Protocol]) -> Self {
        self.protocols = protocols.to_vec();
        self
    }

    pub fn output(mut self, dir: impl Into<PathBuf>, file: &str) -> Self {
        self.output_dir = dir.into();
        self.output_file = file.to_string();
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.output_file)
    }

    pub fn total_requests(&self) -> usize {
        self.concurrency * self.requests_per_worker
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }
        if self.requests_per_worker == 0 {
            return Err(ConfigError::ZeroRequests);
        }
        if self.protocols.is_empty() {
            return Err(ConfigError::NoProtocols);
        }
        Ok(())
    }
}
