use std::path::PathBuf;
use thiserror::Error;
use wirebench_core::{ConfigError, Protocol};

/// Fault of a single request. Recovered inside the worker and counted as a failure.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC call failed: {0}")]
    Rpc(#[from] tonic::Status),

    #[error("Malformed JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed protobuf payload: {0}")]
    Protobuf(#[from] prost::DecodeError),

    #[error("Request timed out")]
    Timeout,
}

/// Fatal errors. Any of these aborts the whole benchmark.
#[derive(Debug, Error)]
pub enum BenchmarkError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Unable to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    #[error("Invalid RPC endpoint `{endpoint}`: {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: tonic::transport::Error,
    },

    #[error("Smoke test for {protocol} failed: {source}")]
    SmokeTest {
        protocol: Protocol,
        #[source]
        source: ClientError,
    },

    #[error("Unable to serialize reports: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Unable to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
