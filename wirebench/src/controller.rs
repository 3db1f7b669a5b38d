//! Sequences one run per protocol and persists the resulting reports.
use crate::client::{GrpcClient, GrpcRawClient, RestClient};
use crate::error::BenchmarkError;
use crate::orchestrator::{run_benchmark, Workload};
use std::path::{Path, PathBuf};
#[allow(unused)]
use tracing::{debug, error, info, instrument, trace, warn};
use wirebench_core::{BenchmarkConfig, BenchmarkReport, Protocol};

/// Drives a whole benchmark invocation.
///
/// # Example
///
/// ```no_run
/// use wirebench::prelude::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), BenchmarkError> {
///     let config = BenchmarkConfig::new().workload(10, 10);
///     let reports = RunController::new(config).run().await?;
///     for report in &reports {
///         println!("{report}");
///     }
///     Ok(())
/// }
/// ```
pub struct RunController {
    config: BenchmarkConfig,
}

impl RunController {
    pub fn new(config: BenchmarkConfig) -> Self {
        Self { config }
    }

    /// Runs every configured protocol, one after the other, in configuration order.
    ///
    /// Protocols are never run concurrently so they do not compete for network and CPU. The first
    /// fatal error aborts the remaining runs and no reports are returned.
    #[instrument(name = "wirebench", skip_all)]
    pub async fn run(&self) -> Result<Vec<BenchmarkReport>, BenchmarkError> {
        self.config.validate()?;
        info!(
            "Benchmarking {:?} against a dataset of {} people",
            self.config.protocols, self.config.mock_size
        );

        let mut reports = Vec::with_capacity(self.config.protocols.len());
        for protocol in &self.config.protocols {
            reports.push(self.run_protocol(*protocol).await?);
        }
        Ok(reports)
    }

    /// Runs every configured protocol and writes the reports to the configured output path.
    pub async fn run_and_save(&self) -> Result<PathBuf, BenchmarkError> {
        let reports = self.run().await?;
        let path = self.config.output_path();
        save_reports(&reports, &path).await?;
        info!("Reports written to {}", path.display());
        Ok(path)
    }

    #[instrument(skip(self))]
    pub async fn run_protocol(&self, protocol: Protocol) -> Result<BenchmarkReport, BenchmarkError> {
        let config = &self.config;
        let workload = Workload {
            concurrency: config.concurrency,
            requests_per_worker: config.requests_per_worker,
            request_timeout: config.request_timeout,
        };
        let smoke_failed = |source| BenchmarkError::SmokeTest { protocol, source };

        let report = match protocol {
            Protocol::Rest => {
                let client =
                    RestClient::new(&config.rest_url, config.concurrency, config.request_timeout)?;
                run_benchmark(protocol, client, workload, config.mock_size).await
            }
            Protocol::Grpc => {
                let client = GrpcClient::connect(&config.grpc_endpoint, config.smoke_test_timeout)?;
                debug!("Making test request");
                let people = client
                    .smoke_test(config.smoke_test_timeout)
                    .await
                    .map_err(smoke_failed)?;
                info!("Test request successful, got {people} people");
                run_benchmark(protocol, client, workload, config.mock_size).await
            }
            Protocol::GrpcRaw => {
                let client =
                    GrpcRawClient::connect(&config.grpc_endpoint, config.smoke_test_timeout)?;
                debug!("Making test request");
                let people = client
                    .smoke_test(config.smoke_test_timeout)
                    .await
                    .map_err(smoke_failed)?;
                info!("Test request successful, got {people} people");
                run_benchmark(protocol, client, workload, config.mock_size).await
            }
        };

        Ok(report)
    }
}

/// Serializes reports as a pretty-printed JSON array.
pub fn reports_to_json(reports: &[BenchmarkReport]) -> Result<String, BenchmarkError> {
    Ok(serde_json::to_string_pretty(reports)?)
}

/// Writes the report array to `path`, creating missing parent directories.
pub async fn save_reports(reports: &[BenchmarkReport], path: &Path) -> Result<(), BenchmarkError> {
    let json = reports_to_json(reports)?;
    let io_err = |source| BenchmarkError::Io {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
    }
    tokio::fs::write(path, json).await.map_err(io_err)
}
