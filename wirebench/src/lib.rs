#![doc = include_str!("../README.md")]

pub mod cli;
pub mod client;
pub mod controller;
pub mod entity;
pub mod error;
pub mod orchestrator;
pub mod proto;
pub mod recorder;

pub use controller::RunController;
pub use orchestrator::{run_benchmark, Workload};
pub use recorder::{MetricsRecorder, RecordHandle};

pub mod prelude {
    pub use crate::client::{GrpcClient, GrpcRawClient, RequestClient, RestClient};
    pub use crate::controller::{save_reports, RunController};
    pub use crate::error::{BenchmarkError, ClientError};
    pub use crate::orchestrator::{run_benchmark, Workload};
    pub use crate::recorder::MetricsRecorder;

    pub use wirebench_core::{BenchmarkConfig, BenchmarkReport, Protocol, RequestOutcome};
}
