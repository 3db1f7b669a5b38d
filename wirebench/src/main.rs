use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use wirebench::cli::BenchCli;
use wirebench::RunController;

#[tokio::main]
async fn main() -> ExitCode {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wirebench=info")),
        )
        .init();

    let config = BenchCli::parse().into_config();

    match RunController::new(config).run_and_save().await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("Benchmark aborted: {err}");
            ExitCode::FAILURE
        }
    }
}
