use clap::Parser;
use mock_service::prelude::*;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Serves a generated population over REST and gRPC.
#[derive(Debug, Parser)]
#[command(version, about)]
struct MockCli {
    /// Number of people in the dataset
    #[arg(long, env = "MOCK_SIZE", default_value_t = 1000)]
    mock_size: usize,

    #[arg(long, default_value_t = 8080)]
    rest_port: u16,

    #[arg(long, default_value_t = 50051)]
    grpc_port: u16,

    /// Seed for a reproducible dataset
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("mock_service=info,tower_http=warn")),
        )
        .init();

    let cli = MockCli::parse();
    info!("Generating {} people", cli.mock_size);
    let dataset = Arc::new(Dataset::generate(cli.mock_size, cli.seed)?);

    let any = |port| SocketAddr::from((Ipv4Addr::UNSPECIFIED, port));
    let _service = spawn(dataset, any(cli.rest_port), any(cli.grpc_port)).await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutting down");
    Ok(())
}
