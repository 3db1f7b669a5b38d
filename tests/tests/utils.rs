use mock_service::prelude::*;
use std::net::SocketAddr;
use std::sync::{Arc, OnceLock};
use tracing::error;
use tracing_subscriber::FmtSubscriber;

/// Installs logging once per test binary and starts a fresh mock service on ephemeral ports.
#[allow(unused)]
pub async fn init(mock_size: usize) -> MockService {
    static ONCE_LOCK: OnceLock<()> = OnceLock::new();

    ONCE_LOCK.get_or_init(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            default_panic(info);
            error!("Panic occurred: {info:?}");
        }));

        let _ = FmtSubscriber::builder()
            .with_env_filter("wirebench=debug,mock_service=debug")
            .try_init();
    });

    let dataset = Arc::new(Dataset::generate(mock_size, Some(42)).unwrap());
    let any: SocketAddr = "127.0.0.1:0".parse().unwrap();
    spawn(dataset, any, any).await.unwrap()
}

#[allow(unused)]
pub fn config_for(service: &MockService) -> wirebench::prelude::BenchmarkConfig {
    wirebench::prelude::BenchmarkConfig::new()
        .rest_url(&service.rest_url())
        .grpc_endpoint(&service.grpc_endpoint())
}
