use std::net::SocketAddr;
use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};
use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tracing::{debug, error, info};

pub mod dataset;
pub mod fixtures;
mod grpc;
mod rest;

pub use dataset::Dataset;

pub mod prelude {
    pub use crate::dataset::Dataset;
    pub use crate::{spawn, MockService};
}

/// Request counters, one per transport.
#[derive(Debug, Default)]
pub struct Hits {
    rest: AtomicU64,
    grpc: AtomicU64,
}

impl Hits {
    fn rest(&self) {
        self.rest.fetch_add(1, Ordering::Relaxed);
    }

    fn grpc(&self) {
        self.grpc.fetch_add(1, Ordering::Relaxed);
    }
}

/// Handle to a running mock service.
#[derive(Debug, Clone)]
pub struct MockService {
    pub rest_addr: SocketAddr,
    pub grpc_addr: SocketAddr,
    hits: Arc<Hits>,
}

impl MockService {
    pub fn rest_url(&self) -> String {
        format!("http://{}/benchmark", self.rest_addr)
    }

    pub fn grpc_endpoint(&self) -> String {
        format!("http://{}", self.grpc_addr)
    }

    pub fn rest_hits(&self) -> u64 {
        self.hits.rest.load(Ordering::Relaxed)
    }

    pub fn grpc_hits(&self) -> u64 {
        self.hits.grpc.load(Ordering::Relaxed)
    }
}

/// Binds both listeners and serves `dataset` from background tasks.
///
/// Pass port `0` to let the OS pick; the bound addresses are on the returned handle.
pub async fn spawn(
    dataset: Arc<Dataset>,
    rest_addr: SocketAddr,
    grpc_addr: SocketAddr,
) -> anyhow::Result<MockService> {
    let hits = Arc::new(Hits::default());

    let rest_listener = TcpListener::bind(rest_addr).await?;
    let grpc_listener = TcpListener::bind(grpc_addr).await?;
    let service = MockService {
        rest_addr: rest_listener.local_addr()?,
        grpc_addr: grpc_listener.local_addr()?,
        hits: hits.clone(),
    };

    let app = rest::router(rest::RestState {
        dataset: dataset.clone(),
        hits: hits.clone(),
    });
    tokio::spawn(async move {
        if let Err(err) = axum::serve(rest_listener, app).await {
            error!("REST server error: {err}");
        }
    });

    let population = grpc::PopulationServer::new(dataset.clone(), hits);
    tokio::spawn(async move {
        let res = tonic::transport::Server::builder()
            .add_service(population)
            .serve_with_incoming(TcpListenerStream::new(grpc_listener))
            .await;
        if let Err(err) = res {
            error!("gRPC server error: {err}");
        }
    });

    info!(
        "Serving {} people: REST on {}, gRPC on {}",
        dataset.len(),
        service.rest_addr,
        service.grpc_addr
    );
    debug!(
        "Payload sizes: JSON {} bytes, protobuf {} bytes",
        dataset.json().len(),
        dataset.raw().len()
    );

    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wirebench::entity::GetPopulationResponse;
    use wirebench::proto::{GetPopulationRequest, PopulationServiceClient};

    async fn local() -> (Arc<Dataset>, MockService) {
        let dataset = Arc::new(Dataset::generate(4, Some(11)).unwrap());
        let any: SocketAddr = "127.0.0.1:0".parse().unwrap();
        let service = spawn(dataset.clone(), any, any).await.unwrap();
        (dataset, service)
    }

    #[tokio::test]
    async fn serves_json_population() {
        let (_dataset, service) = local().await;

        let res = reqwest::get(service.rest_url()).await.unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        let body: GetPopulationResponse = res.json().await.unwrap();

        assert_eq!(body.population.len(), 4);
        assert_eq!(body.population[0].id, "p001");
        assert_eq!(service.rest_hits(), 1);
    }

    #[tokio::test]
    async fn serves_both_rpc_methods() {
        let (dataset, service) = local().await;
        let channel = tonic::transport::Endpoint::from_shared(service.grpc_endpoint())
            .unwrap()
            .connect()
            .await
            .unwrap();
        let mut client = PopulationServiceClient::new(channel);

        let decoded = client
            .get_population(GetPopulationRequest {})
            .await
            .unwrap()
            .into_inner();
        assert_eq!(&decoded, dataset.proto());

        let raw = client
            .get_population_raw(GetPopulationRequest {})
            .await
            .unwrap()
            .into_inner();
        assert_eq!(raw.data, dataset.raw());
        assert_eq!(service.grpc_hits(), 2);
    }
}
