use super::{timed, Received, RequestClient};
use crate::error::{BenchmarkError, ClientError};
use crate::proto::{GetPopulationRequest, PopulationServiceClient};
use prost::Message;
use std::time::Duration;
use tonic::transport::{Channel, Endpoint};
use tonic::Request;
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};
use wirebench_core::RequestOutcome;

/// HTTP/2 flow control window for the decoded variant (8 MiB).
const WINDOW_SIZE: u32 = 1 << 23;
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(30);
const KEEP_ALIVE_TIMEOUT: Duration = Duration::from_secs(20);

/// Builds the HTTP/2 channel to `endpoint` shared by every worker.
///
/// The channel connects lazily: an unreachable server surfaces on the first call, which is the
/// smoke test.
pub(crate) fn channel(
    endpoint: &str,
    window_size: u32,
    connect_timeout: Duration,
) -> Result<Channel, BenchmarkError> {
    let endpoint = Endpoint::from_shared(endpoint.to_string()).map_err(|source| {
        BenchmarkError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        }
    })?;

    debug!("Opening channel to {}", endpoint.uri());
    Ok(endpoint
        .connect_timeout(connect_timeout)
        .initial_stream_window_size(window_size)
        .initial_connection_window_size(window_size)
        .http2_keep_alive_interval(KEEP_ALIVE_INTERVAL)
        .keep_alive_timeout(KEEP_ALIVE_TIMEOUT)
        .keep_alive_while_idle(true)
        .connect_lazy())
}

/// Empty request carrying its own deadline.
pub(crate) fn population_request(timeout: Duration) -> Request<GetPopulationRequest> {
    let mut request = Request::new(GetPopulationRequest {});
    request.set_timeout(timeout);
    request
}

/// `GetPopulation`, decoded by the RPC stub.
#[derive(Clone, Debug)]
pub struct GrpcClient {
    client: PopulationServiceClient,
}

impl GrpcClient {
    /// Must be called from within the tokio runtime.
    pub fn connect(endpoint: &str, connect_timeout: Duration) -> Result<Self, BenchmarkError> {
        let channel = channel(endpoint, WINDOW_SIZE, connect_timeout)?;
        Ok(Self::new(channel))
    }

    pub fn new(channel: Channel) -> Self {
        Self {
            client: PopulationServiceClient::new(channel),
        }
    }

    /// Issues one call and returns the number of people received.
    pub async fn smoke_test(&self, timeout: Duration) -> Result<usize, ClientError> {
        let mut client = self.client.clone();
        let response =
            tokio::time::timeout(timeout, client.get_population(population_request(timeout)))
                .await
                .map_err(|_| ClientError::Timeout)??;
        Ok(response.into_inner().population.len())
    }

    async fn fetch(&self, timeout: Duration) -> Result<Received, ClientError> {
        let mut client = self.client.clone();
        let response = client.get_population(population_request(timeout)).await?;
        Ok(Received::accepted(response.get_ref().encoded_len()))
    }
}

impl RequestClient for GrpcClient {
    async fn perform_request(&self, timeout: Duration) -> RequestOutcome {
        timed(timeout, self.fetch(timeout)).await
    }
}
