use super::grpc::{channel, population_request};
use super::{timed, Received, RequestClient};
use crate::error::{BenchmarkError, ClientError};
use crate::proto::{GetPopulationResponse, PopulationServiceClient, RawResponse};
use prost::Message;
use std::time::Duration;
use tonic::transport::Channel;
use wirebench_core::RequestOutcome;

/// HTTP/2 flow control window for the raw variant (1 MiB).
const WINDOW_SIZE: u32 = 1 << 20;

/// `GetPopulationRaw`: the server sends pre-serialized bytes and the client decodes them.
///
/// The recorded payload size is the encoded size of the [`RawResponse`] envelope, not of the
/// decoded population, so it is slightly larger than what [`super::GrpcClient`] reports for the
/// same dataset.
#[derive(Clone, Debug)]
pub struct GrpcRawClient {
    client: PopulationServiceClient,
}

impl GrpcRawClient {
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

    /// Issues one call, decodes the payload and returns the number of people received.
    pub async fn smoke_test(&self, timeout: Duration) -> Result<usize, ClientError> {
        let mut client = self.client.clone();
        let response =
            tokio::time::timeout(timeout, client.get_population_raw(population_request(timeout)))
                .await
                .map_err(|_| ClientError::Timeout)??;
        let population = decode(response.get_ref())?;
        Ok(population.population.len())
    }

    async fn fetch(&self, timeout: Duration) -> Result<Received, ClientError> {
        let mut client = self.client.clone();
        let response = client
            .get_population_raw(population_request(timeout))
            .await?
            .into_inner();
        let _population = decode(&response)?;
        Ok(Received::accepted(response.encoded_len()))
    }
}

fn decode(raw: &RawResponse) -> Result<GetPopulationResponse, ClientError> {
    Ok(GetPopulationResponse::decode(raw.data.as_slice())?)
}

impl RequestClient for GrpcRawClient {
    async fn perform_request(&self, timeout: Duration) -> RequestOutcome {
        timed(timeout, self.fetch(timeout)).await
    }
}
