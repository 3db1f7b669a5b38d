//! Server side of `population.PopulationService`, in the shape `tonic-build` emits.
use crate::{dataset::Dataset, Hits};
use metrics::counter;
use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use tonic::codec::ProstCodec;
use tonic::codegen::{empty_body, http, Body, BoxFuture, Service, StdError};
use tonic::server::{Grpc, NamedService, UnaryService};
use tonic::{Request, Response, Status};
use wirebench::proto::{GetPopulationRequest, GetPopulationResponse, RawResponse};

const GET_POPULATION: &str = "/population.PopulationService/GetPopulation";
const GET_POPULATION_RAW: &str = "/population.PopulationService/GetPopulationRaw";

#[derive(Clone)]
pub(crate) struct PopulationServer {
    dataset: Arc<Dataset>,
    hits: Arc<Hits>,
}

impl PopulationServer {
    pub fn new(dataset: Arc<Dataset>, hits: Arc<Hits>) -> Self {
        Self { dataset, hits }
    }
}

impl NamedService for PopulationServer {
    const NAME: &'static str = "population.PopulationService";
}

impl<B> Service<http::Request<B>> for PopulationServer
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::BoxBody>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        let server = self.clone();
        match req.uri().path() {
            GET_POPULATION => Box::pin(async move {
                let mut grpc = Grpc::new(ProstCodec::default());
                Ok(grpc.unary(GetPopulation(server), req).await)
            }),
            GET_POPULATION_RAW => Box::pin(async move {
                let mut grpc = Grpc::new(ProstCodec::default());
                Ok(grpc.unary(GetPopulationRaw(server), req).await)
            }),
            _ => Box::pin(async move {
                let mut response = http::Response::new(empty_body());
                let headers = response.headers_mut();
                headers.insert(
                    "grpc-status",
                    http::HeaderValue::from(tonic::Code::Unimplemented as i32),
                );
                headers.insert(
                    http::header::CONTENT_TYPE,
                    http::HeaderValue::from_static("application/grpc"),
                );
                Ok(response)
            }),
        }
    }
}

struct GetPopulation(PopulationServer);

impl UnaryService<GetPopulationRequest> for GetPopulation {
    type Response = GetPopulationResponse;
    type Future = BoxFuture<Response<Self::Response>, Status>;

    fn call(&mut self, _request: Request<GetPopulationRequest>) -> Self::Future {
        let server = self.0.clone();
        Box::pin(async move {
            counter!("mock-service.requests", "protocol" => "grpc").increment(1);
            server.hits.grpc();
            Ok(Response::new(server.dataset.proto().clone()))
        })
    }
}

struct GetPopulationRaw(PopulationServer);

impl UnaryService<GetPopulationRequest> for GetPopulationRaw {
    type Response = RawResponse;
    type Future = BoxFuture<Response<Self::Response>, Status>;

    fn call(&mut self, _request: Request<GetPopulationRequest>) -> Self::Future {
        let server = self.0.clone();
        Box::pin(async move {
            counter!("mock-service.requests", "protocol" => "grpc-raw").increment(1);
            server.hits.grpc();
            Ok(Response::new(RawResponse {
                data: server.dataset.raw().to_vec(),
            }))
        })
    }
}
