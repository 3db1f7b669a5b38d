//! Protobuf messages and client stub for `population.PopulationService`.
//!
//! Written out by hand in the shape `tonic-build` emits, so building the crate does not require
//! `protoc`. The matching service definition is:
//!
//! ```protobuf
//! service PopulationService {
//!   rpc GetPopulation(GetPopulationRequest) returns (GetPopulationResponse);
//!   rpc GetPopulationRaw(GetPopulationRequest) returns (RawResponse);
//! }
//! ```
use crate::entity;
use std::collections::HashMap;
use tonic::codec::ProstCodec;
use tonic::codegen::http::uri::PathAndQuery;
use tonic::transport::Channel;
use tonic::{IntoRequest, Request, Response, Status};

/// Largest response the client accepts, matching the server's send limit.
pub const MAX_MESSAGE_SIZE: usize = 10 * 1024 * 1024;

const GET_POPULATION: &str = "/population.PopulationService/GetPopulation";
const GET_POPULATION_RAW: &str = "/population.PopulationService/GetPopulationRaw";

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPopulationRequest {}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPopulationResponse {
    #[prost(message, repeated, tag = "1")]
    pub population: Vec<Person>,
}

/// Envelope carrying an already serialized [`GetPopulationResponse`].
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct RawResponse {
    #[prost(bytes = "vec", tag = "1")]
    pub data: Vec<u8>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Person {
    #[prost(string, tag = "1")]
    pub id: String,
    #[prost(string, tag = "2")]
    pub first_name: String,
    #[prost(string, tag = "3")]
    pub last_name: String,
    #[prost(string, tag = "4")]
    pub email: String,
    #[prost(string, tag = "5")]
    pub date_of_birth: String,
    #[prost(string, tag = "6")]
    pub phone_number: String,
    #[prost(message, optional, tag = "7")]
    pub address: Option<Address>,
    #[prost(string, tag = "8")]
    pub created_at: String,
    #[prost(string, tag = "9")]
    pub updated_at: String,
    #[prost(bool, tag = "10")]
    pub active: bool,
    #[prost(string, tag = "11")]
    pub role: String,
    #[prost(string, tag = "12")]
    pub profile_image: String,
    #[prost(map = "string, message", tag = "13")]
    pub preferences: HashMap<String, Value>,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Address {
    #[prost(string, tag = "1")]
    pub street: String,
    #[prost(string, tag = "2")]
    pub city: String,
    #[prost(string, tag = "3")]
    pub state: String,
    #[prost(string, tag = "4")]
    pub country: String,
    #[prost(string, tag = "5")]
    pub postal_code: String,
}

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Value {
    #[prost(oneof = "value::Kind", tags = "1, 2, 3")]
    pub kind: Option<value::Kind>,
}

pub mod value {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Kind {
        #[prost(string, tag = "1")]
        StringValue(String),
        #[prost(bool, tag = "2")]
        BoolValue(bool),
        #[prost(double, tag = "3")]
        NumberValue(f64),
    }
}

impl From<&serde_json::Value> for Value {
    fn from(json: &serde_json::Value) -> Self {
        use serde_json::Value as Json;
        let kind = match json {
            Json::Null => None,
            Json::Bool(b) => Some(value::Kind::BoolValue(*b)),
            Json::Number(n) => n.as_f64().map(value::Kind::NumberValue),
            Json::String(s) => Some(value::Kind::StringValue(s.clone())),
            other => Some(value::Kind::StringValue(other.to_string())),
        };
        Value { kind }
    }
}

impl From<&entity::Person> for Person {
    fn from(person: &entity::Person) -> Self {
        Person {
            id: person.id.clone(),
            first_name: person.first_name.clone(),
            last_name: person.last_name.clone(),
            email: person.email.clone(),
            date_of_birth: person.date_of_birth.clone(),
            phone_number: person.phone_number.clone(),
            address: Some(Address {
                street: person.address.street.clone(),
                city: person.address.city.clone(),
                state: person.address.state.clone(),
                country: person.address.country.clone(),
                postal_code: person.address.postal_code.clone(),
            }),
            created_at: person.created_at.clone(),
            updated_at: person.updated_at.clone(),
            active: person.active,
            role: person.role.clone(),
            profile_image: person.profile_image.clone(),
            preferences: person
                .preferences
                .iter()
                .map(|(key, value)| (key.clone(), Value::from(value)))
                .collect(),
        }
    }
}

impl From<&entity::GetPopulationResponse> for GetPopulationResponse {
    fn from(response: &entity::GetPopulationResponse) -> Self {
        GetPopulationResponse {
            population: response.population.iter().map(Person::from).collect(),
        }
    }
}

/// Client stub for `population.PopulationService`.
///
/// Cloning is cheap and every clone multiplexes over the same HTTP/2 connection.
#[derive(Debug, Clone)]
pub struct PopulationServiceClient {
    inner: tonic::client::Grpc<Channel>,
}

impl PopulationServiceClient {
    pub fn new(channel: Channel) -> Self {
        let inner = tonic::client::Grpc::new(channel).max_decoding_message_size(MAX_MESSAGE_SIZE);
        Self { inner }
    }

    pub async fn get_population(
        &mut self,
        request: impl IntoRequest<GetPopulationRequest>,
    ) -> Result<Response<GetPopulationResponse>, Status> {
        self.unary(request.into_request(), GET_POPULATION).await
    }

    pub async fn get_population_raw(
        &mut self,
        request: impl IntoRequest<GetPopulationRequest>,
    ) -> Result<Response<RawResponse>, Status> {
        self.unary(request.into_request(), GET_POPULATION_RAW).await
    }

    async fn unary<Req, Resp>(
        &mut self,
        request: Request<Req>,
        path: &'static str,
    ) -> Result<Response<Resp>, Status>
    where
        Req: prost::Message + Send + Sync + 'static,
        Resp: prost::Message + Default + Send + Sync + 'static,
    {
        self.inner
            .ready()
            .await
            .map_err(|err| Status::unknown(format!("Service was not ready: {err}")))?;
        let codec = ProstCodec::default();
        self.inner
            .unary(request, PathAndQuery::from_static(path), codec)
            .await
    }
}
