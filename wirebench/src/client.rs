//! Protocol clients: one flat implementation of [`RequestClient`] per protocol variant.
use crate::error::ClientError;
use std::future::Future;
use std::time::{Duration, Instant};
#[allow(unused)]
use tracing::{debug, error, info, trace, warn};
use wirebench_core::RequestOutcome;

mod grpc;
mod grpc_raw;
mod rest;

pub use grpc::GrpcClient;
pub use grpc_raw::GrpcRawClient;
pub use rest::RestClient;

/// Issues a single request against the system under test.
///
/// Implementations never fail: every transport, timeout or decode fault is folded into a failed
/// [`RequestOutcome`] carrying the time spent until the fault was observed.
#[trait_variant::make(RequestClient: Send)]
pub trait LocalRequestClient {
    async fn perform_request(&self, timeout: Duration) -> RequestOutcome;
}

/// What a completed exchange delivered, before timing is attached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Received {
    pub bytes: u64,
    pub accepted: bool,
}

impl Received {
    pub fn accepted(bytes: usize) -> Self {
        Self {
            bytes: bytes as u64,
            accepted: true,
        }
    }
}

/// Times `request`, bounding it by `timeout`.
pub(crate) async fn timed<F>(timeout: Duration, request: F) -> RequestOutcome
where
    F: Future<Output = Result<Received, ClientError>>,
{
    let start = Instant::now();
    let res = tokio::time::timeout(timeout, request)
        .await
        .unwrap_or(Err(ClientError::Timeout));
    let latency = start.elapsed();

    match res {
        Ok(received) => RequestOutcome::new(latency, received.bytes, received.accepted),
        Err(err) => {
            trace!("Request failed after {latency:?}: {err}");
            RequestOutcome::failure(latency)
        }
    }
}
