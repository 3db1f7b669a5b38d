use super::{timed, Received, RequestClient};
use crate::entity::GetPopulationResponse;
use crate::error::{BenchmarkError, ClientError};
use reqwest::StatusCode;
use std::time::Duration;
use wirebench_core::RequestOutcome;

const POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);

/// `GET <url>` returning the population as JSON.
#[derive(Clone, Debug)]
pub struct RestClient {
    client: reqwest::Client,
    url: String,
}

impl RestClient {
    /// Builds a client whose connection pool keeps up to `pool_size` idle connections, one per
    /// worker, so connections are reused across sequential requests.
    pub fn new(url: &str, pool_size: usize, timeout: Duration) -> Result<Self, BenchmarkError> {
        let client = reqwest::Client::builder()
            .pool_max_idle_per_host(pool_size)
            .pool_idle_timeout(POOL_IDLE_TIMEOUT)
            .timeout(timeout)
            .build()
            .map_err(BenchmarkError::HttpClient)?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    async fn fetch(&self) -> Result<Received, ClientError> {
        let res = self.client.get(&self.url).send().await?;
        let status = res.status();
        let body = res.bytes().await?;

        // The decoded value is discarded; decoding is part of the measured cost.
        let _population: GetPopulationResponse = serde_json::from_slice(&body)?;

        Ok(Received {
            bytes: body.len() as u64,
            accepted: status == StatusCode::OK,
        })
    }
}

impl RequestClient for RestClient {
    async fn perform_request(&self, timeout: Duration) -> RequestOutcome {
        timed(timeout, self.fetch()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tracing_test::traced_test]
    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn unreachable_server_is_a_failed_outcome() {
        // Port 9 (discard) on loopback is closed on test machines.
        let client =
            RestClient::new("http://127.0.0.1:9/benchmark", 1, Duration::from_secs(2)).unwrap();

        let outcome = client.perform_request(Duration::from_secs(2)).await;
        assert!(!outcome.success);
        assert_eq!(outcome.payload_size, 0);
    }

    /// Serves `body` with `status` on `GET /benchmark` from an ephemeral port.
    async fn serve(status: axum::http::StatusCode, body: &'static str) -> String {
        let app = axum::Router::new().route(
            "/benchmark",
            axum::routing::get(move || async move { (status, body) }),
        );
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        format!("http://{addr}/benchmark")
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn ok_json_body_is_a_success() {
        let body = r#"{"population":[]}"#;
        let url = serve(axum::http::StatusCode::OK, body).await;
        let client = RestClient::new(&url, 1, Duration::from_secs(2)).unwrap();

        let outcome = client.perform_request(Duration::from_secs(2)).await;
        assert!(outcome.success);
        assert_eq!(outcome.payload_size, body.len() as u64);
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn non_ok_status_keeps_decoded_body_size() {
        let body = r#"{"population":[]}"#;
        let url = serve(axum::http::StatusCode::SERVICE_UNAVAILABLE, body).await;
        let client = RestClient::new(&url, 1, Duration::from_secs(2)).unwrap();

        let outcome = client.perform_request(Duration::from_secs(2)).await;
        assert!(!outcome.success);
        assert_eq!(outcome.payload_size, 17);
    }

    #[tokio::test]
    #[ntest::timeout(10_000)]
    async fn undecodable_body_is_a_failed_outcome() {
        let url = serve(axum::http::StatusCode::OK, "not json").await;
        let client = RestClient::new(&url, 1, Duration::from_secs(2)).unwrap();

        let outcome = client.perform_request(Duration::from_secs(2)).await;
        assert!(!outcome.success);
        assert_eq!(outcome.payload_size, 0);
    }

    #[tokio::test]
    async fn malformed_url_is_a_failed_outcome() {
        let client = RestClient::new("not a url", 1, Duration::from_secs(1)).unwrap();

        let outcome = client.perform_request(Duration::from_secs(1)).await;
        assert!(!outcome.success);
        assert_eq!(outcome.payload_size, 0);
    }
}
