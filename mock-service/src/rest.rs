use crate::{dataset::Dataset, Hits};
use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
    Router,
};
use metrics::counter;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub(crate) struct RestState {
    pub dataset: Arc<Dataset>,
    pub hits: Arc<Hits>,
}

pub(crate) fn router(state: RestState) -> Router {
    Router::new()
        .route("/benchmark", get(benchmark))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

async fn benchmark(State(state): State<RestState>) -> impl IntoResponse {
    counter!("mock-service.requests", "protocol" => "rest").increment(1);
    state.hits.rest();
    (
        [(header::CONTENT_TYPE, "application/json")],
        state.dataset.json(),
    )
}
