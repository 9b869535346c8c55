use std::future::Future;

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    application::state::SharedState,
    domain::error::{DomainError, ModelError},
};

#[derive(Debug, Default, Deserialize)]
pub struct OperationsQuery {
    #[serde(default)]
    pub hidden: bool,
}

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/operations", get(operations_handler))
        .route("/healthz", get(healthz_handler))
        .with_state(state)
}

pub async fn serve(
    listener: TcpListener,
    state: SharedState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(), DomainError> {
    let local_addr = listener.local_addr().map_err(|error| {
        DomainError::Unavailable(format!("failed to read listener address: {error}"))
    })?;

    info!(
        "opscope-core listening on http://{}:{}, base_endpoint={}",
        local_addr.ip(),
        local_addr.port(),
        state.config().base_endpoint,
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|error| DomainError::Unavailable(format!("server runtime error: {error}")))
}

async fn operations_handler(
    State(state): State<SharedState>,
    Query(query): Query<OperationsQuery>,
) -> Response {
    match state.operations(query.hidden).await {
        Ok(records) => (StatusCode::OK, Json(records.to_vec())).into_response(),
        Err(error) => model_unavailable(&error),
    }
}

async fn healthz_handler(State(state): State<SharedState>) -> Response {
    match state.health_payload().await {
        Ok(payload) => (StatusCode::OK, Json(payload)).into_response(),
        Err(error) => model_unavailable(&error),
    }
}

fn model_unavailable(error: &ModelError) -> Response {
    error!("service model unavailable: {error}");
    (
        StatusCode::SERVICE_UNAVAILABLE,
        Json(serde_json::json!({
            "ok": false,
            "error": error.to_string(),
        })),
    )
        .into_response()
}
