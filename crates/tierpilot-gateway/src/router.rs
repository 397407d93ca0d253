//! Axum router wiring.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, flow, ops};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/flow/evaluate", post(flow::evaluate))
        .route("/healthz", get(ops::healthz))
        .route("/readyz", get(ops::readyz))
        .route("/metrics", get(ops::metrics))
        .with_state(state)
}
