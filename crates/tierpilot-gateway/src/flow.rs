//! `POST /flow/evaluate`.

use std::time::Instant;

use axum::{extract::State, Json};

use tierpilot_core::{evaluate_flow, AnswerSet, EvaluationResult};

use crate::app_state::AppState;
use crate::error::ApiError;

pub async fn evaluate(
    State(state): State<AppState>,
    Json(answers): Json<AnswerSet>,
) -> Result<Json<EvaluationResult>, ApiError> {
    let started = Instant::now();
    let metrics = state.metrics();

    let catalog = match state.catalog().load().await {
        Ok(c) => c,
        Err(e) => {
            metrics.flow_evaluations.inc(&[("outcome", "error")]);
            metrics.flow_duration.observe(&[("route", "flow_evaluate")], started.elapsed());
            return Err(e.into());
        }
    };

    let result = evaluate_flow(&answers, &catalog);

    for w in &result.warnings {
        tracing::warn!(source = state.catalog().name(), warning = %w, "catalog degraded");
    }
    let recommended = result
        .recommended_tier
        .as_ref()
        .map_or("none", |t| t.key.as_str());
    tracing::info!(
        recommended = %recommended,
        model = %result.deployment_model,
        tiers = result.tiers.len(),
        packs = result.pack_ids.len(),
        warnings = result.warnings.len(),
        "flow evaluated"
    );

    metrics.flow_evaluations.inc(&[("outcome", "ok")]);
    metrics.flow_warnings.add(&[], result.warnings.len() as u64);
    metrics.recommendations.inc(&[("tier", recommended)]);
    metrics.flow_duration.observe(&[("route", "flow_evaluate")], started.elapsed());

    Ok(Json(result))
}
