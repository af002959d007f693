use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use tracing::{debug, instrument};

use super::calculator::{compute, Metrics};
use crate::{auth::AuthSession, error::AppError, state::AppState};

#[derive(Debug, Serialize)]
pub struct MetricsResponse {
    pub metrics: Metrics,
}

pub fn metrics_routes() -> Router<AppState> {
    Router::new().route("/metrics", get(get_metrics))
}

#[instrument(skip_all)]
pub async fn get_metrics(
    State(state): State<AppState>,
    session: AuthSession,
) -> Result<Json<MetricsResponse>, AppError> {
    let user = session.require_user(&state, AppError::NotLoggedIn).await?;

    let mut meals = state.meals.list_by_user(user.id).await?;
    // Stable, so meals sharing a timestamp keep the store's order.
    meals.sort_by_key(|m| m.created_at);

    let metrics = compute(&meals);
    debug!(user_id = %user.id, ?metrics, "metrics computed");
    Ok(Json(MetricsResponse { metrics }))
}
