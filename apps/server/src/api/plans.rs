use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{error::ApiResult, main_lib::AppState, models::Plan};

/// Plans currently open for investment.
async fn list_active_plans(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Plan>>> {
    let plans = state.plan_service.get_plans(true)?;
    Ok(Json(plans.into_iter().map(Plan::from).collect()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/plans", get(list_active_plans))
}
