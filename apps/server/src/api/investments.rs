use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Extension, Json, Router,
};
use terravest_core::auth::Identity;
use terravest_core::investments::{Investment, NewInvestment};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{PaymentSchedule, ScheduleQuery},
};

async fn list_my_investments(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Vec<Investment>>> {
    Ok(Json(state.investment_service.list_investments(&identity)?))
}

async fn get_investment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<Investment>> {
    Ok(Json(state.investment_service.get_investment(&identity, &id)?))
}

async fn get_schedule(
    Path(id): Path<String>,
    Query(query): Query<ScheduleQuery>,
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
) -> ApiResult<Json<PaymentSchedule>> {
    let installments = match query.installments {
        Some(n) => n,
        None => {
            i64::from(
                state
                    .investment_service
                    .get_investment(&identity, &id)?
                    .duration_months,
            )
        }
    };
    let schedule = state
        .investment_service
        .payment_schedule(&identity, &id, installments)?;
    Ok(Json(schedule.into()))
}

async fn create_investment(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<Identity>,
    Json(new_investment): Json<NewInvestment>,
) -> ApiResult<(StatusCode, Json<Investment>)> {
    let investment = state
        .investment_service
        .create_investment(&identity, new_investment)
        .await?;
    Ok((StatusCode::CREATED, Json(investment)))
}

/// Reads available to any signed-in user.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/investments", get(list_my_investments))
        .route("/investments/{id}", get(get_investment))
        .route("/investments/{id}/schedule", get(get_schedule))
}

/// Placing an investment requires a verified email address.
pub fn verified_router() -> Router<Arc<AppState>> {
    Router::new().route("/investments", post(create_investment))
}
