//! Administrator endpoints. Every route here sits behind the admin gate.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use terravest_core::investments::Investment;
use terravest_core::plans::{InvestmentPlanUpdate, NewInvestmentPlan};
use terravest_core::users::User;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
    models::{Plan, RoleUpdateRequest, StatusUpdateRequest},
};

async fn list_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<User>>> {
    Ok(Json(state.user_service.list_users()?))
}

async fn verify_email(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.verify_email(id).await?))
}

async fn set_role(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<RoleUpdateRequest>,
) -> ApiResult<Json<User>> {
    Ok(Json(state.user_service.set_role(id, body.role).await?))
}

async fn list_plans(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Plan>>> {
    let plans = state.plan_service.get_plans(false)?;
    Ok(Json(plans.into_iter().map(Plan::from).collect()))
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    Json(plan): Json<NewInvestmentPlan>,
) -> ApiResult<(StatusCode, Json<Plan>)> {
    let plan = state.plan_service.create_plan(plan).await?;
    Ok((StatusCode::CREATED, Json(plan.into())))
}

async fn update_plan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(mut update): Json<InvestmentPlanUpdate>,
) -> ApiResult<Json<Plan>> {
    match update.id.as_deref() {
        None => update.id = Some(id),
        Some(body_id) if body_id == id => {}
        Some(_) => {
            return Err(ApiError::BadRequest(
                "Plan id in the body does not match the path".to_string(),
            ))
        }
    }
    Ok(Json(state.plan_service.update_plan(update).await?.into()))
}

async fn delete_plan(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<StatusCode> {
    state.plan_service.delete_plan(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_all_investments(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<Investment>>> {
    Ok(Json(state.investment_service.list_all_investments()?))
}

async fn update_investment_status(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    Json(body): Json<StatusUpdateRequest>,
) -> ApiResult<Json<Investment>> {
    Ok(Json(
        state
            .investment_service
            .update_status(id, body.status)
            .await?,
    ))
}

async fn advance_payment(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Investment>> {
    Ok(Json(state.investment_service.advance_payment_date(id).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/verify-email", put(verify_email))
        .route("/admin/users/{id}/role", put(set_role))
        .route("/admin/plans", get(list_plans).post(create_plan))
        .route("/admin/plans/{id}", put(update_plan).delete(delete_plan))
        .route("/admin/investments", get(list_all_investments))
        .route("/admin/investments/{id}/status", put(update_investment_status))
        .route(
            "/admin/investments/{id}/advance-payment",
            post(advance_payment),
        )
}
