//! Public calculators over the investment terms engine.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::Utc;
use terravest_core::investments::{build_payment_schedule, PlanCategory, MAX_SCHEDULE_INSTALLMENTS};
use terravest_core::Error;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{PaymentSchedule, QuoteRequest, ScheduleRequest, TermsQuote},
};

#[utoipa::path(
    post,
    path = "/api/v1/terms/quote",
    request_body = QuoteRequest,
    responses(
        (status = 200, body = TermsQuote),
        (status = 400, description = "Unknown category or non-positive principal")
    )
)]
pub async fn quote_terms(
    State(state): State<Arc<AppState>>,
    Json(request): Json<QuoteRequest>,
) -> ApiResult<Json<TermsQuote>> {
    let category = request.category.trim().parse::<PlanCategory>().map_err(Error::from)?;
    let terms = state
        .investment_service
        .quote_terms(category, request.principal)?;
    Ok(Json(terms.into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/terms/schedule",
    request_body = ScheduleRequest,
    responses(
        (status = 200, body = PaymentSchedule),
        (status = 400, description = "Invalid installment count or amount")
    )
)]
pub async fn schedule(Json(request): Json<ScheduleRequest>) -> ApiResult<Json<PaymentSchedule>> {
    if request.installments > MAX_SCHEDULE_INSTALLMENTS {
        return Err(Error::invalid_input(format!(
            "A schedule cannot have more than {MAX_SCHEDULE_INSTALLMENTS} installments"
        ))
        .into());
    }
    let start = request.start_date.unwrap_or_else(Utc::now);
    let schedule = build_payment_schedule(request.total_amount, request.installments, start)
        .map_err(Error::from)?;
    Ok(Json(schedule.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/terms/quote", post(quote_terms))
        .route("/terms/schedule", post(schedule))
}
