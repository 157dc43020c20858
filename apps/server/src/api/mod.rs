use std::sync::Arc;

use axum::{
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Json, Router,
};
use terravest_core::auth::{Requirement, Role};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    auth::{self, GateState},
    config::Config,
    main_lib::AppState,
    models,
};

pub mod admin;
pub mod health;
pub mod investments;
pub mod plans;
pub mod terms;

#[derive(OpenApi)]
#[openapi(
    paths(health::healthz, health::readyz, terms::quote_terms, terms::schedule),
    components(schemas(
        models::Plan,
        models::QuoteRequest,
        models::TermsQuote,
        models::ScheduleRequest,
        models::PaymentSchedule,
        models::ScheduledPayment,
        models::RegisterRequest,
        models::LoginRequest
    )),
    tags((name = "terravest", description = "Terravest investment platform API"))
)]
pub struct ApiDoc;

/// Wraps `routes` in the authorization gate with the given requirement.
fn gated(
    routes: Router<Arc<AppState>>,
    state: &Arc<AppState>,
    requirement: Requirement,
) -> Router<Arc<AppState>> {
    routes.route_layer(middleware::from_fn_with_state(
        GateState::new(state.clone(), requirement),
        auth::gate,
    ))
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin {}", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    }
    .allow_methods(Any)
    .allow_headers(Any);

    let openapi = ApiDoc::openapi();

    let public = Router::new()
        .merge(health::router())
        .merge(plans::router())
        .merge(terms::router())
        .route("/auth/status", get(auth::auth_status))
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let authenticated = gated(
        Router::new()
            .route("/me", get(auth::me))
            .merge(investments::router()),
        &state,
        Requirement::Authenticated,
    );
    let verified = gated(
        investments::verified_router(),
        &state,
        Requirement::VerifiedEmail,
    );
    let admin = gated(admin::router(), &state, Requirement::Role(Role::Admin));

    let api = public.merge(authenticated).merge(verified).merge(admin);

    Router::new()
        .nest("/api/v1", api)
        .route(
            "/openapi.json",
            get(move || {
                let doc = openapi.clone();
                async move { Json(doc) }
            }),
        )
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
