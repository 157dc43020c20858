use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::{
    auth::AuthManager,
    config::Config,
    domain_events::{NotifierDeps, WebDomainEventSink},
};
use terravest_core::{
    events::DomainEventSink,
    investments::{InvestmentService, InvestmentServiceTrait},
    plans::{PlanService, PlanServiceTrait},
    users::{UserService, UserServiceTrait},
};
use terravest_storage_sqlite::{
    db::{self, DbPool},
    InvestmentRepository, PlanRepository, UserRepository,
};

pub struct AppState {
    pub auth: Arc<AuthManager>,
    pub user_service: Arc<dyn UserServiceTrait>,
    pub plan_service: Arc<dyn PlanServiceTrait>,
    pub investment_service: Arc<dyn InvestmentServiceTrait>,
    pub pool: Arc<DbPool>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("TV_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());

    // Created before the services, started once they exist.
    let domain_event_sink = Arc::new(WebDomainEventSink::new());
    let event_sink: Arc<dyn DomainEventSink> = domain_event_sink.clone();

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let plan_repository = Arc::new(PlanRepository::new(pool.clone(), writer.clone()));
    let investment_repository = Arc::new(InvestmentRepository::new(pool.clone(), writer));

    let user_service: Arc<dyn UserServiceTrait> =
        Arc::new(UserService::new(user_repository, event_sink.clone()));
    let plan_service: Arc<dyn PlanServiceTrait> =
        Arc::new(PlanService::new(plan_repository.clone()));
    let investment_service: Arc<dyn InvestmentServiceTrait> = Arc::new(InvestmentService::new(
        investment_repository,
        plan_repository,
        event_sink,
    ));

    domain_event_sink.start_worker(Arc::new(NotifierDeps {
        user_service: user_service.clone(),
    }));

    if let Some(admin) = &config.admin {
        let user = user_service
            .ensure_admin(&admin.email, &admin.password_hash)
            .await?;
        tracing::info!("Administrator account: {}", user.email);
    }

    Ok(Arc::new(AppState {
        auth: Arc::new(AuthManager::new(&config.jwt_secret, config.access_token_ttl)),
        user_service,
        plan_service,
        investment_service,
        pool,
        db_path,
    }))
}
