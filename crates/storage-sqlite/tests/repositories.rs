use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use rust_decimal_macros::dec;
use tempfile::TempDir;
use terravest_core::auth::Role;
use terravest_core::events::NoOpDomainEventSink;
use terravest_core::investments::{
    Investment, InvestmentRecord, InvestmentRepositoryTrait, InvestmentService,
    InvestmentServiceTrait, InvestmentStatus, InvestmentTerms, PlanCategory,
};
use terravest_core::plans::{InvestmentPlanUpdate, NewInvestmentPlan, PlanRepositoryTrait};
use terravest_core::users::{NewUser, UserRepositoryTrait};
use terravest_core::{errors::DatabaseError, Error};
use terravest_storage_sqlite::{
    create_pool, init, run_migrations, spawn_writer, DbPool, InvestmentRepository,
    PlanRepository, UserRepository, WriteHandle,
};

struct Repos {
    _dir: TempDir,
    users: UserRepository,
    plans: PlanRepository,
    investments: InvestmentRepository,
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

fn setup() -> Repos {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("data").join("test.db");
    let db_path = init(db_path.to_str().unwrap()).unwrap();
    let pool = create_pool(&db_path).unwrap();
    run_migrations(&pool).unwrap();
    let writer = spawn_writer((*pool).clone());
    Repos {
        _dir: dir,
        users: UserRepository::new(pool.clone(), writer.clone()),
        plans: PlanRepository::new(pool.clone(), writer.clone()),
        investments: InvestmentRepository::new(Arc::clone(&pool), writer.clone()),
        pool,
        writer,
    }
}

impl Repos {
    fn investment_service(&self) -> InvestmentService {
        InvestmentService::new(
            Arc::new(InvestmentRepository::new(
                Arc::clone(&self.pool),
                self.writer.clone(),
            )),
            Arc::new(PlanRepository::new(
                Arc::clone(&self.pool),
                self.writer.clone(),
            )),
            Arc::new(NoOpDomainEventSink),
        )
    }

    async fn seed_investment(&self, status: InvestmentStatus) -> Investment {
        let user = self.users.insert_user(new_user("ada@example.com")).await.unwrap();
        self.plans
            .insert_plan(new_plan("orchard", PlanCategory::Annual))
            .await
            .unwrap();
        let start = DateTime::<Utc>::from_timestamp(1_718_000_000, 0).unwrap();
        self.investments
            .insert_investment(InvestmentRecord {
                user_id: user.id,
                plan_id: "orchard".to_string(),
                terms: InvestmentTerms::compute(PlanCategory::Annual, dec!(5000)).unwrap(),
                status,
                start_date: start,
                maturity_date: start + TimeDelta::days(365),
                next_payment_date: start + TimeDelta::seconds(2_592_000),
            })
            .await
            .unwrap()
    }
}

fn new_user(email: &str) -> NewUser {
    NewUser {
        email: email.to_string(),
        password_hash: "$argon2id$v=19$stub".to_string(),
        role: Role::User,
        email_verified: false,
    }
}

fn new_plan(id: &str, category: PlanCategory) -> NewInvestmentPlan {
    NewInvestmentPlan {
        id: Some(id.to_string()),
        name: format!("Plan {id}"),
        description: Some("Farmland".to_string()),
        category,
        min_amount: dec!(1000.00),
        max_amount: Some(dec!(250000.50)),
        is_active: true,
    }
}

#[tokio::test]
async fn users_round_trip_and_update() {
    let repos = setup();
    let user = repos.users.insert_user(new_user("ada@example.com")).await.unwrap();
    assert_eq!(user.role, Role::User);

    let creds = repos
        .users
        .find_by_email("ada@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(creds.user.id, user.id);
    assert_eq!(creds.password_hash, "$argon2id$v=19$stub");
    assert!(repos.users.find_by_email("bob@example.com").unwrap().is_none());

    let verified = repos
        .users
        .set_email_verified(user.id.clone(), true)
        .await
        .unwrap();
    assert!(verified.email_verified);
    let promoted = repos.users.set_role(user.id.clone(), Role::Admin).await.unwrap();
    assert_eq!(promoted.role, Role::Admin);
    assert_eq!(repos.users.list_users().unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_email_is_a_unique_violation() {
    let repos = setup();
    repos.users.insert_user(new_user("ada@example.com")).await.unwrap();
    let err = repos
        .users
        .insert_user(new_user("ada@example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Database(DatabaseError::UniqueViolation(_))));
}

#[tokio::test]
async fn missing_user_is_not_found() {
    let repos = setup();
    assert!(matches!(
        repos.users.get_user("ghost"),
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
    assert!(matches!(
        repos.users.set_role("ghost".to_string(), Role::Admin).await,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

#[tokio::test]
async fn plans_keep_exact_decimals() {
    let repos = setup();
    let plan = repos
        .plans
        .insert_plan(new_plan("orchard", PlanCategory::Annual))
        .await
        .unwrap();
    assert_eq!(plan.min_amount, dec!(1000.00));
    assert_eq!(plan.max_amount, Some(dec!(250000.50)));

    let loaded = repos.plans.get_plan("orchard").unwrap();
    assert_eq!(loaded, plan);
    assert_eq!(loaded.category, PlanCategory::Annual);
}

#[tokio::test]
async fn plan_update_filter_and_delete() {
    let repos = setup();
    repos
        .plans
        .insert_plan(new_plan("orchard", PlanCategory::Annual))
        .await
        .unwrap();
    repos
        .plans
        .insert_plan(new_plan("vineyard", PlanCategory::SemiAnnual))
        .await
        .unwrap();

    let updated = repos
        .plans
        .update_plan(InvestmentPlanUpdate {
            id: Some("vineyard".to_string()),
            name: "Vineyard".to_string(),
            description: None,
            min_amount: dec!(500),
            max_amount: None,
            is_active: false,
        })
        .await
        .unwrap();
    assert_eq!(updated.name, "Vineyard");
    assert_eq!(updated.description, None);
    assert_eq!(updated.max_amount, None);
    assert_eq!(updated.category, PlanCategory::SemiAnnual);

    assert_eq!(repos.plans.load_plans(true).unwrap().len(), 1);
    assert_eq!(repos.plans.load_plans(false).unwrap().len(), 2);

    let missing = repos
        .plans
        .update_plan(InvestmentPlanUpdate {
            id: Some("nope".to_string()),
            name: "Nope".to_string(),
            description: None,
            min_amount: dec!(1),
            max_amount: None,
            is_active: true,
        })
        .await;
    assert!(matches!(
        missing,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));

    assert_eq!(repos.plans.delete_plan("orchard".to_string()).await.unwrap(), 1);
    assert_eq!(repos.plans.delete_plan("orchard".to_string()).await.unwrap(), 0);
}

#[tokio::test]
async fn investments_persist_terms_and_dates() {
    let repos = setup();
    let user = repos.users.insert_user(new_user("ada@example.com")).await.unwrap();
    repos
        .plans
        .insert_plan(new_plan("orchard", PlanCategory::SemiAnnual))
        .await
        .unwrap();

    let start = DateTime::<Utc>::from_timestamp(1_718_000_000, 0).unwrap();
    let terms = InvestmentTerms::compute(PlanCategory::SemiAnnual, dec!(1234.57)).unwrap();
    let investment = repos
        .investments
        .insert_investment(InvestmentRecord {
            user_id: user.id.clone(),
            plan_id: "orchard".to_string(),
            terms: terms.clone(),
            status: InvestmentStatus::Pending,
            start_date: start,
            maturity_date: start + TimeDelta::days(182),
            next_payment_date: start + TimeDelta::seconds(2_592_000),
        })
        .await
        .unwrap();

    assert_eq!(investment.terms(), terms);
    assert_eq!(investment.expected_return, dec!(185.1855));
    assert_eq!(investment.start_date, start);
    assert_eq!(
        (investment.next_payment_date - investment.start_date).num_seconds(),
        2_592_000
    );

    let active = repos
        .investments
        .update_status(
            investment.id.clone(),
            InvestmentStatus::Pending,
            InvestmentStatus::Active,
        )
        .await
        .unwrap();
    assert_eq!(active.status, InvestmentStatus::Active);

    let moved = repos
        .investments
        .update_next_payment_date(
            investment.id.clone(),
            investment.next_payment_date,
            start + TimeDelta::days(60),
        )
        .await
        .unwrap();
    assert_eq!(moved.next_payment_date, start + TimeDelta::days(60));

    assert_eq!(repos.investments.list_by_user(&user.id).unwrap().len(), 1);
    assert!(repos.investments.list_by_user("someone").unwrap().is_empty());
    assert_eq!(repos.investments.list_all().unwrap().len(), 1);
}

#[tokio::test]
async fn plan_with_investments_cannot_be_deleted() {
    let repos = setup();
    let user = repos.users.insert_user(new_user("ada@example.com")).await.unwrap();
    repos
        .plans
        .insert_plan(new_plan("orchard", PlanCategory::Annual))
        .await
        .unwrap();
    let start = Utc::now();
    repos
        .investments
        .insert_investment(InvestmentRecord {
            user_id: user.id,
            plan_id: "orchard".to_string(),
            terms: InvestmentTerms::compute(PlanCategory::Annual, dec!(5000)).unwrap(),
            status: InvestmentStatus::Pending,
            start_date: start,
            maturity_date: start + TimeDelta::days(365),
            next_payment_date: start + TimeDelta::seconds(2_592_000),
        })
        .await
        .unwrap();

    let err = repos
        .plans
        .delete_plan("orchard".to_string())
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        Error::Database(DatabaseError::ForeignKeyViolation(_))
    ));
}

#[tokio::test]
async fn stale_status_transition_is_rejected() {
    let repos = setup();
    let investment = repos.seed_investment(InvestmentStatus::Pending).await;

    repos
        .investments
        .update_status(
            investment.id.clone(),
            InvestmentStatus::Pending,
            InvestmentStatus::Active,
        )
        .await
        .unwrap();

    let stale = repos
        .investments
        .update_status(
            investment.id.clone(),
            InvestmentStatus::Pending,
            InvestmentStatus::Cancelled,
        )
        .await;
    assert!(matches!(
        stale,
        Err(Error::InvalidTransition { ref from, ref to }) if from == "ACTIVE" && to == "CANCELLED"
    ));
    assert_eq!(
        repos.investments.get_investment(&investment.id).unwrap().status,
        InvestmentStatus::Active
    );

    let missing = repos
        .investments
        .update_status(
            "ghost".to_string(),
            InvestmentStatus::Pending,
            InvestmentStatus::Active,
        )
        .await;
    assert!(matches!(
        missing,
        Err(Error::Database(DatabaseError::NotFound(_)))
    ));
}

#[tokio::test]
async fn concurrent_status_transitions_apply_only_one() {
    let repos = setup();
    let investment = repos.seed_investment(InvestmentStatus::Pending).await;
    let service = repos.investment_service();

    let (activate, cancel) = tokio::join!(
        service.update_status(investment.id.clone(), InvestmentStatus::Active),
        service.update_status(investment.id.clone(), InvestmentStatus::Cancelled),
    );
    assert!(
        activate.is_ok() != cancel.is_ok(),
        "exactly one transition must win: activate={activate:?} cancel={cancel:?}"
    );
    let (winner, loser) = if activate.is_ok() {
        (activate.unwrap(), cancel)
    } else {
        (cancel.unwrap(), activate)
    };
    assert!(matches!(loser, Err(Error::InvalidTransition { .. })));

    let stored = repos.investments.get_investment(&investment.id).unwrap();
    assert_eq!(stored.status, winner.status);
}

#[tokio::test]
async fn concurrent_payment_advances_do_not_overlap() {
    let repos = setup();
    let investment = repos.seed_investment(InvestmentStatus::Active).await;
    let service = repos.investment_service();

    let (first, second) = tokio::join!(
        service.advance_payment_date(investment.id.clone()),
        service.advance_payment_date(investment.id.clone()),
    );

    let stored = repos.investments.get_investment(&investment.id).unwrap();
    let advanced = [&first, &second].iter().filter(|r| r.is_ok()).count();
    assert!(advanced >= 1);
    for result in [&first, &second] {
        if let Err(err) = result {
            assert!(matches!(err, Error::Conflict(_)), "unexpected error: {err:?}");
        }
    }
    // Every successful advance moved the date by exactly one period.
    assert_eq!(
        (stored.next_payment_date - investment.next_payment_date).num_seconds(),
        2_592_000 * advanced as i64
    );
}

#[tokio::test]
async fn payment_date_update_requires_expected_value() {
    let repos = setup();
    let investment = repos.seed_investment(InvestmentStatus::Active).await;

    let stale = repos
        .investments
        .update_next_payment_date(
            investment.id.clone(),
            investment.start_date,
            investment.next_payment_date + TimeDelta::days(30),
        )
        .await;
    assert!(matches!(stale, Err(Error::Conflict(_))));
    assert_eq!(
        repos.investments.get_investment(&investment.id).unwrap(),
        investment
    );
}

#[tokio::test]
async fn promote_to_admin_replaces_role_and_password() {
    let repos = setup();
    let user = repos.users.insert_user(new_user("root@example.com")).await.unwrap();

    let promoted = repos
        .users
        .promote_to_admin(user.id.clone(), "$argon2id$v=19$configured".to_string())
        .await
        .unwrap();
    assert_eq!(promoted.role, Role::Admin);
    assert!(promoted.email_verified);

    let creds = repos
        .users
        .find_by_email("root@example.com")
        .unwrap()
        .unwrap();
    assert_eq!(creds.password_hash, "$argon2id$v=19$configured");
}
