use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use uuid::Uuid;

use super::model::{InvestmentPlanChangeset, InvestmentPlanDB, NewInvestmentPlanDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::investment_plans;
use terravest_core::plans::{
    InvestmentPlan, InvestmentPlanUpdate, NewInvestmentPlan, PlanRepositoryTrait,
};
use terravest_core::{Error, Result};

pub struct PlanRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PlanRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        PlanRepository { pool, writer }
    }
}

fn load_plan(conn: &mut SqliteConnection, plan_id: &str) -> Result<InvestmentPlan> {
    let row = investment_plans::table
        .find(plan_id)
        .select(InvestmentPlanDB::as_select())
        .first(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(format!("Investment plan {plan_id}")))?;
    Ok(InvestmentPlan::try_from(row)?)
}

#[async_trait]
impl PlanRepositoryTrait for PlanRepository {
    fn load_plans(&self, active_only: bool) -> Result<Vec<InvestmentPlan>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = investment_plans::table
            .select(InvestmentPlanDB::as_select())
            .order(investment_plans::name.asc())
            .into_boxed();
        if active_only {
            query = query.filter(investment_plans::is_active.eq(true));
        }
        let rows = query.load(&mut conn).into_core()?;
        rows.into_iter()
            .map(|row| InvestmentPlan::try_from(row).map_err(Into::into))
            .collect()
    }

    fn get_plan(&self, plan_id: &str) -> Result<InvestmentPlan> {
        let mut conn = get_connection(&self.pool)?;
        load_plan(&mut conn, plan_id)
    }

    async fn insert_plan(&self, new_plan: NewInvestmentPlan) -> Result<InvestmentPlan> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<InvestmentPlan> {
                let id = new_plan
                    .id
                    .clone()
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let row = NewInvestmentPlanDB::from_domain(id, new_plan, Utc::now().naive_utc());
                let inserted = diesel::insert_into(investment_plans::table)
                    .values(&row)
                    .returning(InvestmentPlanDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(InvestmentPlan::try_from(inserted)?)
            })
            .await
    }

    async fn update_plan(&self, plan_update: InvestmentPlanUpdate) -> Result<InvestmentPlan> {
        let plan_id = plan_update
            .id
            .clone()
            .ok_or_else(|| Error::invalid_input("Plan id is required for an update"))?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<InvestmentPlan> {
                let changes = InvestmentPlanChangeset::from_domain(plan_update, Utc::now().naive_utc());
                let updated = diesel::update(investment_plans::table.find(&plan_id))
                    .set(&changes)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::not_found(format!("Investment plan {plan_id}")));
                }
                load_plan(conn, &plan_id)
            })
            .await
    }

    async fn delete_plan(&self, plan_id: String) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                Ok(diesel::delete(investment_plans::table.find(plan_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }
}
