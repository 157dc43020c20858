use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

use super::model::{InvestmentDB, NewInvestmentDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::investments;
use terravest_core::investments::{
    Investment, InvestmentRecord, InvestmentRepositoryTrait, InvestmentStatus,
};
use terravest_core::{Error, Result};

pub struct InvestmentRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl InvestmentRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        InvestmentRepository { pool, writer }
    }
}

fn load_investment(conn: &mut SqliteConnection, investment_id: &str) -> Result<Investment> {
    let row = investments::table
        .find(investment_id)
        .select(InvestmentDB::as_select())
        .first(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found(format!("Investment {investment_id}")))?;
    Ok(Investment::try_from(row)?)
}

fn into_domain(rows: Vec<InvestmentDB>) -> Result<Vec<Investment>> {
    rows.into_iter()
        .map(|row| Investment::try_from(row).map_err(Into::into))
        .collect()
}

#[async_trait]
impl InvestmentRepositoryTrait for InvestmentRepository {
    fn get_investment(&self, investment_id: &str) -> Result<Investment> {
        let mut conn = get_connection(&self.pool)?;
        load_investment(&mut conn, investment_id)
    }

    fn list_by_user(&self, user_id: &str) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investments::table
            .filter(investments::user_id.eq(user_id))
            .order(investments::start_date.desc())
            .select(InvestmentDB::as_select())
            .load(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    fn list_all(&self) -> Result<Vec<Investment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = investments::table
            .order(investments::start_date.desc())
            .select(InvestmentDB::as_select())
            .load(&mut conn)
            .into_core()?;
        into_domain(rows)
    }

    async fn insert_investment(&self, record: InvestmentRecord) -> Result<Investment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                let row = NewInvestmentDB::from_record(
                    Uuid::new_v4().to_string(),
                    record,
                    Utc::now().naive_utc(),
                )?;
                let inserted = diesel::insert_into(investments::table)
                    .values(&row)
                    .returning(InvestmentDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Investment::try_from(inserted)?)
            })
            .await
    }

    async fn update_status(
        &self,
        investment_id: String,
        from: InvestmentStatus,
        to: InvestmentStatus,
    ) -> Result<Investment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                let changed = diesel::update(
                    investments::table
                        .find(&investment_id)
                        .filter(investments::status.eq(from.as_str())),
                )
                .set((
                    investments::status.eq(to.as_str()),
                    investments::updated_at.eq(Utc::now().naive_utc()),
                ))
                .execute(conn)
                .map_err(StorageError::from)?;

                if changed == 0 {
                    let current = load_investment(conn, &investment_id)?;
                    debug!(
                        "Investment {} is {}, expected {}",
                        investment_id, current.status, from
                    );
                    return Err(Error::InvalidTransition {
                        from: current.status.to_string(),
                        to: to.to_string(),
                    });
                }
                load_investment(conn, &investment_id)
            })
            .await
    }

    async fn update_next_payment_date(
        &self,
        investment_id: String,
        expected: DateTime<Utc>,
        next_payment_date: DateTime<Utc>,
    ) -> Result<Investment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Investment> {
                // Read and update share the writer's immediate transaction.
                let current = load_investment(conn, &investment_id)?;
                if current.status != InvestmentStatus::Active
                    || current.next_payment_date != expected
                {
                    return Err(Error::Conflict(format!(
                        "Investment {investment_id} is {} with next payment on {}",
                        current.status, current.next_payment_date
                    )));
                }

                diesel::update(investments::table.find(&investment_id))
                    .set((
                        investments::next_payment_date.eq(next_payment_date.naive_utc()),
                        investments::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                load_investment(conn, &investment_id)
            })
            .await
    }
}
