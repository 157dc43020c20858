//! Database models for investments.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{parse_decimal, to_utc};
use terravest_core::investments::{Investment, InvestmentRecord, InvestmentStatus, PlanCategory};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::investments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentDB {
    pub id: String,
    pub user_id: String,
    pub plan_id: String,
    pub category: String,
    pub principal: String,
    pub return_rate: String,
    pub expected_return: String,
    pub duration_months: i32,
    pub status: String,
    pub start_date: NaiveDateTime,
    pub maturity_date: NaiveDateTime,
    pub next_payment_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::investments)]
pub struct NewInvestmentDB {
    pub id: String,
    pub user_id: String,
    pub plan_id: String,
    pub category: String,
    pub principal: String,
    pub return_rate: String,
    pub expected_return: String,
    pub duration_months: i32,
    pub status: String,
    pub start_date: NaiveDateTime,
    pub maturity_date: NaiveDateTime,
    pub next_payment_date: NaiveDateTime,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl NewInvestmentDB {
    pub fn from_record(
        id: String,
        record: InvestmentRecord,
        now: NaiveDateTime,
    ) -> Result<Self, StorageError> {
        let duration_months = i32::try_from(record.terms.duration_months).map_err(|_| {
            StorageError::CorruptValue(format!(
                "duration of {} months does not fit a column",
                record.terms.duration_months
            ))
        })?;
        Ok(Self {
            id,
            user_id: record.user_id,
            plan_id: record.plan_id,
            category: record.terms.category.as_str().to_string(),
            principal: record.terms.principal.to_string(),
            return_rate: record.terms.return_rate.to_string(),
            expected_return: record.terms.expected_return.to_string(),
            duration_months,
            status: record.status.as_str().to_string(),
            start_date: record.start_date.naive_utc(),
            maturity_date: record.maturity_date.naive_utc(),
            next_payment_date: record.next_payment_date.naive_utc(),
            created_at: now,
            updated_at: now,
        })
    }
}

impl TryFrom<InvestmentDB> for Investment {
    type Error = StorageError;

    fn try_from(db: InvestmentDB) -> Result<Self, Self::Error> {
        let corrupt = |what: &str, detail: String| {
            StorageError::CorruptValue(format!("investment {} {}: {}", db.id, what, detail))
        };
        let category = db
            .category
            .parse::<PlanCategory>()
            .map_err(|e| corrupt("category", e.to_string()))?;
        let status = db
            .status
            .parse::<InvestmentStatus>()
            .map_err(|e| corrupt("status", e))?;
        let duration_months = u32::try_from(db.duration_months)
            .map_err(|e| corrupt("duration_months", e.to_string()))?;

        Ok(Investment {
            principal: parse_decimal(&db.principal, "principal")?,
            return_rate: parse_decimal(&db.return_rate, "return_rate")?,
            expected_return: parse_decimal(&db.expected_return, "expected_return")?,
            id: db.id,
            user_id: db.user_id,
            plan_id: db.plan_id,
            category,
            duration_months,
            status,
            start_date: to_utc(db.start_date),
            maturity_date: to_utc(db.maturity_date),
            next_payment_date: to_utc(db.next_payment_date),
            created_at: to_utc(db.created_at),
            updated_at: to_utc(db.updated_at),
        })
    }
}
