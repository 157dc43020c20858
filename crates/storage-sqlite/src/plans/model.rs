//! Database models for investment plans.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use crate::utils::{parse_decimal, parse_optional_decimal};
use terravest_core::investments::PlanCategory;
use terravest_core::plans::{InvestmentPlan, InvestmentPlanUpdate, NewInvestmentPlan};

#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_plans)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct InvestmentPlanDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub min_amount: String,
    pub max_amount: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_plans)]
pub struct NewInvestmentPlanDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub min_amount: String,
    pub max_amount: Option<String>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Editable columns. The category is fixed once a plan exists.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::investment_plans)]
#[diesel(treat_none_as_null = true)]
pub struct InvestmentPlanChangeset {
    pub name: String,
    pub description: Option<String>,
    pub min_amount: String,
    pub max_amount: Option<String>,
    pub is_active: bool,
    pub updated_at: NaiveDateTime,
}

impl NewInvestmentPlanDB {
    pub fn from_domain(id: String, plan: NewInvestmentPlan, now: NaiveDateTime) -> Self {
        Self {
            id,
            name: plan.name,
            description: plan.description,
            category: plan.category.as_str().to_string(),
            min_amount: plan.min_amount.to_string(),
            max_amount: plan.max_amount.map(|m| m.to_string()),
            is_active: plan.is_active,
            created_at: now,
            updated_at: now,
        }
    }
}

impl InvestmentPlanChangeset {
    pub fn from_domain(update: InvestmentPlanUpdate, now: NaiveDateTime) -> Self {
        Self {
            name: update.name,
            description: update.description,
            min_amount: update.min_amount.to_string(),
            max_amount: update.max_amount.map(|m| m.to_string()),
            is_active: update.is_active,
            updated_at: now,
        }
    }
}

impl TryFrom<InvestmentPlanDB> for InvestmentPlan {
    type Error = StorageError;

    fn try_from(db: InvestmentPlanDB) -> Result<Self, Self::Error> {
        let category: PlanCategory = db
            .category
            .parse()
            .map_err(|e| StorageError::CorruptValue(format!("plan {}: {}", db.id, e)))?;
        Ok(InvestmentPlan {
            min_amount: parse_decimal(&db.min_amount, "min_amount")?,
            max_amount: parse_optional_decimal(db.max_amount.as_deref(), "max_amount")?,
            id: db.id,
            name: db.name,
            description: db.description,
            category,
            is_active: db.is_active,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}
