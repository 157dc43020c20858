//! Investment plan domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};
use crate::investments::{resolve_duration_months, return_rate, PlanCategory};

/// Domain model representing an investment plan (real estate, green energy,
/// market plans, ...).
///
/// Duration and rate are not stored: they are read from the terms engine for
/// the plan's category, so a plan can never disagree with the figures an
/// investment is computed with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlan {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: PlanCategory,
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl InvestmentPlan {
    pub fn duration_months(&self) -> u32 {
        resolve_duration_months(self.category)
    }

    pub fn return_rate(&self) -> Decimal {
        return_rate(self.category)
    }

    /// Whether `principal` is inside the plan's `[min_amount, max_amount]` range.
    pub fn accepts_amount(&self, principal: Decimal) -> bool {
        principal >= self.min_amount && self.max_amount.map_or(true, |max| principal <= max)
    }
}

/// Input model for creating a new plan
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestmentPlan {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub category: PlanCategory,
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

/// Input model for updating a plan. The category is fixed at creation.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlanUpdate {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub min_amount: Decimal,
    pub max_amount: Option<Decimal>,
    pub is_active: bool,
}

pub(crate) fn validate_plan_fields(
    name: &str,
    min_amount: Decimal,
    max_amount: Option<Decimal>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_input("Plan name cannot be empty"));
    }
    if min_amount <= Decimal::ZERO {
        return Err(Error::invalid_input("Minimum amount must be greater than zero"));
    }
    if let Some(max) = max_amount {
        if max < min_amount {
            return Err(Error::invalid_input(
                "Maximum amount cannot be lower than the minimum amount",
            ));
        }
    }
    Ok(())
}

impl NewInvestmentPlan {
    pub fn validate(&self) -> Result<()> {
        validate_plan_fields(&self.name, self.min_amount, self.max_amount)
    }
}

impl InvestmentPlanUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.as_deref().map_or(true, str::is_empty) {
            return Err(Error::Validation(
                crate::errors::ValidationError::MissingField("id".to_string()),
            ));
        }
        validate_plan_fields(&self.name, self.min_amount, self.max_amount)
    }
}
