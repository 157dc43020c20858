//! Investment domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::terms::{InvestmentTerms, PlanCategory};

/// Lifecycle of an investment.
///
/// ```text
/// PENDING ──► ACTIVE ──► COMPLETED
///    │
///    └──────► CANCELLED
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvestmentStatus {
    #[default]
    Pending,
    Active,
    Completed,
    Cancelled,
}

impl InvestmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvestmentStatus::Pending => "PENDING",
            InvestmentStatus::Active => "ACTIVE",
            InvestmentStatus::Completed => "COMPLETED",
            InvestmentStatus::Cancelled => "CANCELLED",
        }
    }

    pub fn can_transition_to(&self, next: InvestmentStatus) -> bool {
        matches!(
            (self, next),
            (InvestmentStatus::Pending, InvestmentStatus::Active)
                | (InvestmentStatus::Pending, InvestmentStatus::Cancelled)
                | (InvestmentStatus::Active, InvestmentStatus::Completed)
        )
    }
}

impl fmt::Display for InvestmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvestmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(InvestmentStatus::Pending),
            "ACTIVE" => Ok(InvestmentStatus::Active),
            "COMPLETED" => Ok(InvestmentStatus::Completed),
            "CANCELLED" => Ok(InvestmentStatus::Cancelled),
            other => Err(format!("Unknown investment status '{other}'")),
        }
    }
}

/// Domain model representing a placed investment
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: String,
    pub user_id: String,
    pub plan_id: String,
    pub category: PlanCategory,
    pub principal: Decimal,
    pub return_rate: Decimal,
    pub expected_return: Decimal,
    pub duration_months: u32,
    pub status: InvestmentStatus,
    pub start_date: DateTime<Utc>,
    pub maturity_date: DateTime<Utc>,
    pub next_payment_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Investment {
    /// Terms as snapshotted when the investment was placed.
    pub fn terms(&self) -> InvestmentTerms {
        InvestmentTerms {
            category: self.category,
            principal: self.principal,
            duration_months: self.duration_months,
            return_rate: self.return_rate,
            expected_return: self.expected_return,
        }
    }
}

/// Request to place an investment in a plan
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewInvestment {
    pub plan_id: String,
    pub principal: Decimal,
}

/// Fully computed investment, ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct InvestmentRecord {
    pub user_id: String,
    pub plan_id: String,
    pub terms: InvestmentTerms,
    pub status: InvestmentStatus,
    pub start_date: DateTime<Utc>,
    pub maturity_date: DateTime<Utc>,
    pub next_payment_date: DateTime<Utc>,
}
