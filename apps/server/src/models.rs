use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use terravest_core::auth::{Identity, Role};
use terravest_core::investments::{
    self as core_investments, InvestmentStatus, InvestmentTerms,
};
use terravest_core::plans::InvestmentPlan;
use terravest_core::users::User;
use utoipa::{IntoParams, ToSchema};

#[derive(Deserialize, ToSchema, Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize, ToSchema, Debug)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: User,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusResponse {
    pub authenticated: bool,
    pub identity: Option<Identity>,
}

/// Body of `POST /terms/quote`.
#[derive(Deserialize, ToSchema, Debug)]
pub struct QuoteRequest {
    /// `SEMI_ANNUAL` or `ANNUAL`.
    pub category: String,
    #[schema(value_type = String, example = "10000.00")]
    pub principal: Decimal,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TermsQuote {
    pub category: String,
    #[schema(value_type = String)]
    pub principal: Decimal,
    pub duration_months: u32,
    #[schema(value_type = String)]
    pub return_rate: Decimal,
    #[schema(value_type = String)]
    pub expected_return: Decimal,
}

impl From<InvestmentTerms> for TermsQuote {
    fn from(t: InvestmentTerms) -> Self {
        Self {
            category: t.category.as_str().to_string(),
            principal: t.principal,
            duration_months: t.duration_months,
            return_rate: t.return_rate,
            expected_return: t.expected_return,
        }
    }
}

/// Investment plan together with the duration and rate its category implies.
#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    #[schema(value_type = String)]
    pub min_amount: Decimal,
    #[schema(value_type = Option<String>)]
    pub max_amount: Option<Decimal>,
    pub is_active: bool,
    pub duration_months: u32,
    #[schema(value_type = String)]
    pub return_rate: Decimal,
    #[schema(value_type = String)]
    pub created_at: NaiveDateTime,
    #[schema(value_type = String)]
    pub updated_at: NaiveDateTime,
}

impl From<InvestmentPlan> for Plan {
    fn from(p: InvestmentPlan) -> Self {
        Self {
            duration_months: p.duration_months(),
            return_rate: p.return_rate(),
            category: p.category.as_str().to_string(),
            id: p.id,
            name: p.name,
            description: p.description,
            min_amount: p.min_amount,
            max_amount: p.max_amount,
            is_active: p.is_active,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

/// Body of `POST /terms/schedule`.
#[derive(Deserialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    #[schema(value_type = String, example = "3000.00")]
    pub total_amount: Decimal,
    pub installments: i64,
    /// Defaults to now.
    pub start_date: Option<DateTime<Utc>>,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    pub sequence: u32,
    pub due_date: DateTime<Utc>,
    #[schema(value_type = String)]
    pub amount: Decimal,
}

#[derive(Serialize, ToSchema, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    #[schema(value_type = String)]
    pub total_amount: Decimal,
    pub installment_count: u32,
    pub start_date: DateTime<Utc>,
    pub payments: Vec<ScheduledPayment>,
}

impl From<core_investments::PaymentSchedule> for PaymentSchedule {
    fn from(s: core_investments::PaymentSchedule) -> Self {
        Self {
            total_amount: s.total_amount,
            installment_count: s.installment_count,
            start_date: s.start_date,
            payments: s
                .payments
                .into_iter()
                .map(|p| ScheduledPayment {
                    sequence: p.sequence,
                    due_date: p.due_date,
                    amount: p.amount,
                })
                .collect(),
        }
    }
}

#[derive(Deserialize, IntoParams, Debug)]
pub struct ScheduleQuery {
    /// Number of installments, defaults to the plan duration in months.
    pub installments: Option<i64>,
}

#[derive(Deserialize, Debug)]
pub struct StatusUpdateRequest {
    pub status: InvestmentStatus,
}

#[derive(Deserialize, Debug)]
pub struct RoleUpdateRequest {
    pub role: Role,
}
