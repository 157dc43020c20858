use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::auth::Identity;
use crate::errors::Result;
use crate::investments::investments_model::{
    Investment, InvestmentRecord, InvestmentStatus, NewInvestment,
};
use crate::investments::terms::{InvestmentTerms, PaymentSchedule, PlanCategory};
use async_trait::async_trait;

/// Trait for investment repository operations
#[async_trait]
pub trait InvestmentRepositoryTrait: Send + Sync {
    fn get_investment(&self, investment_id: &str) -> Result<Investment>;
    fn list_by_user(&self, user_id: &str) -> Result<Vec<Investment>>;
    fn list_all(&self) -> Result<Vec<Investment>>;
    async fn insert_investment(&self, record: InvestmentRecord) -> Result<Investment>;
    /// Moves the investment from `from` to `to` in a single write.
    ///
    /// Fails with [`crate::Error::InvalidTransition`] when the stored status is
    /// no longer `from`.
    async fn update_status(
        &self,
        investment_id: String,
        from: InvestmentStatus,
        to: InvestmentStatus,
    ) -> Result<Investment>;
    /// Replaces the next payment date of an active investment, provided it
    /// still equals `expected`. Fails with [`crate::Error::Conflict`] otherwise.
    async fn update_next_payment_date(
        &self,
        investment_id: String,
        expected: DateTime<Utc>,
        next_payment_date: DateTime<Utc>,
    ) -> Result<Investment>;
}

/// Trait for investment service operations
#[async_trait]
pub trait InvestmentServiceTrait: Send + Sync {
    fn quote_terms(&self, category: PlanCategory, principal: Decimal) -> Result<InvestmentTerms>;
    async fn create_investment(
        &self,
        identity: &Identity,
        new_investment: NewInvestment,
    ) -> Result<Investment>;
    fn get_investment(&self, identity: &Identity, investment_id: &str) -> Result<Investment>;
    fn list_investments(&self, identity: &Identity) -> Result<Vec<Investment>>;
    fn list_all_investments(&self) -> Result<Vec<Investment>>;
    async fn update_status(
        &self,
        investment_id: String,
        status: InvestmentStatus,
    ) -> Result<Investment>;
    async fn advance_payment_date(&self, investment_id: String) -> Result<Investment>;
    fn payment_schedule(
        &self,
        identity: &Identity,
        investment_id: &str,
        installments: i64,
    ) -> Result<PaymentSchedule>;
}
