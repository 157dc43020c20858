use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::investments_model::{Investment, InvestmentRecord, InvestmentStatus, NewInvestment};
use super::investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
use super::terms::{
    build_payment_schedule, maturity_date, next_payment_date, InvestmentTerms, PaymentSchedule,
    PlanCategory,
};
use crate::auth::{ensure_owner_or_admin, Identity};
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};
use crate::plans::PlanRepositoryTrait;

/// Upper bound on the number of installments a schedule may be split into.
pub const MAX_SCHEDULE_INSTALLMENTS: i64 = 360;

/// Service for placing investments and driving their lifecycle
pub struct InvestmentService {
    repository: Arc<dyn InvestmentRepositoryTrait>,
    plan_repository: Arc<dyn PlanRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl InvestmentService {
    pub fn new(
        repository: Arc<dyn InvestmentRepositoryTrait>,
        plan_repository: Arc<dyn PlanRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            plan_repository,
            event_sink,
        }
    }
}

#[async_trait]
impl InvestmentServiceTrait for InvestmentService {
    fn quote_terms(&self, category: PlanCategory, principal: Decimal) -> Result<InvestmentTerms> {
        Ok(InvestmentTerms::compute(category, principal)?)
    }

    async fn create_investment(
        &self,
        identity: &Identity,
        new_investment: NewInvestment,
    ) -> Result<Investment> {
        let plan = self.plan_repository.get_plan(&new_investment.plan_id)?;
        if !plan.is_active {
            return Err(Error::invalid_input(format!(
                "Plan '{}' is not open for new investments",
                plan.name
            )));
        }

        let terms = InvestmentTerms::compute(plan.category, new_investment.principal)?;
        if !plan.accepts_amount(terms.principal) {
            return Err(Error::invalid_input(format!(
                "Amount {} is outside the range accepted by plan '{}'",
                terms.principal, plan.name
            )));
        }

        let start_date = Utc::now();
        let maturity = maturity_date(start_date, plan.category)
            .ok_or_else(|| Error::Unexpected("Maturity date out of range".to_string()))?;

        debug!(
            "Placing {} investment of {} for user {} in plan {}",
            terms.category, terms.principal, identity.user_id, plan.id
        );

        let investment = self
            .repository
            .insert_investment(InvestmentRecord {
                user_id: identity.user_id.clone(),
                plan_id: plan.id,
                terms,
                status: InvestmentStatus::Pending,
                start_date,
                maturity_date: maturity,
                next_payment_date: next_payment_date(start_date)?,
            })
            .await?;

        info!(
            "Investment {} created: principal {}, expected return {}",
            investment.id, investment.principal, investment.expected_return
        );
        self.event_sink.emit(DomainEvent::InvestmentCreated {
            investment_id: investment.id.clone(),
            user_id: investment.user_id.clone(),
            category: investment.category,
            principal: investment.principal,
            expected_return: investment.expected_return,
        });
        Ok(investment)
    }

    fn get_investment(&self, identity: &Identity, investment_id: &str) -> Result<Investment> {
        let investment = self.repository.get_investment(investment_id)?;
        ensure_owner_or_admin(identity, &investment.user_id)?;
        Ok(investment)
    }

    fn list_investments(&self, identity: &Identity) -> Result<Vec<Investment>> {
        self.repository.list_by_user(&identity.user_id)
    }

    fn list_all_investments(&self) -> Result<Vec<Investment>> {
        self.repository.list_all()
    }

    async fn update_status(
        &self,
        investment_id: String,
        status: InvestmentStatus,
    ) -> Result<Investment> {
        let current = self.repository.get_investment(&investment_id)?;
        if !current.status.can_transition_to(status) {
            warn!(
                "Rejected status change for investment {}: {} -> {}",
                investment_id, current.status, status
            );
            return Err(Error::InvalidTransition {
                from: current.status.to_string(),
                to: status.to_string(),
            });
        }

        let updated = self
            .repository
            .update_status(investment_id, current.status, status)
            .await?;
        info!(
            "Investment {} moved from {} to {}",
            updated.id, current.status, updated.status
        );
        self.event_sink.emit(DomainEvent::InvestmentStatusChanged {
            investment_id: updated.id.clone(),
            user_id: updated.user_id.clone(),
            old_status: current.status,
            new_status: updated.status,
        });
        Ok(updated)
    }

    async fn advance_payment_date(&self, investment_id: String) -> Result<Investment> {
        let current = self.repository.get_investment(&investment_id)?;
        if current.status != InvestmentStatus::Active {
            return Err(Error::invalid_input(format!(
                "Only active investments have a payment schedule, investment {} is {}",
                investment_id, current.status
            )));
        }
        let next = next_payment_date(current.next_payment_date)?;
        debug!(
            "Advancing investment {} payment date {} -> {}",
            investment_id, current.next_payment_date, next
        );
        self.repository
            .update_next_payment_date(investment_id, current.next_payment_date, next)
            .await
    }

    fn payment_schedule(
        &self,
        identity: &Identity,
        investment_id: &str,
        installments: i64,
    ) -> Result<PaymentSchedule> {
        if installments > MAX_SCHEDULE_INSTALLMENTS {
            return Err(Error::invalid_input(format!(
                "A schedule cannot have more than {MAX_SCHEDULE_INSTALLMENTS} installments"
            )));
        }
        let investment = self.get_investment(identity, investment_id)?;
        Ok(build_payment_schedule(
            investment.expected_return,
            installments,
            investment.start_date,
        )?)
    }
}
