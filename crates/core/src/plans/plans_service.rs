use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::plans_model::{InvestmentPlan, InvestmentPlanUpdate, NewInvestmentPlan};
use super::plans_traits::{PlanRepositoryTrait, PlanServiceTrait};
use crate::errors::{Error, Result};

/// Service for managing the plan catalogue
pub struct PlanService {
    repository: Arc<dyn PlanRepositoryTrait>,
}

impl PlanService {
    pub fn new(repository: Arc<dyn PlanRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl PlanServiceTrait for PlanService {
    fn get_plans(&self, active_only: bool) -> Result<Vec<InvestmentPlan>> {
        self.repository.load_plans(active_only)
    }

    fn get_plan(&self, plan_id: &str) -> Result<InvestmentPlan> {
        self.repository.get_plan(plan_id)
    }

    async fn create_plan(&self, new_plan: NewInvestmentPlan) -> Result<InvestmentPlan> {
        new_plan.validate()?;
        debug!(
            "Creating plan '{}' ({}, min {})",
            new_plan.name, new_plan.category, new_plan.min_amount
        );
        let plan = self.repository.insert_plan(new_plan).await?;
        info!("Created plan {} ({})", plan.id, plan.category);
        Ok(plan)
    }

    async fn update_plan(&self, plan_update: InvestmentPlanUpdate) -> Result<InvestmentPlan> {
        plan_update.validate()?;
        self.repository.update_plan(plan_update).await
    }

    async fn delete_plan(&self, plan_id: String) -> Result<()> {
        let deleted = self.repository.delete_plan(plan_id.clone()).await?;
        if deleted == 0 {
            return Err(Error::not_found(format!("Plan {plan_id}")));
        }
        Ok(())
    }
}
