use crate::errors::Result;
use crate::plans::plans_model::{InvestmentPlan, InvestmentPlanUpdate, NewInvestmentPlan};
use async_trait::async_trait;

/// Trait for plan repository operations
#[async_trait]
pub trait PlanRepositoryTrait: Send + Sync {
    fn load_plans(&self, active_only: bool) -> Result<Vec<InvestmentPlan>>;
    fn get_plan(&self, plan_id: &str) -> Result<InvestmentPlan>;
    async fn insert_plan(&self, new_plan: NewInvestmentPlan) -> Result<InvestmentPlan>;
    async fn update_plan(&self, plan_update: InvestmentPlanUpdate) -> Result<InvestmentPlan>;
    async fn delete_plan(&self, plan_id: String) -> Result<usize>;
}

/// Trait for plan service operations
#[async_trait]
pub trait PlanServiceTrait: Send + Sync {
    fn get_plans(&self, active_only: bool) -> Result<Vec<InvestmentPlan>>;
    fn get_plan(&self, plan_id: &str) -> Result<InvestmentPlan>;
    async fn create_plan(&self, new_plan: NewInvestmentPlan) -> Result<InvestmentPlan>;
    async fn update_plan(&self, plan_update: InvestmentPlanUpdate) -> Result<InvestmentPlan>;
    async fn delete_plan(&self, plan_id: String) -> Result<()>;
}
