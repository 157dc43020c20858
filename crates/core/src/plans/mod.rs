//! Plans module - admin-managed catalogue of investment plans.

mod plans_model;
mod plans_service;
mod plans_traits;


pub use plans_model::{InvestmentPlan, InvestmentPlanUpdate, NewInvestmentPlan};
pub use plans_service::PlanService;
pub use plans_traits::{PlanRepositoryTrait, PlanServiceTrait};
