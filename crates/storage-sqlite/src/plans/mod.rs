mod model;
mod repository;

pub use model::{InvestmentPlanDB, NewInvestmentPlanDB};
pub use repository::PlanRepository;
