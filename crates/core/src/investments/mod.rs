//! Investments module - terms engine, investment lifecycle, services and traits.

mod investments_model;
mod investments_service;
mod investments_traits;
pub mod terms;

#[cfg(test)]
mod terms_tests;

pub use investments_model::{Investment, InvestmentRecord, InvestmentStatus, NewInvestment};
pub use investments_service::{InvestmentService, MAX_SCHEDULE_INSTALLMENTS};
pub use investments_traits::{InvestmentRepositoryTrait, InvestmentServiceTrait};
pub use terms::{
    build_payment_schedule, calculate_expected_return, maturity_date, next_payment_date,
    resolve_duration_months, return_rate, split_into_installments, InvestmentTerms,
    PaymentSchedule, PlanCategory, ScheduledPayment, TermsError, PAYMENT_INTERVAL_SECS,
};
