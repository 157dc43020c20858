//! Investment terms engine.
//!
//! Pure functions mapping a plan category and an amount to durations, payout
//! figures and payment dates. Nothing here touches storage or logs; callers
//! decide how to surface a [`TermsError`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Months, TimeDelta, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds between two consecutive payment dates (30 × 86 400).
pub const PAYMENT_INTERVAL_SECS: i64 = 2_592_000;

const SEMI_ANNUAL_MONTHS: u32 = 6;
const ANNUAL_MONTHS: u32 = 12;
const SEMI_ANNUAL_RATE: Decimal = dec!(0.15);
const ANNUAL_RATE: Decimal = dec!(0.30);

/// Errors raised by the terms engine. All of them are recoverable by the
/// caller correcting its input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermsError {
    #[error("Unknown plan category '{0}'")]
    InvalidCategory(String),

    #[error("Amount must be greater than zero, got {0}")]
    InvalidAmount(Decimal),

    #[error("Installment count must be at least 1, got {0}")]
    InvalidInstallmentCount(i64),

    #[error("Payment date after {0} is outside the supported date range")]
    DateOutOfRange(DateTime<Utc>),
}

/// Investment term class. Chosen when an investment is created and never changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanCategory {
    SemiAnnual,
    Annual,
}

impl PlanCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanCategory::SemiAnnual => "SEMI_ANNUAL",
            PlanCategory::Annual => "ANNUAL",
        }
    }
}

impl fmt::Display for PlanCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanCategory {
    type Err = TermsError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim() {
            "SEMI_ANNUAL" => Ok(PlanCategory::SemiAnnual),
            "ANNUAL" => Ok(PlanCategory::Annual),
            other => Err(TermsError::InvalidCategory(other.to_string())),
        }
    }
}

/// Fixed duration of a plan category, in months.
pub fn resolve_duration_months(category: PlanCategory) -> u32 {
    match category {
        PlanCategory::SemiAnnual => SEMI_ANNUAL_MONTHS,
        PlanCategory::Annual => ANNUAL_MONTHS,
    }
}

/// Fixed payout rate of a plan category, as a fraction of the principal.
pub fn return_rate(category: PlanCategory) -> Decimal {
    match category {
        PlanCategory::SemiAnnual => SEMI_ANNUAL_RATE,
        PlanCategory::Annual => ANNUAL_RATE,
    }
}

/// Expected payout for `principal` invested in `category`.
///
/// # Errors
///
/// Returns [`TermsError::InvalidAmount`] when `principal <= 0`.
pub fn calculate_expected_return(
    category: PlanCategory,
    principal: Decimal,
) -> Result<Decimal, TermsError> {
    ensure_positive(principal)?;
    Ok(principal * return_rate(category))
}

/// Divides `total` into `count` equal installments and returns one installment.
///
/// The quotient is returned at full decimal precision; rounding and any
/// remainder allocation are left to the caller.
///
/// # Errors
///
/// Returns [`TermsError::InvalidInstallmentCount`] when `count <= 0` and
/// [`TermsError::InvalidAmount`] when `total <= 0`.
pub fn split_into_installments(total: Decimal, count: i64) -> Result<Decimal, TermsError> {
    if count <= 0 {
        return Err(TermsError::InvalidInstallmentCount(count));
    }
    ensure_positive(total)?;
    Ok(total / Decimal::from(count))
}

/// Next payment date: exactly 30 × 86 400 seconds after `start`.
///
/// No calendar, month-length or timezone adjustment is applied.
///
/// # Errors
///
/// Returns [`TermsError::DateOutOfRange`] when the result is not representable.
pub fn next_payment_date(start: DateTime<Utc>) -> Result<DateTime<Utc>, TermsError> {
    start
        .checked_add_signed(TimeDelta::seconds(PAYMENT_INTERVAL_SECS))
        .ok_or(TermsError::DateOutOfRange(start))
}

/// Maturity date of an investment started at `start`, in calendar months.
///
/// Used for display; payment cadence always goes through [`next_payment_date`].
pub fn maturity_date(start: DateTime<Utc>, category: PlanCategory) -> Option<DateTime<Utc>> {
    start.checked_add_months(Months::new(resolve_duration_months(category)))
}

fn ensure_positive(amount: Decimal) -> Result<(), TermsError> {
    if amount <= Decimal::ZERO {
        return Err(TermsError::InvalidAmount(amount));
    }
    Ok(())
}

/// Terms derived from `(category, principal)`. Never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentTerms {
    pub category: PlanCategory,
    pub principal: Decimal,
    pub duration_months: u32,
    pub return_rate: Decimal,
    pub expected_return: Decimal,
}

impl InvestmentTerms {
    pub fn compute(category: PlanCategory, principal: Decimal) -> Result<Self, TermsError> {
        let expected_return = calculate_expected_return(category, principal)?;
        Ok(Self {
            category,
            principal,
            duration_months: resolve_duration_months(category),
            return_rate: return_rate(category),
            expected_return,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    /// 1-based position in the schedule.
    pub sequence: u32,
    pub due_date: DateTime<Utc>,
    pub amount: Decimal,
}

/// Ordered due dates for a total split into equal installments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentSchedule {
    pub total_amount: Decimal,
    pub installment_count: u32,
    pub start_date: DateTime<Utc>,
    pub payments: Vec<ScheduledPayment>,
}

/// Builds `count` payments of `total / count`, the first due one period after
/// `start` and each following one exactly one period after the previous.
pub fn build_payment_schedule(
    total: Decimal,
    count: i64,
    start: DateTime<Utc>,
) -> Result<PaymentSchedule, TermsError> {
    let amount = split_into_installments(total, count)?;
    let installment_count =
        u32::try_from(count).map_err(|_| TermsError::InvalidInstallmentCount(count))?;

    let mut payments = Vec::with_capacity(installment_count as usize);
    let mut due_date = start;
    for sequence in 1..=installment_count {
        due_date = next_payment_date(due_date)?;
        payments.push(ScheduledPayment {
            sequence,
            due_date,
            amount,
        });
    }

    Ok(PaymentSchedule {
        total_amount: total,
        installment_count,
        start_date: start,
        payments,
    })
}
