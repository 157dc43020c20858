//! Tests for the investment terms engine.

#[cfg(test)]
mod tests {
    use crate::investments::terms::*;
    use chrono::{DateTime, TimeDelta, TimeZone, Utc};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    // ==================== Category Tests ====================

    #[test]
    fn test_category_parse() {
        assert_eq!("SEMI_ANNUAL".parse::<PlanCategory>(), Ok(PlanCategory::SemiAnnual));
        assert_eq!("ANNUAL".parse::<PlanCategory>(), Ok(PlanCategory::Annual));
        assert_eq!(
            "QUARTERLY".parse::<PlanCategory>(),
            Err(TermsError::InvalidCategory("QUARTERLY".to_string()))
        );
        assert!("annual".parse::<PlanCategory>().is_err());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(
            serde_json::to_string(&PlanCategory::SemiAnnual).unwrap(),
            "\"SEMI_ANNUAL\""
        );
        assert_eq!(
            serde_json::from_str::<PlanCategory>("\"ANNUAL\"").unwrap(),
            PlanCategory::Annual
        );
    }

    #[test]
    fn test_duration_months() {
        assert_eq!(resolve_duration_months(PlanCategory::SemiAnnual), 6);
        assert_eq!(resolve_duration_months(PlanCategory::Annual), 12);
    }

    #[test]
    fn test_return_rates() {
        assert_eq!(return_rate(PlanCategory::SemiAnnual), dec!(0.15));
        assert_eq!(return_rate(PlanCategory::Annual), dec!(0.30));
    }

    // ==================== Expected Return Tests ====================

    #[test]
    fn test_annual_scenario() {
        let terms = InvestmentTerms::compute(PlanCategory::Annual, dec!(10000)).unwrap();
        assert_eq!(terms.expected_return, dec!(3000));
        assert_eq!(terms.duration_months, 12);
        assert_eq!(terms.return_rate, dec!(0.30));
    }

    #[test]
    fn test_semi_annual_scenario() {
        let terms = InvestmentTerms::compute(PlanCategory::SemiAnnual, dec!(5000)).unwrap();
        assert_eq!(terms.expected_return, dec!(750));
        assert_eq!(terms.duration_months, 6);
    }

    #[test]
    fn test_expected_return_is_cent_exact() {
        assert_eq!(
            calculate_expected_return(PlanCategory::SemiAnnual, dec!(0.10)).unwrap(),
            dec!(0.015)
        );
        assert_eq!(
            calculate_expected_return(PlanCategory::Annual, dec!(1234.57)).unwrap(),
            dec!(370.371)
        );
    }

    #[test]
    fn test_expected_return_rejects_zero_and_negative() {
        assert_eq!(
            calculate_expected_return(PlanCategory::Annual, Decimal::ZERO),
            Err(TermsError::InvalidAmount(Decimal::ZERO))
        );
        assert_eq!(
            calculate_expected_return(PlanCategory::SemiAnnual, dec!(-50)),
            Err(TermsError::InvalidAmount(dec!(-50)))
        );
    }

    // ==================== Installment Tests ====================

    #[test]
    fn test_split_even() {
        assert_eq!(split_into_installments(dec!(1200), 12).unwrap(), dec!(100));
    }

    #[test]
    fn test_split_keeps_full_precision() {
        let part = split_into_installments(dec!(100), 3).unwrap();
        assert_eq!(part.round_dp(2), dec!(33.33));
        assert!(part > dec!(33.33));
    }

    #[test]
    fn test_split_rejects_zero_and_negative_count() {
        assert_eq!(
            split_into_installments(dec!(1200), 0),
            Err(TermsError::InvalidInstallmentCount(0))
        );
        assert_eq!(
            split_into_installments(dec!(1200), -3),
            Err(TermsError::InvalidInstallmentCount(-3))
        );
    }

    #[test]
    fn test_split_rejects_non_positive_total() {
        assert_eq!(
            split_into_installments(Decimal::ZERO, 4),
            Err(TermsError::InvalidAmount(Decimal::ZERO))
        );
    }

    // ==================== Schedule Tests ====================

    #[test]
    fn test_next_payment_date_across_year_boundary() {
        let start = utc(2024, 12, 15, 9);
        assert_eq!(next_payment_date(start), Ok(utc(2025, 1, 14, 9)));
    }

    #[test]
    fn test_next_payment_date_ignores_month_length() {
        // January has 31 days, so the next date lands on Mar 1 in a leap year.
        let start = utc(2024, 1, 31, 0);
        assert_eq!(next_payment_date(start), Ok(utc(2024, 3, 1, 0)));
    }

    #[test]
    fn test_next_payment_date_out_of_range() {
        let start = DateTime::<Utc>::MAX_UTC - TimeDelta::days(1);
        assert_eq!(
            next_payment_date(start),
            Err(TermsError::DateOutOfRange(start))
        );
    }

    #[test]
    fn test_build_payment_schedule_out_of_range() {
        // The first date fits, the second does not.
        let start = DateTime::<Utc>::MAX_UTC - TimeDelta::days(45);
        let result = build_payment_schedule(dec!(1200), 2, start);
        assert!(matches!(result, Err(TermsError::DateOutOfRange(_))));
    }

    #[test]
    fn test_maturity_date_uses_calendar_months() {
        let start = utc(2024, 1, 31, 12);
        assert_eq!(
            maturity_date(start, PlanCategory::SemiAnnual),
            Some(utc(2024, 7, 31, 12))
        );
        assert_eq!(
            maturity_date(start, PlanCategory::Annual),
            Some(utc(2025, 1, 31, 12))
        );
    }

    #[test]
    fn test_build_payment_schedule() {
        let start = utc(2024, 3, 1, 0);
        let schedule = build_payment_schedule(dec!(1200), 3, start).unwrap();

        assert_eq!(schedule.installment_count, 3);
        assert_eq!(schedule.payments.len(), 3);
        assert_eq!(schedule.payments[0].sequence, 1);
        assert_eq!(Ok(schedule.payments[0].due_date), next_payment_date(start));
        for pair in schedule.payments.windows(2) {
            assert_eq!(
                (pair[1].due_date - pair[0].due_date).num_seconds(),
                PAYMENT_INTERVAL_SECS
            );
        }
        assert!(schedule.payments.iter().all(|p| p.amount == dec!(400)));
    }

    #[test]
    fn test_build_payment_schedule_rejects_zero_count() {
        let result = build_payment_schedule(dec!(1200), 0, Utc::now());
        assert_eq!(result, Err(TermsError::InvalidInstallmentCount(0)));
    }

    // ==================== Properties ====================

    proptest! {
        #[test]
        fn prop_expected_return_is_exact_percentage(cents in 1i64..10_000_000_000i64) {
            let principal = Decimal::new(cents, 2);
            let semi = calculate_expected_return(PlanCategory::SemiAnnual, principal).unwrap();
            let annual = calculate_expected_return(PlanCategory::Annual, principal).unwrap();

            // 15% and 30% of an amount in cents are whole thousandths.
            prop_assert_eq!(Decimal::from(cents * 15), semi * dec!(10000));
            prop_assert_eq!(Decimal::from(cents * 30), annual * dec!(10000));
            prop_assert_eq!(annual, semi * Decimal::TWO);
        }

        #[test]
        fn prop_non_positive_principal_is_rejected(cents in -10_000_000i64..=0i64) {
            let principal = Decimal::new(cents, 2);
            for category in [PlanCategory::SemiAnnual, PlanCategory::Annual] {
                prop_assert_eq!(
                    calculate_expected_return(category, principal),
                    Err(TermsError::InvalidAmount(principal))
                );
            }
        }

        // Covers 1970..2100, including every DST transition in that span.
        #[test]
        fn prop_next_payment_date_is_exactly_thirty_days(secs in 0i64..4_102_444_800i64) {
            let start = DateTime::<Utc>::from_timestamp(secs, 0).unwrap();
            prop_assert_eq!(
                (next_payment_date(start).unwrap() - start).num_seconds(),
                2_592_000
            );
        }

        #[test]
        fn prop_installments_multiply_back(units in 1i64..1_000_000i64, count in 1i64..=360i64) {
            let total = Decimal::from(units * count);
            prop_assert_eq!(split_into_installments(total, count).unwrap(), Decimal::from(units));
        }
    }
}
