use loan_math_core::borrower::{dti, BorrowerProfile, EmploymentStatus};
use loan_math_core::loan::amortization::{self, AmortizationInput, AmortizationMethod};
use loan_math_core::loan::payment::{self, PaymentInput};
use loan_math_core::loan::roi::{self, RoiInput};
use loan_math_core::loan::LoanParameters;
use loan_math_core::summary::{self, LoanSummaryInput};
use loan_math_core::{round_currency, LoanMathError};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// ===========================================================================
// Monthly payment
// ===========================================================================

#[test]
fn test_payment_reference_scenario() {
    let payment = payment::monthly_payment(dec!(320_000), dec!(4.5), 30).unwrap();
    assert_eq!(round_currency(payment), dec!(1621.39));
}

#[test]
fn test_payment_known_answer_15_year() {
    // 200k at 6% over 15 years => 1687.71
    let payment = payment::monthly_payment(dec!(200_000), dec!(6), 15).unwrap();
    assert_eq!(round_currency(payment), dec!(1687.71));
}

#[test]
fn test_payment_zero_rate_limit() {
    let payment = payment::monthly_payment(dec!(320_000), Decimal::ZERO, 30).unwrap();
    // 320000 / 360
    assert_eq!(payment, dec!(320_000) / dec!(360));
}

#[test]
fn test_payment_envelope_from_json() {
    let input: PaymentInput = serde_json::from_str(
        r#"{"loan_amount": "320000", "annual_rate_pct": "4.5", "term_years": 30}"#,
    )
    .unwrap();
    let result = payment::calculate_monthly_payment(&input).unwrap();
    assert_eq!(result.result.monthly_payment, dec!(1621.39));
    assert!(result.methodology.contains("Amortizing"));
    assert_eq!(result.metadata.precision, "rust_decimal_128bit");
}

// ===========================================================================
// Debt-to-income
// ===========================================================================

#[test]
fn test_dti_reference_profile() {
    let profile = BorrowerProfile {
        annual_income: dec!(75_000),
        credit_score: 720,
        monthly_debts: dec!(2_000),
        employment_status: EmploymentStatus::SelfEmployed,
        existing_loans: Decimal::ZERO,
    };
    let result = dti::calculate_dti(&profile).unwrap();
    assert_eq!(result.result.dti_ratio, dec!(32.0));
}

#[test]
fn test_dti_ignores_existing_loans_and_status() {
    let base = dti::debt_to_income_ratio(&BorrowerProfile::reference()).unwrap();
    let other = dti::debt_to_income_ratio(&BorrowerProfile {
        existing_loans: dec!(250_000),
        employment_status: EmploymentStatus::Retired,
        ..BorrowerProfile::reference()
    })
    .unwrap();
    assert_eq!(base, other);
}

#[test]
fn test_dti_zero_income_fails() {
    let profile = BorrowerProfile {
        annual_income: Decimal::ZERO,
        ..BorrowerProfile::reference()
    };
    match dti::calculate_dti(&profile) {
        Err(LoanMathError::DivisionByZero { context }) => assert!(context.contains("income")),
        other => panic!("expected DivisionByZero, got {other:?}"),
    }
}

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_schedule_has_exactly_horizon_entries_in_order() {
    for horizon in [1, 5, 12, 45] {
        let entries = amortization::amortization_schedule(&LoanParameters::reference(), horizon)
            .unwrap();
        let years: Vec<u32> = entries.iter().map(|e| e.year).collect();
        assert_eq!(years, (1..=horizon).collect::<Vec<u32>>());
    }
}

#[test]
fn test_schedule_clamps_when_term_short() {
    let loan = LoanParameters {
        home_price: dec!(25_000),
        down_payment: dec!(5_000),
        loan_amount: dec!(20_000),
        annual_rate_pct: dec!(8),
        term_years: 2,
    };
    let result = amortization::calculate_amortization(&AmortizationInput {
        loan,
        horizon_years: 6,
        method: AmortizationMethod::AnnualizedFlat,
    })
    .unwrap();
    let out = &result.result;

    assert_eq!(out.schedule.len(), 6);
    assert!(out.schedule.iter().all(|e| e.balance >= Decimal::ZERO));
    let payoff = out.payoff_year.expect("loan should be retired within 6 years");
    assert!(payoff <= 3);
    for e in out.schedule.iter().filter(|e| e.year > payoff) {
        assert_eq!(e.principal, Decimal::ZERO);
        assert_eq!(e.interest, Decimal::ZERO);
        assert_eq!(e.balance, Decimal::ZERO);
    }
    assert!((out.total_principal - dec!(20_000)).abs() <= dec!(0.01));
}

#[test]
fn test_schedule_monthly_method_is_opt_in() {
    let input: AmortizationInput = serde_json::from_str(
        r#"{
            "home_price": "400000", "down_payment": "80000", "loan_amount": "320000",
            "annual_rate_pct": "4.5", "term_years": 30, "method": "monthly_compounding"
        }"#,
    )
    .unwrap();
    assert_eq!(input.method, AmortizationMethod::MonthlyCompounding);

    let monthly = amortization::calculate_amortization(&input).unwrap().result;
    let flat = amortization::calculate_amortization(&AmortizationInput {
        method: AmortizationMethod::AnnualizedFlat,
        ..input
    })
    .unwrap()
    .result;
    assert!(monthly.schedule[0].balance < flat.schedule[0].balance);
}

#[test]
fn test_schedule_monthly_full_term_sums_to_loan() {
    let entries = amortization::amortization_schedule_with(
        &LoanParameters::reference(),
        30,
        AmortizationMethod::MonthlyCompounding,
    )
    .unwrap();
    assert_eq!(entries[29].balance, Decimal::ZERO);
    let principal: Decimal = entries.iter().map(|e| e.principal).sum();
    assert!((principal - dec!(320_000)).abs() < dec!(0.000001));
}

// ===========================================================================
// ROI
// ===========================================================================

#[test]
fn test_roi_reference_within_relative_tolerance() {
    let roi = roi::estimated_roi_default(&LoanParameters::reference()).unwrap();
    // ((400000 * 1.03^5) - 400000) / (80000 + 1621.392991442818 * 60) * 100
    let expected = dec!(35.936565532188);
    assert!(((roi - expected) / expected).abs() < dec!(0.000001));
}

#[test]
fn test_roi_defaults_when_omitted_from_json() {
    let input: RoiInput = serde_json::from_str(
        r#"{"home_price": "400000", "down_payment": "80000", "loan_amount": "320000",
            "annual_rate_pct": "4.5", "term_years": 30}"#,
    )
    .unwrap();
    assert_eq!(input.appreciation_rate_pct, dec!(3));
    assert_eq!(input.horizon_years, 5);
    assert_eq!(roi::calculate_roi(&input).unwrap().result.roi_pct, dec!(35.94));
}

// ===========================================================================
// Summary
// ===========================================================================

#[test]
fn test_summary_agrees_with_individual_calculations() {
    let input = LoanSummaryInput {
        borrower: BorrowerProfile::reference(),
        loan: LoanParameters::reference(),
        defaults: Default::default(),
    };
    let out = summary::calculate_loan_summary(&input).unwrap().result;

    let roi = roi::calculate_roi(&RoiInput {
        loan: LoanParameters::reference(),
        appreciation_rate_pct: dec!(3),
        horizon_years: 5,
    })
    .unwrap()
    .result;
    assert_eq!(out.roi.roi_pct, roi.roi_pct);

    let schedule = amortization::amortization_schedule(&LoanParameters::reference(), 5).unwrap();
    let rounded: Vec<_> = schedule.iter().map(|e| e.rounded()).collect();
    assert_eq!(out.amortization.schedule, rounded);
}

#[test]
fn test_summary_envelope_serializes_decimals_as_strings() {
    let input = LoanSummaryInput {
        borrower: BorrowerProfile::reference(),
        loan: LoanParameters::reference(),
        defaults: Default::default(),
    };
    let result = summary::calculate_loan_summary(&input).unwrap();
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(
        value["result"]["payment"]["monthly_payment"],
        serde_json::json!("1621.39")
    );
}
