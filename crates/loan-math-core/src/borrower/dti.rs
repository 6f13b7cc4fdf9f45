use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::BorrowerProfile;
use crate::time_value::{checked_div, checked_mul};
use crate::types::*;
use crate::{LoanMathError, LoanMathResult};

/// Back-end DTI ceiling for a qualified mortgage.
const QUALIFIED_MORTGAGE_DTI: Decimal = dec!(43);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DtiOutput {
    pub monthly_income: Money,
    pub monthly_debts: Money,
    /// Monthly debts as a percentage of monthly gross income (1 dp).
    pub dti_ratio: Percent,
}

/// Debt-to-income ratio as an unrounded percentage.
///
/// Above 100% is returned as-is; the ratio is informational.
pub fn debt_to_income_ratio(profile: &BorrowerProfile) -> LoanMathResult<Percent> {
    profile.validate()?;

    if profile.annual_income.is_zero() {
        return Err(LoanMathError::DivisionByZero {
            context: "monthly debts / monthly income".into(),
        });
    }

    let monthly_income = profile.annual_income / dec!(12);
    let share = checked_div(profile.monthly_debts, monthly_income, "monthly_debts")?;
    checked_mul(share, dec!(100), "monthly_debts")
}

pub fn calculate_dti(profile: &BorrowerProfile) -> LoanMathResult<ComputationOutput<DtiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let ratio = debt_to_income_ratio(profile)?;

    if ratio > QUALIFIED_MORTGAGE_DTI {
        warnings.push(format!(
            "DTI of {}% exceeds the {}% qualified-mortgage ceiling.",
            round_percent(ratio, RATIO_DP),
            QUALIFIED_MORTGAGE_DTI
        ));
    }
    if !profile.credit_score_in_range() {
        warnings.push(format!(
            "Credit score {} is outside the conventional {}-{} range.",
            profile.credit_score,
            super::CREDIT_SCORE_MIN,
            super::CREDIT_SCORE_MAX
        ));
    }

    let output = DtiOutput {
        monthly_income: round_currency(profile.annual_income / dec!(12)),
        monthly_debts: round_currency(profile.monthly_debts),
        dti_ratio: round_percent(ratio, RATIO_DP),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Debt-to-Income Ratio (monthly debts / gross monthly income)",
        &serde_json::json!({
            "income_basis": "annual_income / 12",
            "debts_basis": "monthly recurring debts only",
            "employment_status": profile.employment_status.to_string(),
        }),
        warnings,
        elapsed,
        output,
    ))
}
