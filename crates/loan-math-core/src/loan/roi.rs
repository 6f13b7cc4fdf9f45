use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::payment::monthly_payment;
use super::LoanParameters;
use crate::config::{
    check_horizon_cap, DEFAULT_APPRECIATION_RATE_PCT, DEFAULT_ROI_HORIZON_YEARS,
};
use crate::time_value;
use crate::types::*;
use crate::{LoanMathError, LoanMathResult};

fn default_appreciation() -> Percent {
    DEFAULT_APPRECIATION_RATE_PCT
}

fn default_horizon() -> Years {
    DEFAULT_ROI_HORIZON_YEARS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiInput {
    #[serde(flatten)]
    pub loan: LoanParameters,
    #[serde(default = "default_appreciation")]
    pub appreciation_rate_pct: Percent,
    #[serde(default = "default_horizon")]
    pub horizon_years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoiOutput {
    pub future_value: Money,
    pub appreciation_gain: Money,
    pub total_investment: Money,
    /// Appreciation gain over cash invested, percent (2 dp).
    pub roi_pct: Percent,
}

struct RoiComponents {
    future_value: Money,
    total_investment: Money,
    roi: Percent,
}

fn roi_components(
    loan: &LoanParameters,
    appreciation_rate_pct: Percent,
    horizon_years: Years,
) -> LoanMathResult<RoiComponents> {
    loan.validate()?;
    check_horizon_cap("horizon_years", horizon_years)?;
    if appreciation_rate_pct <= dec!(-100) {
        return Err(LoanMathError::invalid(
            "appreciation_rate_pct",
            "Appreciation must be greater than -100%.",
        ));
    }

    let future_value = time_value::compound(
        loan.home_price,
        time_value::pct_to_rate(appreciation_rate_pct),
        horizon_years,
    )?;

    // Unrounded payment: rounding here would compound into the ROI
    let payment = monthly_payment(loan.loan_amount, loan.annual_rate_pct, loan.term_years)?;
    let paid = time_value::checked_mul(
        payment,
        dec!(12) * Decimal::from(horizon_years),
        "loan_amount",
    )?;
    let total_investment = loan
        .down_payment
        .checked_add(paid)
        .ok_or_else(|| LoanMathError::invalid("down_payment", "value exceeds decimal range"))?;

    if total_investment.is_zero() {
        return Err(LoanMathError::DivisionByZero {
            context: "appreciation gain / total investment".into(),
        });
    }

    let gain =
        time_value::checked_div(future_value - loan.home_price, total_investment, "home_price")?;
    let roi = time_value::checked_mul(gain, dec!(100), "home_price")?;
    Ok(RoiComponents {
        future_value,
        total_investment,
        roi,
    })
}

/// Estimated return on the cash put into the home, unrounded percent.
///
/// Total investment is the down payment plus every monthly payment made
/// over the horizon; the return is price appreciation only.
pub fn estimated_roi(
    loan: &LoanParameters,
    appreciation_rate_pct: Percent,
    horizon_years: Years,
) -> LoanMathResult<Percent> {
    roi_components(loan, appreciation_rate_pct, horizon_years).map(|c| c.roi)
}

/// [`estimated_roi`] with the page's 3% appreciation over 5 years.
pub fn estimated_roi_default(loan: &LoanParameters) -> LoanMathResult<Percent> {
    estimated_roi(loan, DEFAULT_APPRECIATION_RATE_PCT, DEFAULT_ROI_HORIZON_YEARS)
}

pub fn calculate_roi(input: &RoiInput) -> LoanMathResult<ComputationOutput<RoiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let c = roi_components(&input.loan, input.appreciation_rate_pct, input.horizon_years)?;

    if input.appreciation_rate_pct < Decimal::ZERO {
        warnings.push("Negative appreciation assumed; ROI reflects a price decline.".into());
    }
    if input.horizon_years > input.loan.term_years {
        warnings.push(format!(
            "Horizon of {} years exceeds the {}-year term; payments are counted past payoff.",
            input.horizon_years, input.loan.term_years
        ));
    }

    let output = RoiOutput {
        future_value: round_currency(c.future_value),
        appreciation_gain: round_currency(c.future_value - input.loan.home_price),
        total_investment: round_currency(c.total_investment),
        roi_pct: round_percent(c.roi, CURRENCY_DP),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Estimated ROI (appreciation gain / down payment + payments)",
        &serde_json::json!({
            "appreciation_rate_pct": input.appreciation_rate_pct.to_string(),
            "horizon_years": input.horizon_years,
            "payment_basis": "unrounded monthly payment",
            "excludes": ["taxes", "insurance", "maintenance", "selling costs", "principal equity"],
        }),
        warnings,
        elapsed,
        output,
    ))
}
