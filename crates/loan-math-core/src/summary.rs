//! One-shot evaluation of every calculator for a borrower and loan snapshot.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::borrower::dti::{self, DtiOutput};
use crate::borrower::BorrowerProfile;
use crate::config::EngineDefaults;
use crate::loan::amortization::{self, AmortizationInput, AmortizationOutput};
use crate::loan::payment::{self, PaymentInput, PaymentOutput};
use crate::loan::roi::{self, RoiInput, RoiOutput};
use crate::loan::LoanParameters;
use crate::time_value;
use crate::types::*;
use crate::LoanMathResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummaryInput {
    pub borrower: BorrowerProfile,
    pub loan: LoanParameters,
    #[serde(default)]
    pub defaults: EngineDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummaryOutput {
    pub payment: PaymentOutput,
    pub dti: DtiOutput,
    pub amortization: AmortizationOutput,
    pub roi: RoiOutput,
    pub loan_to_value_pct: Percent,
    pub down_payment_pct: Percent,
}

/// `amount` as a percentage of the home price.
fn share_of_price(amount: Money, loan: &LoanParameters, field: &str) -> LoanMathResult<Percent> {
    let ratio = time_value::checked_div(amount, loan.home_price, field)?;
    time_value::checked_mul(ratio, dec!(100), field)
}

pub fn calculate_loan_summary(
    input: &LoanSummaryInput,
) -> LoanMathResult<ComputationOutput<LoanSummaryOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    input.defaults.validate()?;
    input.loan.validate()?;

    let payment = payment::calculate_monthly_payment(&PaymentInput {
        loan_amount: input.loan.loan_amount,
        annual_rate_pct: input.loan.annual_rate_pct,
        term_years: input.loan.term_years,
    })?;
    let dti = dti::calculate_dti(&input.borrower)?;
    let amortization = amortization::calculate_amortization(&AmortizationInput {
        loan: input.loan.clone(),
        horizon_years: input.defaults.amortization_horizon_years,
        method: input.defaults.amortization_method,
    })?;
    let roi = roi::calculate_roi(&RoiInput {
        loan: input.loan.clone(),
        appreciation_rate_pct: input.defaults.appreciation_rate_pct,
        horizon_years: input.defaults.roi_horizon_years,
    })?;

    for (section, section_warnings) in [
        ("payment", &payment.warnings),
        ("dti", &dti.warnings),
        ("amortization", &amortization.warnings),
        ("roi", &roi.warnings),
    ] {
        warnings.extend(section_warnings.iter().map(|w| format!("[{section}] {w}")));
    }

    if input.loan.loan_amount > input.loan.home_price {
        warnings.push("Loan amount exceeds the home price.".into());
    }

    let loan_to_value = share_of_price(input.loan.loan_amount, &input.loan, "loan_amount")?;
    let down_payment_share =
        share_of_price(input.loan.down_payment, &input.loan, "down_payment")?;

    let output = LoanSummaryOutput {
        payment: payment.result,
        dti: dti.result,
        amortization: amortization.result,
        roi: roi.result,
        loan_to_value_pct: round_percent(loan_to_value, CURRENCY_DP),
        down_payment_pct: round_percent(down_payment_share, CURRENCY_DP),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Summary (payment, DTI, amortization preview, ROI)",
        &input.defaults,
        warnings,
        elapsed,
        output,
    ))
}
