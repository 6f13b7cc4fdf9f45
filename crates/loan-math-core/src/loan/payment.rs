use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::validate_loan_terms;
use crate::time_value;
use crate::types::*;
use crate::LoanMathResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentInput {
    pub loan_amount: Money,
    pub annual_rate_pct: Percent,
    pub term_years: Years,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentOutput {
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    pub total_payments: Money,
    pub total_interest: Money,
}

/// Fixed-rate monthly payment, unrounded.
///
/// A 0% rate returns `loan_amount / (term_years * 12)`, the limit of the
/// annuity formula as the rate goes to zero.
pub fn monthly_payment(
    loan_amount: Money,
    annual_rate_pct: Percent,
    term_years: Years,
) -> LoanMathResult<Money> {
    validate_loan_terms(loan_amount, annual_rate_pct, term_years)?;
    let nper = number_of_payments(term_years)?;
    time_value::pmt(time_value::monthly_rate(annual_rate_pct), nper, loan_amount)
}

pub(crate) fn number_of_payments(term_years: Years) -> LoanMathResult<u32> {
    term_years
        .checked_mul(12)
        .ok_or_else(|| crate::LoanMathError::invalid("term_years", "Loan term is too long."))
}

pub fn calculate_monthly_payment(
    input: &PaymentInput,
) -> LoanMathResult<ComputationOutput<PaymentOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let payment = monthly_payment(input.loan_amount, input.annual_rate_pct, input.term_years)?;
    let nper = number_of_payments(input.term_years)?;

    if input.annual_rate_pct.is_zero() {
        warnings.push("Interest rate is 0%; payment is loan amount / number of payments.".into());
    }

    let total_payments = time_value::checked_mul(payment, Decimal::from(nper), "loan_amount")?;
    let output = PaymentOutput {
        monthly_payment: round_currency(payment),
        number_of_payments: nper,
        total_payments: round_currency(total_payments),
        total_interest: round_currency(total_payments - input.loan_amount),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Amortizing Payment (annuity formula, monthly compounding)",
        &serde_json::json!({
            "monthly_rate": time_value::monthly_rate(input.annual_rate_pct).to_string(),
            "zero_rate_policy": "limit form: loan_amount / n",
        }),
        warnings,
        elapsed,
        output,
    ))
}
