//! Loan-side calculations: payment, amortization preview and ROI.

pub mod amortization;
pub mod payment;
pub mod roi;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanMathError;
use crate::types::{Money, Percent, Years};
use crate::LoanMathResult;

/// Snapshot of the loan fields collected by the calculators.
///
/// `loan_amount` is conventionally `home_price - down_payment` but is taken
/// as entered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    pub home_price: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub annual_rate_pct: Percent,
    pub term_years: Years,
}

impl LoanParameters {
    /// The calculators' initial state.
    pub fn reference() -> Self {
        LoanParameters {
            home_price: dec!(400_000),
            down_payment: dec!(80_000),
            loan_amount: dec!(320_000),
            annual_rate_pct: dec!(4.5),
            term_years: 30,
        }
    }

    pub fn validate(&self) -> LoanMathResult<()> {
        if self.home_price <= Decimal::ZERO {
            return Err(LoanMathError::invalid(
                "home_price",
                "Home price must be positive.",
            ));
        }
        if self.down_payment < Decimal::ZERO {
            return Err(LoanMathError::invalid(
                "down_payment",
                "Down payment cannot be negative.",
            ));
        }
        if self.down_payment > self.home_price {
            return Err(LoanMathError::invalid(
                "down_payment",
                "Down payment cannot exceed the home price.",
            ));
        }
        validate_loan_terms(self.loan_amount, self.annual_rate_pct, self.term_years)
    }
}

/// Checks shared by every calculation that needs a payment.
pub(crate) fn validate_loan_terms(
    loan_amount: Money,
    annual_rate_pct: Percent,
    term_years: Years,
) -> LoanMathResult<()> {
    if loan_amount <= Decimal::ZERO {
        return Err(LoanMathError::invalid(
            "loan_amount",
            "Loan amount must be positive.",
        ));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(LoanMathError::invalid(
            "annual_rate_pct",
            "Interest rate cannot be negative.",
        ));
    }
    if term_years == 0 {
        return Err(LoanMathError::invalid(
            "term_years",
            "Loan term must be at least 1 year.",
        ));
    }
    Ok(())
}
