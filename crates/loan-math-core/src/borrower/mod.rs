//! Borrower-side inputs and affordability metrics.

pub mod dti;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::LoanMathError;
use crate::types::Money;
use crate::LoanMathResult;

/// Lowest score on the FICO scale.
pub const CREDIT_SCORE_MIN: u32 = 300;

/// Highest score on the FICO scale.
pub const CREDIT_SCORE_MAX: u32 = 850;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EmploymentStatus {
    #[default]
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
    Student,
    Other,
}

impl std::fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Employed => "Employed",
            Self::SelfEmployed => "Self-Employed",
            Self::Unemployed => "Unemployed",
            Self::Retired => "Retired",
            Self::Student => "Student",
            Self::Other => "Other",
        };
        write!(f, "{}", s)
    }
}

/// Snapshot of the borrower fields collected by the application form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowerProfile {
    pub annual_income: Money,
    pub credit_score: u32,
    pub monthly_debts: Money,
    #[serde(default)]
    pub employment_status: EmploymentStatus,
    #[serde(default)]
    pub existing_loans: Money,
}

impl BorrowerProfile {
    /// The form's initial state.
    pub fn reference() -> Self {
        BorrowerProfile {
            annual_income: dec!(75_000),
            credit_score: 720,
            monthly_debts: dec!(2_000),
            employment_status: EmploymentStatus::Employed,
            existing_loans: dec!(1_500),
        }
    }

    /// Check sign constraints. A zero income passes here so that the ratio
    /// calculation can report it as a division by zero.
    pub fn validate(&self) -> LoanMathResult<()> {
        if self.annual_income < Decimal::ZERO {
            return Err(LoanMathError::invalid(
                "annual_income",
                "Annual income cannot be negative.",
            ));
        }
        if self.monthly_debts < Decimal::ZERO {
            return Err(LoanMathError::invalid(
                "monthly_debts",
                "Monthly debts cannot be negative.",
            ));
        }
        if self.existing_loans < Decimal::ZERO {
            return Err(LoanMathError::invalid(
                "existing_loans",
                "Existing loan obligations cannot be negative.",
            ));
        }
        Ok(())
    }

    pub fn credit_score_in_range(&self) -> bool {
        (CREDIT_SCORE_MIN..=CREDIT_SCORE_MAX).contains(&self.credit_score)
    }
}
