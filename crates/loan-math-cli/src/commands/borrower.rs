use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use loan_math_core::borrower::dti;
use loan_math_core::borrower::{BorrowerProfile, EmploymentStatus};

use crate::input;

/// Borrower fields shared by `dti` and `summary`
#[derive(Args, Debug, Clone)]
pub struct BorrowerFlags {
    /// Gross annual income
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Credit score (300-850)
    #[arg(long)]
    pub credit_score: Option<u32>,

    /// Recurring monthly debt payments
    #[arg(long)]
    pub monthly_debts: Option<Decimal>,

    /// Employment status
    #[arg(long, value_enum, default_value = "employed")]
    pub employment_status: EmploymentArg,

    /// Existing loan obligations
    #[arg(long, default_value = "0")]
    pub existing_loans: Decimal,
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum EmploymentArg {
    Employed,
    SelfEmployed,
    Unemployed,
    Retired,
    Student,
    Other,
}

impl From<EmploymentArg> for EmploymentStatus {
    fn from(arg: EmploymentArg) -> Self {
        match arg {
            EmploymentArg::Employed => EmploymentStatus::Employed,
            EmploymentArg::SelfEmployed => EmploymentStatus::SelfEmployed,
            EmploymentArg::Unemployed => EmploymentStatus::Unemployed,
            EmploymentArg::Retired => EmploymentStatus::Retired,
            EmploymentArg::Student => EmploymentStatus::Student,
            EmploymentArg::Other => EmploymentStatus::Other,
        }
    }
}

impl BorrowerFlags {
    pub fn into_profile(self) -> Result<BorrowerProfile, Box<dyn std::error::Error>> {
        Ok(BorrowerProfile {
            annual_income: self
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            credit_score: self
                .credit_score
                .ok_or("--credit-score is required (or provide --input)")?,
            monthly_debts: self
                .monthly_debts
                .ok_or("--monthly-debts is required (or provide --input)")?,
            employment_status: self.employment_status.into(),
            existing_loans: self.existing_loans,
        })
    }
}

/// Arguments for the debt-to-income ratio
#[derive(Args)]
pub struct DtiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub borrower: BorrowerFlags,
}

pub fn run_dti(args: DtiArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let borrower = args.borrower;
    let profile: BorrowerProfile =
        input::resolve(args.input.as_deref(), move || borrower.into_profile())?;

    let result = dti::calculate_dti(&profile)?;
    Ok(serde_json::to_value(result)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_flags_build_profile() {
        let flags = BorrowerFlags {
            annual_income: Some(dec!(75_000)),
            credit_score: Some(720),
            monthly_debts: Some(dec!(2_000)),
            employment_status: EmploymentArg::SelfEmployed,
            existing_loans: dec!(1_500),
        };
        let profile = flags.into_profile().unwrap();
        assert_eq!(profile.employment_status, EmploymentStatus::SelfEmployed);
        assert_eq!(profile.annual_income, dec!(75_000));
    }

    #[test]
    fn test_missing_income_names_flag() {
        let flags = BorrowerFlags {
            annual_income: None,
            credit_score: Some(720),
            monthly_debts: Some(dec!(2_000)),
            employment_status: EmploymentArg::Employed,
            existing_loans: Decimal::ZERO,
        };
        let err = flags.into_profile().unwrap_err();
        assert!(err.to_string().contains("--annual-income"));
    }
}
