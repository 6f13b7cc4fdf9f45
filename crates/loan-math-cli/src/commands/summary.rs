use clap::Args;
use serde_json::Value;

use loan_math_core::config::EngineDefaults;
use loan_math_core::summary::{self, LoanSummaryInput};

use super::borrower::BorrowerFlags;
use super::loan::LoanFlags;
use crate::input;

/// Arguments for the combined summary
#[derive(Args)]
pub struct SummaryArgs {
    /// Path to JSON input file with `borrower` and `loan` objects
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub borrower: BorrowerFlags,

    #[command(flatten)]
    pub loan: LoanFlags,

    /// Use the calculator page's sample borrower and loan
    #[arg(
        long,
        conflicts_with_all = [
            "input",
            "annual_income",
            "credit_score",
            "monthly_debts",
            "employment_status",
            "existing_loans",
            "home_price",
            "down_payment",
            "loan_amount",
            "annual_rate",
            "term_years",
        ]
    )]
    pub reference: bool,
}

pub fn run_summary(
    args: SummaryArgs,
    defaults: &EngineDefaults,
) -> Result<Value, Box<dyn std::error::Error>> {
    let summary_input = if args.reference {
        LoanSummaryInput {
            borrower: loan_math_core::borrower::BorrowerProfile::reference(),
            loan: loan_math_core::loan::LoanParameters::reference(),
            defaults: defaults.clone(),
        }
    } else {
        match input::read_document(args.input.as_deref())? {
            Some(mut doc) => {
                // A document without its own defaults inherits the config file's
                input::fill_missing(&mut doc, "defaults", serde_json::to_value(defaults)?);
                serde_json::from_value(doc)?
            }
            None => LoanSummaryInput {
                borrower: args.borrower.into_profile()?,
                loan: args.loan.into_parameters()?,
                defaults: defaults.clone(),
            },
        }
    };

    let result = summary::calculate_loan_summary(&summary_input)?;
    Ok(serde_json::to_value(result)?)
}
