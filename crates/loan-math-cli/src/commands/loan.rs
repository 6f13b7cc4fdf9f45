use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use loan_math_core::config::EngineDefaults;
use loan_math_core::loan::amortization::{self, AmortizationInput, AmortizationMethod};
use loan_math_core::loan::payment::{self, PaymentInput};
use loan_math_core::loan::roi::{self, RoiInput};
use loan_math_core::loan::LoanParameters;

use crate::input;

/// Loan fields shared by `amortization`, `roi` and `summary`
#[derive(Args, Debug, Clone)]
pub struct LoanFlags {
    /// Purchase price of the home
    #[arg(long)]
    pub home_price: Option<Decimal>,

    /// Down payment
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Loan amount (defaults to home price minus down payment)
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (4.5 = 4.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,
}

impl LoanFlags {
    pub fn into_parameters(self) -> Result<LoanParameters, Box<dyn std::error::Error>> {
        let home_price = self
            .home_price
            .ok_or("--home-price is required (or provide --input)")?;
        let down_payment = self
            .down_payment
            .ok_or("--down-payment is required (or provide --input)")?;
        Ok(LoanParameters {
            home_price,
            down_payment,
            loan_amount: self.loan_amount.unwrap_or(home_price - down_payment),
            annual_rate_pct: self
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: self
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
        })
    }
}

#[derive(clap::ValueEnum, Debug, Clone, Copy)]
pub enum MethodArg {
    AnnualizedFlat,
    MonthlyCompounding,
}

impl From<MethodArg> for AmortizationMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::AnnualizedFlat => AmortizationMethod::AnnualizedFlat,
            MethodArg::MonthlyCompounding => AmortizationMethod::MonthlyCompounding,
        }
    }
}

/// Arguments for the monthly payment
#[derive(Args)]
pub struct PaymentArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount
    #[arg(long)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (4.5 = 4.5%)
    #[arg(long, alias = "rate")]
    pub annual_rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,
}

/// Arguments for the amortization preview
#[derive(Args)]
pub struct AmortizationArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    /// Number of years to show (default from config, else 5)
    #[arg(long)]
    pub horizon_years: Option<u32>,

    /// Interest approximation
    #[arg(long, value_enum)]
    pub method: Option<MethodArg>,
}

/// Arguments for the ROI estimate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct RoiArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    #[command(flatten)]
    pub loan: LoanFlags,

    /// Annual appreciation in percent (default from config, else 3)
    #[arg(long)]
    pub appreciation_rate: Option<Decimal>,

    /// Holding period in years (default from config, else 5)
    #[arg(long)]
    pub horizon_years: Option<u32>,
}

pub fn run_payment(args: PaymentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let payment_input: PaymentInput = input::resolve(args.input.as_deref(), || {
        Ok(PaymentInput {
            loan_amount: args
                .loan_amount
                .ok_or("--loan-amount is required (or provide --input)")?,
            annual_rate_pct: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
        })
    })?;

    let result = payment::calculate_monthly_payment(&payment_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortization(
    args: AmortizationArgs,
    defaults: &EngineDefaults,
) -> Result<Value, Box<dyn std::error::Error>> {
    let doc = input::read_document(args.input.as_deref())?;
    let amortization_input = amortization_input(args, doc, defaults)?;

    let result = amortization::calculate_amortization(&amortization_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Document (with config defaults filled in) or flags, then flag overrides.
fn amortization_input(
    args: AmortizationArgs,
    doc: Option<Value>,
    defaults: &EngineDefaults,
) -> Result<AmortizationInput, Box<dyn std::error::Error>> {
    let mut amortization_input: AmortizationInput = match doc {
        Some(mut doc) => {
            input::fill_missing(
                &mut doc,
                "horizon_years",
                json!(defaults.amortization_horizon_years),
            );
            input::fill_missing(
                &mut doc,
                "method",
                serde_json::to_value(defaults.amortization_method)?,
            );
            serde_json::from_value(doc)?
        }
        None => AmortizationInput {
            loan: args.loan.into_parameters()?,
            horizon_years: defaults.amortization_horizon_years,
            method: defaults.amortization_method,
        },
    };

    if let Some(h) = args.horizon_years {
        amortization_input.horizon_years = h;
    }
    if let Some(m) = args.method {
        amortization_input.method = m.into();
    }
    Ok(amortization_input)
}

pub fn run_roi(
    args: RoiArgs,
    defaults: &EngineDefaults,
) -> Result<Value, Box<dyn std::error::Error>> {
    let doc = input::read_document(args.input.as_deref())?;
    let roi_input = roi_input(args, doc, defaults)?;

    let result = roi::calculate_roi(&roi_input)?;
    Ok(serde_json::to_value(result)?)
}

fn roi_input(
    args: RoiArgs,
    doc: Option<Value>,
    defaults: &EngineDefaults,
) -> Result<RoiInput, Box<dyn std::error::Error>> {
    let mut roi_input: RoiInput = match doc {
        Some(mut doc) => {
            input::fill_missing(
                &mut doc,
                "appreciation_rate_pct",
                serde_json::to_value(defaults.appreciation_rate_pct)?,
            );
            input::fill_missing(&mut doc, "horizon_years", json!(defaults.roi_horizon_years));
            serde_json::from_value(doc)?
        }
        None => RoiInput {
            loan: args.loan.into_parameters()?,
            appreciation_rate_pct: defaults.appreciation_rate_pct,
            horizon_years: defaults.roi_horizon_years,
        },
    };

    if let Some(a) = args.appreciation_rate {
        roi_input.appreciation_rate_pct = a;
    }
    if let Some(h) = args.horizon_years {
        roi_input.horizon_years = h;
    }
    Ok(roi_input)
}
