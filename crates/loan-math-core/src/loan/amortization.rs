//! Year-by-year amortization preview.
//!
//! The default method reproduces the calculators' chart: each year's interest
//! is the opening balance times the monthly rate times 12, and principal is
//! whatever remains of twelve monthly payments. Real amortization moves the
//! interest base every month, so this overstates interest slightly and leaves
//! a residual balance at the nominal term. `MonthlyCompounding` runs the true
//! monthly schedule and aggregates it per year.
//!
//! Payments continue until the balance is retired. The payment that would
//! take the balance below zero is clamped to the remaining balance, and every
//! later year reports zeros.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::payment::{monthly_payment, number_of_payments};
use super::LoanParameters;
use crate::config::{check_horizon_cap, DEFAULT_AMORTIZATION_HORIZON_YEARS};
use crate::time_value;
use crate::types::*;
use crate::{LoanMathError, LoanMathResult};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AmortizationMethod {
    /// Interest = opening balance x monthly rate x 12.
    #[default]
    AnnualizedFlat,
    /// Month-by-month schedule summed per year.
    MonthlyCompounding,
}

impl std::fmt::Display for AmortizationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AnnualizedFlat => write!(f, "annualized_flat"),
            Self::MonthlyCompounding => write!(f, "monthly_compounding"),
        }
    }
}

fn default_horizon() -> Years {
    DEFAULT_AMORTIZATION_HORIZON_YEARS
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    #[serde(flatten)]
    pub loan: LoanParameters,
    #[serde(default = "default_horizon")]
    pub horizon_years: Years,
    #[serde(default)]
    pub method: AmortizationMethod,
}

/// One row of the chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYearEntry {
    pub year: u32,
    pub principal: Money,
    pub interest: Money,
    pub balance: Money,
}

impl AmortizationYearEntry {
    pub fn rounded(&self) -> Self {
        AmortizationYearEntry {
            year: self.year,
            principal: round_currency(self.principal),
            interest: round_currency(self.interest),
            balance: round_currency(self.balance),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub monthly_payment: Money,
    pub schedule: Vec<AmortizationYearEntry>,
    pub total_principal: Money,
    pub total_interest: Money,
    /// First year whose closing balance is zero, if within the horizon.
    pub payoff_year: Option<u32>,
}

/// Unbounded, deterministic iterator over yearly entries.
///
/// Built by [`YearlySchedule::new`]; callers bound it with `take`.
#[derive(Debug, Clone)]
pub struct YearlySchedule {
    method: AmortizationMethod,
    monthly_rate: Decimal,
    monthly_payment: Money,
    annual_payment: Money,
    total_months: u32,
    months_elapsed: u32,
    balance: Money,
    year: u32,
}

impl YearlySchedule {
    pub fn new(loan: &LoanParameters, method: AmortizationMethod) -> LoanMathResult<Self> {
        loan.validate()?;
        let payment = monthly_payment(loan.loan_amount, loan.annual_rate_pct, loan.term_years)?;
        let monthly_rate = time_value::monthly_rate(loan.annual_rate_pct);
        // Bounds every later product: the balance never exceeds the loan amount
        time_value::checked_mul(loan.loan_amount, monthly_rate * dec!(12), "loan_amount")?;
        Ok(YearlySchedule {
            method,
            monthly_rate,
            monthly_payment: payment,
            annual_payment: time_value::checked_mul(payment, dec!(12), "loan_amount")?,
            total_months: number_of_payments(loan.term_years)?,
            months_elapsed: 0,
            balance: loan.loan_amount,
            year: 0,
        })
    }

    /// Unrounded payment driving the schedule.
    pub fn monthly_payment(&self) -> Money {
        self.monthly_payment
    }

    fn flat_year(&mut self) -> (Money, Money) {
        let interest = self.balance * self.monthly_rate * dec!(12);
        let mut principal = self.annual_payment - interest;
        if principal >= self.balance {
            principal = self.balance;
        }
        self.balance -= principal;
        (principal, interest)
    }

    fn compounded_year(&mut self) -> (Money, Money) {
        let mut principal = Decimal::ZERO;
        let mut interest = Decimal::ZERO;
        for _ in 0..12 {
            if self.balance.is_zero() {
                break;
            }
            self.months_elapsed += 1;
            let month_interest = self.balance * self.monthly_rate;
            let mut month_principal = self.monthly_payment - month_interest;
            // Final scheduled month sweeps any rounding residual
            if month_principal >= self.balance || self.months_elapsed >= self.total_months {
                month_principal = self.balance;
            }
            self.balance -= month_principal;
            principal += month_principal;
            interest += month_interest;
        }
        (principal, interest)
    }
}

impl Iterator for YearlySchedule {
    type Item = AmortizationYearEntry;

    fn next(&mut self) -> Option<Self::Item> {
        self.year = self.year.checked_add(1)?;

        let (principal, interest) = if self.balance.is_zero() {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            match self.method {
                AmortizationMethod::AnnualizedFlat => self.flat_year(),
                AmortizationMethod::MonthlyCompounding => self.compounded_year(),
            }
        };

        Some(AmortizationYearEntry {
            year: self.year,
            principal,
            interest,
            balance: self.balance,
        })
    }
}

/// Annualized-flat schedule for years 1..=horizon_years, unrounded.
pub fn amortization_schedule(
    loan: &LoanParameters,
    horizon_years: Years,
) -> LoanMathResult<Vec<AmortizationYearEntry>> {
    amortization_schedule_with(loan, horizon_years, AmortizationMethod::AnnualizedFlat)
}

pub fn amortization_schedule_with(
    loan: &LoanParameters,
    horizon_years: Years,
    method: AmortizationMethod,
) -> LoanMathResult<Vec<AmortizationYearEntry>> {
    if horizon_years == 0 {
        return Err(LoanMathError::invalid(
            "horizon_years",
            "Horizon must be at least 1 year.",
        ));
    }
    check_horizon_cap("horizon_years", horizon_years)?;
    let schedule = YearlySchedule::new(loan, method)?;
    Ok(schedule.take(horizon_years as usize).collect())
}

fn checked_total(mut values: impl Iterator<Item = Money>) -> LoanMathResult<Money> {
    values.try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| LoanMathError::invalid("loan_amount", "total exceeds decimal range"))
    })
}

pub fn calculate_amortization(
    input: &AmortizationInput,
) -> LoanMathResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let entries = amortization_schedule_with(&input.loan, input.horizon_years, input.method)?;
    let payment = monthly_payment(
        input.loan.loan_amount,
        input.loan.annual_rate_pct,
        input.loan.term_years,
    )?;

    if input.horizon_years > input.loan.term_years {
        warnings.push(format!(
            "Horizon of {} years exceeds the {}-year loan term.",
            input.horizon_years, input.loan.term_years
        ));
    }

    let payoff_year = entries
        .iter()
        .find(|e| e.balance.is_zero())
        .map(|e| e.year);
    if let Some(year) = payoff_year {
        if year < input.horizon_years {
            warnings.push(format!(
                "Loan retired in year {year}; years {}-{} report zero.",
                year + 1,
                input.horizon_years
            ));
        }
        if input.method == AmortizationMethod::AnnualizedFlat && year > input.loan.term_years {
            warnings.push(format!(
                "Annualized approximation leaves a residual balance past the term; retired in year {year}."
            ));
        }
    }

    let total_principal = checked_total(entries.iter().map(|e| e.principal))?;
    let total_interest = checked_total(entries.iter().map(|e| e.interest))?;

    let output = AmortizationOutput {
        monthly_payment: round_currency(payment),
        schedule: entries.iter().map(AmortizationYearEntry::rounded).collect(),
        total_principal: round_currency(total_principal),
        total_interest: round_currency(total_interest),
        payoff_year,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Amortization Preview (yearly aggregation)",
        &serde_json::json!({
            "method": input.method.to_string(),
            "horizon_years": input.horizon_years,
            "payment_basis": "unrounded monthly payment",
            "negative_balance_policy": "clamp final principal; zero rows after payoff",
        }),
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn short_loan() -> LoanParameters {
        LoanParameters {
            home_price: dec!(40_000),
            down_payment: dec!(10_000),
            loan_amount: dec!(30_000),
            annual_rate_pct: dec!(6),
            term_years: 3,
        }
    }

    #[test]
    fn test_reference_schedule_first_five_years() {
        let input = AmortizationInput {
            loan: LoanParameters::reference(),
            horizon_years: 5,
            method: AmortizationMethod::AnnualizedFlat,
        };
        let out = calculate_amortization(&input).unwrap().result;
        let s = &out.schedule;

        assert_eq!(s.len(), 5);
        assert_eq!(
            s[0],
            AmortizationYearEntry {
                year: 1,
                principal: dec!(5056.72),
                interest: dec!(14400.00),
                balance: dec!(314943.28),
            }
        );
        assert_eq!(s[4].balance, dec!(292336.18));
        assert_eq!(s[4].principal, dec!(6030.23));
        assert_eq!(s[4].interest, dec!(13426.49));
        assert_eq!(out.payoff_year, None);
    }

    #[test]
    fn test_year_principal_plus_interest_is_annual_payment() {
        let entries = amortization_schedule(&LoanParameters::reference(), 30).unwrap();
        let payment = monthly_payment(dec!(320_000), dec!(4.5), 30).unwrap();
        for e in &entries {
            assert!((e.principal + e.interest - payment * dec!(12)).abs() < dec!(0.0000001));
        }
        let total: Money = entries.iter().map(|e| e.principal + e.interest).sum();
        assert!((total - payment * dec!(360)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_flat_residual_retired_year_after_term() {
        let input = AmortizationInput {
            loan: LoanParameters::reference(),
            horizon_years: 32,
            method: AmortizationMethod::AnnualizedFlat,
        };
        let result = calculate_amortization(&input).unwrap();
        let s = &result.result.schedule;

        assert_eq!(s[29].balance, dec!(11504.58));
        assert_eq!(s[30].principal, dec!(11504.58));
        assert_eq!(s[30].balance, Decimal::ZERO);
        assert_eq!(s[31].principal, Decimal::ZERO);
        assert_eq!(result.result.payoff_year, Some(31));
        assert_eq!(result.warnings.len(), 3);
    }

    #[test]
    fn test_short_term_long_horizon_clamps() {
        let entries = amortization_schedule(&short_loan(), 5).unwrap();
        assert_eq!(entries.len(), 5);
        for e in &entries {
            assert!(e.balance >= Decimal::ZERO, "year {} went negative", e.year);
            assert!(e.principal >= Decimal::ZERO);
        }
        // residual of ~864.02 is cleared in year 4
        assert!((entries[3].principal - dec!(864.02)).abs() < dec!(0.01));
        assert!(entries[3].balance.is_zero());
        assert_eq!(entries[4].principal, Decimal::ZERO);
        assert_eq!(entries[4].interest, Decimal::ZERO);
        assert_eq!(entries[4].balance, Decimal::ZERO);

        let total: Money = entries.iter().map(|e| e.principal).sum();
        assert!((total - dec!(30_000)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_monthly_compounding_pays_off_at_term() {
        let entries =
            amortization_schedule_with(&short_loan(), 5, AmortizationMethod::MonthlyCompounding)
                .unwrap();
        assert_eq!(entries[2].balance, Decimal::ZERO);
        assert!((entries[0].interest - dec!(1544.08)).abs() < dec!(0.01));
        assert_eq!(entries[3].principal, Decimal::ZERO);
        assert_eq!(entries[4].balance, Decimal::ZERO);
    }

    #[test]
    fn test_monthly_compounding_charges_less_interest_than_flat() {
        let flat = amortization_schedule(&LoanParameters::reference(), 1).unwrap();
        let monthly = amortization_schedule_with(
            &LoanParameters::reference(),
            1,
            AmortizationMethod::MonthlyCompounding,
        )
        .unwrap();
        assert!(monthly[0].interest < flat[0].interest);
    }

    #[test]
    fn test_balances_non_increasing() {
        let entries = amortization_schedule(&LoanParameters::reference(), 40).unwrap();
        for pair in entries.windows(2) {
            assert!(pair[1].balance <= pair[0].balance);
        }
    }

    #[test]
    fn test_zero_rate_schedule_is_straight_line() {
        let loan = LoanParameters {
            annual_rate_pct: Decimal::ZERO,
            loan_amount: dec!(120_000),
            term_years: 10,
            ..LoanParameters::reference()
        };
        let entries = amortization_schedule(&loan, 12).unwrap();
        assert_eq!(entries[0].interest, Decimal::ZERO);
        assert!((entries[0].principal - dec!(12_000)).abs() < dec!(0.000001));
        assert!(entries[9].balance.abs() < dec!(0.000001));
        assert!(entries.iter().all(|e| e.balance >= Decimal::ZERO));
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let err = amortization_schedule(&LoanParameters::reference(), 0).unwrap_err();
        assert!(
            matches!(err, LoanMathError::InvalidInput { ref field, .. } if field == "horizon_years")
        );
    }

    #[test]
    fn test_horizon_cap_is_inclusive() {
        use crate::config::MAX_HORIZON_YEARS;

        let entries =
            amortization_schedule(&LoanParameters::reference(), MAX_HORIZON_YEARS).unwrap();
        assert_eq!(entries.len(), MAX_HORIZON_YEARS as usize);

        for horizon in [MAX_HORIZON_YEARS + 1, u32::MAX] {
            let err = amortization_schedule(&LoanParameters::reference(), horizon).unwrap_err();
            assert!(
                matches!(err, LoanMathError::InvalidInput { ref field, .. } if field == "horizon_years")
            );
        }
    }

    #[test]
    fn test_extreme_loan_amount_is_error_not_panic() {
        // Payment fits, but a year of interest on the full balance does not
        let huge = Decimal::from_scientific("7e28").unwrap();
        let loan = LoanParameters {
            home_price: huge,
            down_payment: Decimal::ZERO,
            loan_amount: huge,
            annual_rate_pct: dec!(120),
            term_years: 1,
        };
        assert!(monthly_payment(huge, dec!(120), 1).is_ok());
        for method in [
            AmortizationMethod::AnnualizedFlat,
            AmortizationMethod::MonthlyCompounding,
        ] {
            let err = calculate_amortization(&AmortizationInput {
                loan: loan.clone(),
                horizon_years: 5,
                method,
            })
            .unwrap_err();
            assert!(matches!(err, LoanMathError::InvalidInput { .. }));
        }
    }

    #[test]
    fn test_input_defaults_from_json() {
        let json = r#"{
            "home_price": "400000",
            "down_payment": "80000",
            "loan_amount": "320000",
            "annual_rate_pct": "4.5",
            "term_years": 30
        }"#;
        let input: AmortizationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.horizon_years, 5);
        assert_eq!(input.method, AmortizationMethod::AnnualizedFlat);
    }
}
