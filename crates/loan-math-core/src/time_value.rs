use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::LoanMathError;
use crate::types::{Money, Percent};
use crate::LoanMathResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const HUNDRED: Decimal = dec!(100);

/// Convert an annual percentage (4.5) into a monthly decimal rate (0.00375).
pub fn monthly_rate(annual_rate_pct: Percent) -> Decimal {
    annual_rate_pct / HUNDRED / MONTHS_PER_YEAR
}

/// Convert a percentage (3) into a decimal growth rate (0.03).
pub fn pct_to_rate(pct: Percent) -> Decimal {
    pct / HUNDRED
}

/// Compute base^n, failing on overflow instead of panicking. `field` names
/// the input blamed in the error.
pub fn checked_pow(base: Decimal, n: u32, field: &str) -> LoanMathResult<Decimal> {
    base.checked_powu(u64::from(n)).ok_or_else(|| {
        LoanMathError::invalid(field, format!("{base}^{n} exceeds decimal range"))
    })
}

/// `a * b`, or `InvalidInput` on `field` when the product leaves decimal range.
pub fn checked_mul(a: Decimal, b: Decimal, field: &str) -> LoanMathResult<Decimal> {
    a.checked_mul(b)
        .ok_or_else(|| LoanMathError::invalid(field, "value exceeds decimal range"))
}

/// `a / b` for a non-zero `b`, or `InvalidInput` on `field` when the quotient
/// leaves decimal range.
pub fn checked_div(a: Decimal, b: Decimal, field: &str) -> LoanMathResult<Decimal> {
    a.checked_div(b)
        .ok_or_else(|| LoanMathError::invalid(field, "value exceeds decimal range"))
}

/// Level payment that fully amortizes `principal` over `nper` periods at
/// `rate` per period. Returned as a positive amount.
///
/// A zero rate returns the limit of the annuity formula, `principal / nper`.
pub fn pmt(rate: Decimal, nper: u32, principal: Money) -> LoanMathResult<Money> {
    if nper == 0 {
        return Err(LoanMathError::invalid(
            "nper",
            "Number of periods must be > 0",
        ));
    }

    if rate.is_zero() {
        return Ok(principal / Decimal::from(nper));
    }

    let factor = checked_pow(Decimal::ONE + rate, nper, "annual_rate_pct")?;
    let denominator = factor - Decimal::ONE;

    if denominator.is_zero() {
        return Err(LoanMathError::DivisionByZero {
            context: "PMT annuity factor".into(),
        });
    }

    let numerator = rate
        .checked_mul(factor)
        .and_then(|rf| principal.checked_mul(rf))
        .ok_or_else(|| {
            LoanMathError::invalid("loan_amount", "payment exceeds decimal range")
        })?;

    checked_div(numerator, denominator, "loan_amount")
}

/// Value of `present_value` after compounding at `rate` for `periods`.
pub fn compound(present_value: Money, rate: Decimal, periods: u32) -> LoanMathResult<Money> {
    let factor = checked_pow(Decimal::ONE + rate, periods, "appreciation_rate_pct")?;
    checked_mul(present_value, factor, "home_price")
}
