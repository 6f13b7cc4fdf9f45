use napi::Result as NapiResult;
use napi_derive::napi;
use serde::de::DeserializeOwned;
use serde::Serialize;

use loan_math_core::LoanMathResult;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Parse the JSON argument, run the calculation, serialise the envelope.
fn call_json<I, O>(
    input_json: &str,
    calculate: impl FnOnce(&I) -> LoanMathResult<O>,
) -> NapiResult<String>
where
    I: DeserializeOwned,
    O: Serialize,
{
    let input: I = serde_json::from_str(input_json).map_err(to_napi_error)?;
    let output = calculate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan
// ---------------------------------------------------------------------------

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_math_core::loan::payment::calculate_monthly_payment,
    )
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_math_core::loan::amortization::calculate_amortization,
    )
}

#[napi]
pub fn estimated_roi(input_json: String) -> NapiResult<String> {
    call_json(&input_json, loan_math_core::loan::roi::calculate_roi)
}

// ---------------------------------------------------------------------------
// Borrower
// ---------------------------------------------------------------------------

#[napi]
pub fn debt_to_income(input_json: String) -> NapiResult<String> {
    call_json(&input_json, loan_math_core::borrower::dti::calculate_dti)
}

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

#[napi]
pub fn loan_summary(input_json: String) -> NapiResult<String> {
    call_json(
        &input_json,
        loan_math_core::summary::calculate_loan_summary,
    )
}

/// Page defaults (appreciation, horizons, amortization method) as JSON.
#[napi]
pub fn engine_defaults() -> NapiResult<String> {
    serde_json::to_string(&loan_math_core::config::EngineDefaults::default())
        .map_err(to_napi_error)
}
