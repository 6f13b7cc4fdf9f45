pub mod config;
pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "borrower")]
pub mod borrower;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "summary")]
pub mod summary;

pub use error::LoanMathError;
pub use types::*;

/// Standard result type for all loan-math operations
pub type LoanMathResult<T> = Result<T, LoanMathError>;
