pub mod borrower;
pub mod loan;
pub mod summary;
