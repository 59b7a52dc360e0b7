pub mod loan;

pub use loan::{analyze_auto_loan, AutoLoanInput, AutoLoanOutput, AutoPaymentFrequency};
