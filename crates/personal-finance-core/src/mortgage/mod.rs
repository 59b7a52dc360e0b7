pub mod affordability;
pub mod amortization;
pub mod payment;

pub use amortization::{
    analyze_mortgage, AmortizationYearRow, MortgageInput, MortgageOutput, PayoffTime,
};
pub use payment::{LumpSumFrequency, PaymentFrequency};
