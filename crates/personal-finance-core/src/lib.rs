pub mod error;
pub mod types;

#[cfg(feature = "mortgage")]
pub mod mortgage;

#[cfg(feature = "debt_payoff")]
pub mod debt_payoff;

#[cfg(feature = "auto_loan")]
pub mod auto_loan;

#[cfg(feature = "investment")]
pub mod investment;

pub use error::PersonalFinanceError;
pub use types::*;

/// Standard result type for all personal-finance operations
pub type PersonalFinanceResult<T> = Result<T, PersonalFinanceError>;
