pub mod auto_loan;
pub mod debt_payoff;
pub mod investment;
pub mod mortgage;
