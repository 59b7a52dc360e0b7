pub mod simulator;

pub use simulator::{
    simulate, Debt, DebtPayoffInput, DebtType, ExtraPaymentAllocation, ExtraPaymentFrequency,
    PayoffResult,
};
