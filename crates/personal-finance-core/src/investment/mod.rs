pub mod growth;

pub use growth::{project_growth, GrowthPoint, InvestmentGrowthInput, InvestmentGrowthOutput};
