use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::investment::{self, InvestmentGrowthInput};

use crate::input;

/// Arguments for investment growth projection
#[derive(Args)]
pub struct GrowthArgs {
    /// Starting portfolio value
    #[arg(long, default_value = "0")]
    pub initial: Decimal,

    /// Monthly contribution
    #[arg(long, default_value = "0")]
    pub monthly: Decimal,

    /// Expected annual return as a percentage
    #[arg(long)]
    pub annual_return: Option<Decimal>,

    /// Projection length in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_growth(args: GrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let growth_input: InvestmentGrowthInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        InvestmentGrowthInput {
            initial_investment: args.initial,
            monthly_contribution: args.monthly,
            annual_return_pct: args
                .annual_return
                .ok_or("--annual-return is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
        }
    };
    let result = investment::project_growth(&growth_input)?;
    Ok(serde_json::to_value(result)?)
}
