use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::debt_payoff::{self, DebtPayoffInput};

use crate::input;

/// Arguments for debt payoff projection
#[derive(Args)]
pub struct DebtPayoffArgs {
    /// Path to JSON input file with the debt basket
    #[arg(long)]
    pub input: Option<String>,

    /// Pooled extra payment (overrides the input file)
    #[arg(long)]
    pub extra_payment: Option<Decimal>,

    /// Treat the extra payment as an annual figure
    #[arg(long)]
    pub annual: bool,

    /// Split the extra payment across active debts instead of the original count
    #[arg(long)]
    pub reallocate_extra: bool,

    /// Simulation horizon in months (overrides the input file)
    #[arg(long)]
    pub horizon_months: Option<u32>,

    /// Projection start date, YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub as_of: Option<String>,
}

pub fn run_debt_payoff(args: DebtPayoffArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut data: Value = if let Some(ref path) = args.input {
        input::read_json_value(path)?
    } else if let Some(data) = input::read_stdin()? {
        data
    } else {
        return Err("--input <file.json> or stdin required for debt payoff projection".into());
    };

    // The engine takes the projection start date as input; the CLI owns "now".
    let map = data
        .as_object_mut()
        .ok_or("Debt payoff input must be a JSON object")?;
    if let Some(as_of) = &args.as_of {
        map.insert("as_of_date".into(), Value::String(as_of.clone()));
    } else if !map.contains_key("as_of_date") {
        let today = chrono::Local::now().date_naive();
        map.insert("as_of_date".into(), Value::String(today.to_string()));
    }
    if let Some(extra) = args.extra_payment {
        map.insert("extra_payment".into(), Value::String(extra.to_string()));
    }
    if args.annual {
        map.insert("extra_payment_frequency".into(), Value::String("Annual".into()));
    }
    if args.reallocate_extra {
        map.insert("allocation".into(), Value::String("ActiveDebtsOnly".into()));
    }
    if let Some(horizon) = args.horizon_months {
        map.insert("horizon_months".into(), Value::from(horizon));
    }

    let payoff_input: DebtPayoffInput = serde_json::from_value(data)?;
    let result = debt_payoff::simulate(&payoff_input)?;
    Ok(serde_json::to_value(result)?)
}
