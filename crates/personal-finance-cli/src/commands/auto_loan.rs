use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::auto_loan::{self, AutoLoanInput, AutoPaymentFrequency};
use personal_finance_core::types::DownPaymentMode;

use crate::commands::mortgage::DownPaymentModeArg;
use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum AutoFrequencyArg {
    Monthly,
    BiWeekly,
    Weekly,
}

impl From<AutoFrequencyArg> for AutoPaymentFrequency {
    fn from(arg: AutoFrequencyArg) -> Self {
        match arg {
            AutoFrequencyArg::Monthly => AutoPaymentFrequency::Monthly,
            AutoFrequencyArg::BiWeekly => AutoPaymentFrequency::BiWeekly,
            AutoFrequencyArg::Weekly => AutoPaymentFrequency::Weekly,
        }
    }
}

/// Arguments for auto loan analysis
#[derive(Args)]
pub struct AutoLoanArgs {
    /// Vehicle price
    #[arg(long)]
    pub price: Option<Decimal>,

    /// Down payment (amount by default, see --down-payment-mode)
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Interpret the down payment as a percentage or an amount
    #[arg(long, default_value = "amount")]
    pub down_payment_mode: DownPaymentModeArg,

    /// Annual interest rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<u32>,

    /// Trade-in value
    #[arg(long, default_value = "0")]
    pub trade_in: Decimal,

    /// Sales tax percentage on the price net of the trade-in
    #[arg(long, default_value = "0")]
    pub sales_tax: Decimal,

    /// Dealer and registration fees financed into the loan
    #[arg(long, default_value = "0")]
    pub fees: Decimal,

    /// Payment frequency for the displayed payment
    #[arg(long, default_value = "monthly")]
    pub frequency: AutoFrequencyArg,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_auto_loan(args: AutoLoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let loan_input: AutoLoanInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AutoLoanInput {
            vehicle_price: args.price.ok_or("--price is required (or provide --input)")?,
            down_payment: args.down_payment,
            down_payment_mode: DownPaymentMode::from(args.down_payment_mode),
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_months: args
                .term_months
                .ok_or("--term-months is required (or provide --input)")?,
            trade_in_value: args.trade_in,
            sales_tax_pct: args.sales_tax,
            fees: args.fees,
            payment_frequency: args.frequency.into(),
        }
    };
    let result = auto_loan::analyze_auto_loan(&loan_input)?;
    Ok(serde_json::to_value(result)?)
}
