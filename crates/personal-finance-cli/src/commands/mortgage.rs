use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use personal_finance_core::mortgage::affordability::{self, AffordabilityInput};
use personal_finance_core::mortgage::amortization::{self, MortgageInput};
use personal_finance_core::mortgage::payment::{LumpSumFrequency, PaymentFrequency};
use personal_finance_core::types::DownPaymentMode;

use crate::input;

#[derive(Debug, Clone, ValueEnum)]
pub enum DownPaymentModeArg {
    Percent,
    Amount,
}

impl From<DownPaymentModeArg> for DownPaymentMode {
    fn from(arg: DownPaymentModeArg) -> Self {
        match arg {
            DownPaymentModeArg::Percent => DownPaymentMode::Percent,
            DownPaymentModeArg::Amount => DownPaymentMode::Amount,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum PaymentFrequencyArg {
    Monthly,
    BiWeekly,
    AcceleratedBiWeekly,
}

impl From<PaymentFrequencyArg> for PaymentFrequency {
    fn from(arg: PaymentFrequencyArg) -> Self {
        match arg {
            PaymentFrequencyArg::Monthly => PaymentFrequency::Monthly,
            PaymentFrequencyArg::BiWeekly => PaymentFrequency::BiWeekly,
            PaymentFrequencyArg::AcceleratedBiWeekly => PaymentFrequency::AcceleratedBiWeekly,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum LumpSumFrequencyArg {
    Monthly,
    Quarterly,
    Annually,
}

impl From<LumpSumFrequencyArg> for LumpSumFrequency {
    fn from(arg: LumpSumFrequencyArg) -> Self {
        match arg {
            LumpSumFrequencyArg::Monthly => LumpSumFrequency::Monthly,
            LumpSumFrequencyArg::Quarterly => LumpSumFrequency::Quarterly,
            LumpSumFrequencyArg::Annually => LumpSumFrequency::Annually,
        }
    }
}

/// Arguments for mortgage analysis
#[derive(Args)]
pub struct MortgageArgs {
    /// Purchase price
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Down payment (percentage by default, see --down-payment-mode)
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Interpret the down payment as a percentage or an amount
    #[arg(long, default_value = "percent")]
    pub down_payment_mode: DownPaymentModeArg,

    /// Annual interest rate as a percentage (e.g. 5 for 5%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Amortization term in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Payment frequency
    #[arg(long, default_value = "monthly")]
    pub frequency: PaymentFrequencyArg,

    /// Recurring lump-sum prepayment amount
    #[arg(long, default_value = "0")]
    pub lump_sum: Decimal,

    /// Lump-sum frequency
    #[arg(long, default_value = "annually")]
    pub lump_sum_frequency: LumpSumFrequencyArg,

    /// Accept a sub-5% down payment without an insurance premium
    #[arg(long)]
    pub allow_uninsurable: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for affordability analysis
#[derive(Args)]
pub struct AffordabilityArgs {
    /// Gross annual income
    #[arg(long)]
    pub annual_income: Option<Decimal>,

    /// Existing monthly debt obligations
    #[arg(long, default_value = "0")]
    pub monthly_debts: Decimal,

    /// Cash available as a down payment
    #[arg(long, default_value = "0")]
    pub down_payment: Decimal,

    /// Annual mortgage rate as a percentage
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long, default_value = "30")]
    pub years: u32,

    /// Annual property tax rate as a percentage of the home price
    #[arg(long, default_value = "0")]
    pub property_tax_rate: Decimal,

    /// Annual homeowner's insurance premium
    #[arg(long, default_value = "0")]
    pub insurance: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        MortgageInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            down_payment: args
                .down_payment
                .ok_or("--down-payment is required (or provide --input)")?,
            down_payment_mode: args.down_payment_mode.into(),
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years.ok_or("--years is required (or provide --input)")?,
            payment_frequency: args.frequency.into(),
            lump_sum: args.lump_sum,
            lump_sum_frequency: args.lump_sum_frequency.into(),
            allow_uninsurable_down_payment: args.allow_uninsurable,
        }
    };
    let result = amortization::analyze_mortgage(&mortgage_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_affordability(args: AffordabilityArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let afford_input: AffordabilityInput = if let Some(ref path) = args.input {
        input::read_json(path)?
    } else if let Some(data) = input::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AffordabilityInput {
            annual_income: args
                .annual_income
                .ok_or("--annual-income is required (or provide --input)")?,
            monthly_debts: args.monthly_debts,
            down_payment: args.down_payment,
            annual_rate_pct: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years,
            property_tax_rate_pct: args.property_tax_rate,
            annual_insurance: args.insurance,
        }
    };
    let result = affordability::analyze_affordability(&afford_input)?;
    Ok(serde_json::to_value(result)?)
}
