//! Auto-loan financing: taxes, trade-ins, fees, and the level payment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::types::{with_metadata, ComputationOutput, DownPaymentMode, Money, Rate};
use crate::PersonalFinanceResult;

/// How often auto-loan payments are made. Bi-weekly and weekly figures are
/// display conversions of the monthly payment, not separate schedules.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AutoPaymentFrequency {
    #[default]
    Monthly,
    BiWeekly,
    Weekly,
}

impl AutoPaymentFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            AutoPaymentFrequency::Monthly => 12,
            AutoPaymentFrequency::BiWeekly => 26,
            AutoPaymentFrequency::Weekly => 52,
        }
    }
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Auto-loan analysis input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoLoanInput {
    pub vehicle_price: Money,
    /// Down payment, interpreted per `down_payment_mode`.
    #[serde(default)]
    pub down_payment: Money,
    #[serde(default)]
    pub down_payment_mode: DownPaymentMode,
    /// Annual interest rate as a percentage (6.0 = 6%).
    pub annual_rate_pct: Rate,
    /// Loan term in months.
    pub term_months: u32,
    #[serde(default)]
    pub trade_in_value: Money,
    /// Sales tax percentage, applied to the price net of the trade-in.
    #[serde(default)]
    pub sales_tax_pct: Rate,
    /// Dealer and registration fees, financed into the loan.
    #[serde(default)]
    pub fees: Money,
    #[serde(default)]
    pub payment_frequency: AutoPaymentFrequency,
}

/// Auto-loan analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoLoanOutput {
    /// Price plus tax and fees, less trade-in and down payment.
    pub amount_financed: Money,
    pub sales_tax: Money,
    pub monthly_payment: Money,
    /// Monthly payment converted to the configured frequency.
    pub period_payment: Money,
    pub periods_per_year: u32,
    pub total_interest: Money,
    /// Amount financed plus total interest.
    pub total_cost: Money,
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the financed amount, payment, and total cost of an auto loan.
pub fn analyze_auto_loan(
    input: &AutoLoanInput,
) -> PersonalFinanceResult<ComputationOutput<AutoLoanOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate(input)?;

    let down_payment = match input.down_payment_mode {
        DownPaymentMode::Percent => input.vehicle_price * input.down_payment / dec!(100),
        DownPaymentMode::Amount => input.down_payment,
    };

    // Trade-ins reduce the taxable base but not below zero.
    let taxable = (input.vehicle_price - input.trade_in_value).max(Decimal::ZERO);
    let sales_tax = taxable * input.sales_tax_pct / dec!(100);

    let amount_financed =
        input.vehicle_price + sales_tax + input.fees - input.trade_in_value - down_payment;
    if amount_financed <= Decimal::ZERO {
        return Err(PersonalFinanceError::FinancialImpossibility(
            "Trade-in and down payment cover the entire purchase; nothing to finance".into(),
        ));
    }

    let monthly_rate = input.annual_rate_pct / dec!(100) / dec!(12);
    let n = input.term_months;

    let monthly_payment = if monthly_rate.is_zero() {
        amount_financed / Decimal::from(n)
    } else {
        let factor = compound(monthly_rate, n);
        let denom = factor - Decimal::ONE;
        if denom.is_zero() {
            return Err(PersonalFinanceError::DivisionByZero {
                context: "auto loan annuity denominator".into(),
            });
        }
        amount_financed * monthly_rate * factor / denom
    };

    let period_payment = match input.payment_frequency {
        AutoPaymentFrequency::Monthly => monthly_payment,
        AutoPaymentFrequency::BiWeekly => monthly_payment * dec!(12) / dec!(26),
        AutoPaymentFrequency::Weekly => monthly_payment * dec!(12) / dec!(52),
    };

    let total_payments = monthly_payment * Decimal::from(n);
    let total_interest = total_payments - amount_financed;
    let total_cost = amount_financed + total_interest;

    let output = AutoLoanOutput {
        amount_financed,
        sales_tax,
        monthly_payment,
        period_payment,
        periods_per_year: input.payment_frequency.periods_per_year(),
        total_interest,
        total_cost,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Auto Loan with Tax, Trade-In, and Fees",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &AutoLoanInput) -> PersonalFinanceResult<()> {
    if input.vehicle_price <= Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "vehicle_price".into(),
            reason: "Vehicle price must be positive".into(),
        });
    }
    if input.term_months == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "term_months".into(),
            reason: "Loan term must be greater than zero".into(),
        });
    }
    if input.annual_rate_pct < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if input.down_payment < Decimal::ZERO
        || input.trade_in_value < Decimal::ZERO
        || input.sales_tax_pct < Decimal::ZERO
        || input.fees < Decimal::ZERO
    {
        return Err(PersonalFinanceError::InvalidInput {
            field: "auto_loan".into(),
            reason: "Down payment, trade-in, tax, and fees cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
