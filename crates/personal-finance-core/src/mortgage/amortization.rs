//! Year-by-year amortization schedules with recurring lump-sum prepayments.
//!
//! The schedule is simulated period by period at the configured payment
//! frequency. Lump sums are applied straight to principal on their due
//! periods, the balance is clamped to zero once it falls below a cent, and
//! the schedule stops at payoff even mid-term.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::types::{with_metadata, ComputationOutput, DownPaymentMode, Money, Rate};
use crate::PersonalFinanceResult;

use super::payment::{
    compute_monthly_payment, convert_payment_frequency, LumpSumFrequency, PaymentFrequency,
};

/// Minimum balance threshold below which the loan is considered fully paid.
const BALANCE_EPSILON: Decimal = dec!(0.01);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Mortgage analysis input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageInput {
    /// Purchase price.
    pub principal: Money,
    /// Down payment, interpreted per `down_payment_mode`.
    pub down_payment: Money,
    #[serde(default)]
    pub down_payment_mode: DownPaymentMode,
    /// Annual interest rate as a percentage (5.0 = 5%).
    pub annual_rate_pct: Rate,
    /// Amortization term in years.
    pub term_years: u32,
    #[serde(default)]
    pub payment_frequency: PaymentFrequency,
    /// Recurring prepayment applied straight to principal. Zero disables.
    #[serde(default)]
    pub lump_sum: Money,
    #[serde(default)]
    pub lump_sum_frequency: LumpSumFrequency,
    /// Accept a sub-5% down payment with no insurance premium instead of
    /// rejecting it.
    #[serde(default)]
    pub allow_uninsurable_down_payment: bool,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// One year of the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationYearRow {
    /// 1-based year index.
    pub year: u32,
    /// Principal retired during the year, including lump sums.
    pub principal_paid: Money,
    /// Interest charged during the year.
    pub interest_paid: Money,
    /// Balance at the end of the year.
    pub remaining_balance: Money,
}

/// Time until the loan is fully amortized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffTime {
    pub years: u32,
    pub months: u32,
}

impl fmt::Display for PayoffTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.months == 0 {
            write!(f, "{} years", self.years)
        } else {
            write!(f, "{} years, {} months", self.years, self.months)
        }
    }
}

/// Full mortgage analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MortgageOutput {
    /// Principal less down payment.
    pub loan_amount: Money,
    /// Down payment as a fraction of the purchase price.
    pub down_payment_ratio: Decimal,
    /// Insurance premium financed on top of the loan amount.
    pub insurance_premium: Money,
    /// Amount actually amortized.
    pub total_loan: Money,
    /// Level monthly-equivalent payment.
    pub monthly_payment: Money,
    /// Payment at the configured frequency.
    pub period_payment: Money,
    pub periods_per_year: u32,
    pub schedule: Vec<AmortizationYearRow>,
    pub payoff_time: PayoffTime,
    /// Interest saved against the no-prepayment baseline. May be negative
    /// when no lump sum is configured; callers decide what to display.
    pub interest_savings: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full mortgage analysis: payment, schedule, payoff time, savings.
pub fn analyze_mortgage(
    input: &MortgageInput,
) -> PersonalFinanceResult<ComputationOutput<MortgageOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let figures = compute_monthly_payment(
        input.principal,
        input.down_payment,
        input.down_payment_mode,
        input.annual_rate_pct,
        input.term_years,
        input.allow_uninsurable_down_payment,
        &mut warnings,
    )?;

    let (period_payment, period_rate, periods_per_year) = convert_payment_frequency(
        figures.monthly_payment,
        figures.monthly_rate,
        input.payment_frequency,
    );

    let schedule = generate_schedule(
        figures.total_loan,
        period_rate,
        period_payment,
        input.term_years,
        periods_per_year,
        input.lump_sum,
        input.lump_sum_frequency,
    );

    let payoff_time = derive_payoff_time(&schedule, figures.total_loan, input.term_years);
    let interest_savings = interest_savings(
        figures.total_loan,
        period_payment,
        periods_per_year,
        input.term_years,
        &schedule,
    );

    if let Some(last) = schedule.last() {
        if last.remaining_balance > Decimal::ZERO {
            warnings.push(format!(
                "Loan is not fully amortized within the {}-year term ({} remaining)",
                input.term_years,
                last.remaining_balance.round_dp(2)
            ));
        }
    }

    let output = MortgageOutput {
        loan_amount: figures.loan_amount,
        down_payment_ratio: figures.down_payment_ratio,
        insurance_premium: figures.insurance_premium,
        total_loan: figures.total_loan,
        monthly_payment: figures.monthly_payment,
        period_payment,
        periods_per_year,
        schedule,
        payoff_time,
        interest_savings,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization with Insurance Premium and Lump-Sum Prepayments",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &MortgageInput) -> PersonalFinanceResult<()> {
    if input.principal <= Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "principal".into(),
            reason: "Purchase price must be positive".into(),
        });
    }
    if input.term_years == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be greater than zero".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    if input.lump_sum < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "lump_sum".into(),
            reason: "Lump sum cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Schedule generation
// ---------------------------------------------------------------------------

/// Simulate the amortization period by period, emitting one row per year.
///
/// A lump sum due on a period is applied to principal before that period's
/// interest accrues. A year in which the balance reaches zero still emits a
/// row with the amounts accumulated so far, and the schedule ends there.
pub fn generate_schedule(
    total_loan: Money,
    period_rate: Rate,
    period_payment: Money,
    years: u32,
    periods_per_year: u32,
    lump_sum: Money,
    lump_sum_frequency: LumpSumFrequency,
) -> Vec<AmortizationYearRow> {
    let mut balance = total_loan;
    let mut schedule: Vec<AmortizationYearRow> = Vec::new();

    // Period interval between lump-sum applications within a year. Integer
    // division: 26 periods with monthly lump sums applies every 2nd period,
    // 13 times a year.
    let lump_interval = if lump_sum > Decimal::ZERO {
        periods_per_year / lump_sum_frequency.payments_per_year()
    } else {
        0
    };

    for year in 1..=years {
        let mut principal_paid = Decimal::ZERO;
        let mut interest_paid = Decimal::ZERO;

        for period in 1..=periods_per_year {
            if lump_interval > 0 && period % lump_interval == 0 {
                let lump = lump_sum.min(balance);
                balance -= lump;
                principal_paid += lump;
            }

            if balance <= Decimal::ZERO {
                break;
            }

            let interest = balance * period_rate;
            interest_paid += interest;

            let principal = (period_payment - interest).min(balance);
            principal_paid += principal;
            balance -= principal;

            if balance <= BALANCE_EPSILON {
                balance = Decimal::ZERO;
                break;
            }
        }

        schedule.push(AmortizationYearRow {
            year,
            principal_paid,
            interest_paid,
            remaining_balance: balance,
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    schedule
}

// ---------------------------------------------------------------------------
// Derived figures
// ---------------------------------------------------------------------------

/// Payoff time from a generated schedule.
///
/// An unamortized loan (or empty schedule) reports the full term as a display
/// fallback. Payoff partway through the final scheduled year interpolates
/// months from that year's total payment run rate against the prior year's
/// ending balance, rounding up.
pub fn derive_payoff_time(
    schedule: &[AmortizationYearRow],
    total_loan: Money,
    term_years: u32,
) -> PayoffTime {
    let last = match schedule.last() {
        Some(row) => row,
        None => {
            return PayoffTime {
                years: term_years,
                months: 0,
            }
        }
    };

    if last.remaining_balance > Decimal::ZERO {
        return PayoffTime {
            years: term_years,
            months: 0,
        };
    }

    let payoff_year = schedule.len() as u32;
    if payoff_year == 0 || payoff_year >= term_years {
        return PayoffTime {
            years: payoff_year,
            months: 0,
        };
    }

    let prev_balance = if payoff_year > 1 {
        schedule[payoff_year as usize - 2].remaining_balance
    } else {
        total_loan
    };

    if last.remaining_balance.is_zero() && prev_balance > Decimal::ZERO {
        let yearly_payment = last.principal_paid + last.interest_paid;
        let monthly_payment = yearly_payment / dec!(12);
        if monthly_payment > Decimal::ZERO {
            let months_needed = (prev_balance / monthly_payment).ceil();
            if months_needed < dec!(12) {
                return PayoffTime {
                    years: payoff_year - 1,
                    months: months_needed.to_u32().unwrap_or(0),
                };
            }
        }
    }

    PayoffTime {
        years: payoff_year,
        months: 0,
    }
}

/// Interest saved against a no-prepayment baseline running the full term.
pub fn interest_savings(
    total_loan: Money,
    period_payment: Money,
    periods_per_year: u32,
    years: u32,
    schedule: &[AmortizationYearRow],
) -> Money {
    let baseline =
        period_payment * Decimal::from(periods_per_year) * Decimal::from(years) - total_loan;
    let actual: Money = schedule.iter().map(|row| row.interest_paid).sum();
    baseline - actual
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
