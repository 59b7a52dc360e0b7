//! Multi-debt payoff projection under minimum-only and extra-payment plans.
//!
//! Runs the same month-by-month loop twice, once with the pooled extra
//! payment and once without, and reports the months to debt freedom, the
//! projected payoff date, and the interest saved by the extra payment.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PersonalFinanceResult;

/// Total remaining balance below which the basket counts as paid off.
const BALANCE_EPSILON: Decimal = dec!(0.01);

/// Default simulation horizon: 30 years of months.
pub const DEFAULT_HORIZON_MONTHS: u32 = 360;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Category tag for a debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DebtType {
    CreditCard,
    PersonalLoan,
    AutoLoan,
    Mortgage,
}

/// A single debt in the basket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub debt_type: DebtType,
    pub balance: Money,
    /// Annual percentage rate (20.0 = 20%). Zero-APR debts are valid.
    pub apr_pct: Rate,
    pub minimum_payment: Money,
    /// Per-debt extra payment. Enters the summary figures only; the
    /// simulation pools extra payments at the basket level instead.
    #[serde(default)]
    pub extra_payment: Money,
}

/// How often the pooled extra payment is contributed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraPaymentFrequency {
    #[default]
    Monthly,
    Annual,
}

/// How the pooled extra payment is split across debts each month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExtraPaymentAllocation {
    /// Divide by the original debt count every month, even after some debts
    /// reach zero. A paid-off debt's share of the extra goes unused.
    #[default]
    FixedOriginalCount,
    /// Divide by the number of debts still carrying a balance that month.
    ActiveDebtsOnly,
}

/// Debt payoff simulation input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebtPayoffInput {
    pub debts: Vec<Debt>,
    /// Pooled extra payment, per `extra_payment_frequency`.
    #[serde(default)]
    pub extra_payment: Money,
    #[serde(default)]
    pub extra_payment_frequency: ExtraPaymentFrequency,
    #[serde(default)]
    pub allocation: ExtraPaymentAllocation,
    #[serde(default = "default_horizon")]
    pub horizon_months: u32,
    /// Simulation start date; the payoff date is this plus months to payoff.
    pub as_of_date: NaiveDate,
}

fn default_horizon() -> u32 {
    DEFAULT_HORIZON_MONTHS
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Debt payoff projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffResult {
    /// Months until the basket is paid off with the extra payment, capped at
    /// the horizon.
    pub months_to_payoff: u32,
    /// Months under minimum payments alone, capped at the horizon.
    pub months_to_payoff_without_extra: u32,
    /// False when the extra-payment scenario still carries a balance at the
    /// horizon. A reportable state, not an error.
    pub converged: bool,
    pub estimated_payoff_date: NaiveDate,
    pub total_interest_with_extra: Money,
    pub total_interest_without_extra: Money,
    /// Interest avoided by the extra payment.
    pub interest_saved: Money,
    /// Sum of input balances.
    pub total_debt: Money,
    /// Sum of minimum payments plus per-debt extra payments.
    pub total_monthly_payment: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project the payoff of a debt basket with and without the extra payment.
pub fn simulate(input: &DebtPayoffInput) -> PersonalFinanceResult<ComputationOutput<PayoffResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let monthly_extra = match input.extra_payment_frequency {
        ExtraPaymentFrequency::Monthly => input.extra_payment,
        ExtraPaymentFrequency::Annual => input.extra_payment / dec!(12),
    };

    for (i, debt) in input.debts.iter().enumerate() {
        let first_month_interest = debt.balance * debt.apr_pct / dec!(1200);
        if debt.minimum_payment <= first_month_interest {
            warnings.push(format!(
                "Debt #{} minimum payment {} does not cover its first-month interest {}; \
                 the balance can grow",
                i + 1,
                debt.minimum_payment,
                first_month_interest.round_dp(2)
            ));
        }
    }

    let with_extra = run_scenario(
        &input.debts,
        monthly_extra,
        input.allocation,
        input.horizon_months,
    );
    let without_extra = run_scenario(
        &input.debts,
        Decimal::ZERO,
        input.allocation,
        input.horizon_months,
    );

    if !with_extra.converged {
        warnings.push(format!(
            "Balances remain after {} months with the extra payment; projection is capped",
            input.horizon_months
        ));
    }
    if !without_extra.converged {
        warnings.push(format!(
            "Balances remain after {} months under minimum payments; projection is capped",
            input.horizon_months
        ));
    }

    let estimated_payoff_date = input
        .as_of_date
        .checked_add_months(Months::new(with_extra.months))
        .ok_or_else(|| {
            PersonalFinanceError::DateError(format!(
                "Cannot add {} months to {}",
                with_extra.months, input.as_of_date
            ))
        })?;

    let total_debt: Money = input.debts.iter().map(|d| d.balance).sum();
    let total_monthly_payment: Money = input
        .debts
        .iter()
        .map(|d| d.minimum_payment + d.extra_payment)
        .sum();

    let result = PayoffResult {
        months_to_payoff: with_extra.months,
        months_to_payoff_without_extra: without_extra.months,
        converged: with_extra.converged,
        estimated_payoff_date,
        total_interest_with_extra: with_extra.total_interest,
        total_interest_without_extra: without_extra.total_interest,
        interest_saved: without_extra.total_interest - with_extra.total_interest,
        total_debt,
        total_monthly_payment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Dual-Scenario Monthly Debt Payoff Projection",
        input,
        warnings,
        elapsed,
        result,
    ))
}

fn validate(input: &DebtPayoffInput) -> PersonalFinanceResult<()> {
    if input.debts.is_empty() {
        return Err(PersonalFinanceError::InsufficientData(
            "Debt payoff projection requires at least one debt".into(),
        ));
    }
    if input.horizon_months == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "horizon_months".into(),
            reason: "Simulation horizon must be greater than zero".into(),
        });
    }
    if input.extra_payment < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "extra_payment".into(),
            reason: "Extra payment cannot be negative".into(),
        });
    }
    for (i, debt) in input.debts.iter().enumerate() {
        if debt.balance <= Decimal::ZERO {
            return Err(PersonalFinanceError::InvalidInput {
                field: format!("debts[{i}].balance"),
                reason: "Balance must be positive".into(),
            });
        }
        if debt.apr_pct < Decimal::ZERO {
            return Err(PersonalFinanceError::InvalidInput {
                field: format!("debts[{i}].apr_pct"),
                reason: "APR cannot be negative".into(),
            });
        }
        if debt.minimum_payment <= Decimal::ZERO {
            return Err(PersonalFinanceError::InvalidInput {
                field: format!("debts[{i}].minimum_payment"),
                reason: "Minimum payment must be positive".into(),
            });
        }
        if debt.extra_payment < Decimal::ZERO {
            return Err(PersonalFinanceError::InvalidInput {
                field: format!("debts[{i}].extra_payment"),
                reason: "Extra payment cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Scenario loop
// ---------------------------------------------------------------------------

struct ScenarioOutcome {
    months: u32,
    total_interest: Money,
    converged: bool,
}

/// Advance the whole basket month by month until paid off or the horizon.
///
/// Each month: interest accrues on every balance, then each debt receives its
/// minimum payment plus an even share of the pooled extra. Balances floor at
/// zero; overpayment of one debt is not redirected to the others.
fn run_scenario(
    debts: &[Debt],
    monthly_extra: Money,
    allocation: ExtraPaymentAllocation,
    horizon_months: u32,
) -> ScenarioOutcome {
    let mut balances: Vec<Money> = debts.iter().map(|d| d.balance).collect();
    let original_count = Decimal::from(debts.len());

    let mut months: u32 = 0;
    let mut total_interest = Decimal::ZERO;
    let mut outstanding = true;

    while outstanding && months < horizon_months {
        let divisor = match allocation {
            ExtraPaymentAllocation::FixedOriginalCount => original_count,
            ExtraPaymentAllocation::ActiveDebtsOnly => {
                let active = balances.iter().filter(|b| **b > Decimal::ZERO).count();
                Decimal::from(active.max(1))
            }
        };
        let extra_per_debt = monthly_extra / divisor;

        let mut total_remaining = Decimal::ZERO;
        for (debt, balance) in debts.iter().zip(balances.iter_mut()) {
            let monthly_rate = debt.apr_pct / dec!(1200);
            let interest = *balance * monthly_rate;
            let payment = debt.minimum_payment + extra_per_debt;

            total_interest += interest;
            *balance = (*balance - payment + interest).max(Decimal::ZERO);
            total_remaining += *balance;
        }

        months += 1;
        outstanding = total_remaining > BALANCE_EPSILON;
    }

    ScenarioOutcome {
        months,
        total_interest,
        converged: !outstanding,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 15).unwrap()
    }

    fn single_debt_input(extra: Money) -> DebtPayoffInput {
        DebtPayoffInput {
            debts: vec![Debt {
                debt_type: DebtType::CreditCard,
                balance: dec!(5000),
                apr_pct: dec!(20),
                minimum_payment: dec!(150),
                extra_payment: Decimal::ZERO,
            }],
            extra_payment: extra,
            extra_payment_frequency: ExtraPaymentFrequency::Monthly,
            allocation: ExtraPaymentAllocation::FixedOriginalCount,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            as_of_date: as_of(),
        }
    }

    #[test]
    fn test_single_debt_reference_case() {
        // $5,000 at 20% with a $150 minimum clears in 50 months.
        let out = simulate(&single_debt_input(Decimal::ZERO)).unwrap().result;
        assert!(out.converged);
        assert_eq!(out.months_to_payoff, 50);
        assert_eq!(out.months_to_payoff, out.months_to_payoff_without_extra);
        // No extra payment: the two scenarios are the same run.
        assert_eq!(out.interest_saved, Decimal::ZERO);
        assert_eq!(
            out.total_interest_with_extra,
            out.total_interest_without_extra
        );
    }

    #[test]
    fn test_payoff_date_offset() {
        let out = simulate(&single_debt_input(Decimal::ZERO)).unwrap().result;
        let expected = as_of()
            .checked_add_months(Months::new(out.months_to_payoff))
            .unwrap();
        assert_eq!(out.estimated_payoff_date, expected);
    }

    #[test]
    fn test_extra_payment_saves_interest_and_time() {
        let baseline = simulate(&single_debt_input(Decimal::ZERO)).unwrap().result;
        let with_extra = simulate(&single_debt_input(dec!(100))).unwrap().result;

        assert!(with_extra.months_to_payoff < baseline.months_to_payoff);
        assert!(with_extra.interest_saved > Decimal::ZERO);
        assert!(
            with_extra.total_interest_with_extra < with_extra.total_interest_without_extra
        );
    }

    #[test]
    fn test_annual_extra_is_divided_by_twelve() {
        let monthly = single_debt_input(dec!(100));
        let mut annual = single_debt_input(dec!(1200));
        annual.extra_payment_frequency = ExtraPaymentFrequency::Annual;
        let a = simulate(&monthly).unwrap().result;
        let b = simulate(&annual).unwrap().result;
        assert_eq!(a, b);
    }

    #[test]
    fn test_two_half_debts_equal_one_whole() {
        // Splitting a debt in half (and its minimum) changes nothing: the
        // even extra split keeps the halves in lockstep every month.
        let whole = simulate(&single_debt_input(dec!(200))).unwrap().result;

        let halves = DebtPayoffInput {
            debts: vec![
                Debt {
                    debt_type: DebtType::CreditCard,
                    balance: dec!(2500),
                    apr_pct: dec!(20),
                    minimum_payment: dec!(75),
                    extra_payment: Decimal::ZERO,
                },
                Debt {
                    debt_type: DebtType::PersonalLoan,
                    balance: dec!(2500),
                    apr_pct: dec!(20),
                    minimum_payment: dec!(75),
                    extra_payment: Decimal::ZERO,
                },
            ],
            extra_payment: dec!(200),
            extra_payment_frequency: ExtraPaymentFrequency::Monthly,
            allocation: ExtraPaymentAllocation::FixedOriginalCount,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            as_of_date: as_of(),
        };
        let split = simulate(&halves).unwrap().result;

        assert_eq!(whole.months_to_payoff, split.months_to_payoff);
        assert_eq!(
            whole.total_interest_with_extra,
            split.total_interest_with_extra
        );
    }

    #[test]
    fn test_identical_debts_order_invariant() {
        let mut input = single_debt_input(dec!(150));
        input.debts = vec![
            Debt {
                debt_type: DebtType::AutoLoan,
                balance: dec!(8000),
                apr_pct: dec!(7),
                minimum_payment: dec!(250),
                extra_payment: Decimal::ZERO,
            },
            Debt {
                debt_type: DebtType::CreditCard,
                balance: dec!(3000),
                apr_pct: dec!(22),
                minimum_payment: dec!(90),
                extra_payment: Decimal::ZERO,
            },
        ];
        let forward = simulate(&input).unwrap().result;
        input.debts.reverse();
        let reversed = simulate(&input).unwrap().result;

        assert_eq!(forward.months_to_payoff, reversed.months_to_payoff);
        assert_eq!(
            forward.total_interest_with_extra,
            reversed.total_interest_with_extra
        );
    }

    #[test]
    fn test_fixed_divisor_underallocates_after_payoff() {
        // One small debt clears early; under the fixed divisor, its share of
        // the extra payment is forfeited, so reallocating can only be faster.
        let debts = vec![
            Debt {
                debt_type: DebtType::CreditCard,
                balance: dec!(500),
                apr_pct: dec!(20),
                minimum_payment: dec!(100),
                extra_payment: Decimal::ZERO,
            },
            Debt {
                debt_type: DebtType::PersonalLoan,
                balance: dec!(10000),
                apr_pct: dec!(12),
                minimum_payment: dec!(200),
                extra_payment: Decimal::ZERO,
            },
        ];
        let mut fixed = DebtPayoffInput {
            debts,
            extra_payment: dec!(300),
            extra_payment_frequency: ExtraPaymentFrequency::Monthly,
            allocation: ExtraPaymentAllocation::FixedOriginalCount,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            as_of_date: as_of(),
        };
        let fixed_result = simulate(&fixed).unwrap().result;

        fixed.allocation = ExtraPaymentAllocation::ActiveDebtsOnly;
        let active_result = simulate(&fixed).unwrap().result;

        assert!(active_result.months_to_payoff <= fixed_result.months_to_payoff);
        assert!(
            active_result.total_interest_with_extra <= fixed_result.total_interest_with_extra
        );
    }

    #[test]
    fn test_zero_apr_linear_paydown() {
        let input = DebtPayoffInput {
            debts: vec![Debt {
                debt_type: DebtType::PersonalLoan,
                balance: dec!(1200),
                apr_pct: Decimal::ZERO,
                minimum_payment: dec!(100),
                extra_payment: Decimal::ZERO,
            }],
            extra_payment: Decimal::ZERO,
            extra_payment_frequency: ExtraPaymentFrequency::Monthly,
            allocation: ExtraPaymentAllocation::FixedOriginalCount,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            as_of_date: as_of(),
        };
        let out = simulate(&input).unwrap().result;
        assert_eq!(out.months_to_payoff, 12);
        assert_eq!(out.total_interest_without_extra, Decimal::ZERO);
    }

    #[test]
    fn test_horizon_cap_reported_not_errored() {
        // Minimum payment below the monthly interest: the balance grows and
        // the projection caps at the horizon.
        let input = DebtPayoffInput {
            debts: vec![Debt {
                debt_type: DebtType::CreditCard,
                balance: dec!(10000),
                apr_pct: dec!(30),
                minimum_payment: dec!(100),
                extra_payment: Decimal::ZERO,
            }],
            extra_payment: Decimal::ZERO,
            extra_payment_frequency: ExtraPaymentFrequency::Monthly,
            allocation: ExtraPaymentAllocation::FixedOriginalCount,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            as_of_date: as_of(),
        };
        let output = simulate(&input).unwrap();
        assert!(!output.result.converged);
        assert_eq!(output.result.months_to_payoff, DEFAULT_HORIZON_MONTHS);
        assert!(output
            .warnings
            .iter()
            .any(|w| w.contains("does not cover its first-month interest")));
    }

    #[test]
    fn test_empty_basket_rejected() {
        let input = DebtPayoffInput {
            debts: Vec::new(),
            extra_payment: Decimal::ZERO,
            extra_payment_frequency: ExtraPaymentFrequency::Monthly,
            allocation: ExtraPaymentAllocation::FixedOriginalCount,
            horizon_months: DEFAULT_HORIZON_MONTHS,
            as_of_date: as_of(),
        };
        assert!(matches!(
            simulate(&input),
            Err(PersonalFinanceError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_summary_figures() {
        let mut input = single_debt_input(dec!(50));
        input.debts[0].extra_payment = dec!(25);
        let out = simulate(&input).unwrap().result;
        assert_eq!(out.total_debt, dec!(5000));
        assert_eq!(out.total_monthly_payment, dec!(175));
    }

    #[test]
    fn test_idempotence() {
        let input = single_debt_input(dec!(75));
        let a = simulate(&input).unwrap().result;
        let b = simulate(&input).unwrap().result;
        assert_eq!(a, b);
    }
}
