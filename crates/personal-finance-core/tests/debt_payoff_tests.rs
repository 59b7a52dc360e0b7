#![cfg(feature = "debt_payoff")]

use chrono::NaiveDate;
use personal_finance_core::debt_payoff::{
    simulate, Debt, DebtPayoffInput, DebtType, ExtraPaymentAllocation, ExtraPaymentFrequency,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

fn debt(balance: Decimal, apr_pct: Decimal, minimum: Decimal) -> Debt {
    Debt {
        debt_type: DebtType::CreditCard,
        balance,
        apr_pct,
        minimum_payment: minimum,
        extra_payment: Decimal::ZERO,
    }
}

fn basket(debts: Vec<Debt>, extra: Decimal) -> DebtPayoffInput {
    DebtPayoffInput {
        debts,
        extra_payment: extra,
        extra_payment_frequency: ExtraPaymentFrequency::Monthly,
        allocation: ExtraPaymentAllocation::FixedOriginalCount,
        horizon_months: 360,
        as_of_date: as_of(),
    }
}

// ===========================================================================
// Payoff scenarios
// ===========================================================================

#[test]
fn test_single_debt_no_extra_terminates() {
    // $5,000 at 20% APR with a $150 minimum and no extra payment.
    let input = basket(vec![debt(dec!(5000), dec!(20), dec!(150))], Decimal::ZERO);
    let output = simulate(&input).unwrap();
    let result = &output.result;

    assert!(result.converged);
    assert!(result.months_to_payoff < 360);
    // With zero extra, both scenarios are the same run.
    assert_eq!(result.interest_saved, Decimal::ZERO);
    assert_eq!(result.months_to_payoff, result.months_to_payoff_without_extra);
}

#[test]
fn test_equal_debts_share_evenly() {
    // Two identical debts split the pooled extra evenly, so together they
    // behave exactly like one debt of double the size.
    let pair = basket(
        vec![
            debt(dec!(4000), dec!(18), dec!(120)),
            debt(dec!(4000), dec!(18), dec!(120)),
        ],
        dec!(160),
    );
    let merged = basket(vec![debt(dec!(8000), dec!(18), dec!(240))], dec!(160));

    let pair_result = simulate(&pair).unwrap().result;
    let merged_result = simulate(&merged).unwrap().result;

    assert_eq!(pair_result.months_to_payoff, merged_result.months_to_payoff);
    assert_eq!(
        pair_result.total_interest_with_extra,
        merged_result.total_interest_with_extra
    );
    assert_eq!(
        pair_result.total_interest_without_extra,
        merged_result.total_interest_without_extra
    );
}

#[test]
fn test_extra_payment_never_delays_payoff() {
    let debts = vec![
        debt(dec!(6500), dec!(22), dec!(180)),
        debt(dec!(12000), dec!(8), dec!(260)),
        debt(dec!(2400), dec!(28), dec!(80)),
    ];

    let without = simulate(&basket(debts.clone(), Decimal::ZERO)).unwrap().result;
    for extra in [dec!(50), dec!(200), dec!(750)] {
        let with = simulate(&basket(debts.clone(), extra)).unwrap().result;
        assert!(
            with.months_to_payoff <= without.months_to_payoff,
            "extra {extra} delayed payoff"
        );
        assert!(
            with.interest_saved >= Decimal::ZERO,
            "extra {extra} produced negative savings"
        );
    }
}

#[test]
fn test_payoff_date_is_start_plus_months() {
    let input = basket(vec![debt(dec!(3000), dec!(15), dec!(300))], dec!(100));
    let result = simulate(&input).unwrap().result;

    let expected = as_of()
        .checked_add_months(chrono::Months::new(result.months_to_payoff))
        .unwrap();
    assert_eq!(result.estimated_payoff_date, expected);
}

// ===========================================================================
// Allocation policies
// ===========================================================================

#[test]
fn test_reallocation_is_never_slower() {
    // After the small debt clears, FixedOriginalCount forfeits its share of
    // the extra payment while ActiveDebtsOnly redirects it.
    let debts = vec![
        debt(dec!(800), dec!(24), dec!(150)),
        debt(dec!(15000), dec!(10), dec!(300)),
    ];

    let fixed = simulate(&basket(debts.clone(), dec!(400))).unwrap().result;

    let mut input = basket(debts, dec!(400));
    input.allocation = ExtraPaymentAllocation::ActiveDebtsOnly;
    let reallocated = simulate(&input).unwrap().result;

    assert!(reallocated.months_to_payoff <= fixed.months_to_payoff);
    assert!(reallocated.total_interest_with_extra <= fixed.total_interest_with_extra);
}

// ===========================================================================
// Horizon and degenerate cases
// ===========================================================================

#[test]
fn test_underwater_minimum_caps_at_horizon() {
    let input = basket(vec![debt(dec!(20000), dec!(36), dec!(200))], Decimal::ZERO);
    let output = simulate(&input).unwrap();

    assert!(!output.result.converged);
    assert_eq!(output.result.months_to_payoff, 360);
    assert!(!output.warnings.is_empty());
}

#[test]
fn test_shorter_horizon_respected() {
    let mut input = basket(vec![debt(dec!(5000), dec!(20), dec!(150))], Decimal::ZERO);
    input.horizon_months = 12;
    let result = simulate(&input).unwrap().result;

    assert!(!result.converged);
    assert_eq!(result.months_to_payoff, 12);
}

#[test]
fn test_zero_apr_debt_is_valid() {
    let input = basket(vec![debt(dec!(2400), Decimal::ZERO, dec!(200))], Decimal::ZERO);
    let result = simulate(&input).unwrap().result;

    assert!(result.converged);
    assert_eq!(result.months_to_payoff, 12);
    assert_eq!(result.total_interest_without_extra, Decimal::ZERO);
}

#[test]
fn test_idempotent_projection() {
    let input = basket(
        vec![
            debt(dec!(5200), dec!(19.99), dec!(140)),
            debt(dec!(900), dec!(29.99), dec!(45)),
        ],
        dec!(125),
    );
    let a = simulate(&input).unwrap().result;
    let b = simulate(&input).unwrap().result;
    assert_eq!(a, b);
}
