//! Home affordability under the 28/36 debt-to-income rule.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PersonalFinanceResult;

use super::payment::compound;

/// Maximum share of gross monthly income for the housing payment alone.
const FRONT_END_RATIO: Decimal = dec!(0.28);

/// Maximum share of gross monthly income for housing plus other debts.
const BACK_END_RATIO: Decimal = dec!(0.36);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Affordability analysis input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityInput {
    pub annual_income: Money,
    /// Existing monthly debt obligations (loans, cards, support payments).
    pub monthly_debts: Money,
    /// Cash available as a down payment.
    pub down_payment: Money,
    /// Annual mortgage rate as a percentage (6.0 = 6%).
    pub annual_rate_pct: Rate,
    pub term_years: u32,
    /// Annual property tax rate as a percentage of the home price.
    pub property_tax_rate_pct: Rate,
    /// Annual homeowner's insurance premium.
    pub annual_insurance: Money,
}

/// Which income ratio capped the housing payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BindingConstraint {
    /// The 28% housing-payment ceiling.
    FrontEndRatio,
    /// The 36% total-debt ceiling net of existing obligations.
    BackEndRatio,
}

/// Affordability analysis output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AffordabilityOutput {
    pub max_home_price: Money,
    pub max_loan_amount: Money,
    /// Housing payment ceiling that sized the loan.
    pub max_allowed_payment: Money,
    pub binding_constraint: BindingConstraint,
    /// Mortgage payment on the maximum loan.
    pub monthly_payment: Money,
    pub monthly_taxes: Money,
    pub monthly_insurance: Money,
    /// Mortgage payment plus taxes and insurance.
    pub total_monthly_payment: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Estimate the maximum affordable home price from income, debts, and rates.
pub fn analyze_affordability(
    input: &AffordabilityInput,
) -> PersonalFinanceResult<ComputationOutput<AffordabilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate(input)?;

    let monthly_income = input.annual_income / dec!(12);
    let front_end_limit = monthly_income * FRONT_END_RATIO;
    let back_end_limit = monthly_income * BACK_END_RATIO - input.monthly_debts;

    let (max_allowed_payment, binding_constraint) = if back_end_limit < front_end_limit {
        (back_end_limit, BindingConstraint::BackEndRatio)
    } else {
        (front_end_limit, BindingConstraint::FrontEndRatio)
    };

    if max_allowed_payment <= Decimal::ZERO {
        return Err(PersonalFinanceError::FinancialImpossibility(
            "Existing monthly debts exhaust the 36% debt-to-income ceiling".into(),
        ));
    }

    let monthly_rate = input.annual_rate_pct / dec!(100) / dec!(12);
    let n = input.term_years * 12;
    let factor = compound(monthly_rate, n);
    let annuity = monthly_rate * factor;
    if annuity.is_zero() {
        return Err(PersonalFinanceError::DivisionByZero {
            context: "affordability annuity factor".into(),
        });
    }

    let max_loan_amount = max_allowed_payment * (factor - Decimal::ONE) / annuity;
    let max_home_price = max_loan_amount + input.down_payment;

    let monthly_taxes = max_home_price * input.property_tax_rate_pct / dec!(100) / dec!(12);
    let monthly_insurance = input.annual_insurance / dec!(12);

    // Recompute the payment on the sized loan rather than reusing the ceiling.
    let monthly_payment = max_loan_amount * annuity / (factor - Decimal::ONE);
    let total_monthly_payment = monthly_payment + monthly_taxes + monthly_insurance;

    if binding_constraint == BindingConstraint::BackEndRatio {
        warnings.push(
            "Existing debts cap the housing payment below the 28% income guideline".into(),
        );
    }

    let output = AffordabilityOutput {
        max_home_price,
        max_loan_amount,
        max_allowed_payment,
        binding_constraint,
        monthly_payment,
        monthly_taxes,
        monthly_insurance,
        total_monthly_payment,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "28/36 Debt-to-Income Affordability",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &AffordabilityInput) -> PersonalFinanceResult<()> {
    if input.annual_income <= Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_income".into(),
            reason: "Annual income must be positive".into(),
        });
    }
    if input.annual_rate_pct <= Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate must be positive".into(),
        });
    }
    if input.term_years == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be greater than zero".into(),
        });
    }
    if input.monthly_debts < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "monthly_debts".into(),
            reason: "Monthly debts cannot be negative".into(),
        });
    }
    if input.down_payment < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "down_payment".into(),
            reason: "Down payment cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
