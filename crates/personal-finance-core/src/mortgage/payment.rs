//! Loan-amount resolution, mortgage-insurance premiums, and level payments.
//!
//! Premium brackets follow the Canadian (CMHC-style) schedule: down payments
//! of 20% or more are uninsured; below 20% a premium is added to the financed
//! amount. Ratios below the 5% insurable minimum are rejected unless the
//! caller explicitly opts into the unpremiumed legacy behaviour.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::PersonalFinanceError;
use crate::types::{DownPaymentMode, Money, Rate};
use crate::PersonalFinanceResult;

/// Smallest down-payment ratio that qualifies for mortgage insurance.
pub const MIN_INSURABLE_RATIO: Decimal = dec!(0.05);

/// Down-payment ratio at or above which no insurance premium applies.
pub const UNINSURED_RATIO: Decimal = dec!(0.20);

// ---------------------------------------------------------------------------
// Frequency enums
// ---------------------------------------------------------------------------

/// How often regular mortgage payments are made.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentFrequency {
    /// 12 payments per year.
    #[default]
    Monthly,
    /// 26 payments per year at 12/26 of the monthly amount. Same annual
    /// outlay as monthly; does not accelerate payoff.
    BiWeekly,
    /// 26 payments per year at half the monthly amount. The extra month of
    /// principal each year shortens the amortization.
    AcceleratedBiWeekly,
}

/// How often a recurring lump-sum prepayment is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LumpSumFrequency {
    Monthly,
    Quarterly,
    #[default]
    Annually,
}

impl LumpSumFrequency {
    pub fn payments_per_year(self) -> u32 {
        match self {
            LumpSumFrequency::Monthly => 12,
            LumpSumFrequency::Quarterly => 4,
            LumpSumFrequency::Annually => 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Loan figures
// ---------------------------------------------------------------------------

/// Resolved financing figures for a mortgage, before scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanFigures {
    /// Principal less down payment, before any insurance premium.
    pub loan_amount: Money,
    /// Down payment as a fraction of the purchase price.
    pub down_payment_ratio: Decimal,
    /// Insurance premium added to the financed amount.
    pub insurance_premium: Money,
    /// Amount actually amortized: loan_amount + insurance_premium.
    pub total_loan: Money,
    /// Periodic monthly rate as a fraction (annual% / 100 / 12).
    pub monthly_rate: Rate,
    /// Level monthly payment amortizing total_loan over the term.
    pub monthly_payment: Money,
}

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
pub(crate) fn compound(rate: Decimal, n: u32) -> Decimal {
    let mut result = Decimal::ONE;
    let factor = Decimal::ONE + rate;
    for _ in 0..n {
        result *= factor;
    }
    result
}

/// Resolve a down-payment figure to a currency amount.
pub fn resolve_down_payment(principal: Money, down_payment: Money, mode: DownPaymentMode) -> Money {
    match mode {
        DownPaymentMode::Percent => principal * down_payment / dec!(100),
        DownPaymentMode::Amount => down_payment,
    }
}

/// Bracketed insurance premium rate for a given down-payment ratio.
///
/// Ratios below [`MIN_INSURABLE_RATIO`] have no defined bracket; they are
/// rejected unless `allow_uninsurable` is set, in which case the rate is 0%
/// and a warning is recorded.
pub fn insurance_premium_rate(
    ratio: Decimal,
    allow_uninsurable: bool,
    warnings: &mut Vec<String>,
) -> PersonalFinanceResult<Decimal> {
    if ratio >= UNINSURED_RATIO {
        return Ok(Decimal::ZERO);
    }
    if ratio >= dec!(0.15) {
        return Ok(dec!(0.028));
    }
    if ratio >= dec!(0.10) {
        return Ok(dec!(0.031));
    }
    if ratio >= MIN_INSURABLE_RATIO {
        return Ok(dec!(0.04));
    }
    if allow_uninsurable {
        warnings.push(format!(
            "Down payment ratio {ratio} is below the 5% insurable minimum; no premium applied"
        ));
        return Ok(Decimal::ZERO);
    }
    Err(PersonalFinanceError::UninsurableDownPayment { ratio })
}

/// Compute the financed amount and level monthly payment for a mortgage.
///
/// A zero annual rate amortizes linearly (total loan / number of payments)
/// instead of hitting the annuity formula's division by zero.
pub fn compute_monthly_payment(
    principal: Money,
    down_payment: Money,
    down_payment_mode: DownPaymentMode,
    annual_rate_pct: Rate,
    term_years: u32,
    allow_uninsurable: bool,
    warnings: &mut Vec<String>,
) -> PersonalFinanceResult<LoanFigures> {
    if principal <= Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "principal".into(),
            reason: "Purchase price must be positive".into(),
        });
    }
    if term_years == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be greater than zero".into(),
        });
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }

    let down = resolve_down_payment(principal, down_payment, down_payment_mode);
    let loan_amount = principal - down;
    if loan_amount <= Decimal::ZERO {
        return Err(PersonalFinanceError::FinancialImpossibility(
            "Down payment covers the entire purchase price; nothing to finance".into(),
        ));
    }

    let down_payment_ratio = (principal - loan_amount) / principal;
    let premium_rate = insurance_premium_rate(down_payment_ratio, allow_uninsurable, warnings)?;
    let insurance_premium = loan_amount * premium_rate;
    let total_loan = loan_amount + insurance_premium;

    let monthly_rate = annual_rate_pct / dec!(100) / dec!(12);
    let n = term_years * 12;

    let monthly_payment = if monthly_rate.is_zero() {
        total_loan / Decimal::from(n)
    } else {
        let factor = compound(monthly_rate, n);
        if factor.is_zero() {
            return Err(PersonalFinanceError::DivisionByZero {
                context: "mortgage payment compounding factor".into(),
            });
        }
        let denom = Decimal::ONE - Decimal::ONE / factor;
        if denom.is_zero() {
            return Err(PersonalFinanceError::DivisionByZero {
                context: "mortgage payment annuity denominator".into(),
            });
        }
        total_loan * monthly_rate / denom
    };

    Ok(LoanFigures {
        loan_amount,
        down_payment_ratio,
        insurance_premium,
        total_loan,
        monthly_rate,
        monthly_payment,
    })
}

/// Convert a monthly payment and rate to the configured payment frequency.
///
/// Returns (period payment, period rate, periods per year).
pub fn convert_payment_frequency(
    monthly_payment: Money,
    monthly_rate: Rate,
    frequency: PaymentFrequency,
) -> (Money, Rate, u32) {
    match frequency {
        PaymentFrequency::Monthly => (monthly_payment, monthly_rate, 12),
        PaymentFrequency::BiWeekly => (
            monthly_payment * dec!(12) / dec!(26),
            monthly_rate * dec!(12) / dec!(26),
            26,
        ),
        PaymentFrequency::AcceleratedBiWeekly => (
            monthly_payment / dec!(2),
            monthly_rate * dec!(12) / dec!(26),
            26,
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
