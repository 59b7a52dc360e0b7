//! Investment growth projection with monthly compounding and contributions.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::PersonalFinanceError;
use crate::types::{with_metadata, ComputationOutput, Money, Rate};
use crate::PersonalFinanceResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Investment growth projection input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentGrowthInput {
    pub initial_investment: Money,
    /// Contributed at the end of each month, after growth.
    pub monthly_contribution: Money,
    /// Expected annual return as a percentage (7.0 = 7%).
    pub annual_return_pct: Rate,
    pub years: u32,
}

/// Portfolio snapshot at the end of a projection year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthPoint {
    /// 0-based; year 0 is the starting position.
    pub year: u32,
    pub total_value: Money,
    /// Cumulative contributions including the initial investment.
    pub principal_value: Money,
    /// Growth over contributions to date.
    pub interest_value: Money,
}

/// Investment growth projection output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvestmentGrowthOutput {
    pub points: Vec<GrowthPoint>,
    pub final_balance: Money,
    pub total_contributions: Money,
    pub total_interest_earned: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Project portfolio value year by year under monthly compounding.
pub fn project_growth(
    input: &InvestmentGrowthInput,
) -> PersonalFinanceResult<ComputationOutput<InvestmentGrowthOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    validate(input)?;

    let monthly_rate = input.annual_return_pct / dec!(100) / dec!(12);

    let mut points: Vec<GrowthPoint> = Vec::with_capacity(input.years as usize + 1);
    let mut total_value = input.initial_investment;
    let mut total_contributions = input.initial_investment;

    for year in 0..=input.years {
        if year > 0 {
            for _ in 0..12 {
                total_value *= Decimal::ONE + monthly_rate;
                total_value += input.monthly_contribution;
                total_contributions += input.monthly_contribution;
            }
        }

        points.push(GrowthPoint {
            year,
            total_value,
            principal_value: total_contributions,
            interest_value: total_value - total_contributions,
        });
    }

    let output = InvestmentGrowthOutput {
        final_balance: total_value,
        total_contributions,
        total_interest_earned: total_value - total_contributions,
        points,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Monthly-Compounded Contribution Growth Projection",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn validate(input: &InvestmentGrowthInput) -> PersonalFinanceResult<()> {
    if input.years == 0 {
        return Err(PersonalFinanceError::InvalidInput {
            field: "years".into(),
            reason: "Projection years must be greater than zero".into(),
        });
    }
    if input.initial_investment < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "initial_investment".into(),
            reason: "Initial investment cannot be negative".into(),
        });
    }
    if input.monthly_contribution < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "monthly_contribution".into(),
            reason: "Monthly contribution cannot be negative".into(),
        });
    }
    if input.annual_return_pct < Decimal::ZERO {
        return Err(PersonalFinanceError::InvalidInput {
            field: "annual_return_pct".into(),
            reason: "Annual return cannot be negative".into(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn standard_input() -> InvestmentGrowthInput {
        InvestmentGrowthInput {
            initial_investment: dec!(10000),
            monthly_contribution: dec!(500),
            annual_return_pct: dec!(7),
            years: 10,
        }
    }

    #[test]
    fn test_point_count_and_start() {
        let out = project_growth(&standard_input()).unwrap().result;
        assert_eq!(out.points.len(), 11);
        assert_eq!(out.points[0].year, 0);
        assert_eq!(out.points[0].total_value, dec!(10000));
        assert_eq!(out.points[0].interest_value, Decimal::ZERO);
    }

    #[test]
    fn test_closed_form_agreement() {
        // FV = P0 * f^n + C * (f^n - 1) / r with end-of-month contributions.
        let input = standard_input();
        let out = project_growth(&input).unwrap().result;

        let r = dec!(7) / dec!(100) / dec!(12);
        let mut f = Decimal::ONE;
        for _ in 0..120 {
            f *= Decimal::ONE + r;
        }
        let expected = dec!(10000) * f + dec!(500) * (f - Decimal::ONE) / r;
        let diff = (out.final_balance - expected).abs();
        assert!(diff < dec!(0.5), "closed form disagrees by {diff}");
    }

    #[test]
    fn test_zero_return_equals_contributions() {
        let mut input = standard_input();
        input.annual_return_pct = Decimal::ZERO;
        let out = project_growth(&input).unwrap().result;

        assert_eq!(out.final_balance, dec!(10000) + dec!(500) * dec!(120));
        assert_eq!(out.total_interest_earned, Decimal::ZERO);
    }

    #[test]
    fn test_contributions_monotone() {
        let out = project_growth(&standard_input()).unwrap().result;
        for window in out.points.windows(2) {
            assert!(window[1].principal_value > window[0].principal_value);
            assert!(window[1].total_value > window[0].total_value);
        }
    }

    #[test]
    fn test_no_contributions_pure_compounding() {
        let mut input = standard_input();
        input.monthly_contribution = Decimal::ZERO;
        let out = project_growth(&input).unwrap().result;

        assert_eq!(out.total_contributions, dec!(10000));
        assert!(out.final_balance > dec!(10000));
        assert_eq!(
            out.total_interest_earned,
            out.final_balance - dec!(10000)
        );
    }

    #[test]
    fn test_zero_years_rejected() {
        let mut input = standard_input();
        input.years = 0;
        assert!(matches!(
            project_growth(&input),
            Err(PersonalFinanceError::InvalidInput { .. })
        ));
    }
}
