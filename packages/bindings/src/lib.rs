use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Mortgage
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_mortgage(input_json: String) -> NapiResult<String> {
    let input: personal_finance_core::mortgage::amortization::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = personal_finance_core::mortgage::amortization::analyze_mortgage(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_affordability(input_json: String) -> NapiResult<String> {
    let input: personal_finance_core::mortgage::affordability::AffordabilityInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = personal_finance_core::mortgage::affordability::analyze_affordability(&input)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Debt payoff
// ---------------------------------------------------------------------------

#[napi]
pub fn simulate_debt_payoff(input_json: String) -> NapiResult<String> {
    let input: personal_finance_core::debt_payoff::DebtPayoffInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = personal_finance_core::debt_payoff::simulate(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Auto loan
// ---------------------------------------------------------------------------

#[napi]
pub fn analyze_auto_loan(input_json: String) -> NapiResult<String> {
    let input: personal_finance_core::auto_loan::AutoLoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        personal_finance_core::auto_loan::analyze_auto_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment growth
// ---------------------------------------------------------------------------

#[napi]
pub fn project_investment_growth(input_json: String) -> NapiResult<String> {
    let input: personal_finance_core::investment::InvestmentGrowthInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        personal_finance_core::investment::project_growth(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
