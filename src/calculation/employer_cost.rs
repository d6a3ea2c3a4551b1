//! Employer cost calculation.
//!
//! This module computes the employer-side contribution amounts and the
//! total cost of employing someone for the period: the gross total plus
//! the contributions on the employer contribution base.

use rust_decimal::Decimal;

use crate::config::EmployerContributionRates;

/// The result of an employer cost calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct EmployerCost {
    /// Retirement contribution on the employer base.
    pub retirement: Decimal,
    /// Health insurance contribution on the employer base.
    pub health_insurance: Decimal,
    /// Workplace insurance contribution on the employer base.
    pub workplace_insurance: Decimal,
    /// Sum of the three contributions.
    pub total_contributions: Decimal,
    /// Gross total plus all contributions.
    pub total_cost: Decimal,
}

/// Calculates employer contributions and the total employer cost.
///
/// Each contribution is `employer_contribution_base * rate`, rounded to 2
/// decimal places; the total cost is the gross total plus the sum of the
/// contributions. Pure arithmetic, no state.
pub fn calculate_employer_cost(
    gross_total: Decimal,
    employer_contribution_base: Decimal,
    rates: &EmployerContributionRates,
) -> EmployerCost {
    let retirement = (employer_contribution_base * rates.retirement).round_dp(2);
    let health_insurance = (employer_contribution_base * rates.health_insurance).round_dp(2);
    let workplace_insurance = (employer_contribution_base * rates.workplace_insurance).round_dp(2);
    let total_contributions = retirement + health_insurance + workplace_insurance;

    EmployerCost {
        retirement,
        health_insurance,
        workplace_insurance,
        total_contributions,
        total_cost: gross_total + total_contributions,
    }
}
