//! Statutory rate table types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee-side withholding rates applied to the remunerative gross.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeWithholdingRates {
    /// Retirement fund withholding rate.
    pub retirement: Decimal,
    /// Health insurance withholding rate.
    pub health_insurance: Decimal,
    /// Social-security-law withholding rate.
    pub social_security_law: Decimal,
}

impl Default for EmployeeWithholdingRates {
    fn default() -> Self {
        Self {
            retirement: Decimal::new(11, 2),
            health_insurance: Decimal::new(3, 2),
            social_security_law: Decimal::new(3, 2),
        }
    }
}

/// Employer-side contribution rates applied to the employer contribution
/// base.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployerContributionRates {
    /// Retirement contribution rate.
    pub retirement: Decimal,
    /// Health insurance contribution rate.
    pub health_insurance: Decimal,
    /// Workplace insurance contribution rate.
    pub workplace_insurance: Decimal,
}

impl EmployerContributionRates {
    /// The sum of all employer contribution rates.
    pub fn combined(&self) -> Decimal {
        self.retirement + self.health_insurance + self.workplace_insurance
    }
}

impl Default for EmployerContributionRates {
    fn default() -> Self {
        Self {
            retirement: Decimal::new(16, 2),
            health_insurance: Decimal::new(6, 2),
            workplace_insurance: Decimal::new(3, 2),
        }
    }
}

/// The full statutory rate table consumed by the deduction and employer
/// cost calculators.
///
/// # Example
///
/// ```
/// use payroll_engine::config::StatutoryRates;
/// use rust_decimal::Decimal;
///
/// let rates = StatutoryRates::default();
/// assert_eq!(rates.employee.retirement, Decimal::new(11, 2));
/// assert_eq!(rates.employer.combined(), Decimal::new(25, 2));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Employee-side withholding rates.
    pub employee: EmployeeWithholdingRates,
    /// Employer-side contribution rates.
    pub employer: EmployerContributionRates,
}
