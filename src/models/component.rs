//! Salary component catalog types.
//!
//! Components are catalog entries describing a kind of pay concept (base
//! salary, seniority bonus, union dues, advance repayment). The catalog is
//! an external collaborator; its type codes arrive as raw strings and are
//! parsed into the closed [`ConceptLineType`] enum at the boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// The closed set of concept line types.
///
/// Unknown catalog codes are rejected when a component is resolved, so raw
/// strings never propagate into the calculators.
///
/// # Example
///
/// ```
/// use payroll_engine::models::ConceptLineType;
///
/// assert_eq!(
///     ConceptLineType::from_code("EARNING").unwrap(),
///     ConceptLineType::Earning
/// );
/// assert!(ConceptLineType::from_code("REIMBURSEMENT").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConceptLineType {
    /// A line that adds to the employee's gross pay.
    Earning,
    /// A line that subtracts from the employee's gross pay.
    Deduction,
}

impl ConceptLineType {
    /// Parses a raw catalog type code.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownConceptType`] for any code other than
    /// `EARNING` or `DEDUCTION`.
    pub fn from_code(code: &str) -> EngineResult<Self> {
        match code {
            "EARNING" => Ok(Self::Earning),
            "DEDUCTION" => Ok(Self::Deduction),
            other => Err(EngineError::UnknownConceptType {
                code: other.to_string(),
            }),
        }
    }
}

/// The accumulation flags of a salary component.
///
/// These drive which totals a line contributes to during concept
/// accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionFlags {
    /// Whether the amount is subject to statutory employee withholdings.
    pub is_remunerative: bool,
    /// Whether the amount affects the employee contribution base.
    pub affects_employee_contribution: bool,
    /// Whether the amount affects the employer contribution base.
    pub affects_employer_contribution: bool,
}

/// A salary component catalog entry.
///
/// The `type_code` field is kept raw because the catalog is external;
/// [`SalaryComponent::line_type`] performs the boundary parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Unique identifier for the component.
    pub id: Uuid,
    /// Short code identifying the component (e.g. "SALARY").
    pub code: String,
    /// Human-readable component name.
    pub name: String,
    /// Raw type code as provided by the catalog ("EARNING" or "DEDUCTION").
    pub type_code: String,
    /// Ordering hint for presentation.
    pub sort_order: i32,
    /// Whether the amount is subject to statutory employee withholdings.
    pub is_remunerative: bool,
    /// Whether the amount affects the employee contribution base.
    pub affects_employee_contribution: bool,
    /// Whether the amount affects the employer contribution base.
    pub affects_employer_contribution: bool,
}

impl SalaryComponent {
    /// Parses the component's raw type code into the closed enum.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::UnknownConceptType`] for unrecognized codes.
    pub fn line_type(&self) -> EngineResult<ConceptLineType> {
        ConceptLineType::from_code(&self.type_code)
    }

    /// Returns the component's accumulation flags.
    pub fn flags(&self) -> ContributionFlags {
        ContributionFlags {
            is_remunerative: self.is_remunerative,
            affects_employee_contribution: self.affects_employee_contribution,
            affects_employer_contribution: self.affects_employer_contribution,
        }
    }
}
