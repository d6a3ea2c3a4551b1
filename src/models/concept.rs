//! Concept assignment models.
//!
//! Fixed concepts are recurring per-employee pay components with an
//! effective date range, subject to proration. Variable concepts are
//! one-off, period-specific, pre-approved components and are never
//! prorated. Both reference a [`super::SalaryComponent`] from the catalog.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recurring pay component assigned to an employee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeFixedConcept {
    /// Unique identifier for the assignment.
    pub id: Uuid,
    /// The employee the concept is assigned to.
    pub employee_id: Uuid,
    /// The catalog component this assignment prices.
    pub component_id: Uuid,
    /// The quantity of units.
    pub quantity: Decimal,
    /// The amount per unit.
    pub unit_amount: Decimal,
    /// First date the assignment is effective (inclusive).
    pub valid_from: NaiveDate,
    /// Last date the assignment is effective (inclusive), open-ended when
    /// `None`.
    pub valid_to: Option<NaiveDate>,
}

impl EmployeeFixedConcept {
    /// Returns true if the assignment is effective at any point during the
    /// given inclusive date range.
    pub fn is_effective_during(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.valid_from <= end && self.valid_to.is_none_or(|to| to >= start)
    }

    /// The assignment's base amount before proration.
    pub fn base_amount(&self) -> Decimal {
        self.quantity * self.unit_amount
    }
}

/// A one-off pay component approved for an employee in a specific period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollVariableConcept {
    /// Unique identifier for the concept.
    pub id: Uuid,
    /// The period the concept was approved for.
    pub period_id: Uuid,
    /// The employee the concept applies to.
    pub employee_id: Uuid,
    /// The catalog component this concept prices.
    pub component_id: Uuid,
    /// The quantity of units.
    pub quantity: Decimal,
    /// The amount per unit.
    pub unit_amount: Decimal,
    /// Whether the concept has been approved. Only approved concepts are
    /// picked up by a run.
    pub approved: bool,
}

impl PayrollVariableConcept {
    /// The concept's base amount. Variable concepts are never prorated.
    pub fn base_amount(&self) -> Decimal {
        self.quantity * self.unit_amount
    }
}
