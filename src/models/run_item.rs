//! Run item and run item line models.
//!
//! A [`PayrollRunItem`] is one employee's result within a run; its
//! [`PayrollRunItemLine`] children record each concept's contribution.
//! Items and lines are created once and are immutable thereafter; an
//! adjustment run creates new rows rather than editing old ones.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{ConceptLineType, EmployeeSnapshot};

/// Distinguishes where a run item line came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LineOrigin {
    /// A recurring fixed concept, prorated.
    Fixed,
    /// A period-specific variable concept, never prorated.
    Variable,
    /// A line computed by the engine itself (statutory withholdings).
    Calculated,
}

/// One concept's contribution to a run item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRunItemLine {
    /// Unique identifier for the line.
    pub id: Uuid,
    /// The catalog component the line prices; `None` for calculated
    /// statutory lines.
    pub component_id: Option<Uuid>,
    /// Short code identifying the concept (e.g. "SALARY", "JUB").
    pub code: String,
    /// Human-readable concept name.
    pub name: String,
    /// Whether the line adds to or subtracts from gross pay.
    pub line_type: ConceptLineType,
    /// The quantity of units.
    pub quantity: Decimal,
    /// The amount per unit.
    pub unit_amount: Decimal,
    /// The amount before proration or formula application.
    pub base_amount: Decimal,
    /// The amount after proration or formula application.
    pub calculated_amount: Decimal,
    /// The amount that enters the item's totals.
    pub final_amount: Decimal,
    /// Formula tag for calculated lines (e.g. the applied rate).
    pub formula: Option<String>,
    /// Where the line came from.
    pub origin: LineOrigin,
}

/// One employee's result within a payroll run.
///
/// Carries the employee snapshot captured at calculation time, the
/// proration outcome, the accumulated totals and the child lines. The
/// snapshot is write-once: later edits to the employee record never alter
/// a persisted item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRunItem {
    /// Unique identifier for the item.
    pub id: Uuid,
    /// The run this item belongs to.
    pub run_id: Uuid,
    /// The employee this item was calculated for.
    pub employee_id: Uuid,
    /// Employee attributes captured at calculation time.
    pub snapshot: EmployeeSnapshot,
    /// Calendar days the employee worked within the period.
    pub days_worked: i64,
    /// Calendar days in the period.
    pub days_in_period: i64,
    /// The proration factor applied to fixed concepts, in [0, 1].
    pub prorate_factor: Decimal,
    /// Earnings subject to statutory withholdings.
    pub gross_remunerative: Decimal,
    /// All earnings.
    pub gross_total: Decimal,
    /// All deductions, statutory lines included.
    pub total_deductions: Decimal,
    /// Subtotal of deductions originating from concept assignments
    /// (advances and similar), statutory lines excluded.
    pub advances_discounted: Decimal,
    /// `gross_total - total_deductions`.
    pub net_salary: Decimal,
    /// Gross total plus employer-side contributions.
    pub employer_cost: Decimal,
    /// The concept lines making up this item.
    pub lines: Vec<PayrollRunItemLine>,
}

impl PayrollRunItem {
    /// Returns the item's deduction lines.
    pub fn deduction_lines(&self) -> impl Iterator<Item = &PayrollRunItemLine> {
        self.lines
            .iter()
            .filter(|l| l.line_type == ConceptLineType::Deduction)
    }

    /// Returns the item's earning lines.
    pub fn earning_lines(&self) -> impl Iterator<Item = &PayrollRunItemLine> {
        self.lines
            .iter()
            .filter(|l| l.line_type == ConceptLineType::Earning)
    }
}
