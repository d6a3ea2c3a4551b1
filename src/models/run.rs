//! Payroll run model and lifecycle types.
//!
//! A run ("corrida") is one calculation attempt for a period. Runs are
//! created in DRAFT as the concurrency-serialization point and move to
//! CALCULATED only after a fully successful commit of all items. Later
//! states belong to external approval/payment workflows; the status type
//! still encodes the full forward-only lifecycle so stores can enforce it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::PayrollRunItem;

/// The kind of payroll run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunType {
    /// The period's ordinary run.
    Regular,
    /// A correction run on top of a regular run.
    Adjustment,
    /// A run applying retroactive changes.
    Retroactive,
}

/// The lifecycle state of a payroll run.
///
/// Status only advances forward; VOIDED is reachable from any pre-PAID
/// state and is terminal.
///
/// # Example
///
/// ```
/// use payroll_engine::models::RunStatus;
///
/// assert!(RunStatus::Draft.can_advance_to(RunStatus::Calculated));
/// assert!(!RunStatus::Calculated.can_advance_to(RunStatus::Draft));
/// assert!(RunStatus::Calculated.can_advance_to(RunStatus::Voided));
/// assert!(!RunStatus::Paid.can_advance_to(RunStatus::Voided));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Created, not yet calculated. The only retryable state.
    Draft,
    /// All items committed and totals folded.
    Calculated,
    /// Approved by an external workflow.
    Approved,
    /// Paid out.
    Paid,
    /// Locked against further changes.
    Locked,
    /// Voided; terminal.
    Voided,
}

impl RunStatus {
    /// Returns true if a run may move from this status to `next`.
    ///
    /// The forward chain is DRAFT → CALCULATED → APPROVED → PAID → LOCKED;
    /// VOIDED is reachable from DRAFT, CALCULATED and APPROVED. No
    /// transition ever reverts.
    pub fn can_advance_to(self, next: RunStatus) -> bool {
        use RunStatus::*;
        matches!(
            (self, next),
            (Draft, Calculated)
                | (Calculated, Approved)
                | (Approved, Paid)
                | (Paid, Locked)
                | (Draft, Voided)
                | (Calculated, Voided)
                | (Approved, Voided)
        )
    }
}

/// Aggregate totals for a payroll run.
///
/// Totals are always a pure fold over the run's items, never an
/// independently entered value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Sum of item gross totals.
    pub total_gross: Decimal,
    /// Sum of item deduction totals.
    pub total_deductions: Decimal,
    /// Sum of item net salaries.
    pub total_net: Decimal,
    /// Sum of item employer costs.
    pub total_employer_cost: Decimal,
    /// Number of items in the run.
    pub employee_count: u32,
}

impl RunTotals {
    /// Totals with every amount at zero.
    pub fn zero() -> Self {
        Self {
            total_gross: Decimal::ZERO,
            total_deductions: Decimal::ZERO,
            total_net: Decimal::ZERO,
            total_employer_cost: Decimal::ZERO,
            employee_count: 0,
        }
    }

    /// Folds one item into the totals.
    pub fn accumulate(&mut self, item: &PayrollRunItem) {
        self.total_gross += item.gross_total;
        self.total_deductions += item.total_deductions;
        self.total_net += item.net_salary;
        self.total_employer_cost += item.employer_cost;
        self.employee_count += 1;
    }

    /// Folds a whole item list into fresh totals.
    pub fn fold(items: &[PayrollRunItem]) -> Self {
        let mut totals = Self::zero();
        for item in items {
            totals.accumulate(item);
        }
        totals
    }
}

/// One calculation attempt for a payroll period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRun {
    /// Unique identifier for the run.
    pub id: Uuid,
    /// The period the run belongs to.
    pub period_id: Uuid,
    /// The company the run belongs to.
    pub company_id: Uuid,
    /// Sequential number, unique per period, assigned at creation and never
    /// reused or mutated.
    pub run_number: u32,
    /// The kind of run.
    pub run_type: RunType,
    /// The lifecycle state.
    pub status: RunStatus,
    /// Aggregate totals folded from the run's items.
    pub totals: RunTotals,
    /// When the run was calculated.
    pub calculated_at: Option<DateTime<Utc>>,
    /// Who requested the calculation.
    pub calculated_by: Option<Uuid>,
    /// When the run was approved (external workflow).
    pub approved_at: Option<DateTime<Utc>>,
    /// When the run was paid (external workflow).
    pub paid_at: Option<DateTime<Utc>>,
    /// When the run was locked (external workflow).
    pub locked_at: Option<DateTime<Utc>>,
    /// Why the run was voided, when it was.
    pub void_reason: Option<String>,
    /// Free-text notes attached at creation.
    pub notes: Option<String>,
}
