//! Run summary types returned to callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{PayrollRun, RunStatus, RunType};

/// An employee skipped over inconsistent directory data.
///
/// Skipping is a tolerated, logged outcome; the run still completes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedEmployee {
    /// The skipped employee.
    pub employee_id: Uuid,
    /// Why the employee was skipped.
    pub reason: String,
}

/// An employee whose computation failed.
///
/// Failures are isolated per employee and reported here rather than
/// aborting the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedEmployee {
    /// The affected employee.
    pub employee_id: Uuid,
    /// The error that stopped the computation.
    pub error: String,
}

/// The result of a successfully calculated run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    /// The run's id.
    pub run_id: Uuid,
    /// The run's sequential number within its period.
    pub run_number: u32,
    /// The kind of run.
    pub run_type: RunType,
    /// The run's lifecycle state (CALCULATED on success).
    pub status: RunStatus,
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
    /// Employees skipped over inconsistent data.
    pub skipped: Vec<SkippedEmployee>,
    /// Employees whose computation failed.
    pub failures: Vec<FailedEmployee>,
}

impl RunSummary {
    /// Builds a summary from a committed run and the per-employee
    /// outcomes collected during computation.
    pub fn from_run(
        run: &PayrollRun,
        skipped: Vec<SkippedEmployee>,
        failures: Vec<FailedEmployee>,
    ) -> Self {
        Self {
            run_id: run.id,
            run_number: run.run_number,
            run_type: run.run_type,
            status: run.status,
            total_gross: run.totals.total_gross,
            total_deductions: run.totals.total_deductions,
            total_net: run.totals.total_net,
            total_employer_cost: run.totals.total_employer_cost,
            employee_count: run.totals.employee_count,
            skipped,
            failures,
        }
    }
}
