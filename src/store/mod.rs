//! Collaborator interfaces for the Payroll Run Calculation Engine.
//!
//! The engine owns no persistence of its own. It consumes read-only
//! repositories for periods, employees, components and concept
//! assignments, and a [`RunStore`] that exposes the two writes the engine
//! performs: reserving a draft run and committing a calculated run. The
//! commit carries the run's audit record so it shares the store's
//! transaction boundary.
//!
//! [`MemoryStore`] is the in-process reference implementation used by
//! tests and embedders without a database.

mod memory;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use memory::MemoryStore;

use crate::error::EngineResult;
use crate::models::{
    Employee, EmployeeFixedConcept, PayrollPeriod, PayrollRun, PayrollRunItem,
    PayrollVariableConcept, RunTotals, RunType, SalaryComponent,
};

/// Read access to payroll periods.
pub trait PeriodRepository: Send + Sync {
    /// Fetches a period by id; `None` when it does not exist.
    fn get_period(&self, period_id: Uuid) -> EngineResult<Option<PayrollPeriod>>;
}

/// Read access to the employee directory.
pub trait EmployeeDirectory: Send + Sync {
    /// Lists active employees of a company, optionally restricted to a
    /// union.
    fn list_active_employees(
        &self,
        company_id: Uuid,
        union_id: Option<Uuid>,
    ) -> EngineResult<Vec<Employee>>;
}

/// Read access to the salary component catalog.
pub trait ComponentCatalog: Send + Sync {
    /// Fetches a component by id; `None` when it does not exist.
    fn get_component(&self, component_id: Uuid) -> EngineResult<Option<SalaryComponent>>;
}

/// Read access to recurring fixed-concept assignments.
pub trait FixedConceptRepository: Send + Sync {
    /// Lists the fixed concepts effective for an employee at any point in
    /// the given inclusive date range.
    fn list_effective_fixed_concepts(
        &self,
        employee_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> EngineResult<Vec<EmployeeFixedConcept>>;
}

/// Read access to approved period-specific variable concepts.
pub trait VariableConceptRepository: Send + Sync {
    /// Lists the approved variable concepts of an employee for a period.
    fn list_approved_variable_concepts(
        &self,
        period_id: Uuid,
        employee_id: Uuid,
    ) -> EngineResult<Vec<PayrollVariableConcept>>;
}

/// Data for creating a DRAFT run.
#[derive(Debug, Clone)]
pub struct NewRun {
    /// The period the run belongs to.
    pub period_id: Uuid,
    /// The company the run belongs to.
    pub company_id: Uuid,
    /// The kind of run.
    pub run_type: RunType,
    /// Free-text notes.
    pub notes: Option<String>,
}

/// The audited actions this engine records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    /// A run was calculated and committed.
    Calculated,
}

/// An audit record to be written inside the commit transaction.
#[derive(Debug, Clone)]
pub struct NewAuditRecord {
    /// The action being recorded.
    pub action: AuditAction,
    /// The user who requested the action.
    pub user_id: Uuid,
    /// Structured details of the action.
    pub details: serde_json::Value,
}

/// A persisted audit record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    /// Unique identifier for the record.
    pub id: Uuid,
    /// The run the record belongs to.
    pub run_id: Uuid,
    /// The recorded action.
    pub action: AuditAction,
    /// The user who requested the action.
    pub user_id: Uuid,
    /// Structured details of the action.
    pub details: serde_json::Value,
    /// When the record was written.
    pub recorded_at: DateTime<Utc>,
}

/// The payload of a run commit: items, folded totals and the audit record,
/// applied atomically.
#[derive(Debug, Clone)]
pub struct RunCommit {
    /// The run being committed.
    pub run_id: Uuid,
    /// All items of the run.
    pub items: Vec<PayrollRunItem>,
    /// Totals folded from the items.
    pub totals: RunTotals,
    /// The user who requested the calculation.
    pub calculated_by: Uuid,
    /// The audit record to write inside the same transaction.
    pub audit: NewAuditRecord,
}

/// Write access for payroll runs.
///
/// `create_draft_run` is the engine's sole concurrency-serialization
/// point: implementations must guarantee `(period_id, run_number)`
/// uniqueness (a database uniqueness constraint or an equivalent
/// serialized insert) and surface collisions as
/// [`crate::error::EngineError::RunNumberConflict`].
///
/// `commit_calculated` must be all-or-nothing: either every item, the run
/// totals, the CALCULATED status and the audit record are applied, or
/// nothing is and the run remains DRAFT.
pub trait RunStore: Send + Sync {
    /// Reserves the next run number for the period and inserts a DRAFT run
    /// with zero totals.
    fn create_draft_run(&self, new_run: &NewRun) -> EngineResult<PayrollRun>;

    /// Atomically persists items, totals, status and the audit record.
    fn commit_calculated(&self, commit: RunCommit) -> EngineResult<PayrollRun>;

    /// Fetches a run by id; `None` when it does not exist.
    fn get_run(&self, run_id: Uuid) -> EngineResult<Option<PayrollRun>>;

    /// Lists the items of a run.
    fn list_items(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunItem>>;
}
