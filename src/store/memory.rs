//! In-memory reference implementation of the collaborator interfaces.
//!
//! All state lives behind one mutex, which serializes run-number
//! reservation the way a database uniqueness constraint would and makes
//! the commit all-or-nothing: the whole payload is validated before any
//! mutation happens.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeFixedConcept, PayrollPeriod, PayrollRun, PayrollRunItem,
    PayrollVariableConcept, RunStatus, RunTotals, SalaryComponent,
};

use super::{
    AuditRecord, ComponentCatalog, EmployeeDirectory, FixedConceptRepository, NewRun,
    PeriodRepository, RunCommit, RunStore, VariableConceptRepository,
};

#[derive(Debug, Default)]
struct Inner {
    periods: HashMap<Uuid, PayrollPeriod>,
    employees: Vec<Employee>,
    components: HashMap<Uuid, SalaryComponent>,
    fixed_concepts: Vec<EmployeeFixedConcept>,
    variable_concepts: Vec<PayrollVariableConcept>,
    runs: HashMap<Uuid, PayrollRun>,
    items: HashMap<Uuid, Vec<PayrollRunItem>>,
    audit: Vec<AuditRecord>,
}

/// An in-process store implementing every collaborator interface.
///
/// Intended for tests and embedders without a database backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> EngineResult<MutexGuard<'_, Inner>> {
        self.inner.lock().map_err(|_| EngineError::Store {
            message: "store mutex poisoned".to_string(),
        })
    }

    /// Seeds a period.
    pub fn insert_period(&self, period: PayrollPeriod) -> EngineResult<()> {
        self.lock()?.periods.insert(period.id, period);
        Ok(())
    }

    /// Seeds an employee.
    pub fn insert_employee(&self, employee: Employee) -> EngineResult<()> {
        self.lock()?.employees.push(employee);
        Ok(())
    }

    /// Replaces an employee record in place, as a directory edit would.
    /// Persisted run items are unaffected.
    pub fn update_employee(&self, employee: Employee) -> EngineResult<()> {
        let mut inner = self.lock()?;
        match inner.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => {
                *existing = employee;
                Ok(())
            }
            None => Err(EngineError::Store {
                message: format!("employee {} not found", employee.id),
            }),
        }
    }

    /// Seeds a salary component.
    pub fn insert_component(&self, component: SalaryComponent) -> EngineResult<()> {
        self.lock()?.components.insert(component.id, component);
        Ok(())
    }

    /// Seeds a fixed-concept assignment.
    pub fn insert_fixed_concept(&self, concept: EmployeeFixedConcept) -> EngineResult<()> {
        self.lock()?.fixed_concepts.push(concept);
        Ok(())
    }

    /// Seeds a variable concept.
    pub fn insert_variable_concept(&self, concept: PayrollVariableConcept) -> EngineResult<()> {
        self.lock()?.variable_concepts.push(concept);
        Ok(())
    }

    /// Returns all audit records written so far.
    pub fn audit_records(&self) -> EngineResult<Vec<AuditRecord>> {
        Ok(self.lock()?.audit.clone())
    }
}

impl PeriodRepository for MemoryStore {
    fn get_period(&self, period_id: Uuid) -> EngineResult<Option<PayrollPeriod>> {
        Ok(self.lock()?.periods.get(&period_id).cloned())
    }
}

impl EmployeeDirectory for MemoryStore {
    // The in-memory directory holds a single company's employees, so the
    // company id does not narrow the listing further.
    fn list_active_employees(
        &self,
        _company_id: Uuid,
        union_id: Option<Uuid>,
    ) -> EngineResult<Vec<Employee>> {
        let inner = self.lock()?;
        Ok(inner
            .employees
            .iter()
            .filter(|e| e.is_active)
            .filter(|e| union_id.is_none() || e.union_id == union_id)
            .cloned()
            .collect())
    }
}

impl ComponentCatalog for MemoryStore {
    fn get_component(&self, component_id: Uuid) -> EngineResult<Option<SalaryComponent>> {
        Ok(self.lock()?.components.get(&component_id).cloned())
    }
}

impl FixedConceptRepository for MemoryStore {
    fn list_effective_fixed_concepts(
        &self,
        employee_id: Uuid,
        period_start: NaiveDate,
        period_end: NaiveDate,
    ) -> EngineResult<Vec<EmployeeFixedConcept>> {
        let inner = self.lock()?;
        Ok(inner
            .fixed_concepts
            .iter()
            .filter(|c| c.employee_id == employee_id)
            .filter(|c| c.is_effective_during(period_start, period_end))
            .cloned()
            .collect())
    }
}

impl VariableConceptRepository for MemoryStore {
    fn list_approved_variable_concepts(
        &self,
        period_id: Uuid,
        employee_id: Uuid,
    ) -> EngineResult<Vec<PayrollVariableConcept>> {
        let inner = self.lock()?;
        Ok(inner
            .variable_concepts
            .iter()
            .filter(|c| c.period_id == period_id && c.employee_id == employee_id && c.approved)
            .cloned()
            .collect())
    }
}

impl RunStore for MemoryStore {
    fn create_draft_run(&self, new_run: &NewRun) -> EngineResult<PayrollRun> {
        let mut inner = self.lock()?;

        // The lock serializes the max+insert pair, the way a uniqueness
        // constraint on (period_id, run_number) would at a database, so
        // this implementation never reports a RunNumberConflict.
        let next_number = inner
            .runs
            .values()
            .filter(|r| r.period_id == new_run.period_id)
            .map(|r| r.run_number)
            .max()
            .unwrap_or(0)
            + 1;

        let run = PayrollRun {
            id: Uuid::new_v4(),
            period_id: new_run.period_id,
            company_id: new_run.company_id,
            run_number: next_number,
            run_type: new_run.run_type,
            status: RunStatus::Draft,
            totals: RunTotals::zero(),
            calculated_at: None,
            calculated_by: None,
            approved_at: None,
            paid_at: None,
            locked_at: None,
            void_reason: None,
            notes: new_run.notes.clone(),
        };

        inner.runs.insert(run.id, run.clone());
        Ok(run)
    }

    fn commit_calculated(&self, commit: RunCommit) -> EngineResult<PayrollRun> {
        let mut inner = self.lock()?;

        // Validate the whole payload before mutating anything; a failed
        // commit leaves the DRAFT row untouched.
        let run = inner
            .runs
            .get(&commit.run_id)
            .ok_or_else(|| EngineError::CommitFailed {
                message: format!("run {} not found", commit.run_id),
            })?;

        if !run.status.can_advance_to(RunStatus::Calculated) {
            return Err(EngineError::CommitFailed {
                message: format!("run {} is {:?}, not DRAFT", commit.run_id, run.status),
            });
        }

        if commit.items.iter().any(|i| i.run_id != commit.run_id) {
            return Err(EngineError::CommitFailed {
                message: "staged item belongs to a different run".to_string(),
            });
        }

        let expected = RunTotals::fold(&commit.items);
        if expected != commit.totals {
            return Err(EngineError::CommitFailed {
                message: "totals do not reconcile with staged items".to_string(),
            });
        }

        let now = Utc::now();
        let run_id = commit.run_id;

        inner.items.insert(run_id, commit.items);
        inner.audit.push(AuditRecord {
            id: Uuid::new_v4(),
            run_id,
            action: commit.audit.action,
            user_id: commit.audit.user_id,
            details: commit.audit.details,
            recorded_at: now,
        });

        let run = inner
            .runs
            .get_mut(&run_id)
            .ok_or_else(|| EngineError::CommitFailed {
                message: format!("run {} vanished mid-commit", run_id),
            })?;
        run.status = RunStatus::Calculated;
        run.totals = commit.totals;
        run.calculated_at = Some(now);
        run.calculated_by = Some(commit.calculated_by);

        Ok(run.clone())
    }

    fn get_run(&self, run_id: Uuid) -> EngineResult<Option<PayrollRun>> {
        Ok(self.lock()?.runs.get(&run_id).cloned())
    }

    fn list_items(&self, run_id: Uuid) -> EngineResult<Vec<PayrollRunItem>> {
        Ok(self
            .lock()?
            .items
            .get(&run_id)
            .cloned()
            .unwrap_or_default())
    }
}
