//! The run orchestrator.
//!
//! Drives one payroll run through its phases: validate the period,
//! reserve a run number (the sole concurrency-serialization point), fan
//! the per-employee computation out across a bounded worker pool, and
//! commit every item, the folded totals and the audit record in one
//! atomic store call.

use std::sync::Arc;

use serde_json::json;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{EmployeeComputeInput, build_run_item};
use crate::config::StatutoryRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, PayrollPeriod, PayrollRun, PayrollRunItem, RunTotals, RunType, SalaryComponent,
};
use crate::store::{
    AuditAction, ComponentCatalog, EmployeeDirectory, FixedConceptRepository, NewAuditRecord,
    NewRun, PeriodRepository, RunCommit, RunStore, VariableConceptRepository,
};

use super::summary::{FailedEmployee, RunSummary, SkippedEmployee};

/// Default bound on concurrently computing employees.
const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// A request to calculate a payroll run.
#[derive(Debug, Clone)]
pub struct CalculationRequest {
    /// The period to calculate.
    pub period_id: Uuid,
    /// The kind of run to create.
    pub run_type: RunType,
    /// The user requesting the calculation.
    pub requested_by: Uuid,
    /// Free-text notes attached to the run.
    pub notes: Option<String>,
}

/// The engine's entry point.
///
/// The orchestrator is cheap to clone per request and holds no mutable
/// state of its own; the only shared mutable resource is the run store.
/// Dropping the future returned by [`RunOrchestrator::calculate_run`]
/// aborts outstanding per-employee tasks and commits nothing, so a run
/// computation cancels as a unit.
pub struct RunOrchestrator {
    periods: Arc<dyn PeriodRepository>,
    employees: Arc<dyn EmployeeDirectory>,
    components: Arc<dyn ComponentCatalog>,
    fixed_concepts: Arc<dyn FixedConceptRepository>,
    variable_concepts: Arc<dyn VariableConceptRepository>,
    store: Arc<dyn RunStore>,
    rates: StatutoryRates,
    max_concurrency: usize,
}

impl RunOrchestrator {
    /// Creates an orchestrator over the given collaborators with default
    /// rates and concurrency.
    pub fn new(
        periods: Arc<dyn PeriodRepository>,
        employees: Arc<dyn EmployeeDirectory>,
        components: Arc<dyn ComponentCatalog>,
        fixed_concepts: Arc<dyn FixedConceptRepository>,
        variable_concepts: Arc<dyn VariableConceptRepository>,
        store: Arc<dyn RunStore>,
    ) -> Self {
        Self {
            periods,
            employees,
            components,
            fixed_concepts,
            variable_concepts,
            store,
            rates: StatutoryRates::default(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    /// Creates an orchestrator backed by a single store implementing all
    /// collaborator interfaces, such as [`crate::store::MemoryStore`].
    pub fn for_backend<S>(backend: Arc<S>) -> Self
    where
        S: PeriodRepository
            + EmployeeDirectory
            + ComponentCatalog
            + FixedConceptRepository
            + VariableConceptRepository
            + RunStore
            + 'static,
    {
        Self::new(
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend.clone(),
            backend,
        )
    }

    /// Replaces the statutory rate table.
    pub fn with_rates(mut self, rates: StatutoryRates) -> Self {
        self.rates = rates;
        self
    }

    /// Bounds the number of concurrently computing employees.
    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    /// Calculates a payroll run for a period.
    ///
    /// On success the run has been committed in CALCULATED state and the
    /// returned summary carries its totals plus the lists of skipped and
    /// failed employees. On error the run either was never created or
    /// remains a DRAFT with zero totals; retrying creates a new run with
    /// a new number.
    ///
    /// # Errors
    ///
    /// - [`EngineError::PeriodNotFound`] / [`EngineError::PeriodClosed`]
    ///   from validation.
    /// - [`EngineError::RunNumberConflict`] when the reservation collided
    ///   twice in a row.
    /// - [`EngineError::CommitFailed`] when the store rejected the commit;
    ///   nothing was applied.
    pub async fn calculate_run(&self, request: &CalculationRequest) -> EngineResult<RunSummary> {
        debug!(period_id = %request.period_id, "validating period");
        let period = self
            .periods
            .get_period(request.period_id)?
            .ok_or(EngineError::PeriodNotFound {
                period_id: request.period_id,
            })?;
        if period.is_closed {
            return Err(EngineError::PeriodClosed { period_id: period.id });
        }

        let run = self.reserve_draft_run(&period, request)?;
        info!(
            run_id = %run.id,
            run_number = run.run_number,
            period_id = %period.id,
            "draft run created"
        );

        let employees = self
            .employees
            .list_active_employees(period.company_id, period.union_id)?;
        debug!(count = employees.len(), "computing eligible employees");

        let mut skipped = Vec::new();
        let mut failures = Vec::new();
        let mut inputs = Vec::with_capacity(employees.len());
        for employee in employees {
            let employee_id = employee.id;
            match self.load_compute_input(&period, employee) {
                Ok(input) => inputs.push(input),
                Err(error) => {
                    record_employee_outcome(employee_id, error, &mut skipped, &mut failures)
                }
            }
        }

        let items = self
            .compute_items(run.id, &period, inputs, &mut skipped, &mut failures)
            .await?;

        let totals = RunTotals::fold(&items);
        let audit = NewAuditRecord {
            action: AuditAction::Calculated,
            user_id: request.requested_by,
            details: json!({
                "employee_count": totals.employee_count,
                "total_net": totals.total_net.to_string(),
            }),
        };
        let run = self.store.commit_calculated(RunCommit {
            run_id: run.id,
            items,
            totals,
            calculated_by: request.requested_by,
            audit,
        })?;

        info!(
            run_id = %run.id,
            run_number = run.run_number,
            employee_count = run.totals.employee_count,
            total_net = %run.totals.total_net,
            skipped = skipped.len(),
            failed = failures.len(),
            "payroll run calculated"
        );

        Ok(RunSummary::from_run(&run, skipped, failures))
    }

    /// Reserves the next run number, retrying exactly once on a conflict.
    fn reserve_draft_run(
        &self,
        period: &PayrollPeriod,
        request: &CalculationRequest,
    ) -> EngineResult<PayrollRun> {
        let new_run = NewRun {
            period_id: period.id,
            company_id: period.company_id,
            run_type: request.run_type,
            notes: request.notes.clone(),
        };

        match self.store.create_draft_run(&new_run) {
            Ok(run) => Ok(run),
            Err(EngineError::RunNumberConflict {
                period_id,
                run_number,
            }) => {
                warn!(
                    period_id = %period_id,
                    run_number,
                    "run number reservation collided, retrying once"
                );
                self.store.create_draft_run(&new_run)
            }
            Err(error) => Err(error),
        }
    }

    /// Pre-fetches everything the pure item build needs for one employee.
    fn load_compute_input(
        &self,
        period: &PayrollPeriod,
        employee: Employee,
    ) -> EngineResult<EmployeeComputeInput> {
        let fixed_concepts = self.fixed_concepts.list_effective_fixed_concepts(
            employee.id,
            period.start_date,
            period.end_date,
        )?;
        let variable_concepts = self
            .variable_concepts
            .list_approved_variable_concepts(period.id, employee.id)?;

        let mut fixed = Vec::with_capacity(fixed_concepts.len());
        for concept in fixed_concepts {
            let component = self.resolve_component(concept.component_id)?;
            fixed.push((concept, component));
        }

        let mut variable = Vec::with_capacity(variable_concepts.len());
        for concept in variable_concepts {
            let component = self.resolve_component(concept.component_id)?;
            variable.push((concept, component));
        }

        Ok(EmployeeComputeInput {
            employee,
            fixed,
            variable,
        })
    }

    fn resolve_component(&self, component_id: Uuid) -> EngineResult<SalaryComponent> {
        self.components
            .get_component(component_id)?
            .ok_or(EngineError::ComponentNotFound { component_id })
    }

    /// Fans the pure item builds out on a bounded worker pool and waits
    /// for all of them before returning.
    async fn compute_items(
        &self,
        run_id: Uuid,
        period: &PayrollPeriod,
        inputs: Vec<EmployeeComputeInput>,
        skipped: &mut Vec<SkippedEmployee>,
        failures: &mut Vec<FailedEmployee>,
    ) -> EngineResult<Vec<PayrollRunItem>> {
        let semaphore = Arc::new(Semaphore::new(self.max_concurrency));
        let period = Arc::new(period.clone());
        let rates = Arc::new(self.rates.clone());

        let mut tasks = JoinSet::new();
        for input in inputs {
            let semaphore = semaphore.clone();
            let period = period.clone();
            let rates = rates.clone();
            tasks.spawn(async move {
                let employee_id = input.employee.id;
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => build_run_item(run_id, &period, &input, &rates),
                    Err(_) => Err(EngineError::Calculation {
                        message: "worker pool closed".to_string(),
                    }),
                };
                (employee_id, result)
            });
        }

        let mut items = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((_, Ok(Some(item)))) => items.push(item),
                // Excluded by proration: not an item, not an error.
                Ok((_, Ok(None))) => {}
                Ok((employee_id, Err(error))) => {
                    record_employee_outcome(employee_id, error, skipped, failures)
                }
                Err(join_error) => {
                    return Err(EngineError::Calculation {
                        message: format!("employee computation task failed: {join_error}"),
                    });
                }
            }
        }

        Ok(items)
    }
}

/// Classifies a per-employee error: inconsistent data is tolerated as a
/// skip; everything else lands in the failure list. Neither aborts the
/// run.
fn record_employee_outcome(
    employee_id: Uuid,
    error: EngineError,
    skipped: &mut Vec<SkippedEmployee>,
    failures: &mut Vec<FailedEmployee>,
) {
    match error {
        EngineError::EmployeeDataInconsistent { message, .. } => {
            warn!(employee_id = %employee_id, reason = %message, "skipping employee");
            skipped.push(SkippedEmployee {
                employee_id,
                reason: message,
            });
        }
        other => {
            warn!(employee_id = %employee_id, error = %other, "employee computation failed");
            failures.push(FailedEmployee {
                employee_id,
                error: other.to_string(),
            });
        }
    }
}
