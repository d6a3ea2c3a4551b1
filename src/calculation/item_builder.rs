//! Run item building.
//!
//! This module composes the pure calculators into one employee's run item:
//! proration, concept pricing (fixed concepts prorated, variable concepts
//! untouched), accumulation, statutory withholdings and employer cost. The
//! builder has no side effects and no dependency on shared run state, so
//! invocations for different employees can execute concurrently.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::StatutoryRates;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    Employee, EmployeeFixedConcept, EmployeeSnapshot, LineOrigin, PayrollPeriod, PayrollRunItem,
    PayrollRunItemLine, PayrollVariableConcept, SalaryComponent,
};

use super::accumulator::{ConceptLine, accumulate_concepts};
use super::proration::calculate_proration;
use super::statutory::statutory_deduction_lines;
use super::{EmployerCost, calculate_employer_cost};

/// Everything the builder needs for one employee, pre-fetched by the
/// orchestrator so the build itself stays pure.
#[derive(Debug, Clone)]
pub struct EmployeeComputeInput {
    /// The employee record as read from the directory.
    pub employee: Employee,
    /// Fixed concepts effective during the period, with their catalog
    /// components.
    pub fixed: Vec<(EmployeeFixedConcept, SalaryComponent)>,
    /// Approved variable concepts for the period, with their catalog
    /// components.
    pub variable: Vec<(PayrollVariableConcept, SalaryComponent)>,
}

fn priced_line(
    component: &SalaryComponent,
    quantity: Decimal,
    unit_amount: Decimal,
    factor: Option<Decimal>,
) -> EngineResult<ConceptLine> {
    let line_type = component.line_type()?;
    let base_amount = quantity * unit_amount;
    let calculated_amount = match factor {
        Some(factor) => (base_amount * factor).round_dp(2),
        None => base_amount.round_dp(2),
    };

    Ok(ConceptLine {
        line: PayrollRunItemLine {
            id: Uuid::new_v4(),
            component_id: Some(component.id),
            code: component.code.clone(),
            name: component.name.clone(),
            line_type,
            quantity,
            unit_amount,
            base_amount,
            calculated_amount,
            final_amount: calculated_amount,
            formula: None,
            origin: if factor.is_some() {
                LineOrigin::Fixed
            } else {
                LineOrigin::Variable
            },
        },
        flags: component.flags(),
    })
}

/// Builds one employee's run item.
///
/// Returns `Ok(None)` when the employee is excluded by proration (hired
/// after the period or terminated before it). Fixed-concept amounts are
/// multiplied by the proration factor; variable amounts pass through
/// untouched. Statutory withholding lines are appended after accumulation
/// and `net_salary = gross_total - total_deductions`.
///
/// # Errors
///
/// - [`EngineError::EmployeeDataInconsistent`] when the employee has no
///   base salary or a termination date before the hire date.
/// - [`EngineError::UnknownConceptType`] when a component carries an
///   unrecognized type code.
pub fn build_run_item(
    run_id: Uuid,
    period: &PayrollPeriod,
    input: &EmployeeComputeInput,
    rates: &StatutoryRates,
) -> EngineResult<Option<PayrollRunItem>> {
    let employee = &input.employee;

    if let Some(termination) = employee.termination_date {
        if termination < employee.hire_date {
            return Err(EngineError::EmployeeDataInconsistent {
                employee_id: employee.id,
                message: format!(
                    "termination date {} precedes hire date {}",
                    termination, employee.hire_date
                ),
            });
        }
    }

    let proration = calculate_proration(
        employee.hire_date,
        employee.termination_date,
        period.start_date,
        period.end_date,
    );
    if !proration.include {
        return Ok(None);
    }

    let snapshot = EmployeeSnapshot::capture(employee)?;

    let mut concept_lines = Vec::with_capacity(input.fixed.len() + input.variable.len());
    for (concept, component) in &input.fixed {
        concept_lines.push(priced_line(
            component,
            concept.quantity,
            concept.unit_amount,
            Some(proration.factor),
        )?);
    }
    for (concept, component) in &input.variable {
        concept_lines.push(priced_line(
            component,
            concept.quantity,
            concept.unit_amount,
            None,
        )?);
    }

    let totals = accumulate_concepts(&concept_lines);
    let statutory = statutory_deduction_lines(totals.gross_remunerative, &rates.employee);
    let statutory_total: Decimal = statutory.iter().map(|l| l.final_amount).sum();

    let total_deductions = totals.total_deductions + statutory_total;
    let net_salary = totals.gross_total - total_deductions;

    let EmployerCost { total_cost, .. } = calculate_employer_cost(
        totals.gross_total,
        totals.employer_contribution_base,
        &rates.employer,
    );

    let mut lines: Vec<PayrollRunItemLine> =
        concept_lines.into_iter().map(|c| c.line).collect();
    lines.extend(statutory);

    Ok(Some(PayrollRunItem {
        id: Uuid::new_v4(),
        run_id,
        employee_id: employee.id,
        snapshot,
        days_worked: proration.days_worked,
        days_in_period: proration.days_in_period,
        prorate_factor: proration.factor,
        gross_remunerative: totals.gross_remunerative,
        gross_total: totals.gross_total,
        total_deductions,
        advances_discounted: totals.advances_discounted,
        net_salary,
        employer_cost: total_cost,
        lines,
    }))
}
