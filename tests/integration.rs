//! Integration tests for the Payroll Run Calculation Engine.
//!
//! These tests drive the orchestrator end-to-end over the in-memory
//! store: seeding periods, employees and concepts, calculating runs and
//! checking the committed items, totals and audit records.

use std::str::FromStr;
use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use payroll_engine::engine::{CalculationRequest, RunOrchestrator};
use payroll_engine::error::EngineError;
use payroll_engine::models::{
    ConceptLineType, Employee, EmployeeFixedConcept, LineOrigin, PayrollPeriod,
    PayrollVariableConcept, PeriodType, RunStatus, RunType, SalaryComponent,
};
use payroll_engine::store::{AuditAction, MemoryStore, RunStore};

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// April 2026: a 30-day monthly period.
fn april_period(company_id: Uuid) -> PayrollPeriod {
    PayrollPeriod {
        id: Uuid::new_v4(),
        company_id,
        union_id: None,
        period_type: PeriodType::Monthly,
        year: 2026,
        month: 4,
        start_date: date(2026, 4, 1),
        end_date: date(2026, 4, 30),
        business_days: 22,
        is_closed: false,
    }
}

fn employee(name: &str, hire: NaiveDate) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        full_name: name.to_string(),
        hire_date: hire,
        termination_date: None,
        base_salary: Some(dec("300000")),
        union_id: None,
        union_name: None,
        category_id: Some(Uuid::new_v4()),
        category_name: Some("Administrative B".to_string()),
        sector_id: None,
        sector_name: Some("Back office".to_string()),
        is_active: true,
    }
}

fn earning_component(code: &str) -> SalaryComponent {
    SalaryComponent {
        id: Uuid::new_v4(),
        code: code.to_string(),
        name: code.to_string(),
        type_code: "EARNING".to_string(),
        sort_order: 1,
        is_remunerative: true,
        affects_employee_contribution: true,
        affects_employer_contribution: true,
    }
}

fn fixed_salary(employee_id: Uuid, component_id: Uuid, amount: &str) -> EmployeeFixedConcept {
    EmployeeFixedConcept {
        id: Uuid::new_v4(),
        employee_id,
        component_id,
        quantity: Decimal::ONE,
        unit_amount: dec(amount),
        valid_from: date(2023, 1, 1),
        valid_to: None,
    }
}

fn request(period: &PayrollPeriod) -> CalculationRequest {
    CalculationRequest {
        period_id: period.id,
        run_type: RunType::Regular,
        requested_by: Uuid::new_v4(),
        notes: None,
    }
}

/// Seeds a store with a period and a salary component, returning both.
fn seeded_store() -> (Arc<MemoryStore>, PayrollPeriod, SalaryComponent) {
    let store = Arc::new(MemoryStore::new());
    let period = april_period(Uuid::new_v4());
    let component = earning_component("SALARY");
    store.insert_period(period.clone()).unwrap();
    store.insert_component(component.clone()).unwrap();
    (store, period, component)
}

#[tokio::test]
async fn test_scenario_mid_period_hire_is_prorated() {
    let (store, period, component) = seeded_store();

    // Hired on day 10 of a 30-day period: 21 inclusive days remain.
    let employee = employee("Marta Quiroga", date(2026, 4, 10));
    store.insert_employee(employee.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(employee.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    assert_eq!(summary.status, RunStatus::Calculated);
    assert_eq!(summary.employee_count, 1);
    assert_eq!(summary.total_gross, dec("210000"));
    assert_eq!(summary.total_deductions, dec("35700"));
    assert_eq!(summary.total_net, dec("174300"));

    let items = store.list_items(summary.run_id).unwrap();
    assert_eq!(items.len(), 1);
    let item = &items[0];
    assert_eq!(item.prorate_factor, dec("0.7"));
    assert_eq!(item.days_worked, 21);
    assert_eq!(item.days_in_period, 30);
    assert_eq!(item.gross_remunerative, dec("210000"));

    let line_amount = |code: &str| {
        item.lines
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.final_amount)
            .unwrap()
    };
    assert_eq!(line_amount("JUB"), dec("23100"));
    assert_eq!(line_amount("OS"), dec("6300"));
    assert_eq!(line_amount("L19032"), dec("6300"));
}

#[tokio::test]
async fn test_scenario_terminated_before_period_is_excluded() {
    let (store, period, component) = seeded_store();

    let mut gone = employee("Pedro Ortiz", date(2023, 6, 1));
    gone.termination_date = Some(date(2026, 3, 31));
    store.insert_employee(gone.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(gone.id, component.id, "300000"))
        .unwrap();

    let staying = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(staying.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(staying.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    assert_eq!(summary.employee_count, 1);
    assert!(summary.skipped.is_empty());
    assert!(summary.failures.is_empty());

    let items = store.list_items(summary.run_id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].employee_id, staying.id);
}

#[tokio::test]
async fn test_scenario_variable_concepts_ignore_proration() {
    let (store, period, fixed_component) = seeded_store();
    let variable_component = earning_component("PROD_BONUS");
    store.insert_component(variable_component.clone()).unwrap();

    // Hired on day 16: 15 of 30 days, factor 0.5.
    let employee = employee("Marta Quiroga", date(2026, 4, 16));
    store.insert_employee(employee.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(employee.id, fixed_component.id, "10000"))
        .unwrap();
    store
        .insert_variable_concept(PayrollVariableConcept {
            id: Uuid::new_v4(),
            period_id: period.id,
            employee_id: employee.id,
            component_id: variable_component.id,
            quantity: dec("2"),
            unit_amount: dec("5000"),
            approved: true,
        })
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    let items = store.list_items(summary.run_id).unwrap();
    let item = &items[0];
    assert_eq!(item.prorate_factor, dec("0.5"));

    let salary_line = item.lines.iter().find(|l| l.code == "SALARY").unwrap();
    let bonus_line = item.lines.iter().find(|l| l.code == "PROD_BONUS").unwrap();
    assert_eq!(salary_line.final_amount, dec("5000"));
    assert_eq!(salary_line.origin, LineOrigin::Fixed);
    assert_eq!(bonus_line.final_amount, dec("10000"));
    assert_eq!(bonus_line.origin, LineOrigin::Variable);
    assert_eq!(item.gross_total, dec("15000"));
}

#[tokio::test]
async fn test_run_totals_reconcile_with_items() {
    let (store, period, component) = seeded_store();

    for (name, hire, salary) in [
        ("Marta Quiroga", date(2023, 6, 1), "300000"),
        ("Pedro Ortiz", date(2026, 4, 10), "450000"),
        ("Lucia Paz", date(2026, 4, 16), "240000"),
    ] {
        let mut e = employee(name, hire);
        e.base_salary = Some(dec(salary));
        store.insert_employee(e.clone()).unwrap();
        store
            .insert_fixed_concept(fixed_salary(e.id, component.id, salary))
            .unwrap();
    }

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    let items = store.list_items(summary.run_id).unwrap();
    assert_eq!(items.len(), 3);

    let gross: Decimal = items.iter().map(|i| i.gross_total).sum();
    let deductions: Decimal = items.iter().map(|i| i.total_deductions).sum();
    let net: Decimal = items.iter().map(|i| i.net_salary).sum();
    let employer: Decimal = items.iter().map(|i| i.employer_cost).sum();

    assert_eq!(summary.total_gross, gross);
    assert_eq!(summary.total_deductions, deductions);
    assert_eq!(summary.total_net, net);
    assert_eq!(summary.total_employer_cost, employer);
    assert_eq!(summary.employee_count, 3);

    // Per-item invariant as well.
    for item in &items {
        assert_eq!(item.net_salary, item.gross_total - item.total_deductions);
    }
}

#[tokio::test]
async fn test_statutory_lines_always_present() {
    let (store, period, component) = seeded_store();

    let employee = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(employee.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(employee.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    let items = store.list_items(summary.run_id).unwrap();
    let deductions: Vec<_> = items[0]
        .lines
        .iter()
        .filter(|l| l.line_type == ConceptLineType::Deduction)
        .collect();

    assert_eq!(deductions.len(), 3);
    let gross = items[0].gross_remunerative;
    for line in &deductions {
        assert_eq!(line.base_amount, gross);
        assert_eq!(line.origin, LineOrigin::Calculated);
        assert_eq!(line.component_id, None);
    }
    let total: Decimal = deductions.iter().map(|l| l.final_amount).sum();
    // 11% + 3% + 3% of the remunerative gross
    assert_eq!(total, (gross * dec("0.17")).round_dp(2));
}

#[tokio::test]
async fn test_snapshot_survives_directory_edits() {
    let (store, period, component) = seeded_store();

    let mut employee = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(employee.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(employee.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    // Edit the directory record after the run was committed.
    employee.category_name = Some("Management A".to_string());
    employee.base_salary = Some(dec("999999"));
    store.update_employee(employee.clone()).unwrap();

    let items = store.list_items(summary.run_id).unwrap();
    let snapshot = &items[0].snapshot;
    assert_eq!(snapshot.category_name, Some("Administrative B".to_string()));
    assert_eq!(snapshot.base_salary, dec("300000"));
}

#[tokio::test]
async fn test_concurrent_requests_get_distinct_sequential_numbers() {
    let (store, period, component) = seeded_store();

    let employee = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(employee.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(employee.id, component.id, "300000"))
        .unwrap();

    let first = RunOrchestrator::for_backend(store.clone());
    let second = RunOrchestrator::for_backend(store.clone());
    let req_a = request(&period);
    let req_b = request(&period);

    let (a, b) = tokio::join!(first.calculate_run(&req_a), second.calculate_run(&req_b));
    let a = a.unwrap();
    let b = b.unwrap();

    assert_ne!(a.run_id, b.run_id);
    assert_ne!(a.run_number, b.run_number);
    let mut numbers = vec![a.run_number, b.run_number];
    numbers.sort_unstable();
    assert_eq!(numbers, vec![1, 2]);
}

#[tokio::test]
async fn test_runs_for_a_period_are_numbered_sequentially() {
    let (store, period, component) = seeded_store();

    let employee = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(employee.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(employee.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let first = orchestrator.calculate_run(&request(&period)).await.unwrap();
    let second = orchestrator.calculate_run(&request(&period)).await.unwrap();

    assert_eq!(first.run_number, 1);
    assert_eq!(second.run_number, 2);
}

#[tokio::test]
async fn test_closed_period_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let mut period = april_period(Uuid::new_v4());
    period.is_closed = true;
    store.insert_period(period.clone()).unwrap();

    let orchestrator = RunOrchestrator::for_backend(store);
    let result = orchestrator.calculate_run(&request(&period)).await;

    match result.unwrap_err() {
        EngineError::PeriodClosed { period_id } => assert_eq!(period_id, period.id),
        other => panic!("Expected PeriodClosed, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_period_is_rejected() {
    let store = Arc::new(MemoryStore::new());
    let orchestrator = RunOrchestrator::for_backend(store);

    let missing = Uuid::new_v4();
    let result = orchestrator
        .calculate_run(&CalculationRequest {
            period_id: missing,
            run_type: RunType::Regular,
            requested_by: Uuid::new_v4(),
            notes: None,
        })
        .await;

    match result.unwrap_err() {
        EngineError::PeriodNotFound { period_id } => assert_eq!(period_id, missing),
        other => panic!("Expected PeriodNotFound, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_concept_type_is_isolated_per_employee() {
    let (store, period, component) = seeded_store();

    let mut broken_component = earning_component("MYSTERY");
    broken_component.type_code = "BENEFIT".to_string();
    store.insert_component(broken_component.clone()).unwrap();

    let healthy = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(healthy.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(healthy.id, component.id, "300000"))
        .unwrap();

    let broken = employee("Pedro Ortiz", date(2023, 6, 1));
    store.insert_employee(broken.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(broken.id, broken_component.id, "100000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    // The run still completes; the broken employee is reported.
    assert_eq!(summary.status, RunStatus::Calculated);
    assert_eq!(summary.employee_count, 1);
    assert_eq!(summary.failures.len(), 1);
    assert_eq!(summary.failures[0].employee_id, broken.id);
    assert!(summary.failures[0].error.contains("BENEFIT"));

    let items = store.list_items(summary.run_id).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].employee_id, healthy.id);
}

#[tokio::test]
async fn test_missing_base_salary_skips_the_employee() {
    let (store, period, component) = seeded_store();

    let mut unsalaried = employee("Pedro Ortiz", date(2023, 6, 1));
    unsalaried.base_salary = None;
    store.insert_employee(unsalaried.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(unsalaried.id, component.id, "300000"))
        .unwrap();

    let healthy = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(healthy.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(healthy.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    assert_eq!(summary.employee_count, 1);
    assert_eq!(summary.skipped.len(), 1);
    assert_eq!(summary.skipped[0].employee_id, unsalaried.id);
    assert!(summary.skipped[0].reason.contains("base salary"));
    assert!(summary.failures.is_empty());
}

#[tokio::test]
async fn test_one_audit_record_per_calculated_run() {
    let (store, period, component) = seeded_store();

    let employee = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(employee.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(employee.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let req = request(&period);
    let summary = orchestrator.calculate_run(&req).await.unwrap();

    let records = store.audit_records().unwrap();
    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.run_id, summary.run_id);
    assert_eq!(record.action, AuditAction::Calculated);
    assert_eq!(record.user_id, req.requested_by);
    assert_eq!(record.details["employee_count"], 1);
    assert_eq!(
        record.details["total_net"],
        summary.total_net.to_string().as_str()
    );
}

#[tokio::test]
async fn test_run_with_no_eligible_employees_commits_zero_totals() {
    let store = Arc::new(MemoryStore::new());
    let period = april_period(Uuid::new_v4());
    store.insert_period(period.clone()).unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    assert_eq!(summary.status, RunStatus::Calculated);
    assert_eq!(summary.employee_count, 0);
    assert_eq!(summary.total_net, Decimal::ZERO);
    assert!(store.list_items(summary.run_id).unwrap().is_empty());
}

#[tokio::test]
async fn test_union_scoped_period_filters_employees() {
    let store = Arc::new(MemoryStore::new());
    let union_id = Uuid::new_v4();
    let mut period = april_period(Uuid::new_v4());
    period.union_id = Some(union_id);
    store.insert_period(period.clone()).unwrap();

    let component = earning_component("SALARY");
    store.insert_component(component.clone()).unwrap();

    let mut member = employee("Marta Quiroga", date(2023, 6, 1));
    member.union_id = Some(union_id);
    member.union_name = Some("Commerce".to_string());
    store.insert_employee(member.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(member.id, component.id, "300000"))
        .unwrap();

    let outsider = employee("Pedro Ortiz", date(2023, 6, 1));
    store.insert_employee(outsider.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(outsider.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    assert_eq!(summary.employee_count, 1);
    let items = store.list_items(summary.run_id).unwrap();
    assert_eq!(items[0].employee_id, member.id);
    assert_eq!(items[0].snapshot.union_id, Some(union_id));
}

#[tokio::test]
async fn test_unapproved_variable_concepts_are_ignored() {
    let (store, period, component) = seeded_store();
    let bonus_component = earning_component("PROD_BONUS");
    store.insert_component(bonus_component.clone()).unwrap();

    let employee = employee("Marta Quiroga", date(2023, 6, 1));
    store.insert_employee(employee.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(employee.id, component.id, "300000"))
        .unwrap();
    store
        .insert_variable_concept(PayrollVariableConcept {
            id: Uuid::new_v4(),
            period_id: period.id,
            employee_id: employee.id,
            component_id: bonus_component.id,
            quantity: Decimal::ONE,
            unit_amount: dec("50000"),
            approved: false,
        })
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    assert_eq!(summary.total_gross, dec("300000"));
    let items = store.list_items(summary.run_id).unwrap();
    assert!(items[0].lines.iter().all(|l| l.code != "PROD_BONUS"));
}

#[tokio::test]
async fn test_hire_after_period_end_is_excluded() {
    let (store, period, component) = seeded_store();

    let future_hire = employee("Lucia Paz", date(2026, 5, 15));
    store.insert_employee(future_hire.clone()).unwrap();
    store
        .insert_fixed_concept(fixed_salary(future_hire.id, component.id, "300000"))
        .unwrap();

    let orchestrator = RunOrchestrator::for_backend(store.clone());
    let summary = orchestrator.calculate_run(&request(&period)).await.unwrap();

    assert_eq!(summary.employee_count, 0);
    assert!(summary.skipped.is_empty());
    assert!(summary.failures.is_empty());
    assert!(store.list_items(summary.run_id).unwrap().is_empty());
}
