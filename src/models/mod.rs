//! Core data models for the Payroll Run Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod component;
mod concept;
mod employee;
mod period;
mod run;
mod run_item;

pub use component::{ConceptLineType, ContributionFlags, SalaryComponent};
pub use concept::{EmployeeFixedConcept, PayrollVariableConcept};
pub use employee::{Employee, EmployeeSnapshot};
pub use period::{PayrollPeriod, PeriodType};
pub use run::{PayrollRun, RunStatus, RunTotals, RunType};
pub use run_item::{LineOrigin, PayrollRunItem, PayrollRunItemLine};
