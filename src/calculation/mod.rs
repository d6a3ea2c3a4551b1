//! Calculation logic for the Payroll Run Calculation Engine.
//!
//! This module contains the pure calculators that produce one employee's
//! run item: date-based proration, concept accumulation, statutory
//! deduction generation, employer cost calculation, and the run item
//! builder that composes them.

mod accumulator;
mod employer_cost;
mod item_builder;
mod proration;
mod statutory;

pub use accumulator::{ConceptLine, ConceptTotals, accumulate_concepts};
pub use employer_cost::{EmployerCost, calculate_employer_cost};
pub use item_builder::{EmployeeComputeInput, build_run_item};
pub use proration::{Proration, calculate_proration};
pub use statutory::{
    HEALTH_INSURANCE_CODE, RETIREMENT_CODE, SOCIAL_SECURITY_LAW_CODE, statutory_deduction_lines,
};
