//! Statutory rate configuration for the Payroll Run Calculation Engine.
//!
//! Rates live in a value object passed into the calculators, so
//! jurisdictions or unions with different rates can be supported without
//! code changes. The compiled-in defaults are the engine's standard rates.

mod loader;
mod types;

pub use loader::RatesLoader;
pub use types::{EmployeeWithholdingRates, EmployerContributionRates, StatutoryRates};
