//! Run orchestration for the Payroll Run Calculation Engine.
//!
//! This module contains the engine's entry point: the orchestrator that
//! validates the period, reserves a run number, fans the per-employee
//! computation out across a bounded worker pool and commits the result
//! atomically, plus the summary types returned to callers.

mod orchestrator;
mod summary;

pub use orchestrator::{CalculationRequest, RunOrchestrator};
pub use summary::{FailedEmployee, RunSummary, SkippedEmployee};
