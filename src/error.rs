//! Error types for the Payroll Run Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during a payroll run.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the Payroll Run Calculation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use payroll_engine::error::EngineError;
/// use uuid::Uuid;
///
/// let error = EngineError::PeriodClosed { period_id: Uuid::nil() };
/// assert_eq!(
///     error.to_string(),
///     "Payroll period is closed: 00000000-0000-0000-0000-000000000000"
/// );
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested payroll period does not exist.
    #[error("Payroll period not found: {period_id}")]
    PeriodNotFound {
        /// The period id that was not found.
        period_id: Uuid,
    },

    /// The payroll period has been closed and cannot be calculated.
    #[error("Payroll period is closed: {period_id}")]
    PeriodClosed {
        /// The id of the closed period.
        period_id: Uuid,
    },

    /// An employee record is missing data or contains inconsistent data.
    ///
    /// The orchestrator skips the affected employee and records a warning
    /// in the run summary instead of aborting the whole run.
    #[error("Inconsistent data for employee {employee_id}: {message}")]
    EmployeeDataInconsistent {
        /// The affected employee.
        employee_id: Uuid,
        /// A description of what was missing or inconsistent.
        message: String,
    },

    /// A salary component carried a type code that is neither EARNING
    /// nor DEDUCTION.
    ///
    /// Fatal to the affected employee's computation; reported in the run
    /// summary's failure list without aborting the run.
    #[error("Unknown concept type code: {code}")]
    UnknownConceptType {
        /// The unrecognized type code.
        code: String,
    },

    /// A salary component referenced by a concept assignment does not exist
    /// in the catalog.
    #[error("Salary component not found: {component_id}")]
    ComponentNotFound {
        /// The missing component id.
        component_id: Uuid,
    },

    /// The run number reservation collided with a concurrent run creation.
    ///
    /// The orchestrator retries the reservation exactly once before
    /// surfacing this error.
    #[error("Run number {run_number} already taken for period {period_id}")]
    RunNumberConflict {
        /// The period for which the reservation was attempted.
        period_id: Uuid,
        /// The run number that collided.
        run_number: u32,
    },

    /// The commit phase failed; the transaction was rolled back and the run
    /// remains in DRAFT.
    #[error("Run commit failed: {message}")]
    CommitFailed {
        /// A description of the commit failure.
        message: String,
    },

    /// A collaborator repository failed to read or write.
    #[error("Store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },

    /// Rate configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Rate configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A general calculation error occurred (for example a worker task
    /// panicked).
    #[error("Calculation error: {message}")]
    Calculation {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
