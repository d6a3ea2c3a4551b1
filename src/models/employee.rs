//! Employee model and the calculation-time snapshot.
//!
//! This module defines the [`Employee`] record as read from the employee
//! directory, and the [`EmployeeSnapshot`] captured into each run item so
//! later edits to the live record never alter a persisted run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};

/// Represents an employee as read from the employee directory.
///
/// The directory is an external collaborator; this engine treats the record
/// as a read-only snapshot taken at computation time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: Uuid,
    /// The employee's display name.
    pub full_name: String,
    /// The date the employee was hired.
    pub hire_date: NaiveDate,
    /// The date the employee was terminated, if any.
    pub termination_date: Option<NaiveDate>,
    /// The employee's base monthly salary. Missing salary makes the
    /// employee ineligible for calculation.
    pub base_salary: Option<Decimal>,
    /// The union the employee belongs to, if any.
    pub union_id: Option<Uuid>,
    /// The union's display name.
    pub union_name: Option<String>,
    /// The employee's category.
    pub category_id: Option<Uuid>,
    /// The category's display name.
    pub category_name: Option<String>,
    /// The sector the employee works in.
    pub sector_id: Option<Uuid>,
    /// The sector's display name.
    pub sector_name: Option<String>,
    /// Whether the employee is currently active in the directory.
    pub is_active: bool,
}

impl Employee {
    /// Returns true if the employee was terminated strictly before the
    /// given date.
    pub fn terminated_before(&self, date: NaiveDate) -> bool {
        self.termination_date.is_some_and(|t| t < date)
    }
}

/// An immutable copy of employee attributes captured at calculation time.
///
/// The snapshot is persisted with each [`super::PayrollRunItem`] and is
/// write-once: later edits to the employee record must not retroactively
/// alter any persisted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    /// The union id at calculation time.
    pub union_id: Option<Uuid>,
    /// The union name at calculation time.
    pub union_name: Option<String>,
    /// The category id at calculation time.
    pub category_id: Option<Uuid>,
    /// The category name at calculation time.
    pub category_name: Option<String>,
    /// The sector id at calculation time.
    pub sector_id: Option<Uuid>,
    /// The sector name at calculation time.
    pub sector_name: Option<String>,
    /// The base salary at calculation time.
    pub base_salary: Decimal,
    /// The hire date at calculation time.
    pub hire_date: NaiveDate,
}

impl EmployeeSnapshot {
    /// Captures a snapshot from the live employee record.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::EmployeeDataInconsistent`] when the employee
    /// has no base salary, since every run item needs one.
    pub fn capture(employee: &Employee) -> EngineResult<Self> {
        let base_salary =
            employee
                .base_salary
                .ok_or_else(|| EngineError::EmployeeDataInconsistent {
                    employee_id: employee.id,
                    message: "base salary missing".to_string(),
                })?;

        Ok(Self {
            union_id: employee.union_id,
            union_name: employee.union_name.clone(),
            category_id: employee.category_id,
            category_name: employee.category_name.clone(),
            sector_id: employee.sector_id,
            sector_name: employee.sector_name.clone(),
            base_salary,
            hire_date: employee.hire_date,
        })
    }
}
