//! Payroll period model.
//!
//! This module contains the [`PayrollPeriod`] type describing the time
//! window a payroll run is calculated for. Period lifecycle (creation and
//! closing) is owned elsewhere; this engine only reads periods and must
//! reject a closed one.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the cadence of a payroll period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodType {
    /// A calendar-month period.
    Monthly,
    /// A half-month period.
    Fortnightly,
    /// A seven-day period.
    Weekly,
}

/// Represents a payroll period with its date range and closing state.
///
/// A period defines the inclusive time window for payroll runs. Multiple
/// runs per period are legal (adjustments, retroactive corrections).
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayrollPeriod, PeriodType};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let period = PayrollPeriod {
///     id: Uuid::new_v4(),
///     company_id: Uuid::new_v4(),
///     union_id: None,
///     period_type: PeriodType::Monthly,
///     year: 2026,
///     month: 4,
///     start_date: NaiveDate::from_ymd_opt(2026, 4, 1).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2026, 4, 30).unwrap(),
///     business_days: 22,
///     is_closed: false,
/// };
///
/// assert_eq!(period.days_in_period(), 30);
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 4, 15).unwrap()));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollPeriod {
    /// Unique identifier for the period.
    pub id: Uuid,
    /// The company this period belongs to.
    pub company_id: Uuid,
    /// Optional union scope; when set, runs only cover that union's
    /// employees.
    pub union_id: Option<Uuid>,
    /// The cadence of the period.
    pub period_type: PeriodType,
    /// The calendar year of the period.
    pub year: i32,
    /// The calendar month of the period (1-12).
    pub month: u32,
    /// The start date of the period (inclusive).
    pub start_date: NaiveDate,
    /// The end date of the period (inclusive).
    pub end_date: NaiveDate,
    /// The number of business days in the period.
    pub business_days: u32,
    /// Whether the period has been closed. A closed period cannot be
    /// calculated.
    pub is_closed: bool,
}

impl PayrollPeriod {
    /// Returns the number of calendar days in the period, both ends
    /// inclusive.
    pub fn days_in_period(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Checks if a given date falls within this period.
    ///
    /// The check is inclusive of both start and end dates.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }
}
