//! Date-based proration functionality.
//!
//! This module decides whether an employee participates in a period and
//! which fraction of it they worked, based on hire and termination dates.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// The result of a proration calculation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proration {
    /// Whether the employee participates in the period at all.
    pub include: bool,
    /// The fraction of the period worked, in [0, 1]. Fixed concepts are
    /// multiplied by this factor.
    pub factor: Decimal,
    /// Calendar days worked within the period.
    pub days_worked: i64,
    /// Calendar days in the period.
    pub days_in_period: i64,
}

impl Proration {
    fn excluded(days_in_period: i64) -> Self {
        Self {
            include: false,
            factor: Decimal::ZERO,
            days_worked: 0,
            days_in_period,
        }
    }
}

/// Calculates an employee's inclusion decision and proration factor.
///
/// Rules:
/// 1. A termination date before the period start excludes the employee.
/// 2. A hire date after the period end excludes the employee.
/// 3. A hire date inside the period counts the days from hire to the
///    period end, inclusive.
/// 4. A termination date inside the period caps the days at termination,
///    counted from the period start.
/// 5. Otherwise the employee worked the whole period and the factor is 1.
///
/// The factor never exceeds 1 and the employee is included exactly when
/// the factor is positive. Malformed dates (end before start, termination
/// before hire) are a caller contract violation and are rejected upstream.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::calculate_proration;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2026, 4, 30).unwrap();
/// let hired_day_10 = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();
///
/// let proration = calculate_proration(hired_day_10, None, start, end);
/// assert!(proration.include);
/// assert_eq!(proration.days_worked, 21);
/// assert_eq!(proration.factor, Decimal::new(7, 1)); // 0.7
/// ```
pub fn calculate_proration(
    hire_date: NaiveDate,
    termination_date: Option<NaiveDate>,
    period_start: NaiveDate,
    period_end: NaiveDate,
) -> Proration {
    let days_in_period = (period_end - period_start).num_days() + 1;

    if let Some(termination) = termination_date {
        if termination < period_start {
            return Proration::excluded(days_in_period);
        }
    }
    if hire_date > period_end {
        return Proration::excluded(days_in_period);
    }

    let mut days_worked = days_in_period;

    if hire_date > period_start {
        days_worked = (period_end - hire_date).num_days() + 1;
    }

    if let Some(termination) = termination_date {
        if termination <= period_end {
            let until_termination = (termination - period_start).num_days() + 1;
            days_worked = days_worked.min(until_termination);
        }
    }

    let days_worked = days_worked.max(0);
    let factor =
        (Decimal::from(days_worked) / Decimal::from(days_in_period)).min(Decimal::ONE);

    Proration {
        include: factor > Decimal::ZERO,
        factor,
        days_worked,
        days_in_period,
    }
}
