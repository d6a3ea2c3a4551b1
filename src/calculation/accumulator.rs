//! Concept accumulation functionality.
//!
//! This module folds an employee's priced concept lines into the totals
//! the rest of the calculation builds on: gross totals, the employer
//! contribution base, and the deduction subtotal.

use rust_decimal::Decimal;

use crate::models::{ConceptLineType, ContributionFlags, LineOrigin, PayrollRunItemLine};

/// A priced concept line together with its accumulation flags.
///
/// The flags come from the salary component and are consumed here; the
/// persisted [`PayrollRunItemLine`] does not carry them.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptLine {
    /// The line as it will be persisted.
    pub line: PayrollRunItemLine,
    /// The component's accumulation flags.
    pub flags: ContributionFlags,
}

/// Accumulated totals over an employee's concept lines.
#[derive(Debug, Clone, PartialEq)]
pub struct ConceptTotals {
    /// Earnings subject to statutory withholdings.
    pub gross_remunerative: Decimal,
    /// All earnings.
    pub gross_total: Decimal,
    /// Earnings subject to employer-side contributions.
    pub employer_contribution_base: Decimal,
    /// Deductions from concept assignments; statutory withholdings are
    /// generated later and are not part of this subtotal.
    pub total_deductions: Decimal,
    /// Deductions originating from fixed or variable concepts (advances
    /// and similar).
    pub advances_discounted: Decimal,
}

/// Folds the given concept lines into totals.
///
/// Each EARNING line adds its final amount to the gross total, to the
/// remunerative gross iff the component is remunerative, and to the
/// employer contribution base iff the component is flagged for it. Each
/// DEDUCTION line adds to the deduction subtotal. Line type is a closed
/// enum, so there is no unknown-type case left at this point; unknown
/// catalog codes were rejected when the component was resolved.
pub fn accumulate_concepts(lines: &[ConceptLine]) -> ConceptTotals {
    let mut totals = ConceptTotals {
        gross_remunerative: Decimal::ZERO,
        gross_total: Decimal::ZERO,
        employer_contribution_base: Decimal::ZERO,
        total_deductions: Decimal::ZERO,
        advances_discounted: Decimal::ZERO,
    };

    for concept in lines {
        let amount = concept.line.final_amount;
        match concept.line.line_type {
            ConceptLineType::Earning => {
                totals.gross_total += amount;
                if concept.flags.is_remunerative {
                    totals.gross_remunerative += amount;
                }
                if concept.flags.affects_employer_contribution {
                    totals.employer_contribution_base += amount;
                }
            }
            ConceptLineType::Deduction => {
                totals.total_deductions += amount;
                if concept.line.origin != LineOrigin::Calculated {
                    totals.advances_discounted += amount;
                }
            }
        }
    }

    totals
}
