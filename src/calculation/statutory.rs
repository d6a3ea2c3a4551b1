//! Statutory deduction generation.
//!
//! This module emits the fixed-rate employee withholding lines derived
//! from the remunerative gross. The lines are always generated, whether or
//! not the employee has other deductions.

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::config::EmployeeWithholdingRates;
use crate::models::{ConceptLineType, LineOrigin, PayrollRunItemLine};

/// Line code for the retirement fund withholding.
pub const RETIREMENT_CODE: &str = "JUB";
/// Line code for the health insurance withholding.
pub const HEALTH_INSURANCE_CODE: &str = "OS";
/// Line code for the social-security-law withholding.
pub const SOCIAL_SECURITY_LAW_CODE: &str = "L19032";

fn withholding_line(code: &str, name: &str, base: Decimal, rate: Decimal) -> PayrollRunItemLine {
    let amount = (base * rate).round_dp(2);
    let percent = (rate * Decimal::from(100)).normalize();
    PayrollRunItemLine {
        id: Uuid::new_v4(),
        component_id: None,
        code: code.to_string(),
        name: name.to_string(),
        line_type: ConceptLineType::Deduction,
        quantity: Decimal::ONE,
        unit_amount: amount,
        base_amount: base,
        calculated_amount: amount,
        final_amount: amount,
        formula: Some(format!("gross_remunerative * {}%", percent)),
        origin: LineOrigin::Calculated,
    }
}

/// Generates the three statutory withholding lines for a remunerative
/// gross.
///
/// Each line uses the remunerative gross as its base amount and a rate
/// from the given table; amounts are rounded to 2 decimal places. The
/// lines carry no component reference and are tagged with origin
/// CALCULATED and a formula describing the applied rate.
pub fn statutory_deduction_lines(
    gross_remunerative: Decimal,
    rates: &EmployeeWithholdingRates,
) -> Vec<PayrollRunItemLine> {
    vec![
        withholding_line(
            RETIREMENT_CODE,
            "Retirement fund withholding",
            gross_remunerative,
            rates.retirement,
        ),
        withholding_line(
            HEALTH_INSURANCE_CODE,
            "Health insurance withholding",
            gross_remunerative,
            rates.health_insurance,
        ),
        withholding_line(
            SOCIAL_SECURITY_LAW_CODE,
            "Social security law withholding",
            gross_remunerative,
            rates.social_security_law,
        ),
    ]
}
