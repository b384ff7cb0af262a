//! Statutory deduction calculation.
//!
//! Computes the annual pension (employee and employer), National Housing
//! Fund and NSITF amounts. Each deduction is gated by its own applicability
//! flag on the employee.
//!
//! ## Bases
//!
//! - **Pension:** the annual pensionable component total when any component
//!   is marked pensionable, otherwise the full annual gross.
//! - **NHF and NSITF:** always the full annual gross.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::StatutoryRates;
use crate::error::EngineResult;
use crate::models::{AuditStep, ComponentAnalysis, Employee};

use super::money;

/// Where the pension base came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PensionBaseSource {
    /// Sum of components marked pensionable.
    PensionableComponents,
    /// Full gross, because no component is marked pensionable.
    Gross,
}

/// Annual statutory deductions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryDeductions {
    /// Amount the pension rates were applied to.
    pub pension_base: Decimal,
    /// Where the pension base came from.
    pub pension_base_source: PensionBaseSource,
    /// Employee pension contribution.
    pub pension_employee: Decimal,
    /// Employer pension contribution (informational).
    pub pension_employer: Decimal,
    /// National Housing Fund deduction.
    pub nhf: Decimal,
    /// NSITF deduction.
    pub nsitf: Decimal,
}

/// The result of statutory deduction calculation, including audit steps.
#[derive(Debug, Clone)]
pub struct StatutoryDeductionsResult {
    /// The annual deductions.
    pub deductions: StatutoryDeductions,
    /// One audit step each for pension, NHF and NSITF.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates the annual statutory deductions for an employee.
///
/// # Arguments
///
/// * `employee` - Supplies the pension, NHF and NSITF applicability flags
/// * `annual_gross` - Annualized gross salary
/// * `analysis` - Component analysis, for the pension base
/// * `rates` - Statutory rates (percentages)
/// * `step_number_start` - The first step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_statutory_deductions;
/// use salary_engine::config::PayrollConfig;
/// use salary_engine::models::{ComponentAnalysis, Employee, EmploymentType, Gender, PayFrequency};
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     id: "emp_001".to_string(),
///     name: "Adaeze Nwosu".to_string(),
///     gender: Gender::Female,
///     employment_type: EmploymentType::FullTime,
///     pay_frequency: PayFrequency::Monthly,
///     is_paye_applicable: true,
///     is_pension_applicable: true,
///     is_nhf_applicable: true,
///     is_nsitf_applicable: true,
/// };
/// let config = PayrollConfig::finance_act_2023();
///
/// let result = calculate_statutory_deductions(
///     &employee,
///     Decimal::from(2_400_000),
///     &ComponentAnalysis::default(),
///     config.statutory_rates(),
///     1,
/// )
/// .unwrap();
///
/// assert_eq!(result.deductions.pension_employee, Decimal::from(192_000));
/// assert_eq!(result.deductions.nhf, Decimal::from(60_000));
/// assert_eq!(result.deductions.nsitf, Decimal::from(24_000));
/// ```
pub fn calculate_statutory_deductions(
    employee: &Employee,
    annual_gross: Decimal,
    analysis: &ComponentAnalysis,
    rates: &StatutoryRates,
    step_number_start: u32,
) -> EngineResult<StatutoryDeductionsResult> {
    let (pension_base, pension_base_source) = if analysis.has_pensionable_components {
        (
            analysis.annual_pensionable_amount,
            PensionBaseSource::PensionableComponents,
        )
    } else {
        (annual_gross, PensionBaseSource::Gross)
    };

    let (pension_employee, pension_employer) = if employee.is_pension_applicable {
        (
            money::percent_of(pension_base, rates.pension_employee, "employee pension")?,
            money::percent_of(pension_base, rates.pension_employer, "employer pension")?,
        )
    } else {
        (Decimal::ZERO, Decimal::ZERO)
    };

    let nhf = if employee.is_nhf_applicable {
        money::percent_of(annual_gross, rates.nhf, "NHF")?
    } else {
        Decimal::ZERO
    };

    let nsitf = if employee.is_nsitf_applicable {
        money::percent_of(annual_gross, rates.nsitf, "NSITF")?
    } else {
        Decimal::ZERO
    };

    let deductions = StatutoryDeductions {
        pension_base,
        pension_base_source,
        pension_employee,
        pension_employer,
        nhf,
        nsitf,
    };

    let base_note = match pension_base_source {
        PensionBaseSource::PensionableComponents => "pensionable components",
        PensionBaseSource::Gross => "gross (no pensionable components)",
    };

    let pension_step = AuditStep {
        step_number: step_number_start,
        rule_id: "pension".to_string(),
        rule_name: "Pension Contribution".to_string(),
        input: serde_json::json!({
            "pension_base": pension_base.normalize().to_string(),
            "pension_base_source": pension_base_source,
            "employee_rate": rates.pension_employee.normalize().to_string(),
            "employer_rate": rates.pension_employer.normalize().to_string(),
            "is_pension_applicable": employee.is_pension_applicable
        }),
        output: serde_json::json!({
            "pension_employee": pension_employee.normalize().to_string(),
            "pension_employer": pension_employer.normalize().to_string()
        }),
        reasoning: if employee.is_pension_applicable {
            format!(
                "₦{} ({}) × {}% = ₦{} employee, × {}% = ₦{} employer",
                pension_base.normalize(),
                base_note,
                rates.pension_employee.normalize(),
                pension_employee.normalize(),
                rates.pension_employer.normalize(),
                pension_employer.normalize()
            )
        } else {
            "Pension not applicable to employee".to_string()
        },
    };

    let nhf_step = flat_rate_step(
        step_number_start + 1,
        "nhf",
        "National Housing Fund",
        annual_gross,
        rates.nhf,
        nhf,
        employee.is_nhf_applicable,
    );
    let nsitf_step = flat_rate_step(
        step_number_start + 2,
        "nsitf",
        "NSITF Contribution",
        annual_gross,
        rates.nsitf,
        nsitf,
        employee.is_nsitf_applicable,
    );

    Ok(StatutoryDeductionsResult {
        deductions,
        audit_steps: vec![pension_step, nhf_step, nsitf_step],
    })
}

fn flat_rate_step(
    step_number: u32,
    rule_id: &str,
    rule_name: &str,
    annual_gross: Decimal,
    rate: Decimal,
    amount: Decimal,
    applicable: bool,
) -> AuditStep {
    AuditStep {
        step_number,
        rule_id: rule_id.to_string(),
        rule_name: rule_name.to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.normalize().to_string(),
            "rate": rate.normalize().to_string(),
            "applicable": applicable
        }),
        output: serde_json::json!({
            "amount": amount.normalize().to_string()
        }),
        reasoning: if applicable {
            format!(
                "₦{} × {}% = ₦{}",
                annual_gross.normalize(),
                rate.normalize(),
                amount.normalize()
            )
        } else {
            format!("{} not applicable to employee", rule_name)
        },
    }
}
