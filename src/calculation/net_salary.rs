//! Net salary calculation.
//!
//! Orchestrates the full gross-to-net computation: validate, annualize,
//! analyze components, compute statutory deductions and PAYE on annual
//! figures, then de-annualize back to the employee's pay period.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::PayrollConfig;
use crate::error::EngineResult;
use crate::models::{
    AuditStep, Employee, NetSalaryCalculation, SalaryBreakdown, SalaryComponent,
};

use super::components::analyze_components;
use super::money;
use super::paye::calculate_paye;
use super::statutory::{calculate_statutory_deductions, StatutoryDeductions};
use super::validation::validate_calculation_input;

/// Calculates the full net salary breakdown for one pay period.
///
/// The function is pure: it reads only its arguments, performs no I/O and
/// returns equal results for equal inputs.
///
/// # Arguments
///
/// * `employee` - Statutory profile (pay frequency and applicability flags)
/// * `gross_salary` - Gross salary for one pay period
/// * `components` - Earning components; may be empty
/// * `config` - Tax table and statutory rates
///
/// # Errors
///
/// - [`EngineError::Validation`](crate::error::EngineError::Validation) listing
///   every violated input constraint; no arithmetic is attempted
/// - [`EngineError::CalculationError`](crate::error::EngineError::CalculationError)
///   if an intermediate amount overflows
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_net_salary;
/// use salary_engine::config::PayrollConfig;
/// use salary_engine::models::{Employee, EmploymentType, Gender, PayFrequency};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
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
/// let result = calculate_net_salary(&employee, Decimal::from(200_000), &[], &config).unwrap();
///
/// assert_eq!(result.per_period.pension_employee, Decimal::from(16_000));
/// assert_eq!(result.per_period.paye_tax.round_dp(2), Decimal::from_str("17374.67").unwrap());
/// assert_eq!(result.per_period.net_salary.round_dp(2), Decimal::from_str("159625.33").unwrap());
/// ```
pub fn calculate_net_salary(
    employee: &Employee,
    gross_salary: Decimal,
    components: &[SalaryComponent],
    config: &PayrollConfig,
) -> EngineResult<NetSalaryCalculation> {
    validate_calculation_input(employee, gross_salary, components, config.limits())?;

    let mut audit_steps: Vec<AuditStep> = Vec::new();
    let mut step_number: u32 = 1;

    // Annualize
    let multiplier = employee.pay_frequency.multiplier();
    let annual_gross = money::mul(gross_salary, multiplier, "annual gross")?;
    audit_steps.push(AuditStep {
        step_number,
        rule_id: "annualize".to_string(),
        rule_name: "Annualize Gross Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "pay_frequency": employee.pay_frequency.as_str(),
            "periods_per_year": employee.pay_frequency.periods_per_year()
        }),
        output: serde_json::json!({
            "annual_gross": annual_gross.normalize().to_string()
        }),
        reasoning: format!(
            "₦{} × {} = ₦{}",
            gross_salary.normalize(),
            multiplier,
            annual_gross.normalize()
        ),
    });
    step_number += 1;

    // Components
    let component_result =
        analyze_components(components, gross_salary, employee.pay_frequency, step_number)?;
    let analysis = component_result.analysis;
    let resolved_components = component_result.resolved;
    audit_steps.push(component_result.audit_step);
    step_number += 1;

    // Statutory deductions
    let statutory = calculate_statutory_deductions(
        employee,
        annual_gross,
        &analysis,
        config.statutory_rates(),
        step_number,
    )?;
    let deductions = statutory.deductions;
    step_number += statutory.audit_steps.len() as u32;
    audit_steps.extend(statutory.audit_steps);

    // PAYE
    let paye = calculate_paye(
        employee,
        annual_gross,
        &analysis,
        &deductions,
        config,
        step_number,
    )?;
    let mut tax = paye.computation;
    step_number += paye.audit_steps.len() as u32;
    audit_steps.extend(paye.audit_steps);

    // De-annualize
    let annual = breakdown(annual_gross, &deductions, tax.annual_tax, config)?;
    let per_period_deductions = StatutoryDeductions {
        pension_employee: money::div(deductions.pension_employee, multiplier, "pension")?,
        pension_employer: money::div(deductions.pension_employer, multiplier, "pension")?,
        nhf: money::div(deductions.nhf, multiplier, "NHF")?,
        nsitf: money::div(deductions.nsitf, multiplier, "NSITF")?,
        ..deductions
    };
    let per_period_tax = money::div(tax.annual_tax, multiplier, "PAYE")?;
    let per_period = breakdown(gross_salary, &per_period_deductions, per_period_tax, config)?;

    tax.effective_tax_rate = if per_period.gross_salary.is_zero() {
        Decimal::ZERO
    } else {
        money::mul(
            money::div(per_period.paye_tax, per_period.gross_salary, "effective tax rate")?,
            Decimal::ONE_HUNDRED,
            "effective tax rate",
        )?
    };

    audit_steps.push(AuditStep {
        step_number,
        rule_id: "net_salary".to_string(),
        rule_name: "Net Salary".to_string(),
        input: serde_json::json!({
            "gross_salary": per_period.gross_salary.normalize().to_string(),
            "periods_per_year": employee.pay_frequency.periods_per_year()
        }),
        output: serde_json::json!({
            "total_deductions": per_period.total_deductions.normalize().to_string(),
            "net_salary": per_period.net_salary.normalize().to_string(),
            "effective_tax_rate": tax.effective_tax_rate.normalize().to_string()
        }),
        reasoning: if employee.is_exempt_from_all_deductions() {
            format!(
                "Exempt from all statutory deductions; net equals gross ₦{}",
                per_period.gross_salary.normalize()
            )
        } else {
            format!(
                "₦{} − (pension ₦{} + NHF ₦{} + NSITF ₦{} + PAYE ₦{}) = ₦{}",
                per_period.gross_salary.normalize(),
                per_period.pension_employee.round_dp(2),
                per_period.nhf.round_dp(2),
                per_period.nsitf.round_dp(2),
                per_period.paye_tax.round_dp(2),
                per_period.net_salary.round_dp(2)
            )
        },
    });

    debug!(
        employee_id = %employee.id,
        pay_frequency = employee.pay_frequency.as_str(),
        gross_salary = %gross_salary,
        net_salary = %per_period.net_salary.round_dp(2),
        "Net salary calculated"
    );

    Ok(NetSalaryCalculation {
        employee_id: employee.id.clone(),
        pay_frequency: employee.pay_frequency,
        tax_table_version: config.metadata().version.clone(),
        per_period,
        annual,
        tax,
        components: analysis,
        resolved_components,
        audit_steps,
    })
}

/// Builds a breakdown over one span of time from its gross, deductions and tax.
fn breakdown(
    gross_salary: Decimal,
    deductions: &StatutoryDeductions,
    paye_tax: Decimal,
    config: &PayrollConfig,
) -> EngineResult<SalaryBreakdown> {
    let split = config.display_split();
    let total_deductions = money::sum(
        [
            deductions.pension_employee,
            deductions.nhf,
            deductions.nsitf,
            paye_tax,
        ],
        "total deductions",
    )?;

    Ok(SalaryBreakdown {
        gross_salary,
        basic_salary: money::percent_of(gross_salary, split.basic_percentage, "basic salary")?,
        allowances: money::percent_of(gross_salary, split.allowances_percentage, "allowances")?,
        pension_employee: deductions.pension_employee,
        pension_employer: deductions.pension_employer,
        nhf: deductions.nhf,
        nsitf: deductions.nsitf,
        paye_tax,
        total_deductions,
        net_salary: money::sub(gross_salary, total_deductions, "net salary")?,
    })
}
