//! PAYE income tax calculation.
//!
//! Applies the consolidated relief allowance and the progressive bracket
//! table to annual income.
//!
//! ## Steps
//!
//! 1. Adjusted gross income = annual gross − (employee pension + NHF).
//!    NSITF is not subtracted here.
//! 2. Consolidated relief allowance = 20% of adjusted gross income + ₦200,000.
//! 3. Taxable income = taxable base − (employee pension + NHF + relief),
//!    floored at zero. The taxable base is the annual taxable component
//!    total when any component is marked taxable, otherwise annual gross.
//! 4. Tax = progressive walk over the bracket table.

use rust_decimal::Decimal;

use crate::config::{PayrollConfig, ReliefConfig, TaxBracket};
use crate::error::EngineResult;
use crate::models::{AuditStep, BracketAllocation, ComponentAnalysis, Employee, TaxComputation};

use super::money;
use super::statutory::StatutoryDeductions;

/// Tax produced by the progressive bracket walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressiveTax {
    /// Total tax across all brackets.
    pub total_tax: Decimal,
    /// Rate of the highest bracket touched, zero if none.
    pub marginal_rate: Decimal,
    /// Per-bracket allocation, only for brackets that received income.
    pub allocations: Vec<BracketAllocation>,
}

/// Applies the progressive bracket table to an annual taxable income.
///
/// Each bracket taxes only the slice of income inside its range. No
/// rounding is applied to the slices or their tax.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::calculate_progressive_tax;
/// use salary_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::finance_act_2023();
/// let tax = calculate_progressive_tax(Decimal::from(1_518_400), config.brackets()).unwrap();
///
/// // 21,000 + 33,000 + 75,000 + 79,496
/// assert_eq!(tax.total_tax, Decimal::from(208_496));
/// assert_eq!(tax.marginal_rate, Decimal::from(19));
/// assert_eq!(tax.allocations.len(), 4);
/// ```
pub fn calculate_progressive_tax(
    taxable_income: Decimal,
    brackets: &[TaxBracket],
) -> EngineResult<ProgressiveTax> {
    let mut result = ProgressiveTax::default();

    for bracket in brackets {
        let taxable_amount = bracket.portion_of(taxable_income);
        if taxable_amount <= Decimal::ZERO {
            continue;
        }

        let tax = money::percent_of(taxable_amount, bracket.rate, "bracket tax")?;
        result.total_tax = money::add(result.total_tax, tax, "total tax")?;
        result.marginal_rate = bracket.rate;
        result.allocations.push(BracketAllocation {
            min: bracket.min,
            max: bracket.max,
            rate: bracket.rate,
            taxable_amount,
            tax,
        });
    }

    Ok(result)
}

/// Computes the consolidated relief allowance for an adjusted gross income.
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::consolidated_relief_allowance;
/// use salary_engine::config::PayrollConfig;
/// use rust_decimal::Decimal;
///
/// let config = PayrollConfig::finance_act_2023();
/// let cra = consolidated_relief_allowance(Decimal::from(2_148_000), config.relief()).unwrap();
/// assert_eq!(cra, Decimal::from(629_600));
/// ```
pub fn consolidated_relief_allowance(
    adjusted_gross_income: Decimal,
    relief: &ReliefConfig,
) -> EngineResult<Decimal> {
    let variable = money::percent_of(
        adjusted_gross_income,
        relief.percentage_of_adjusted_gross,
        "consolidated relief allowance",
    )?;
    money::add(
        variable,
        relief.fixed_amount,
        "consolidated relief allowance",
    )
}

/// The result of PAYE calculation, including audit steps.
///
/// The `effective_tax_rate` of the computation is left at zero; it is a
/// per-period figure and is filled in once the result is de-annualized.
#[derive(Debug, Clone)]
pub struct PayeResult {
    /// The annual tax computation.
    pub computation: TaxComputation,
    /// Audit steps for relief, taxable income and tax.
    pub audit_steps: Vec<AuditStep>,
}

/// Calculates annual PAYE for an employee.
///
/// # Arguments
///
/// * `employee` - Supplies the PAYE applicability flag
/// * `annual_gross` - Annualized gross salary
/// * `analysis` - Component analysis, for the taxable base
/// * `deductions` - Annual statutory deductions
/// * `config` - Bracket table and relief parameters
/// * `step_number_start` - The first step number for audit trail sequencing
pub fn calculate_paye(
    employee: &Employee,
    annual_gross: Decimal,
    analysis: &ComponentAnalysis,
    deductions: &StatutoryDeductions,
    config: &PayrollConfig,
    step_number_start: u32,
) -> EngineResult<PayeResult> {
    let pre_tax_deductions = money::add(
        deductions.pension_employee,
        deductions.nhf,
        "pre-tax deductions",
    )?;
    let adjusted_gross_income =
        money::sub(annual_gross, pre_tax_deductions, "adjusted gross income")?;
    let relief = consolidated_relief_allowance(adjusted_gross_income, config.relief())?;

    let relief_step = AuditStep {
        step_number: step_number_start,
        rule_id: "consolidated_relief".to_string(),
        rule_name: "Consolidated Relief Allowance".to_string(),
        input: serde_json::json!({
            "annual_gross": annual_gross.normalize().to_string(),
            "pension_employee": deductions.pension_employee.normalize().to_string(),
            "nhf": deductions.nhf.normalize().to_string(),
            "percentage": config.relief().percentage_of_adjusted_gross.normalize().to_string(),
            "fixed_amount": config.relief().fixed_amount.normalize().to_string()
        }),
        output: serde_json::json!({
            "adjusted_gross_income": adjusted_gross_income.normalize().to_string(),
            "consolidated_relief_allowance": relief.normalize().to_string()
        }),
        reasoning: format!(
            "{}% × ₦{} + ₦{} = ₦{}",
            config.relief().percentage_of_adjusted_gross.normalize(),
            adjusted_gross_income.normalize(),
            config.relief().fixed_amount.normalize(),
            relief.normalize()
        ),
    };

    let (taxable_base, base_note) = if analysis.has_taxable_components {
        (analysis.annual_taxable_amount, "taxable components")
    } else {
        (annual_gross, "gross (no taxable components)")
    };
    let reliefs = money::add(pre_tax_deductions, relief, "total reliefs")?;
    let taxable_income = money::sub(taxable_base, reliefs, "taxable income")?.max(Decimal::ZERO);

    let taxable_step = AuditStep {
        step_number: step_number_start + 1,
        rule_id: "taxable_income".to_string(),
        rule_name: "Taxable Income".to_string(),
        input: serde_json::json!({
            "taxable_base": taxable_base.normalize().to_string(),
            "taxable_base_source": base_note,
            "total_reliefs": reliefs.normalize().to_string()
        }),
        output: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string()
        }),
        reasoning: format!(
            "max(0, ₦{} ({}) − ₦{}) = ₦{}",
            taxable_base.normalize(),
            base_note,
            reliefs.normalize(),
            taxable_income.normalize()
        ),
    };

    let progressive = if employee.is_paye_applicable && taxable_income > Decimal::ZERO {
        calculate_progressive_tax(taxable_income, config.brackets())?
    } else {
        ProgressiveTax::default()
    };

    let tax_step = AuditStep {
        step_number: step_number_start + 2,
        rule_id: "paye_tax".to_string(),
        rule_name: "PAYE Progressive Tax".to_string(),
        input: serde_json::json!({
            "taxable_income": taxable_income.normalize().to_string(),
            "is_paye_applicable": employee.is_paye_applicable
        }),
        output: serde_json::json!({
            "annual_tax": progressive.total_tax.normalize().to_string(),
            "marginal_tax_rate": progressive.marginal_rate.normalize().to_string(),
            "brackets": progressive
                .allocations
                .iter()
                .map(|a| serde_json::json!({
                    "rate": a.rate.normalize().to_string(),
                    "taxable_amount": a.taxable_amount.normalize().to_string(),
                    "tax": a.tax.normalize().to_string()
                }))
                .collect::<Vec<_>>()
        }),
        reasoning: if !employee.is_paye_applicable {
            "PAYE not applicable to employee".to_string()
        } else if progressive.allocations.is_empty() {
            "No taxable income after reliefs".to_string()
        } else {
            let parts: Vec<String> = progressive
                .allocations
                .iter()
                .map(|a| {
                    format!(
                        "₦{} @ {}% = ₦{}",
                        a.taxable_amount.normalize(),
                        a.rate.normalize(),
                        a.tax.normalize()
                    )
                })
                .collect();
            format!(
                "{}; total ₦{}",
                parts.join(" + "),
                progressive.total_tax.normalize()
            )
        },
    };

    Ok(PayeResult {
        computation: TaxComputation {
            adjusted_gross_income,
            consolidated_relief_allowance: relief,
            taxable_income,
            annual_tax: progressive.total_tax,
            marginal_tax_rate: progressive.marginal_rate,
            effective_tax_rate: Decimal::ZERO,
            bracket_allocations: progressive.allocations,
        },
        audit_steps: vec![relief_step, taxable_step, tax_step],
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::statutory::PensionBaseSource;
    use crate::models::{EmploymentType, Gender, PayFrequency};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_employee() -> Employee {
        Employee {
            id: "emp_001".to_string(),
            name: "Adaeze Nwosu".to_string(),
            gender: Gender::Female,
            employment_type: EmploymentType::FullTime,
            pay_frequency: PayFrequency::Monthly,
            is_paye_applicable: true,
            is_pension_applicable: true,
            is_nhf_applicable: true,
            is_nsitf_applicable: true,
        }
    }

    fn deductions(pension: &str, nhf: &str) -> StatutoryDeductions {
        StatutoryDeductions {
            pension_base: Decimal::ZERO,
            pension_base_source: PensionBaseSource::Gross,
            pension_employee: dec(pension),
            pension_employer: Decimal::ZERO,
            nhf: dec(nhf),
            nsitf: Decimal::ZERO,
        }
    }

    #[test]
    fn test_bracket_allocation_for_1_518_400() {
        let config = PayrollConfig::finance_act_2023();
        let tax = calculate_progressive_tax(dec("1518400"), config.brackets()).unwrap();

        let slices: Vec<(Decimal, Decimal)> = tax
            .allocations
            .iter()
            .map(|a| (a.taxable_amount, a.tax))
            .collect();
        assert_eq!(
            slices,
            vec![
                (dec("300000"), dec("21000")),
                (dec("300000"), dec("33000")),
                (dec("500000"), dec("75000")),
                (dec("418400"), dec("79496")),
            ]
        );
    }

    #[test]
    fn test_income_on_bracket_boundary_stays_in_lower_bracket() {
        let config = PayrollConfig::finance_act_2023();
        let tax = calculate_progressive_tax(dec("300000"), config.brackets()).unwrap();

        assert_eq!(tax.total_tax, dec("21000"));
        assert_eq!(tax.marginal_rate, dec("7"));
        assert_eq!(tax.allocations.len(), 1);
    }

    #[test]
    fn test_top_bracket_income() {
        let config = PayrollConfig::finance_act_2023();
        let tax = calculate_progressive_tax(dec("5000000"), config.brackets()).unwrap();

        // 21,000 + 33,000 + 75,000 + 95,000 + 336,000 + 432,000
        assert_eq!(tax.total_tax, dec("992000"));
        assert_eq!(tax.marginal_rate, dec("24"));
        assert_eq!(tax.allocations.last().unwrap().max, None);
    }

    #[test]
    fn test_zero_income_has_no_tax() {
        let config = PayrollConfig::finance_act_2023();
        let tax = calculate_progressive_tax(Decimal::ZERO, config.brackets()).unwrap();
        assert_eq!(tax, ProgressiveTax::default());
    }

    #[test]
    fn test_paye_for_200k_monthly_gross() {
        let config = PayrollConfig::finance_act_2023();
        let result = calculate_paye(
            &create_test_employee(),
            dec("2400000"),
            &ComponentAnalysis::default(),
            &deductions("192000", "60000"),
            &config,
            7,
        )
        .unwrap();

        let tax = &result.computation;
        assert_eq!(tax.adjusted_gross_income, dec("2148000"));
        assert_eq!(tax.consolidated_relief_allowance, dec("629600"));
        assert_eq!(tax.taxable_income, dec("1518400"));
        assert_eq!(tax.annual_tax, dec("208496"));
        assert_eq!(tax.marginal_tax_rate, dec("19"));
        assert_eq!(result.audit_steps[2].step_number, 9);
    }

    #[test]
    fn test_taxable_components_replace_gross_as_base() {
        let config = PayrollConfig::finance_act_2023();
        let analysis = ComponentAnalysis {
            taxable_amount: dec("150000"),
            annual_taxable_amount: dec("1800000"),
            has_taxable_components: true,
            ..ComponentAnalysis::default()
        };

        let result = calculate_paye(
            &create_test_employee(),
            dec("2400000"),
            &analysis,
            &deductions("192000", "60000"),
            &config,
            1,
        )
        .unwrap();

        // Relief still comes from gross: 1,800,000 − 192,000 − 60,000 − 629,600
        assert_eq!(result.computation.taxable_income, dec("918400"));
        assert!(result.audit_steps[1].reasoning.contains("taxable components"));
    }

    #[test]
    fn test_relief_above_income_floors_taxable_at_zero() {
        let config = PayrollConfig::finance_act_2023();
        let result = calculate_paye(
            &create_test_employee(),
            dec("240000"),
            &ComponentAnalysis::default(),
            &deductions("19200", "6000"),
            &config,
            1,
        )
        .unwrap();

        assert_eq!(result.computation.taxable_income, Decimal::ZERO);
        assert_eq!(result.computation.annual_tax, Decimal::ZERO);
        assert_eq!(result.computation.marginal_tax_rate, Decimal::ZERO);
        assert_eq!(
            result.audit_steps[2].reasoning,
            "No taxable income after reliefs"
        );
    }

    #[test]
    fn test_paye_not_applicable_zeroes_tax_but_keeps_intermediates() {
        let config = PayrollConfig::finance_act_2023();
        let mut employee = create_test_employee();
        employee.is_paye_applicable = false;

        let result = calculate_paye(
            &employee,
            dec("2400000"),
            &ComponentAnalysis::default(),
            &deductions("192000", "60000"),
            &config,
            1,
        )
        .unwrap();

        assert_eq!(result.computation.taxable_income, dec("1518400"));
        assert_eq!(result.computation.annual_tax, Decimal::ZERO);
        assert_eq!(result.computation.marginal_tax_rate, Decimal::ZERO);
        assert!(result.computation.bracket_allocations.is_empty());
    }

    #[test]
    fn test_nsitf_does_not_reduce_adjusted_gross_income() {
        let config = PayrollConfig::finance_act_2023();
        let mut with_nsitf = deductions("192000", "60000");
        with_nsitf.nsitf = dec("24000");

        let result = calculate_paye(
            &create_test_employee(),
            dec("2400000"),
            &ComponentAnalysis::default(),
            &with_nsitf,
            &config,
            1,
        )
        .unwrap();

        assert_eq!(result.computation.adjusted_gross_income, dec("2148000"));
    }
}
