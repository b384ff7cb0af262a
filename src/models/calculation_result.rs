//! Calculation result models for the Net Salary Engine.
//!
//! This module contains the [`NetSalaryCalculation`] type and its associated
//! structures that capture every output of a net salary calculation: the
//! per-period and annual breakdowns, the PAYE intermediates, the component
//! analysis and an audit trail of the rules applied.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{PayFrequency, ResolvedComponent};

/// Income, deductions and net pay over one span of time.
///
/// The same shape is used for a single pay period and for a full year.
///
/// # Example
///
/// ```
/// use salary_engine::models::SalaryBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = SalaryBreakdown::default();
/// assert_eq!(breakdown.net_salary, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryBreakdown {
    /// Gross salary.
    pub gross_salary: Decimal,
    /// Basic salary share of gross (display only).
    pub basic_salary: Decimal,
    /// Allowances share of gross (display only).
    pub allowances: Decimal,
    /// Employee pension contribution.
    pub pension_employee: Decimal,
    /// Employer pension contribution (informational, not deducted).
    pub pension_employer: Decimal,
    /// National Housing Fund deduction.
    pub nhf: Decimal,
    /// NSITF deduction.
    pub nsitf: Decimal,
    /// PAYE income tax.
    pub paye_tax: Decimal,
    /// Sum of the employee-side deductions.
    pub total_deductions: Decimal,
    /// Gross less total deductions.
    pub net_salary: Decimal,
}

/// Tax allocated to a single bracket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketAllocation {
    /// Lower bound of the bracket.
    pub min: Decimal,
    /// Upper bound of the bracket, `None` for the top bracket.
    pub max: Option<Decimal>,
    /// Bracket rate as a percentage.
    pub rate: Decimal,
    /// Portion of taxable income falling in this bracket.
    pub taxable_amount: Decimal,
    /// Tax charged on that portion.
    pub tax: Decimal,
}

/// Annual PAYE computation intermediates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputation {
    /// Annual gross less employee pension and NHF.
    pub adjusted_gross_income: Decimal,
    /// Consolidated relief allowance.
    pub consolidated_relief_allowance: Decimal,
    /// Income subject to the progressive brackets (never negative).
    pub taxable_income: Decimal,
    /// Annual PAYE tax.
    pub annual_tax: Decimal,
    /// Rate of the highest bracket touched, as a percentage.
    pub marginal_tax_rate: Decimal,
    /// PAYE as a percentage of gross.
    pub effective_tax_rate: Decimal,
    /// Bracket-by-bracket allocation of the taxable income.
    pub bracket_allocations: Vec<BracketAllocation>,
}

/// Aggregated view of the earning components.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentAnalysis {
    /// Sum of pensionable component amounts per period.
    pub pensionable_amount: Decimal,
    /// Sum of taxable component amounts per period.
    pub taxable_amount: Decimal,
    /// Annualized pensionable amount.
    pub annual_pensionable_amount: Decimal,
    /// Annualized taxable amount.
    pub annual_taxable_amount: Decimal,
    /// Whether any component is marked pensionable.
    pub has_pensionable_components: bool,
    /// Whether any component is marked taxable.
    pub has_taxable_components: bool,
}

/// A single step in the audit trail recording a calculation decision.
///
/// Each step captures the input, output, and reasoning for a rule application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// The complete result of a net salary calculation.
///
/// A pure derived value: it carries no identifiers or timestamps, so two
/// calculations over identical inputs compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetSalaryCalculation {
    /// The ID of the employee the calculation is for.
    pub employee_id: String,
    /// The employee's pay frequency.
    pub pay_frequency: PayFrequency,
    /// Version of the tax table used.
    pub tax_table_version: String,
    /// Figures for one pay period.
    pub per_period: SalaryBreakdown,
    /// Figures for a full year.
    pub annual: SalaryBreakdown,
    /// PAYE computation intermediates.
    pub tax: TaxComputation,
    /// Earning component aggregation.
    pub components: ComponentAnalysis,
    /// Each earning component with its amount for the period.
    #[serde(default)]
    pub resolved_components: Vec<ResolvedComponent>,
    /// Ordered record of every rule applied.
    pub audit_steps: Vec<AuditStep>,
}

impl NetSalaryCalculation {
    /// Returns the audit step for the given rule, if it was applied.
    pub fn audit_step(&self, rule_id: &str) -> Option<&AuditStep> {
        self.audit_steps.iter().find(|s| s.rule_id == rule_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn sample_step(step_number: u32, rule_id: &str) -> AuditStep {
        AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: "Sample".to_string(),
            input: serde_json::json!({}),
            output: serde_json::json!({}),
            reasoning: String::new(),
        }
    }

    fn sample_calculation() -> NetSalaryCalculation {
        NetSalaryCalculation {
            employee_id: "emp_001".to_string(),
            pay_frequency: PayFrequency::Monthly,
            tax_table_version: "2023-01-01".to_string(),
            per_period: SalaryBreakdown {
                gross_salary: dec("50000"),
                net_salary: dec("50000"),
                ..SalaryBreakdown::default()
            },
            annual: SalaryBreakdown::default(),
            tax: TaxComputation::default(),
            components: ComponentAnalysis::default(),
            resolved_components: vec![ResolvedComponent {
                name: "Basic".to_string(),
                calculated_amount: dec("30000"),
                is_pensionable: true,
                is_taxable: true,
            }],
            audit_steps: vec![sample_step(1, "annualize"), sample_step(2, "nhf")],
        }
    }

    #[test]
    fn test_money_serializes_as_strings() {
        let json = serde_json::to_value(sample_calculation()).unwrap();
        assert_eq!(json["per_period"]["gross_salary"], "50000");
        assert_eq!(json["pay_frequency"], "MONTHLY");
        assert_eq!(json["resolved_components"][0]["calculated_amount"], "30000");
    }

    #[test]
    fn test_round_trip_preserves_equality() {
        let calculation = sample_calculation();
        let json = serde_json::to_string(&calculation).unwrap();
        let back: NetSalaryCalculation = serde_json::from_str(&json).unwrap();
        assert_eq!(back, calculation);
    }

    #[test]
    fn test_audit_step_lookup() {
        let calculation = sample_calculation();
        assert_eq!(calculation.audit_step("nhf").unwrap().step_number, 2);
        assert!(calculation.audit_step("paye").is_none());
    }

    #[test]
    fn test_bracket_allocation_top_bracket_serializes_null_max() {
        let allocation = BracketAllocation {
            min: dec("3200000"),
            max: None,
            rate: dec("24"),
            taxable_amount: dec("100"),
            tax: dec("24"),
        };
        let json = serde_json::to_value(&allocation).unwrap();
        assert!(json["max"].is_null());
    }
}
