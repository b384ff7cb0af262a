//! Earning component analysis.
//!
//! Resolves each component to a concrete amount for the period and
//! aggregates the pensionable and taxable bases, recording whether any
//! component of each kind exists. The existence flags decide whether the
//! pension and tax bases fall back to gross downstream.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, ComponentAnalysis, PayFrequency, ResolvedComponent, SalaryComponent};

use super::money;

/// The result of component analysis, including the audit step.
#[derive(Debug, Clone)]
pub struct ComponentAnalysisResult {
    /// Aggregated pensionable and taxable bases.
    pub analysis: ComponentAnalysis,
    /// Components with their amounts resolved for the period.
    pub resolved: Vec<ResolvedComponent>,
    /// The audit step recording this analysis.
    pub audit_step: AuditStep,
}

/// Resolves components and aggregates pensionable and taxable amounts.
///
/// # Arguments
///
/// * `components` - The employee's earning components (already validated)
/// * `gross_salary` - Gross salary per period, the base for percentage components
/// * `pay_frequency` - Used to annualize the aggregated amounts
/// * `step_number` - The step number for audit trail sequencing
///
/// # Examples
///
/// ```
/// use salary_engine::calculation::analyze_components;
/// use salary_engine::models::{PayFrequency, SalaryComponent};
/// use rust_decimal::Decimal;
///
/// let components = vec![
///     SalaryComponent::percentage("Basic", Decimal::from(60)).pensionable().taxable(),
///     SalaryComponent::fixed("Meal", Decimal::from(10_000)),
/// ];
/// let result = analyze_components(&components, Decimal::from(200_000), PayFrequency::Monthly, 1)
///     .unwrap();
///
/// assert_eq!(result.analysis.pensionable_amount, Decimal::from(120_000));
/// assert_eq!(result.analysis.annual_taxable_amount, Decimal::from(1_440_000));
/// assert!(result.analysis.has_pensionable_components);
/// ```
pub fn analyze_components(
    components: &[SalaryComponent],
    gross_salary: Decimal,
    pay_frequency: PayFrequency,
    step_number: u32,
) -> EngineResult<ComponentAnalysisResult> {
    let resolved = components
        .iter()
        .map(|c| {
            c.resolve(gross_salary)
                .ok_or_else(|| EngineError::CalculationError {
                    message: format!("amount of component '{}' overflowed", c.name),
                })
        })
        .collect::<EngineResult<Vec<ResolvedComponent>>>()?;

    let pensionable_amount = money::sum(
        resolved
            .iter()
            .filter(|c| c.is_pensionable)
            .map(|c| c.calculated_amount),
        "pensionable component total",
    )?;
    let taxable_amount = money::sum(
        resolved
            .iter()
            .filter(|c| c.is_taxable)
            .map(|c| c.calculated_amount),
        "taxable component total",
    )?;

    let multiplier = pay_frequency.multiplier();
    let analysis = ComponentAnalysis {
        pensionable_amount,
        taxable_amount,
        annual_pensionable_amount: money::mul(
            pensionable_amount,
            multiplier,
            "annual pensionable amount",
        )?,
        annual_taxable_amount: money::mul(taxable_amount, multiplier, "annual taxable amount")?,
        has_pensionable_components: resolved.iter().any(|c| c.is_pensionable),
        has_taxable_components: resolved.iter().any(|c| c.is_taxable),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "component_analysis".to_string(),
        rule_name: "Earning Component Analysis".to_string(),
        input: serde_json::json!({
            "gross_salary": gross_salary.normalize().to_string(),
            "components": resolved
                .iter()
                .map(|c| serde_json::json!({
                    "name": c.name,
                    "calculated_amount": c.calculated_amount.normalize().to_string(),
                    "is_pensionable": c.is_pensionable,
                    "is_taxable": c.is_taxable
                }))
                .collect::<Vec<_>>()
        }),
        output: serde_json::json!({
            "pensionable_amount": analysis.pensionable_amount.normalize().to_string(),
            "taxable_amount": analysis.taxable_amount.normalize().to_string(),
            "annual_pensionable_amount": analysis.annual_pensionable_amount.normalize().to_string(),
            "annual_taxable_amount": analysis.annual_taxable_amount.normalize().to_string(),
            "has_pensionable_components": analysis.has_pensionable_components,
            "has_taxable_components": analysis.has_taxable_components
        }),
        reasoning: if resolved.is_empty() {
            "No earning components supplied; pension and tax bases fall back to gross"
                .to_string()
        } else {
            format!(
                "{} component(s): pensionable ₦{} and taxable ₦{} per period",
                resolved.len(),
                analysis.pensionable_amount.normalize(),
                analysis.taxable_amount.normalize()
            )
        },
    };

    Ok(ComponentAnalysisResult {
        analysis,
        resolved,
        audit_step,
    })
}
