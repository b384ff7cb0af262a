//! Input validation for net salary calculation.
//!
//! Every check runs before any arithmetic and every violation is
//! collected, so a caller sees all problems with an input at once.

use rust_decimal::Decimal;

use crate::config::SalaryLimits;
use crate::error::{ValidationError, Violation};
use crate::models::{ComponentValue, Employee, SalaryComponent};

/// Checks the gross salary per period against the configured limits.
///
/// The gross must be strictly positive and must not exceed
/// `limits.max_gross_salary`.
pub fn validate_gross_salary(gross_salary: Decimal, limits: &SalaryLimits) -> Vec<Violation> {
    let mut violations = Vec::new();

    if gross_salary <= Decimal::ZERO {
        violations.push(Violation::gross_salary("gross salary must be > 0"));
    } else if gross_salary > limits.max_gross_salary {
        violations.push(Violation::gross_salary(format!(
            "gross salary must not exceed {}",
            limits.max_gross_salary
        )));
    }

    violations
}

/// Checks the identity fields of an employee.
///
/// Enum fields are valid by construction here; string-shaped input is
/// checked when it is parsed into an [`Employee`].
pub fn validate_employee(employee: &Employee) -> Vec<Violation> {
    let mut violations = Vec::new();

    if employee.id.trim().is_empty() {
        violations.push(Violation::employee("id", "must not be empty"));
    }
    if employee.name.trim().is_empty() {
        violations.push(Violation::employee("name", "must not be empty"));
    }

    violations
}

/// Checks each earning component, tagging violations with its position.
pub fn validate_components(components: &[SalaryComponent]) -> Vec<Violation> {
    let mut violations = Vec::new();

    for (index, component) in components.iter().enumerate() {
        if component.name.trim().is_empty() {
            violations.push(Violation::component(index, "name", "must not be empty"));
        }

        match component.value {
            ComponentValue::Fixed { amount } if amount < Decimal::ZERO => {
                violations.push(Violation::component(
                    index,
                    "amount",
                    format!("must not be negative, got {}", amount),
                ));
            }
            ComponentValue::Percentage { rate }
                if rate < Decimal::ZERO || rate > Decimal::ONE_HUNDRED =>
            {
                violations.push(Violation::component(
                    index,
                    "rate",
                    format!("must be between 0 and 100, got {}", rate),
                ));
            }
            _ => {}
        }
    }

    violations
}

/// Runs every input check and fails if any of them found a violation.
pub fn validate_calculation_input(
    employee: &Employee,
    gross_salary: Decimal,
    components: &[SalaryComponent],
    limits: &SalaryLimits,
) -> Result<(), ValidationError> {
    let mut violations = validate_gross_salary(gross_salary, limits);
    violations.extend(validate_employee(employee));
    violations.extend(validate_components(components));

    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(violations))
    }
}
