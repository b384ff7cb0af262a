//! Request types for the Net Salary Engine API.
//!
//! Enum fields arrive as strings so that an unknown value is reported as a
//! validation violation alongside every other problem with the request,
//! instead of failing JSON deserialization on the first one.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::{validate_components, validate_gross_salary};
use crate::config::SalaryLimits;
use crate::error::{ValidationError, Violation};
use crate::models::{
    Employee, EmploymentType, Gender, PayFrequency, PayRunItem, SalaryComponent,
};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee's statutory profile.
    pub employee: EmployeeRequest,
    /// Gross salary for one pay period.
    pub gross_salary: Decimal,
    /// Earning components, if the salary structure defines any.
    #[serde(default)]
    pub components: Vec<SalaryComponent>,
}

/// Employee information in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRequest {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name.
    pub name: String,
    /// `MALE` or `FEMALE`.
    pub gender: String,
    /// `FULL_TIME`, `PART_TIME`, `CONTRACT` or `INTERN`.
    pub employment_type: String,
    /// `WEEKLY`, `BIWEEKLY` or `MONTHLY`.
    pub pay_frequency: String,
    /// Whether PAYE tax is withheld.
    pub is_paye_applicable: bool,
    /// Whether pension contributions are made.
    pub is_pension_applicable: bool,
    /// Whether the National Housing Fund deduction applies.
    pub is_nhf_applicable: bool,
    /// Whether the NSITF deduction applies.
    pub is_nsitf_applicable: bool,
}

/// Request body for the `/pay-runs` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayRunRequest {
    /// One calculation request per employee.
    pub items: Vec<CalculationRequest>,
}

impl EmployeeRequest {
    /// Converts the request into an [`Employee`], collecting a violation
    /// for every field that does not parse or is empty.
    pub fn into_employee(self) -> Result<Employee, Vec<Violation>> {
        let mut violations = Vec::new();

        if self.id.trim().is_empty() {
            violations.push(Violation::employee("id", "must not be empty"));
        }
        if self.name.trim().is_empty() {
            violations.push(Violation::employee("name", "must not be empty"));
        }

        let gender = parse_field::<Gender>("gender", &self.gender, &mut violations);
        let employment_type =
            parse_field::<EmploymentType>("employment_type", &self.employment_type, &mut violations);
        let pay_frequency =
            parse_field::<PayFrequency>("pay_frequency", &self.pay_frequency, &mut violations);

        match (gender, employment_type, pay_frequency) {
            (Some(gender), Some(employment_type), Some(pay_frequency)) if violations.is_empty() => {
                Ok(Employee {
                    id: self.id,
                    name: self.name,
                    gender,
                    employment_type,
                    pay_frequency,
                    is_paye_applicable: self.is_paye_applicable,
                    is_pension_applicable: self.is_pension_applicable,
                    is_nhf_applicable: self.is_nhf_applicable,
                    is_nsitf_applicable: self.is_nsitf_applicable,
                })
            }
            _ => Err(violations),
        }
    }
}

fn parse_field<T>(field: &str, value: &str, violations: &mut Vec<Violation>) -> Option<T>
where
    T: std::str::FromStr<Err = crate::models::UnknownVariant>,
{
    match value.parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            violations.push(Violation::employee(field, err.to_string()));
            None
        }
    }
}

impl CalculationRequest {
    /// Returns the employee id as submitted, for logging and failed entries.
    pub fn employee_id(&self) -> &str {
        &self.employee.id
    }

    /// Converts the request into a typed calculation input.
    ///
    /// All problems are reported together: gross salary first, then the
    /// employee fields, then the components in input order.
    pub fn into_item(self, limits: &SalaryLimits) -> Result<PayRunItem, ValidationError> {
        let mut violations = validate_gross_salary(self.gross_salary, limits);
        let employee = self.employee.into_employee();
        if let Err(employee_violations) = &employee {
            violations.extend(employee_violations.iter().cloned());
        }
        violations.extend(validate_components(&self.components));

        match employee {
            Ok(employee) if violations.is_empty() => Ok(PayRunItem {
                employee,
                gross_salary: self.gross_salary,
                components: self.components,
            }),
            _ => Err(ValidationError::new(violations)),
        }
    }
}
