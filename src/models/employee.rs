//! Employee model and related types.
//!
//! This module defines the Employee struct, the statutory election flags,
//! and the enums describing gender, employment type and pay frequency.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Error returned when a string does not name a known enum value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// The enum being parsed (e.g., "pay frequency").
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
    /// The accepted values.
    pub expected: &'static [&'static str],
}

impl fmt::Display for UnknownVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown {} '{}', expected one of {}",
            self.kind,
            self.value,
            self.expected.join(", ")
        )
    }
}

impl std::error::Error for UnknownVariant {}

fn normalize(s: &str) -> String {
    s.trim().to_ascii_uppercase().replace(['-', ' '], "_")
}

/// How often the employee is paid.
///
/// The frequency fixes the annualization multiplier used to apply
/// annual tax law to per-period amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PayFrequency {
    /// Paid every week (52 periods per year).
    Weekly,
    /// Paid every two weeks (26 periods per year).
    Biweekly,
    /// Paid every month (12 periods per year).
    Monthly,
}

impl PayFrequency {
    const NAMES: &'static [&'static str] = &["WEEKLY", "BIWEEKLY", "MONTHLY"];

    /// Returns the number of pay periods in a year.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::models::PayFrequency;
    ///
    /// assert_eq!(PayFrequency::Weekly.periods_per_year(), 52);
    /// assert_eq!(PayFrequency::Biweekly.periods_per_year(), 26);
    /// assert_eq!(PayFrequency::Monthly.periods_per_year(), 12);
    /// ```
    pub fn periods_per_year(self) -> u32 {
        match self {
            PayFrequency::Weekly => 52,
            PayFrequency::Biweekly => 26,
            PayFrequency::Monthly => 12,
        }
    }

    /// Returns the annualization multiplier as a decimal.
    pub fn multiplier(self) -> Decimal {
        Decimal::from(self.periods_per_year())
    }

    /// Returns the canonical upper-case name.
    pub fn as_str(self) -> &'static str {
        match self {
            PayFrequency::Weekly => "WEEKLY",
            PayFrequency::Biweekly => "BIWEEKLY",
            PayFrequency::Monthly => "MONTHLY",
        }
    }
}

impl FromStr for PayFrequency {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "WEEKLY" => Ok(PayFrequency::Weekly),
            "BIWEEKLY" | "BI_WEEKLY" => Ok(PayFrequency::Biweekly),
            "MONTHLY" => Ok(PayFrequency::Monthly),
            _ => Err(UnknownVariant {
                kind: "pay frequency",
                value: s.to_string(),
                expected: Self::NAMES,
            }),
        }
    }
}

/// The employee's gender, as recorded on the HR profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Gender {
    /// Male.
    Male,
    /// Female.
    Female,
}

impl FromStr for Gender {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "MALE" => Ok(Gender::Male),
            "FEMALE" => Ok(Gender::Female),
            _ => Err(UnknownVariant {
                kind: "gender",
                value: s.to_string(),
                expected: &["MALE", "FEMALE"],
            }),
        }
    }
}

/// Represents the type of employment arrangement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentType {
    /// Full-time permanent employment.
    FullTime,
    /// Part-time employment.
    PartTime,
    /// Fixed-term contract.
    Contract,
    /// Internship or industrial training placement.
    Intern,
}

impl FromStr for EmploymentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "FULL_TIME" | "FULLTIME" => Ok(EmploymentType::FullTime),
            "PART_TIME" | "PARTTIME" => Ok(EmploymentType::PartTime),
            "CONTRACT" => Ok(EmploymentType::Contract),
            "INTERN" => Ok(EmploymentType::Intern),
            _ => Err(UnknownVariant {
                kind: "employment type",
                value: s.to_string(),
                expected: &["FULL_TIME", "PART_TIME", "CONTRACT", "INTERN"],
            }),
        }
    }
}

/// Represents an employee's statutory profile.
///
/// Only the pay frequency and the four applicability flags affect the
/// arithmetic; the identity fields are validated but otherwise carried
/// through to the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// The employee's full name.
    pub name: String,
    /// The employee's gender.
    pub gender: Gender,
    /// The type of employment arrangement.
    pub employment_type: EmploymentType,
    /// How often the employee is paid.
    pub pay_frequency: PayFrequency,
    /// Whether PAYE tax is withheld.
    pub is_paye_applicable: bool,
    /// Whether pension contributions are made.
    pub is_pension_applicable: bool,
    /// Whether the National Housing Fund deduction applies.
    pub is_nhf_applicable: bool,
    /// Whether the NSITF deduction applies.
    pub is_nsitf_applicable: bool,
}

impl Employee {
    /// Returns true if none of the statutory deductions apply.
    ///
    /// # Examples
    ///
    /// ```
    /// use salary_engine::models::{Employee, EmploymentType, Gender, PayFrequency};
    ///
    /// let intern = Employee {
    ///     id: "emp_001".to_string(),
    ///     name: "Chidi Okafor".to_string(),
    ///     gender: Gender::Male,
    ///     employment_type: EmploymentType::Intern,
    ///     pay_frequency: PayFrequency::Monthly,
    ///     is_paye_applicable: false,
    ///     is_pension_applicable: false,
    ///     is_nhf_applicable: false,
    ///     is_nsitf_applicable: false,
    /// };
    /// assert!(intern.is_exempt_from_all_deductions());
    /// ```
    pub fn is_exempt_from_all_deductions(&self) -> bool {
        !(self.is_paye_applicable
            || self.is_pension_applicable
            || self.is_nhf_applicable
            || self.is_nsitf_applicable)
    }
}
