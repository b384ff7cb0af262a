//! Earning component models.
//!
//! A component is either a fixed amount or a percentage of the gross
//! salary per period. It is resolved to a concrete amount before the
//! calculator aggregates pensionable and taxable bases.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How a component's amount is determined.
///
/// # Example
///
/// ```
/// use salary_engine::models::ComponentValue;
/// use rust_decimal::Decimal;
///
/// let housing = ComponentValue::Percentage { rate: Decimal::from(20) };
/// assert_eq!(housing.resolve(Decimal::from(200_000)), Some(Decimal::from(40_000)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ComponentValue {
    /// A fixed amount per pay period.
    Fixed {
        /// The amount in naira per period.
        amount: Decimal,
    },
    /// A percentage of the gross salary per period.
    Percentage {
        /// The percentage, in `[0, 100]`.
        rate: Decimal,
    },
}

impl ComponentValue {
    /// Resolves the value to a concrete amount for a period with the given gross.
    ///
    /// Returns `None` if the percentage overflows.
    pub fn resolve(&self, gross_salary: Decimal) -> Option<Decimal> {
        match *self {
            ComponentValue::Fixed { amount } => Some(amount),
            ComponentValue::Percentage { rate } => gross_salary
                .checked_mul(rate)?
                .checked_div(Decimal::ONE_HUNDRED),
        }
    }
}

/// A named earning line item on an employee's salary structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryComponent {
    /// Display name (e.g., "Housing Allowance").
    pub name: String,
    /// How the amount is determined.
    pub value: ComponentValue,
    /// Whether the amount counts toward the pension base.
    #[serde(default)]
    pub is_pensionable: bool,
    /// Whether the amount counts toward the taxable base.
    #[serde(default)]
    pub is_taxable: bool,
}

impl SalaryComponent {
    /// Creates a fixed-amount component.
    pub fn fixed(name: impl Into<String>, amount: Decimal) -> Self {
        Self {
            name: name.into(),
            value: ComponentValue::Fixed { amount },
            is_pensionable: false,
            is_taxable: false,
        }
    }

    /// Creates a percentage-of-gross component.
    pub fn percentage(name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            name: name.into(),
            value: ComponentValue::Percentage { rate },
            is_pensionable: false,
            is_taxable: false,
        }
    }

    /// Marks the component as counting toward the pension base.
    pub fn pensionable(mut self) -> Self {
        self.is_pensionable = true;
        self
    }

    /// Marks the component as counting toward the taxable base.
    pub fn taxable(mut self) -> Self {
        self.is_taxable = true;
        self
    }

    /// Resolves this component against the gross salary per period.
    ///
    /// Returns `None` if the amount overflows.
    pub fn resolve(&self, gross_salary: Decimal) -> Option<ResolvedComponent> {
        Some(ResolvedComponent {
            name: self.name.clone(),
            calculated_amount: self.value.resolve(gross_salary)?,
            is_pensionable: self.is_pensionable,
            is_taxable: self.is_taxable,
        })
    }
}

/// A component whose amount has been fixed for the period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedComponent {
    /// Display name.
    pub name: String,
    /// The concrete amount for the period.
    pub calculated_amount: Decimal,
    /// Whether the amount counts toward the pension base.
    pub is_pensionable: bool,
    /// Whether the amount counts toward the taxable base.
    pub is_taxable: bool,
}
