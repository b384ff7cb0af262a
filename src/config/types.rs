//! Configuration types for net salary calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the assembled
//! [`PayrollConfig`] the calculator reads from.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Metadata identifying a tax table.
///
/// Tax law changes ship as a new table version rather than as code
/// changes to the calculator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxTableMetadata {
    /// Short code for the table (e.g., "NG-PAYE").
    pub code: String,
    /// The human-readable name of the table.
    pub name: String,
    /// The version of the table.
    pub version: String,
    /// The date from which the table applies.
    pub effective_date: NaiveDate,
}

/// A single progressive income tax bracket.
///
/// Brackets cover the half-open annual income range `[min, max)`; the
/// top bracket has no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of the bracket in naira per year.
    pub min: Decimal,
    /// Upper bound of the bracket, or `None` for the open-ended top bracket.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Tax rate for income falling in this bracket, as a percentage.
    pub rate: Decimal,
}

impl TaxBracket {
    /// Returns the portion of `income` that falls inside this bracket.
    pub fn portion_of(&self, income: Decimal) -> Decimal {
        if income <= self.min {
            return Decimal::ZERO;
        }
        let upper = match self.max {
            Some(max) if income > max => max,
            _ => income,
        };
        upper - self.min
    }
}

/// Consolidated relief allowance parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReliefConfig {
    /// Variable relief as a percentage of adjusted gross income.
    pub percentage_of_adjusted_gross: Decimal,
    /// Flat relief in naira per year.
    pub fixed_amount: Decimal,
}

/// Statutory deduction rates, as percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatutoryRates {
    /// Employee pension contribution rate.
    pub pension_employee: Decimal,
    /// Employer pension contribution rate (informational).
    pub pension_employer: Decimal,
    /// National Housing Fund rate, applied to gross.
    pub nhf: Decimal,
    /// NSITF rate, applied to gross.
    pub nsitf: Decimal,
}

/// Fixed basic/allowance split used for display purposes only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplaySplit {
    /// Share of gross shown as basic salary, as a percentage.
    pub basic_percentage: Decimal,
    /// Share of gross shown as allowances, as a percentage.
    pub allowances_percentage: Decimal,
}

/// Input sanity limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryLimits {
    /// Largest accepted gross salary per pay period.
    pub max_gross_salary: Decimal,
}

/// Structure of `tax_table.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct TaxTableFile {
    /// Table metadata.
    pub tax_table: TaxTableMetadata,
    /// Ordered brackets.
    pub brackets: Vec<TaxBracket>,
    /// Consolidated relief allowance parameters.
    pub relief: ReliefConfig,
}

/// Structure of `statutory.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct StatutoryFile {
    /// Statutory deduction rates.
    pub statutory_rates: StatutoryRates,
    /// Display-only salary split.
    pub display_split: DisplaySplit,
    /// Input sanity limits.
    pub limits: SalaryLimits,
}

/// The complete, validated payroll configuration.
///
/// Immutable once built; the calculator receives it by reference so
/// several table versions can be in use side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PayrollConfig {
    metadata: TaxTableMetadata,
    brackets: Vec<TaxBracket>,
    relief: ReliefConfig,
    statutory_rates: StatutoryRates,
    display_split: DisplaySplit,
    limits: SalaryLimits,
}

impl PayrollConfig {
    /// Creates a configuration from its parts, checking every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidConfig`] if the bracket table is
    /// empty, does not start at zero, has a gap or overlap, has a bounded
    /// top bracket or an open-ended bracket before the top, or if any rate
    /// lies outside `[0, 100]`.
    pub fn new(
        metadata: TaxTableMetadata,
        brackets: Vec<TaxBracket>,
        relief: ReliefConfig,
        statutory_rates: StatutoryRates,
        display_split: DisplaySplit,
        limits: SalaryLimits,
    ) -> EngineResult<Self> {
        validate_brackets(&brackets)?;

        let percentages = [
            ("relief.percentage_of_adjusted_gross", relief.percentage_of_adjusted_gross),
            ("statutory_rates.pension_employee", statutory_rates.pension_employee),
            ("statutory_rates.pension_employer", statutory_rates.pension_employer),
            ("statutory_rates.nhf", statutory_rates.nhf),
            ("statutory_rates.nsitf", statutory_rates.nsitf),
            ("display_split.basic_percentage", display_split.basic_percentage),
            ("display_split.allowances_percentage", display_split.allowances_percentage),
        ];
        for (name, value) in percentages {
            check_percentage(name, value)?;
        }

        if relief.fixed_amount < Decimal::ZERO {
            return Err(invalid("relief.fixed_amount must not be negative"));
        }
        if display_split.basic_percentage + display_split.allowances_percentage
            != Decimal::ONE_HUNDRED
        {
            return Err(invalid("display_split percentages must add up to 100"));
        }
        if limits.max_gross_salary <= Decimal::ZERO {
            return Err(invalid("limits.max_gross_salary must be greater than 0"));
        }

        Ok(Self {
            metadata,
            brackets,
            relief,
            statutory_rates,
            display_split,
            limits,
        })
    }

    /// Assembles a configuration from the two parsed YAML files.
    pub fn from_files(tax_table: TaxTableFile, statutory: StatutoryFile) -> EngineResult<Self> {
        Self::new(
            tax_table.tax_table,
            tax_table.brackets,
            tax_table.relief,
            statutory.statutory_rates,
            statutory.display_split,
            statutory.limits,
        )
    }

    /// The Nigerian PAYE table and statutory rates under the Finance Act 2023.
    ///
    /// Matches the shipped `config/ng_paye_2023` files.
    pub fn finance_act_2023() -> Self {
        let bracket = |min: i64, max: Option<i64>, rate: i64| TaxBracket {
            min: Decimal::from(min),
            max: max.map(Decimal::from),
            rate: Decimal::from(rate),
        };

        Self {
            metadata: TaxTableMetadata {
                code: "NG-PAYE".to_string(),
                name: "Nigeria PAYE (Finance Act 2023)".to_string(),
                version: "2023-01-01".to_string(),
                effective_date: NaiveDate::from_ymd_opt(2023, 1, 1).unwrap_or_default(),
            },
            brackets: vec![
                bracket(0, Some(300_000), 7),
                bracket(300_000, Some(600_000), 11),
                bracket(600_000, Some(1_100_000), 15),
                bracket(1_100_000, Some(1_600_000), 19),
                bracket(1_600_000, Some(3_200_000), 21),
                bracket(3_200_000, None, 24),
            ],
            relief: ReliefConfig {
                percentage_of_adjusted_gross: Decimal::from(20),
                fixed_amount: Decimal::from(200_000),
            },
            statutory_rates: StatutoryRates {
                pension_employee: Decimal::from(8),
                pension_employer: Decimal::from(10),
                nhf: Decimal::new(25, 1),
                nsitf: Decimal::ONE,
            },
            display_split: DisplaySplit {
                basic_percentage: Decimal::from(60),
                allowances_percentage: Decimal::from(40),
            },
            limits: SalaryLimits {
                max_gross_salary: Decimal::from(100_000_000),
            },
        }
    }

    /// Returns the tax table metadata.
    pub fn metadata(&self) -> &TaxTableMetadata {
        &self.metadata
    }

    /// Returns the ordered tax brackets.
    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// Returns the consolidated relief allowance parameters.
    pub fn relief(&self) -> &ReliefConfig {
        &self.relief
    }

    /// Returns the statutory deduction rates.
    pub fn statutory_rates(&self) -> &StatutoryRates {
        &self.statutory_rates
    }

    /// Returns the display-only salary split.
    pub fn display_split(&self) -> &DisplaySplit {
        &self.display_split
    }

    /// Returns the input sanity limits.
    pub fn limits(&self) -> &SalaryLimits {
        &self.limits
    }
}

impl Default for PayrollConfig {
    fn default() -> Self {
        Self::finance_act_2023()
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}

fn check_percentage(name: &str, value: Decimal) -> EngineResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(invalid(format!(
            "{} must be between 0 and 100, got {}",
            name, value
        )));
    }
    Ok(())
}

fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let first = brackets
        .first()
        .ok_or_else(|| invalid("tax table must contain at least one bracket"))?;
    if first.min != Decimal::ZERO {
        return Err(invalid("first tax bracket must start at 0"));
    }

    let last_index = brackets.len() - 1;
    for (i, bracket) in brackets.iter().enumerate() {
        check_percentage(&format!("brackets[{}].rate", i), bracket.rate)?;

        match bracket.max {
            Some(max) if max <= bracket.min => {
                return Err(invalid(format!(
                    "bracket {} has max {} not above min {}",
                    i + 1,
                    max,
                    bracket.min
                )));
            }
            Some(_) if i == last_index => {
                return Err(invalid("top tax bracket must be open-ended"));
            }
            None if i != last_index => {
                return Err(invalid(format!(
                    "bracket {} is open-ended but is not the top bracket",
                    i + 1
                )));
            }
            _ => {}
        }

        if i > 0 && brackets[i - 1].max != Some(bracket.min) {
            return Err(invalid(format!(
                "bracket {} does not start where bracket {} ends",
                i + 1,
                i
            )));
        }
    }
    Ok(())
}
