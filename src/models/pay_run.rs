//! Pay run models.
//!
//! A pay run is a batch of independent net salary calculations, one per
//! employee, with totals over the successful entries.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Employee, NetSalaryCalculation, SalaryComponent};

/// One employee's input to a pay run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunItem {
    /// The employee being paid.
    pub employee: Employee,
    /// Gross salary for the employee's pay period.
    pub gross_salary: Decimal,
    /// Earning components, if the salary structure defines any.
    #[serde(default)]
    pub components: Vec<SalaryComponent>,
}

/// Outcome of a single pay run entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PayRunOutcome {
    /// The calculation succeeded.
    Calculated {
        /// The calculation result.
        calculation: Box<NetSalaryCalculation>,
    },
    /// The calculation was rejected.
    Failed {
        /// The employee the entry was for.
        employee_id: String,
        /// Why the calculation failed.
        error: String,
    },
}

impl PayRunOutcome {
    /// Returns the calculation if the entry succeeded.
    pub fn calculation(&self) -> Option<&NetSalaryCalculation> {
        match self {
            PayRunOutcome::Calculated { calculation } => Some(calculation),
            PayRunOutcome::Failed { .. } => None,
        }
    }
}

/// Per-period totals over the successful entries of a pay run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunTotals {
    /// Number of successful entries.
    pub employees_paid: usize,
    /// Number of failed entries.
    pub employees_failed: usize,
    /// Total gross salary.
    pub gross_salary: Decimal,
    /// Total employee pension.
    pub pension_employee: Decimal,
    /// Total employer pension.
    pub pension_employer: Decimal,
    /// Total NHF.
    pub nhf: Decimal,
    /// Total NSITF.
    pub nsitf: Decimal,
    /// Total PAYE.
    pub paye_tax: Decimal,
    /// Total net salary.
    pub net_salary: Decimal,
}

/// The result of a pay run, in input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRunResult {
    /// One outcome per input item.
    pub entries: Vec<PayRunOutcome>,
    /// Totals over the successful entries.
    pub totals: PayRunTotals,
}
