//! Calculation logic for the Net Salary Engine.
//!
//! This module contains input validation, earning component analysis,
//! statutory deductions (pension, NHF, NSITF), the consolidated relief
//! allowance and progressive PAYE tax, the gross-to-net orchestration and
//! the parallel pay run.

mod components;
mod money;
mod net_salary;
mod pay_run;
mod paye;
mod statutory;
mod validation;

pub use components::{ComponentAnalysisResult, analyze_components};
pub use net_salary::calculate_net_salary;
pub use pay_run::calculate_pay_run;
pub use paye::{
    PayeResult, ProgressiveTax, calculate_paye, calculate_progressive_tax,
    consolidated_relief_allowance,
};
pub use statutory::{
    PensionBaseSource, StatutoryDeductions, StatutoryDeductionsResult,
    calculate_statutory_deductions,
};
pub use validation::{
    validate_calculation_input, validate_components, validate_employee, validate_gross_salary,
};
