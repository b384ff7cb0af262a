//! Core data models for the Net Salary Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod calculation_result;
mod employee;
mod pay_run;
mod salary_component;

pub use calculation_result::{
    AuditStep, BracketAllocation, ComponentAnalysis, NetSalaryCalculation, SalaryBreakdown,
    TaxComputation,
};
pub use employee::{Employee, EmploymentType, Gender, PayFrequency, UnknownVariant};
pub use pay_run::{PayRunItem, PayRunOutcome, PayRunResult, PayRunTotals};
pub use salary_component::{ComponentValue, ResolvedComponent, SalaryComponent};
