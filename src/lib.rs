//! Net Salary Engine for Nigerian Payroll
//!
//! This crate computes the gross-to-net salary breakdown for an employee:
//! statutory deductions (pension, NHF, NSITF), the consolidated relief
//! allowance and progressive PAYE tax, using the Finance Act 2023 tables.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
