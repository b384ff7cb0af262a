//! Configuration loading and management for the Net Salary Engine.
//!
//! This module provides the versioned tax table (PAYE brackets, relief
//! allowance) and statutory rates, either built in or loaded from YAML.
//!
//! # Example
//!
//! ```no_run
//! use salary_engine::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/ng_paye_2023").unwrap();
//! println!("Loaded tax table: {}", config.tax_table().name);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    DisplaySplit, PayrollConfig, ReliefConfig, SalaryLimits, StatutoryFile, StatutoryRates,
    TaxBracket, TaxTableFile, TaxTableMetadata,
};
