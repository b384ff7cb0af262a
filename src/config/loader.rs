//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading tax table
//! and statutory rate configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::{PayrollConfig, StatutoryFile, TaxTableFile, TaxTableMetadata};

/// Loads and provides access to payroll configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/ng_paye_2023/
/// ├── tax_table.yaml   # Table metadata, PAYE brackets, relief allowance
/// └── statutory.yaml   # Pension/NHF/NSITF rates, display split, limits
/// ```
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/ng_paye_2023").unwrap();
/// println!("Loaded tax table: {}", loader.tax_table().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - The bracket table or rates break a configuration invariant
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let tax_table = Self::load_yaml::<TaxTableFile>(&path.join("tax_table.yaml"))?;
        let statutory = Self::load_yaml::<StatutoryFile>(&path.join("statutory.yaml"))?;

        let config = PayrollConfig::from_files(tax_table, statutory)?;
        tracing::debug!(
            path = %path.display(),
            version = %config.metadata().version,
            brackets = config.brackets().len(),
            "Loaded payroll configuration"
        );

        Ok(Self { config })
    }

    /// Wraps the built-in Finance Act 2023 configuration.
    pub fn builtin() -> Self {
        Self {
            config: PayrollConfig::finance_act_2023(),
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Consumes the loader, returning the payroll configuration.
    pub fn into_config(self) -> PayrollConfig {
        self.config
    }

    /// Returns the tax table metadata.
    pub fn tax_table(&self) -> &TaxTableMetadata {
        self.config.metadata()
    }
}
