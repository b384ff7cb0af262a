//! Application state for the Net Salary Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, PayrollConfig};

/// Shared application state.
///
/// Holds the loaded payroll configuration. It is immutable once the
/// server starts, so handlers share it without locking.
#[derive(Clone)]
pub struct AppState {
    /// The loaded payroll configuration.
    config: Arc<PayrollConfig>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config.into_config()),
        }
    }

    /// Returns the active payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }
}
