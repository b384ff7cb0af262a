//! Error types for the Net Salary Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while loading tax configuration,
//! validating input and calculating net salary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The part of the calculation input a [`Violation`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ValidationScope {
    /// The gross salary per pay period.
    GrossSalary,
    /// The employee's statutory profile.
    Employee,
    /// An earning component, identified by its position in the input list.
    Component {
        /// Zero-based position of the component.
        index: usize,
    },
}

/// A single violated input constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Which part of the input is invalid.
    pub scope: ValidationScope,
    /// The offending field (e.g. "pay_frequency").
    pub field: String,
    /// A description of the violated constraint.
    pub message: String,
}

impl Violation {
    /// Creates a violation of the gross salary constraints.
    pub fn gross_salary(message: impl Into<String>) -> Self {
        Self {
            scope: ValidationScope::GrossSalary,
            field: "gross_salary".to_string(),
            message: message.into(),
        }
    }

    /// Creates a violation on an employee field.
    pub fn employee(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            scope: ValidationScope::Employee,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Creates a violation on a field of the component at `index`.
    pub fn component(index: usize, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            scope: ValidationScope::Component { index },
            field: field.into(),
            message: message.into(),
        }
    }
}

fn describe(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| match v.scope {
            ValidationScope::Component { index } => {
                format!("components[{}].{}: {}", index, v.field, v.message)
            }
            _ => format!("{}: {}", v.field, v.message),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Every constraint violated by a calculation input.
///
/// Validation never stops at the first problem, so a form can surface
/// all of them at once.
///
/// # Example
///
/// ```
/// use salary_engine::error::{ValidationError, Violation};
///
/// let error = ValidationError::new(vec![Violation::gross_salary("gross salary must be > 0")]);
/// assert_eq!(error.to_string(), "Validation failed: gross_salary: gross salary must be > 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("Validation failed: {}", describe(.violations))]
pub struct ValidationError {
    /// The violations found, in input order.
    pub violations: Vec<Violation>,
}

impl ValidationError {
    /// Creates a validation error from a list of violations.
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Returns true if any violation names the given field.
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }

    /// Returns the violations within the given scope.
    pub fn in_scope(&self, scope: ValidationScope) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.scope == scope)
    }
}

/// The main error type for the Net Salary Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use salary_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/tax_table.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/tax_table.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but breaks a tax table or rate invariant.
    #[error("Invalid configuration: {message}")]
    InvalidConfig {
        /// A description of the broken invariant.
        message: String,
    },

    /// The calculation input was rejected before any arithmetic.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// A general calculation error occurred.
    #[error("Calculation error: {message}")]
    CalculationError {
        /// A description of the calculation error.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_not_found_displays_path() {
        let error = EngineError::ConfigNotFound {
            path: "/missing/tax_table.yaml".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Configuration file not found: /missing/tax_table.yaml"
        );
    }

    #[test]
    fn test_config_parse_error_displays_path_and_message() {
        let error = EngineError::ConfigParseError {
            path: "/config/bad.yaml".to_string(),
            message: "invalid YAML syntax".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Failed to parse configuration file '/config/bad.yaml': invalid YAML syntax"
        );
    }

    #[test]
    fn test_invalid_config_displays_message() {
        let error = EngineError::InvalidConfig {
            message: "bracket 2 does not start where bracket 1 ends".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration: bracket 2 does not start where bracket 1 ends"
        );
    }

    #[test]
    fn test_validation_error_lists_every_violation() {
        let error = ValidationError::new(vec![
            Violation::employee("id", "must not be empty"),
            Violation::employee("pay_frequency", "unknown pay frequency 'DAILY'"),
            Violation::component(2, "rate", "must be between 0 and 100"),
        ]);
        assert_eq!(
            error.to_string(),
            "Validation failed: id: must not be empty; \
             pay_frequency: unknown pay frequency 'DAILY'; \
             components[2].rate: must be between 0 and 100"
        );
    }

    #[test]
    fn test_validation_error_scope_filtering() {
        let error = ValidationError::new(vec![
            Violation::gross_salary("gross salary must be > 0"),
            Violation::component(0, "name", "must not be empty"),
            Violation::component(1, "amount", "must not be negative"),
        ]);
        assert!(error.has_field("gross_salary"));
        assert!(!error.has_field("pay_frequency"));
        assert_eq!(
            error
                .in_scope(ValidationScope::Component { index: 1 })
                .count(),
            1
        );
    }

    #[test]
    fn test_validation_wraps_transparently() {
        let error: EngineError =
            ValidationError::new(vec![Violation::gross_salary("gross salary must be > 0")]).into();
        assert_eq!(
            error.to_string(),
            "Validation failed: gross_salary: gross salary must be > 0"
        );
    }

    #[test]
    fn test_calculation_error_displays_message() {
        let error = EngineError::CalculationError {
            message: "annual gross overflowed".to_string(),
        };
        assert_eq!(error.to_string(), "Calculation error: annual gross overflowed");
    }

    #[test]
    fn test_errors_implement_std_error() {
        fn assert_error<T: std::error::Error>() {}
        assert_error::<EngineError>();
        assert_error::<ValidationError>();
    }

    #[test]
    fn test_error_propagation_with_question_mark() {
        fn returns_invalid() -> Result<(), ValidationError> {
            Err(ValidationError::new(vec![]))
        }

        fn propagates_error() -> EngineResult<()> {
            returns_invalid()?;
            Ok(())
        }

        assert!(matches!(
            propagates_error(),
            Err(EngineError::Validation(_))
        ));
    }
}
