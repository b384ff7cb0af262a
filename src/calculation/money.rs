//! Checked decimal arithmetic.
//!
//! Overflow or division by zero becomes an [`EngineError::CalculationError`]
//! naming the quantity being computed instead of a panic.

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

fn failure(operation: &str, what: &str) -> EngineError {
    EngineError::CalculationError {
        message: format!("{} failed while computing {}", operation, what),
    }
}

pub(crate) fn mul(lhs: Decimal, rhs: Decimal, what: &str) -> EngineResult<Decimal> {
    lhs.checked_mul(rhs)
        .ok_or_else(|| failure("multiplication", what))
}

pub(crate) fn div(lhs: Decimal, rhs: Decimal, what: &str) -> EngineResult<Decimal> {
    lhs.checked_div(rhs).ok_or_else(|| failure("division", what))
}

pub(crate) fn add(lhs: Decimal, rhs: Decimal, what: &str) -> EngineResult<Decimal> {
    lhs.checked_add(rhs).ok_or_else(|| failure("addition", what))
}

pub(crate) fn sub(lhs: Decimal, rhs: Decimal, what: &str) -> EngineResult<Decimal> {
    lhs.checked_sub(rhs)
        .ok_or_else(|| failure("subtraction", what))
}

/// `amount × rate / 100`.
pub(crate) fn percent_of(amount: Decimal, rate: Decimal, what: &str) -> EngineResult<Decimal> {
    div(mul(amount, rate, what)?, Decimal::ONE_HUNDRED, what)
}

/// Sums `values`, failing on overflow.
pub(crate) fn sum<I>(values: I, what: &str) -> EngineResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| add(acc, v, what))
}
