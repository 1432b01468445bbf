//! # Checked Arithmetic
//!
//! Decimal operations for bid and quote math that report overflow and
//! zero divisors as errors. Amounts are money, so nothing here rounds.
//!
//! ```
//! use marketplace_rfq::domain::value_objects::arithmetic::{ArithmeticError, CheckedArithmetic, checked_sum};
//! use rust_decimal::Decimal;
//!
//! let line_total = Decimal::new(45, 0).safe_mul(Decimal::new(10, 0)).unwrap();
//! assert_eq!(line_total, Decimal::new(450, 0));
//! assert_eq!(checked_sum(&[Decimal::ONE, Decimal::TWO]).unwrap(), Decimal::new(3, 0));
//! assert_eq!(Decimal::ONE.safe_div(Decimal::ZERO), Err(ArithmeticError::DivisionByZero));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// A decimal operation left the representable range or divided by zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Result above `Decimal::MAX`.
    #[error("decimal overflow")]
    Overflow,

    /// Result below `Decimal::MIN`.
    #[error("decimal underflow")]
    Underflow,

    /// Zero divisor.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result of a checked decimal operation.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// `Result`-returning counterparts of `+ - * /` on amounts.
///
/// # Errors
///
/// Every method fails with the matching [`ArithmeticError`] instead of
/// panicking.
pub trait CheckedArithmetic: Sized {
    /// `self + rhs`.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self - rhs`.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self * rhs`.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self / rhs`.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(if rhs.is_sign_negative() {
            ArithmeticError::Underflow
        } else {
            ArithmeticError::Overflow
        })
    }

    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(if rhs.is_sign_negative() {
            ArithmeticError::Overflow
        } else {
            ArithmeticError::Underflow
        })
    }

    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(
            if self.is_sign_negative() != rhs.is_sign_negative() {
                ArithmeticError::Underflow
            } else {
                ArithmeticError::Overflow
            },
        )
    }

    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Sums amounts, stopping at the first overflow.
///
/// # Errors
///
/// Returns the error of the first failing addition.
pub fn checked_sum<'a>(amounts: impl IntoIterator<Item = &'a Decimal>) -> ArithmeticResult<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.safe_add(*amount))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn overflow_direction() {
        assert_eq!(Decimal::MAX.safe_add(Decimal::ONE), Err(ArithmeticError::Overflow));
        assert_eq!(Decimal::MIN.safe_add(Decimal::NEGATIVE_ONE), Err(ArithmeticError::Underflow));
        assert_eq!(Decimal::MIN.safe_sub(Decimal::ONE), Err(ArithmeticError::Underflow));
        assert_eq!(Decimal::MAX.safe_sub(Decimal::NEGATIVE_ONE), Err(ArithmeticError::Overflow));
        assert_eq!(Decimal::MAX.safe_mul(Decimal::TWO), Err(ArithmeticError::Overflow));
        assert_eq!(Decimal::MAX.safe_mul(-Decimal::TWO), Err(ArithmeticError::Underflow));
    }

    #[test]
    fn percent_ratio_is_exact() {
        let ratio = Decimal::new(120, 0).safe_div(Decimal::new(100, 0)).unwrap();
        assert_eq!(ratio, Decimal::new(12, 1));
        assert_eq!(Decimal::TEN.safe_div(Decimal::ZERO), Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn sums() {
        assert_eq!(checked_sum(&[] as &[Decimal]).unwrap(), Decimal::ZERO);
        let amounts = [Decimal::new(1005, 1), Decimal::new(995, 1)];
        assert_eq!(checked_sum(&amounts).unwrap(), Decimal::new(200, 0));
        assert_eq!(checked_sum(&[Decimal::MAX, Decimal::ONE]), Err(ArithmeticError::Overflow));
    }

    #[test]
    fn messages() {
        assert_eq!(ArithmeticError::Overflow.to_string(), "decimal overflow");
        assert_eq!(ArithmeticError::DivisionByZero.to_string(), "division by zero");
    }
}
