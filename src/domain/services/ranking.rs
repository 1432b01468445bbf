//! # Ranking Primitives
//!
//! Stateless statistics over a set of competing amounts.
//!
//! Every function requiring a non-empty set fails with
//! [`DomainError::InvalidInput`] on empty input.
//!
//! # Examples
//!
//! ```
//! use marketplace_rfq::domain::services::ranking::{lowest, percentage_diff, rank_position};
//! use rust_decimal::Decimal;
//!
//! let amounts = [Decimal::from(100), Decimal::from(100), Decimal::from(120)];
//!
//! assert_eq!(lowest(&amounts).unwrap(), Decimal::from(100));
//! assert_eq!(rank_position(&amounts, Decimal::from(120)).unwrap(), 3);
//! assert_eq!(
//!     percentage_diff(Decimal::from(120), Decimal::from(100)).unwrap(),
//!     Decimal::from(20)
//! );
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{CheckedArithmetic, checked_sum};
use rust_decimal::Decimal;

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

fn ensure_non_empty(amounts: &[Decimal]) -> DomainResult<()> {
    if amounts.is_empty() {
        return Err(DomainError::invalid_input("amount set must not be empty"));
    }
    Ok(())
}

/// Returns the smallest amount.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `amounts` is empty.
pub fn lowest(amounts: &[Decimal]) -> DomainResult<Decimal> {
    amounts
        .iter()
        .copied()
        .min()
        .ok_or_else(|| DomainError::invalid_input("amount set must not be empty"))
}

/// Returns the largest amount.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `amounts` is empty.
pub fn highest(amounts: &[Decimal]) -> DomainResult<Decimal> {
    amounts
        .iter()
        .copied()
        .max()
        .ok_or_else(|| DomainError::invalid_input("amount set must not be empty"))
}

/// Returns the arithmetic mean.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `amounts` is empty, or
/// `DomainError::Arithmetic` if the sum overflows.
pub fn average(amounts: &[Decimal]) -> DomainResult<Decimal> {
    ensure_non_empty(amounts)?;
    let sum = checked_sum(amounts)?;
    Ok(sum.safe_div(Decimal::from(amounts.len()))?)
}

/// Returns `((value - reference) / reference) × 100`.
///
/// A zero `reference` yields `0` rather than an error: the "percentage"
/// against nothing is defined as no difference.
///
/// # Errors
///
/// Returns `DomainError::Arithmetic` on overflow.
pub fn percentage_diff(value: Decimal, reference: Decimal) -> DomainResult<Decimal> {
    if reference.is_zero() {
        return Ok(Decimal::ZERO);
    }
    let ratio = value.safe_sub(reference)?.safe_div(reference)?;
    Ok(ratio.safe_mul(HUNDRED)?.normalize())
}

/// Returns the 1-based position of `value` in the ascending order of
/// `amounts`, using competition ranking: equal amounts share the best
/// position, and the next distinct amount skips the shared places.
///
/// For `[100, 100, 120]`, both `100`s rank 1 and `120` ranks 3.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `amounts` is empty.
pub fn rank_position(amounts: &[Decimal], value: Decimal) -> DomainResult<usize> {
    ensure_non_empty(amounts)?;
    let better = amounts.iter().filter(|amount| **amount < value).count();
    Ok(better.saturating_add(1))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(v: i64) -> Decimal {
        Decimal::from(v)
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(matches!(lowest(&[]), Err(DomainError::InvalidInput(_))));
        assert!(matches!(highest(&[]), Err(DomainError::InvalidInput(_))));
        assert!(matches!(average(&[]), Err(DomainError::InvalidInput(_))));
        assert!(matches!(
            rank_position(&[], d(1)),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn min_max_mean() {
        let amounts = [d(120), d(90), d(150)];
        assert_eq!(lowest(&amounts).unwrap(), d(90));
        assert_eq!(highest(&amounts).unwrap(), d(150));
        assert_eq!(average(&amounts).unwrap(), d(120));
    }

    #[test]
    fn average_keeps_fractions() {
        let amounts = [d(1), d(2)];
        assert_eq!(average(&amounts).unwrap(), Decimal::new(15, 1));
    }

    #[test]
    fn average_overflow_reported() {
        let amounts = [Decimal::MAX, Decimal::MAX];
        assert!(matches!(average(&amounts), Err(DomainError::Arithmetic(_))));
    }

    #[test]
    fn percentage_diff_signs() {
        assert_eq!(percentage_diff(d(80), d(100)).unwrap(), d(-20));
        assert_eq!(percentage_diff(d(150), d(100)).unwrap(), d(50));
    }

    #[test]
    fn percentage_diff_zero_reference() {
        assert_eq!(percentage_diff(d(42), Decimal::ZERO).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn rank_ties_share_best_position() {
        let amounts = [d(100), d(120), d(100), d(130)];
        assert_eq!(rank_position(&amounts, d(100)).unwrap(), 1);
        assert_eq!(rank_position(&amounts, d(120)).unwrap(), 3);
        assert_eq!(rank_position(&amounts, d(130)).unwrap(), 4);
    }

    proptest! {
        #[test]
        fn percentage_diff_of_self_is_zero(x in 1i64..1_000_000_000) {
            prop_assert_eq!(percentage_diff(d(x), d(x)).unwrap(), Decimal::ZERO);
            prop_assert_eq!(percentage_diff(d(-x), d(-x)).unwrap(), Decimal::ZERO);
        }

        #[test]
        fn percentage_diff_against_zero_is_zero(x in any::<i64>()) {
            prop_assert_eq!(percentage_diff(d(x), Decimal::ZERO).unwrap(), Decimal::ZERO);
        }

        #[test]
        fn lowest_ranks_first(amounts in prop::collection::vec(1i64..100_000, 1..40)) {
            let amounts: Vec<Decimal> = amounts.into_iter().map(d).collect();
            let min = lowest(&amounts).unwrap();
            prop_assert_eq!(rank_position(&amounts, min).unwrap(), 1);
        }

        #[test]
        fn rank_is_within_bounds(
            amounts in prop::collection::vec(1i64..1_000, 1..40),
            pick in any::<prop::sample::Index>(),
        ) {
            let amounts: Vec<Decimal> = amounts.into_iter().map(d).collect();
            let value = *pick.get(&amounts);
            let rank = rank_position(&amounts, value).unwrap();
            prop_assert!(rank >= 1 && rank <= amounts.len());
        }
    }
}
