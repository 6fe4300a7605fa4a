//! Discounts

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, RoundingStrategy};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Decimal places quoted prices are rounded to.
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Errors specific to discount calculations.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// Percentage lies outside `0%..=100%`.
    #[error("discount percentage {0} is outside 0..=1")]
    PercentOutOfRange(Decimal),

    /// Multiplying the amount by the discount factor overflowed.
    #[error("discount calculation overflowed")]
    Overflow,
}

/// Returns the underlying fraction of a percentage (`0.25` for 25%).
pub fn fraction(percent: Percentage) -> Decimal {
    // decimal_percentage doesn't expose the inner Decimal
    percent * Decimal::ONE
}

/// Returns the percentage as percent points (`25` for 25%).
pub fn percent_points(percent: Percentage) -> Decimal {
    (fraction(percent) * Decimal::ONE_HUNDRED).normalize()
}

/// Reduces `price` by `percent`, rounding half-up to [`MONEY_DECIMAL_PLACES`].
///
/// The unrounded `price` is multiplied once by the discount factor, so this is the only
/// rounding step applied to the result.
///
/// # Errors
///
/// Returns an error if:
/// - `percent` is negative or above 100% (`DiscountError::PercentOutOfRange`).
/// - the multiplication cannot be represented (`DiscountError::Overflow`).
pub fn apply_percent_off<'a>(
    price: &Money<'a, Currency>,
    percent: Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let fraction = fraction(percent);

    if fraction < Decimal::ZERO || fraction > Decimal::ONE {
        return Err(DiscountError::PercentOutOfRange(fraction));
    }

    let discounted = price
        .amount()
        .checked_mul(Decimal::ONE - fraction)
        .ok_or(DiscountError::Overflow)?
        .round_dp_with_strategy(MONEY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero);

    Ok(Money::from_decimal(discounted, price.currency()))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::GBP;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn apply_percent_off_returns_expected_amount() -> TestResult {
        let price = Money::from_minor(2000, GBP);
        let discounted = apply_percent_off(&price, Percentage::from(Decimal::new(10, 2)))?;

        assert_eq!(discounted, Money::from_minor(1800, GBP));

        Ok(())
    }

    #[test]
    fn apply_percent_off_rounds_half_up() -> TestResult {
        // 0.05 * 0.9 = 0.045 -> 0.05
        let price = Money::from_minor(5, GBP);
        let discounted = apply_percent_off(&price, Percentage::from(Decimal::new(10, 2)))?;

        assert_eq!(discounted, Money::from_minor(5, GBP));

        // 0.15 * 0.85 = 0.1275 -> 0.13
        let price = Money::from_minor(15, GBP);
        let discounted = apply_percent_off(&price, Percentage::from(Decimal::new(15, 2)))?;

        assert_eq!(discounted, Money::from_minor(13, GBP));

        Ok(())
    }

    #[test]
    fn apply_percent_off_rounds_only_once() -> TestResult {
        // 3.335 + 3.335 = 6.67, 6.67 * 0.75 = 5.0025 -> 5.00
        let price = Money::from_decimal(Decimal::new(6670, 3), GBP);
        let discounted = apply_percent_off(&price, Percentage::from(Decimal::new(25, 2)))?;

        assert_eq!(discounted, Money::from_minor(500, GBP));

        Ok(())
    }

    #[test]
    fn zero_percent_leaves_price_unchanged() -> TestResult {
        let price = Money::from_minor(999, GBP);
        let discounted = apply_percent_off(&price, Percentage::from(Decimal::ZERO))?;

        assert_eq!(discounted, price);

        Ok(())
    }

    #[test]
    fn apply_percent_off_rejects_out_of_range_percentages() {
        let price = Money::from_minor(1000, GBP);

        assert!(matches!(
            apply_percent_off(&price, Percentage::from(Decimal::new(101, 2))),
            Err(DiscountError::PercentOutOfRange(_))
        ));
        assert!(matches!(
            apply_percent_off(&price, Percentage::from(Decimal::new(-1, 2))),
            Err(DiscountError::PercentOutOfRange(_))
        ));
    }

    #[test]
    fn percent_points_normalises_scale() {
        assert_eq!(
            percent_points(Percentage::from(Decimal::new(25, 2))),
            Decimal::from(25)
        );
    }
}
