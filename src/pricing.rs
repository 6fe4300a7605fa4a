//! Retail Totals
//!
//! Sums selected item prices as exact decimals. Nothing here rounds; the only rounding step is
//! the tier discount in [`crate::discounts`].

use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::items::BundleItem;

/// Errors summing item prices.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RetailTotalError {
    /// There was nothing to sum, so there is no currency to report the total in.
    #[error("cannot total an empty selection")]
    Empty,

    /// An item is priced in a different currency from the first one.
    #[error("item {index} is priced in {found}, expected {expected}")]
    CurrencyMismatch {
        /// Position of the offending item
        index: usize,
        /// Currency of the first item
        expected: &'static str,
        /// Currency of the offending item
        found: &'static str,
    },

    /// The sum left the range of [`Decimal`].
    #[error("retail total overflowed")]
    Overflow,
}

/// Exact sum of every item price, in the currency of the first item.
///
/// # Errors
///
/// - [`RetailTotalError::Empty`]: `items` is empty.
/// - [`RetailTotalError::CurrencyMismatch`]: Items are priced in more than one currency.
/// - [`RetailTotalError::Overflow`]: The sum does not fit in a [`Decimal`].
pub fn retail_total<'a>(items: &[BundleItem<'a>]) -> Result<Money<'a, Currency>, RetailTotalError> {
    let currency = items
        .first()
        .map(|item| item.price().currency())
        .ok_or(RetailTotalError::Empty)?;

    let mut sum = Decimal::ZERO;

    for (index, item) in items.iter().enumerate() {
        let price = item.price();

        if price.currency() != currency {
            return Err(RetailTotalError::CurrencyMismatch {
                index,
                expected: currency.iso_alpha_code,
                found: price.currency().iso_alpha_code,
            });
        }

        sum = sum.checked_add(*price.amount()).ok_or(RetailTotalError::Overflow)?;
    }

    Ok(Money::from_decimal(sum, currency))
}

/// What is left of `total` once `part` is taken out, in `total`'s currency.
///
/// # Errors
///
/// - [`RetailTotalError::CurrencyMismatch`]: `part` is in another currency (reported at index 1).
/// - [`RetailTotalError::Overflow`]: The difference does not fit in a [`Decimal`].
pub fn remainder<'a>(
    total: &Money<'a, Currency>,
    part: &Money<'a, Currency>,
) -> Result<Money<'a, Currency>, RetailTotalError> {
    if total.currency() != part.currency() {
        return Err(RetailTotalError::CurrencyMismatch {
            index: 1,
            expected: total.currency().iso_alpha_code,
            found: part.currency().iso_alpha_code,
        });
    }

    let left = total
        .amount()
        .checked_sub(*part.amount())
        .ok_or(RetailTotalError::Overflow)?;

    Ok(Money::from_decimal(left, total.currency()))
}
