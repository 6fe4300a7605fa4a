//! Bundle Tiers
//!
//! A [`TierTable`] is an ordered list of [`BundleTier`]s. Each tier grants a percentage
//! discount once a bundle holds at least `min_items` products. Tables are validated on
//! construction and never change afterwards, so one table can be shared by every pricing
//! request in the process.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use smallvec::SmallVec;
use thiserror::Error;

use crate::discounts::{fraction, percent_points};

/// Smallest `min_items` a configured tier may use.
pub const MIN_BUNDLE_ITEMS: usize = 2;

/// Errors raised while building a [`TierTable`].
#[derive(Debug, Error, PartialEq)]
pub enum TierTableError {
    /// The table holds no tiers.
    #[error("tier table must contain at least one tier")]
    Empty,

    /// A tier qualifies with fewer than [`MIN_BUNDLE_ITEMS`] items (tier name, `min_items`).
    #[error("tier {0} has min_items {1}; bundles need at least 2 items")]
    MinItemsTooSmall(String, usize),

    /// A tier discount lies outside `0%..=100%` (tier name, discount percent points).
    #[error("tier {0} has discount {1}%; expected 0-100%")]
    DiscountOutOfRange(String, Decimal),

    /// A tier does not strictly increase on its predecessor in both `min_items` and discount.
    #[error("tier {current} must exceed tier {previous} in both min_items and discount")]
    NotIncreasing {
        /// Name of the earlier tier
        previous: String,
        /// Name of the offending tier
        current: String,
    },
}

/// A single bundle discount tier.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleTier {
    name: String,
    min_items: usize,
    discount: Percentage,
}

impl BundleTier {
    /// Create a new tier.
    ///
    /// `discount` is a fraction, e.g. `Percentage::from(0.10)` for 10% off.
    pub fn new(name: impl Into<String>, min_items: usize, discount: Percentage) -> Self {
        Self {
            name: name.into(),
            min_items,
            discount,
        }
    }

    /// Create a tier from a whole-number percent, e.g. `10` for 10% off.
    pub fn with_percent(name: impl Into<String>, min_items: usize, percent: u32) -> Self {
        Self::new(
            name,
            min_items,
            Percentage::from(Decimal::new(i64::from(percent), 2)),
        )
    }

    /// The zero-discount tier applied when no configured tier qualifies.
    pub fn none() -> Self {
        Self::new("None", 0, Percentage::from(Decimal::ZERO))
    }

    /// Tier label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Minimum number of items needed to qualify
    pub fn min_items(&self) -> usize {
        self.min_items
    }

    /// Discount as a fraction
    pub fn discount(&self) -> Percentage {
        self.discount
    }

    /// Discount in percent points (`10` for 10% off)
    pub fn discount_percent(&self) -> Decimal {
        percent_points(self.discount)
    }

    /// Whether a bundle of `count` items qualifies for this tier.
    pub fn qualifies(&self, count: usize) -> bool {
        count >= self.min_items
    }
}

/// Validated, ascending list of bundle tiers.
#[derive(Debug, Clone, PartialEq)]
pub struct TierTable {
    tiers: SmallVec<[BundleTier; 4]>,
}

impl TierTable {
    /// Build a tier table, checking tiers ascend strictly in both `min_items` and discount.
    ///
    /// # Errors
    ///
    /// - [`TierTableError::Empty`]: No tiers were provided.
    /// - [`TierTableError::MinItemsTooSmall`]: A tier needs fewer than two items.
    /// - [`TierTableError::DiscountOutOfRange`]: A discount is negative or above 100%.
    /// - [`TierTableError::NotIncreasing`]: Tiers are out of order or repeat a threshold.
    pub fn new(tiers: impl IntoIterator<Item = BundleTier>) -> Result<Self, TierTableError> {
        let tiers: SmallVec<[BundleTier; 4]> = tiers.into_iter().collect();

        if tiers.is_empty() {
            return Err(TierTableError::Empty);
        }

        for tier in &tiers {
            if tier.min_items < MIN_BUNDLE_ITEMS {
                return Err(TierTableError::MinItemsTooSmall(
                    tier.name.clone(),
                    tier.min_items,
                ));
            }

            let discount = fraction(tier.discount);
            if discount < Decimal::ZERO || discount > Decimal::ONE {
                return Err(TierTableError::DiscountOutOfRange(
                    tier.name.clone(),
                    tier.discount_percent(),
                ));
            }
        }

        for pair in tiers.windows(2) {
            if let [previous, current] = pair {
                let ascending = current.min_items > previous.min_items
                    && fraction(current.discount) > fraction(previous.discount);

                if !ascending {
                    return Err(TierTableError::NotIncreasing {
                        previous: previous.name.clone(),
                        current: current.name.clone(),
                    });
                }
            }
        }

        Ok(Self { tiers })
    }

    /// The storefront's standard tiers: Starter, Value, Pro and Ultimate.
    pub fn standard() -> Self {
        Self {
            tiers: SmallVec::from_buf([
                BundleTier::with_percent("Starter", 2, 10),
                BundleTier::with_percent("Value", 3, 15),
                BundleTier::with_percent("Pro", 4, 20),
                BundleTier::with_percent("Ultimate", 5, 25),
            ]),
        }
    }

    /// Tiers in ascending order
    pub fn tiers(&self) -> &[BundleTier] {
        &self.tiers
    }

    /// Highest tier a bundle of `count` items qualifies for, if any.
    pub fn tier_for(&self, count: usize) -> Option<&BundleTier> {
        self.tiers.iter().rev().find(|tier| tier.qualifies(count))
    }

    /// Lowest tier a bundle of `count` items has not reached yet, if any.
    pub fn next_tier(&self, count: usize) -> Option<&BundleTier> {
        self.tiers.iter().find(|tier| !tier.qualifies(count))
    }
}

impl Default for TierTable {
    fn default() -> Self {
        Self::standard()
    }
}
