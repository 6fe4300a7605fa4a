//! Bundle Quotes

use std::io;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{discounts::percent_points, tiers::BundleTier};

/// Errors that can occur when rendering a quote.
#[derive(Debug, Error)]
pub enum QuoteError {
    /// Writing the rendered table failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Priced bundle selection, not yet committed to an order.
#[derive(Debug, Clone, PartialEq)]
pub struct BundlePricingResult<'a> {
    /// Number of items priced
    item_count: usize,

    /// Sum of all item retail prices
    total_retail_price: Money<'a, Currency>,

    /// Retail total less the applied tier discount
    bundle_price: Money<'a, Currency>,

    /// Retail total less the bundle price
    savings: Money<'a, Currency>,

    /// Highest tier the selection qualifies for
    tier_applied: BundleTier,

    /// Lowest tier the selection has not yet reached
    next_tier: Option<BundleTier>,
}

impl<'a> BundlePricingResult<'a> {
    /// Create a new quote with the given details.
    #[must_use]
    pub fn new(
        item_count: usize,
        total_retail_price: Money<'a, Currency>,
        bundle_price: Money<'a, Currency>,
        savings: Money<'a, Currency>,
        tier_applied: BundleTier,
        next_tier: Option<BundleTier>,
    ) -> Self {
        Self {
            item_count,
            total_retail_price,
            bundle_price,
            savings,
            tier_applied,
            next_tier,
        }
    }

    /// Number of items priced
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Sum of all item retail prices
    pub fn total_retail_price(&self) -> Money<'a, Currency> {
        self.total_retail_price
    }

    /// Price payable for the bundle
    pub fn bundle_price(&self) -> Money<'a, Currency> {
        self.bundle_price
    }

    /// Amount saved against the retail total
    pub fn savings(&self) -> Money<'a, Currency> {
        self.savings
    }

    /// Discount applied, in percent points
    pub fn discount_percentage(&self) -> Decimal {
        self.tier_applied.discount_percent()
    }

    /// Tier the selection was priced at
    pub fn tier_applied(&self) -> &BundleTier {
        &self.tier_applied
    }

    /// Next tier up, if the top tier hasn't been reached
    pub fn next_tier(&self) -> Option<&BundleTier> {
        self.next_tier.as_ref()
    }

    /// Items still needed to reach [`Self::next_tier`]; zero at the top tier.
    pub fn items_to_next_tier(&self) -> usize {
        self.next_tier
            .as_ref()
            .map_or(0, |tier| tier.min_items().saturating_sub(self.item_count))
    }

    /// Currency of every amount on the quote
    pub fn currency(&self) -> &'a Currency {
        self.total_retail_price.currency()
    }

    /// Savings as a share of the retail total.
    ///
    /// Differs from [`Self::discount_percentage`] only by the rounding of the bundle price.
    pub fn savings_percent(&self) -> Percentage {
        let total = *self.total_retail_price.amount();

        if total.is_zero() {
            return Percentage::from(Decimal::ZERO);
        }

        Percentage::from(*self.savings.amount() / total)
    }

    /// Render the quote as a table.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be written to `out`.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), QuoteError> {
        let mut builder = Builder::default();

        builder.push_record([
            format!("Retail total ({} items)", self.item_count),
            self.total_retail_price.to_string(),
        ]);
        builder.push_record([
            format!(
                "{} tier ({}% off)",
                self.tier_applied.name(),
                self.discount_percentage()
            ),
            format!("-{}", self.savings),
        ]);
        builder.push_record([
            format!(
                "Bundle price (save {}%)",
                percent_points(self.savings_percent()).round_dp(2)
            ),
            self.bundle_price.to_string(),
        ]);

        if let Some(next) = &self.next_tier {
            builder.push_record([
                format!(
                    "Add {} more for {} ({}% off)",
                    self.items_to_next_tier(),
                    next.name(),
                    next.discount_percent()
                ),
                String::new(),
            ]);
        }

        let mut table = builder.build();
        table.with(Style::modern_rounded());
        table.modify(Columns::new(1..2), Alignment::right());

        writeln!(out, "{table}")?;

        Ok(())
    }
}
