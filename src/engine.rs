//! Bundle Pricing Engine
//!
//! Prices a selection of catalog items against a [`TierTable`]. The engine owns nothing but
//! its immutable tier table, so a single instance can be shared by concurrent requests.

use thiserror::Error;
use tracing::debug;

use crate::{
    discounts::{DiscountError, apply_percent_off},
    items::BundleItem,
    pricing::{RetailTotalError, remainder, retail_total},
    quote::BundlePricingResult,
    selection::{BundleSelection, InvalidSelection, validate_items},
    tiers::{BundleTier, TierTable},
};

/// Errors returned while pricing a bundle.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// The selection cannot be priced as a bundle.
    #[error("invalid bundle selection: {0}")]
    InvalidSelection(#[from] InvalidSelection),

    /// Errors bubbled up from summing the retail total.
    #[error(transparent)]
    RetailTotal(#[from] RetailTotalError),

    /// Errors bubbled up from applying the tier discount.
    #[error(transparent)]
    Discount(#[from] DiscountError),
}

/// Computes tiered bundle quotes.
#[derive(Debug, Clone, Default)]
pub struct BundlePricingEngine {
    tiers: TierTable,
}

impl BundlePricingEngine {
    /// Create an engine pricing against `tiers`.
    pub fn new(tiers: TierTable) -> Self {
        Self { tiers }
    }

    /// The tier table quotes are priced against
    pub fn tiers(&self) -> &TierTable {
        &self.tiers
    }

    /// Price `items` as a bundle.
    ///
    /// The selection earns the highest tier whose `min_items` it meets, or the zero-discount
    /// [`BundleTier::none`] tier if it meets none. The bundle price is rounded half-up to two
    /// decimal places and savings are taken as the exact remainder, so
    /// `bundle_price + savings == total_retail_price` always holds.
    ///
    /// Product ids are not inspected; see [`BundleSelection`] for duplicate handling.
    ///
    /// # Errors
    ///
    /// - [`PricingError::InvalidSelection`]: Fewer than two items, a negative price, or mixed
    ///   currencies.
    /// - [`PricingError::RetailTotal`] / [`PricingError::Discount`]: Money arithmetic failed.
    pub fn compute_pricing<'a>(
        &self,
        items: &[BundleItem<'a>],
    ) -> Result<BundlePricingResult<'a>, PricingError> {
        validate_items(items)?;

        let count = items.len();
        let total_retail_price = retail_total(items)?;

        let tier_applied = self
            .tiers
            .tier_for(count)
            .cloned()
            .unwrap_or_else(BundleTier::none);
        let next_tier = self.tiers.next_tier(count).cloned();

        let bundle_price = apply_percent_off(&total_retail_price, tier_applied.discount())?;
        let savings = remainder(&total_retail_price, &bundle_price)?;

        debug!(
            count,
            tier = tier_applied.name(),
            next_tier = next_tier.as_ref().map(BundleTier::name),
            total = %total_retail_price,
            bundle_price = %bundle_price,
            "priced bundle selection"
        );

        Ok(BundlePricingResult::new(
            count,
            total_retail_price,
            bundle_price,
            savings,
            tier_applied,
            next_tier,
        ))
    }

    /// Price a selection that has already passed the caller's duplicate policy.
    ///
    /// # Errors
    ///
    /// See [`Self::compute_pricing`].
    pub fn quote<'a>(
        &self,
        selection: &BundleSelection<'a>,
    ) -> Result<BundlePricingResult<'a>, PricingError> {
        self.compute_pricing(selection.items())
    }
}
