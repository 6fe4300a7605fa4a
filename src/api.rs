//! Quote API Bodies
//!
//! Serde request and response bodies for a "get bundle quote" endpoint. Money amounts travel
//! as decimal strings so no precision is lost to floating point on either side; discount
//! percentages are plain JSON numbers.

use rust_decimal::Decimal;
use rusty_money::Money;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    config::{ConfigError, parse_currency},
    items::BundleItem,
    quote::BundlePricingResult,
    selection::{BundleSelection, DuplicatePolicy, InvalidSelection},
    tiers::BundleTier,
};

/// Errors turning a request body into a selection.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The request currency isn't supported.
    #[error(transparent)]
    Currency(#[from] ConfigError),

    /// The items break the caller's duplicate policy.
    #[error(transparent)]
    Selection(#[from] InvalidSelection),
}

/// Currency assumed when a quote request doesn't name one.
pub const DEFAULT_CURRENCY: &str = "GBP";

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

/// Body of a bundle quote request.
///
/// `currency` extends the plain `{ items: [...] }` body so storefronts selling in more than
/// one currency can say which one the prices are in. Bodies without it are priced in
/// [`DEFAULT_CURRENCY`].
#[derive(Debug, Clone, Deserialize)]
pub struct BundleQuoteRequest {
    /// ISO currency code every price is given in
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Selected products
    pub items: Vec<BundleQuoteRequestItem>,
}

/// A selected product in a quote request.
#[derive(Debug, Clone, Deserialize)]
pub struct BundleQuoteRequestItem {
    /// Product id
    pub id: String,

    /// Retail price in major units
    pub price: Decimal,
}

impl BundleQuoteRequest {
    /// Build the bundle selection described by this request.
    ///
    /// # Errors
    ///
    /// Returns an error if the currency is unknown or `policy` rejects a repeated id.
    pub fn selection(
        &self,
        policy: DuplicatePolicy,
    ) -> Result<BundleSelection<'static>, RequestError> {
        let currency = parse_currency(&self.currency)?;

        let items: Vec<_> = self
            .items
            .iter()
            .map(|item| {
                BundleItem::new(item.id.clone(), Money::from_decimal(item.price, currency))
            })
            .collect();

        Ok(BundleSelection::new(items, policy)?)
    }
}

/// A tier as it appears in a quote response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBody {
    /// Minimum number of items needed to qualify
    pub min_items: usize,

    /// Discount in percent points
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percent: Decimal,

    /// Tier label
    pub name: String,
}

impl From<&BundleTier> for TierBody {
    fn from(tier: &BundleTier) -> Self {
        Self {
            min_items: tier.min_items(),
            discount_percent: tier.discount_percent(),
            name: tier.name().to_string(),
        }
    }
}

/// Body of a bundle quote response.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleQuoteResponse {
    /// ISO currency code of every amount
    pub currency: &'static str,

    /// Sum of all item retail prices
    pub total_retail_price: Decimal,

    /// Price payable for the bundle
    pub bundle_price: Decimal,

    /// Amount saved against the retail total
    pub savings: Decimal,

    /// Discount applied, in percent points
    #[serde(with = "rust_decimal::serde::float")]
    pub discount_percentage: Decimal,

    /// Tier the selection was priced at
    pub tier_applied: TierBody,

    /// Next tier up, or null at the top tier
    pub next_tier: Option<TierBody>,

    /// Items still needed to reach the next tier
    pub items_to_next_tier: usize,
}

impl From<&BundlePricingResult<'_>> for BundleQuoteResponse {
    fn from(quote: &BundlePricingResult<'_>) -> Self {
        Self {
            currency: quote.currency().iso_alpha_code,
            total_retail_price: *quote.total_retail_price().amount(),
            bundle_price: *quote.bundle_price().amount(),
            savings: *quote.savings().amount(),
            discount_percentage: quote.discount_percentage(),
            tier_applied: TierBody::from(quote.tier_applied()),
            next_tier: quote.next_tier().map(TierBody::from),
            items_to_next_tier: quote.items_to_next_tier(),
        }
    }
}
