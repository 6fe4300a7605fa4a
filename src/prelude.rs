//! Bundle pricing prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    api::{BundleQuoteRequest, BundleQuoteResponse, RequestError},
    config::{ConfigError, load_tier_table, tier_table_from_str},
    engine::{BundlePricingEngine, PricingError},
    items::BundleItem,
    quote::{BundlePricingResult, QuoteError},
    selection::{BundleSelection, DuplicatePolicy, InvalidSelection},
    tiers::{BundleTier, TierTable, TierTableError},
};
