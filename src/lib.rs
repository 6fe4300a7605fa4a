//! Bundle Pricing
//!
//! Tiered bundle pricing for the storefront: customers pick two or more products and the
//! bundle earns a percentage discount that grows with the number of items selected.

pub mod api;
pub mod config;
pub mod discounts;
pub mod engine;
pub mod items;
pub mod prelude;
pub mod pricing;
pub mod quote;
pub mod selection;
pub mod tiers;
