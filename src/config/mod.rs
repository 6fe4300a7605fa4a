//! Configuration
//!
//! YAML loaders for tier tables and bundle selections. A consuming service loads its tier
//! table once at start-up and hands it to [`BundlePricingEngine::new`].
//!
//! ```yaml
//! tiers:
//!   - name: Starter
//!     min_items: 2
//!     discount: "10%"
//! ```
//!
//! [`BundlePricingEngine::new`]: crate::engine::BundlePricingEngine::new

use std::{fs, path::Path};

use rusty_money::Money;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::{
    items::BundleItem,
    tiers::{BundleTier, TierTable, TierTableError},
};

pub mod parse;

pub use parse::{parse_currency, parse_percentage, parse_price};

/// Configuration Parsing Errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// IO error reading configuration files
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Tiers failed validation
    #[error("Invalid tier table: {0}")]
    Tiers(#[from] TierTableError),
}

/// Wrapper for tiers in YAML
#[derive(Debug, Deserialize)]
pub struct TierTableConfig {
    /// Tiers in ascending order
    pub tiers: Vec<TierConfig>,
}

/// Tier Config
#[derive(Debug, Deserialize)]
pub struct TierConfig {
    /// Tier label
    pub name: String,

    /// Minimum number of items needed to qualify
    pub min_items: usize,

    /// Discount (e.g., "10%" or "0.10")
    pub discount: String,
}

impl TryFrom<TierTableConfig> for TierTable {
    type Error = ConfigError;

    fn try_from(config: TierTableConfig) -> Result<Self, Self::Error> {
        let tiers = config
            .tiers
            .into_iter()
            .map(|tier| {
                Ok(BundleTier::new(
                    tier.name,
                    tier.min_items,
                    parse_percentage(&tier.discount)?,
                ))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(TierTable::new(tiers)?)
    }
}

/// Parse a tier table from YAML.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a discount cannot be parsed, or the tiers
/// fail [`TierTable::new`] validation.
pub fn tier_table_from_str(yaml: &str) -> Result<TierTable, ConfigError> {
    let config: TierTableConfig = serde_norway::from_str(yaml)?;
    let table = TierTable::try_from(config)?;

    debug!(tiers = table.tiers().len(), "loaded tier table");

    Ok(table)
}

/// Load a tier table from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read, or for any [`tier_table_from_str`] error.
pub fn load_tier_table(path: impl AsRef<Path>) -> Result<TierTable, ConfigError> {
    let contents = fs::read_to_string(path)?;

    tier_table_from_str(&contents)
}

/// Wrapper for selected items in YAML
#[derive(Debug, Deserialize)]
pub struct SelectionConfig {
    /// Selected items in order
    pub items: Vec<SelectionItemConfig>,
}

/// Selected Item Config
#[derive(Debug, Deserialize)]
pub struct SelectionItemConfig {
    /// Product id
    pub id: String,

    /// Retail price (e.g., "9.99 GBP")
    pub price: String,
}

impl TryFrom<SelectionItemConfig> for BundleItem<'static> {
    type Error = ConfigError;

    fn try_from(config: SelectionItemConfig) -> Result<Self, Self::Error> {
        let (amount, currency) = parse_price(&config.price)?;

        Ok(BundleItem::new(config.id, Money::from_decimal(amount, currency)))
    }
}

/// Load a list of selected items from a YAML file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed, or a price is malformed.
pub fn load_selection(path: impl AsRef<Path>) -> Result<Vec<BundleItem<'static>>, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SelectionConfig = serde_norway::from_str(&contents)?;

    config.items.into_iter().map(BundleItem::try_from).collect()
}
