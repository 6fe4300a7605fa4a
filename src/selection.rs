//! Bundle Selection

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::{items::BundleItem, tiers::MIN_BUNDLE_ITEMS};

/// Why a selection cannot be priced as a bundle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidSelection {
    /// Fewer than [`MIN_BUNDLE_ITEMS`] items were selected.
    #[error("minimum 2 items required")]
    TooFewItems {
        /// Number of items supplied
        count: usize,
    },

    /// An item has a negative price.
    #[error("negative price at index {index}")]
    NegativePrice {
        /// Position of the item in the selection
        index: usize,
    },

    /// An item is priced in a different currency to the first item.
    #[error("currency mismatch at index {index}: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Position of the item in the selection
        index: usize,
        /// Currency of the first item
        expected: &'static str,
        /// Currency of the offending item
        found: &'static str,
    },

    /// A product id appears more than once and the caller rejects duplicates.
    #[error("duplicate product id: {id}")]
    DuplicateId {
        /// The repeated product id
        id: String,
    },
}

/// How a [`BundleSelection`] treats a product id that appears more than once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Each entry counts as its own bundle item.
    #[default]
    Allow,

    /// Repeated ids fail with [`InvalidSelection::DuplicateId`].
    Reject,
}

/// The products a customer picked for a bundle, in selection order.
#[derive(Debug, Clone, PartialEq)]
pub struct BundleSelection<'a> {
    items: Vec<BundleItem<'a>>,
}

impl<'a> BundleSelection<'a> {
    /// Create a selection, applying the caller's duplicate policy.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidSelection::DuplicateId`] when `policy` is [`DuplicatePolicy::Reject`]
    /// and a product id repeats. Price and size checks happen at pricing time.
    pub fn new(
        items: impl Into<Vec<BundleItem<'a>>>,
        policy: DuplicatePolicy,
    ) -> Result<Self, InvalidSelection> {
        let items = items.into();

        if policy == DuplicatePolicy::Reject {
            let mut seen = FxHashSet::default();

            if let Some(item) = items.iter().find(|item| !seen.insert(item.id())) {
                return Err(InvalidSelection::DuplicateId {
                    id: item.id().to_string(),
                });
            }
        }

        Ok(Self { items })
    }

    /// Selected items
    pub fn items(&self) -> &[BundleItem<'a>] {
        &self.items
    }

    /// Number of selected items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing has been selected
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Check the preconditions for pricing `items` as a bundle.
///
/// # Errors
///
/// - [`InvalidSelection::TooFewItems`]: Fewer than two items.
/// - [`InvalidSelection::NegativePrice`]: Any price below zero.
/// - [`InvalidSelection::CurrencyMismatch`]: Prices in more than one currency.
pub fn validate_items(items: &[BundleItem<'_>]) -> Result<(), InvalidSelection> {
    let Some(first) = items.first() else {
        return Err(InvalidSelection::TooFewItems { count: 0 });
    };

    if items.len() < MIN_BUNDLE_ITEMS {
        return Err(InvalidSelection::TooFewItems { count: items.len() });
    }

    let expected = first.price().currency();

    items.iter().enumerate().try_for_each(|(index, item)| {
        let price = item.price();

        if price.is_negative() {
            return Err(InvalidSelection::NegativePrice { index });
        }

        if price.currency() != expected {
            return Err(InvalidSelection::CurrencyMismatch {
                index,
                expected: expected.iso_alpha_code,
                found: price.currency().iso_alpha_code,
            });
        }

        Ok(())
    })
}
