//! Items

use rusty_money::{Money, iso};

/// A catalog product selected into a bundle, carrying its retail price.
#[derive(Clone, Debug, PartialEq)]
pub struct BundleItem<'a> {
    id: String,
    price: Money<'a, iso::Currency>,
}

impl<'a> BundleItem<'a> {
    /// Creates a new item for the given product id and retail price
    pub fn new(id: impl Into<String>, price: Money<'a, iso::Currency>) -> Self {
        Self {
            id: id.into(),
            price,
        }
    }

    /// Returns the product id
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the retail price of the item
    pub fn price(&self) -> &Money<'a, iso::Currency> {
        &self.price
    }
}
