//! Integration tests for bundle quotes priced against the standard tier table.
//!
//! Scenario selections live under `fixtures/selections`:
//!
//! | Fixture  | Items          | Tier             | Bundle price | Next tier      |
//! |----------|----------------|------------------|--------------|----------------|
//! | single   | £9.99          | invalid          | -            | -              |
//! | starter  | 2 x £10.00     | Starter (10%)    | £18.00       | Value, 1 more  |
//! | pro      | 4 x £25.00     | Pro (20%)        | £80.00       | Ultimate, 1    |
//! | ultimate | 6 x £10.00     | Ultimate (25%)   | £45.00       | none           |

use rust_decimal::Decimal;
use rusty_money::{Money, iso::GBP};
use testresult::TestResult;

use bundle_pricing::{
    config::{ConfigError, load_selection},
    engine::{BundlePricingEngine, PricingError},
    items::BundleItem,
    selection::InvalidSelection,
    tiers::{BundleTier, TierTable},
};

fn selection(name: &str) -> Result<Vec<BundleItem<'static>>, ConfigError> {
    load_selection(format!("./fixtures/selections/{name}.yml"))
}

fn uniform(count: usize, minor: i64) -> Vec<BundleItem<'static>> {
    (0..count)
        .map(|i| BundleItem::new(format!("product-{i}"), Money::from_minor(minor, GBP)))
        .collect()
}

#[test]
fn starter_scenario() -> TestResult {
    let quote = BundlePricingEngine::default().compute_pricing(&selection("starter")?)?;

    assert_eq!(quote.total_retail_price(), Money::from_minor(2000, GBP));
    assert_eq!(quote.tier_applied().name(), "Starter");
    assert_eq!(quote.discount_percentage(), Decimal::from(10));
    assert_eq!(quote.bundle_price(), Money::from_minor(1800, GBP));
    assert_eq!(quote.savings(), Money::from_minor(200, GBP));
    assert_eq!(quote.next_tier().map(BundleTier::name), Some("Value"));
    assert_eq!(quote.next_tier().map(BundleTier::min_items), Some(3));
    assert_eq!(quote.items_to_next_tier(), 1);

    Ok(())
}

#[test]
fn pro_scenario() -> TestResult {
    let quote = BundlePricingEngine::default().compute_pricing(&selection("pro")?)?;

    assert_eq!(quote.total_retail_price(), Money::from_minor(10000, GBP));
    assert_eq!(quote.tier_applied().name(), "Pro");
    assert_eq!(quote.discount_percentage(), Decimal::from(20));
    assert_eq!(quote.bundle_price(), Money::from_minor(8000, GBP));
    assert_eq!(quote.savings(), Money::from_minor(2000, GBP));
    assert_eq!(quote.next_tier().map(BundleTier::name), Some("Ultimate"));
    assert_eq!(quote.next_tier().map(BundleTier::min_items), Some(5));
    assert_eq!(quote.items_to_next_tier(), 1);

    Ok(())
}

#[test]
fn single_item_scenario() -> TestResult {
    let result = BundlePricingEngine::default().compute_pricing(&selection("single")?);

    assert_eq!(
        result,
        Err(PricingError::InvalidSelection(
            InvalidSelection::TooFewItems { count: 1 }
        ))
    );

    Ok(())
}

#[test]
fn ultimate_scenario() -> TestResult {
    let quote = BundlePricingEngine::default().compute_pricing(&selection("ultimate")?)?;

    assert_eq!(quote.tier_applied().name(), "Ultimate");
    assert_eq!(quote.discount_percentage(), Decimal::from(25));
    assert_eq!(quote.bundle_price(), Money::from_minor(4500, GBP));
    assert!(quote.next_tier().is_none(), "top tier has no next tier");
    assert_eq!(quote.items_to_next_tier(), 0);

    Ok(())
}

#[test]
fn empty_selection_is_invalid() {
    let result = BundlePricingEngine::default().compute_pricing(&[]);

    assert!(matches!(
        result,
        Err(PricingError::InvalidSelection(
            InvalidSelection::TooFewItems { count: 0 }
        ))
    ));
}

#[test]
fn bundle_price_plus_savings_equals_retail_total() -> TestResult {
    let engine = BundlePricingEngine::default();
    let prices = [1, 5, 33, 99, 101, 333, 999, 1234, 1999, 4999, 12345];

    for count in 2..=8 {
        for offset in 0..prices.len() {
            let items: Vec<_> = prices
                .iter()
                .cycle()
                .skip(offset)
                .take(count)
                .enumerate()
                .map(|(i, minor)| {
                    BundleItem::new(format!("p{i}"), Money::from_minor(*minor, GBP))
                })
                .collect();

            let quote = engine.compute_pricing(&items)?;

            assert_eq!(
                quote.bundle_price().add(quote.savings())?,
                quote.total_retail_price(),
                "count {count}, offset {offset}"
            );
            assert!(
                quote.bundle_price().amount().scale() <= 2,
                "bundle price is rounded to pence"
            );
        }
    }

    Ok(())
}

#[test]
fn sub_penny_prices_still_balance() -> TestResult {
    let items = [
        BundleItem::new("a", Money::from_decimal(Decimal::new(3335, 3), GBP)),
        BundleItem::new("b", Money::from_decimal(Decimal::new(3335, 3), GBP)),
        BundleItem::new("c", Money::from_decimal(Decimal::new(3335, 3), GBP)),
    ];

    let quote = BundlePricingEngine::default().compute_pricing(&items)?;

    // 10.005 * 0.85 = 8.50425 -> 8.50
    assert_eq!(quote.bundle_price(), Money::from_minor(850, GBP));
    assert_eq!(
        quote.savings(),
        Money::from_decimal(Decimal::new(1505, 3), GBP)
    );
    assert_eq!(
        quote.bundle_price().add(quote.savings())?,
        quote.total_retail_price()
    );

    Ok(())
}

#[test]
fn discount_never_decreases_as_items_are_added() -> TestResult {
    let engine = BundlePricingEngine::default();
    let mut previous: Option<(Decimal, Decimal)> = None;

    for count in 2..=10 {
        let quote = engine.compute_pricing(&uniform(count, 2000))?;
        let per_unit = *quote.bundle_price().amount() / Decimal::from(count);

        if let Some((previous_discount, previous_per_unit)) = previous {
            assert!(
                quote.discount_percentage() >= previous_discount,
                "discount dropped at {count} items"
            );
            assert!(
                per_unit <= previous_per_unit,
                "per-unit price rose at {count} items"
            );
        }

        previous = Some((quote.discount_percentage(), per_unit));
    }

    Ok(())
}

#[test]
fn tier_lower_bounds_are_inclusive() -> TestResult {
    let engine = BundlePricingEngine::default();

    for tier in TierTable::standard().tiers() {
        let quote = engine.compute_pricing(&uniform(tier.min_items(), 1000))?;

        assert_eq!(quote.tier_applied(), tier);
    }

    Ok(())
}

#[test]
fn five_or_more_items_reach_ultimate() -> TestResult {
    let engine = BundlePricingEngine::default();

    for count in 5..=12 {
        let quote = engine.compute_pricing(&uniform(count, 500))?;

        assert_eq!(quote.tier_applied().name(), "Ultimate");
        assert_eq!(quote.discount_percentage(), Decimal::from(25));
        assert!(quote.next_tier().is_none(), "no tier above Ultimate");
        assert_eq!(quote.items_to_next_tier(), 0);
    }

    Ok(())
}

#[test]
fn pricing_is_deterministic() -> TestResult {
    let engine = BundlePricingEngine::default();
    let items = selection("pro")?;

    assert_eq!(engine.compute_pricing(&items)?, engine.compute_pricing(&items)?);

    Ok(())
}

#[test]
fn duplicate_ids_are_priced_as_separate_items() -> TestResult {
    let items = [
        BundleItem::new("ebook", Money::from_minor(1000, GBP)),
        BundleItem::new("ebook", Money::from_minor(1000, GBP)),
        BundleItem::new("ebook", Money::from_minor(1000, GBP)),
    ];

    let quote = BundlePricingEngine::default().compute_pricing(&items)?;

    assert_eq!(quote.item_count(), 3);
    assert_eq!(quote.tier_applied().name(), "Value");

    Ok(())
}
