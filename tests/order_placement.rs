//! Integration tests for the order placement workflow against the built-in catalog.
//!
//! The seed catalog has:
//!
//! 1. Laptop (Electronics, 10% off) - $1000.00, 5 in stock
//! 2. T-Shirt (Clothing, 15% off) - $20.00, 10 in stock

use rusty_money::{Money, iso::USD};
use testresult::TestResult;

use order_desk::prelude::*;

#[test]
fn laptop_pair_subtotal_and_remaining_stock() -> TestResult {
    let mut catalog = Catalog::seed()?;
    let mut store = OrderStore::new();
    let laptop = catalog.key_at(1).ok_or("missing laptop")?;

    let mut order = store.begin_order(1, catalog.currency());
    order.add_product(&mut catalog, laptop, 2)?;

    let line = order.line_items().first().ok_or("missing line item")?;

    // (1000 - 100) * 2
    assert_eq!(line.subtotal(), Money::from_minor(180_000, USD));
    assert_eq!(catalog.get(laptop).map(Product::stock), Some(3));

    Ok(())
}

#[test]
fn t_shirt_overorder_fails_without_side_effects() -> TestResult {
    let mut catalog = Catalog::seed()?;
    let mut store = OrderStore::new();
    let t_shirt = catalog.key_at(2).ok_or("missing t-shirt")?;

    let mut order = store.begin_order(1, catalog.currency());
    let result = order.add_product(&mut catalog, t_shirt, 12);

    match result {
        Err(OrderError::OutOfStock(StockError::OutOfStock {
            requested,
            available,
            ..
        })) => {
            assert_eq!(requested, 12);
            assert_eq!(available, 10);
        }
        other => panic!("expected OutOfStock error, got {other:?}"),
    }

    assert_eq!(catalog.get(t_shirt).map(Product::stock), Some(10));
    assert!(order.is_empty());
    assert_eq!(order.total()?, Money::from_minor(0, USD));

    Ok(())
}

#[test]
fn repeat_purchase_overwrites_user_history() -> TestResult {
    let mut catalog = Catalog::seed()?;
    let mut store = OrderStore::new();
    let laptop = catalog.key_at(1).ok_or("missing laptop")?;
    let t_shirt = catalog.key_at(2).ok_or("missing t-shirt")?;

    let mut first = store.begin_order(42, catalog.currency());
    first.add_product(&mut catalog, laptop, 1)?;
    assert_eq!(store.place(first).total()?, Money::from_minor(90_000, USD));

    let mut second = store.begin_order(42, catalog.currency());
    second.add_product(&mut catalog, t_shirt, 1)?;
    store.place(second);

    // History holds only the latest order; the first is still kept in the full order list.
    let latest = store.latest_for_user(42).ok_or("missing history")?;

    assert_eq!(latest.total()?, Money::from_minor(1700, USD));
    assert_eq!(latest.id(), 2);
    assert_eq!(store.orders().len(), 2);

    Ok(())
}

#[test]
fn total_equals_sum_of_line_subtotals() -> TestResult {
    let mut catalog = Catalog::seed()?;
    let mut store = OrderStore::new();
    let laptop = catalog.key_at(1).ok_or("missing laptop")?;
    let t_shirt = catalog.key_at(2).ok_or("missing t-shirt")?;

    let mut order = store.begin_order(9, catalog.currency());
    order.add_product(&mut catalog, t_shirt, 3)?;
    order.add_product(&mut catalog, laptop, 1)?;
    order.add_product(&mut catalog, t_shirt, 7)?;

    let expected = order
        .line_items()
        .iter()
        .map(LineItem::subtotal)
        .map(|money| money.to_minor_units())
        .sum::<i64>();

    assert_eq!(order.total()?.to_minor_units(), expected);
    assert_eq!(expected, 5100 + 90_000 + 11_900);
    assert_eq!(catalog.get(t_shirt).map(Product::stock), Some(0));

    Ok(())
}

#[test]
fn stock_is_shared_across_orders() -> TestResult {
    let mut catalog = Catalog::seed()?;
    let mut store = OrderStore::new();
    let laptop = catalog.key_at(1).ok_or("missing laptop")?;

    let mut first = store.begin_order(1, catalog.currency());
    first.add_product(&mut catalog, laptop, 4)?;
    store.place(first);

    let mut second = store.begin_order(2, catalog.currency());

    assert!(matches!(
        second.add_product(&mut catalog, laptop, 2),
        Err(OrderError::OutOfStock(_))
    ));

    second.add_product(&mut catalog, laptop, 1)?;

    assert_eq!(catalog.get(laptop).map(Product::stock), Some(0));

    Ok(())
}

#[test]
fn placed_orders_are_read_only() -> TestResult {
    let mut catalog = Catalog::seed()?;
    let mut store = OrderStore::new();

    let order = store.begin_order(5, catalog.currency());
    let mut copy = store.place(order).clone();

    let laptop = catalog.key_at(1).ok_or("missing laptop")?;

    assert_eq!(copy.status(), OrderStatus::Placed);
    assert!(matches!(
        copy.add_product(&mut catalog, laptop, 1),
        Err(OrderError::AlreadyPlaced(1))
    ));
    assert_eq!(catalog.get(laptop).map(Product::stock), Some(5));

    Ok(())
}

#[test]
fn bundled_fixture_matches_built_in_seed() -> TestResult {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/catalog/default.yml");
    let fixture = Catalog::from_fixture_file(path)?;
    let seed = Catalog::seed()?;

    let listed = |catalog: &Catalog<'static>| {
        catalog
            .iter()
            .map(|(_, product)| (product.id(), product.name().to_string(), *product.price()))
            .collect::<Vec<_>>()
    };

    assert_eq!(listed(&fixture), listed(&seed));

    Ok(())
}
