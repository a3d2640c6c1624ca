//! Order Store
//!
//! Every placed order, plus the per-user history used by order lookups.

use rusty_money::iso::Currency;
use rustc_hash::FxHashMap;
use tracing::info;

use crate::orders::{Order, OrderId, UserId};

/// Order Store
#[derive(Debug, Default)]
pub struct OrderStore<'a> {
    orders: Vec<Order<'a>>,

    /// User id -> index into `orders` of that user's most recent order.
    ///
    /// A repeat purchase replaces the entry, so earlier orders are only reachable
    /// through [`OrderStore::orders`].
    history: FxHashMap<UserId, usize>,

    next_order_id: OrderId,
}

impl<'a> OrderStore<'a> {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            orders: Vec::new(),
            history: FxHashMap::default(),
            next_order_id: 1,
        }
    }

    /// Start collecting a new order for `user_id` under a fresh order id.
    pub fn begin_order(&mut self, user_id: UserId, currency: &'a Currency) -> Order<'a> {
        let id = self.next_order_id.max(1);

        self.next_order_id = id.saturating_add(1);

        Order::new(id, user_id, currency)
    }

    /// Place an order: freeze it, record it, and make it the user's latest order.
    pub fn place(&mut self, mut order: Order<'a>) -> &Order<'a> {
        order.mark_placed();

        let index = self.orders.len();
        let user_id = order.user_id();

        info!(
            order_id = order.id(),
            user_id,
            line_items = order.len(),
            "order placed"
        );

        self.history.insert(user_id, index);
        self.orders.push(order);

        match self.orders.last() {
            Some(placed) => placed,
            None => unreachable!("an order was pushed above"),
        }
    }

    /// The most recently placed order for `user_id`.
    pub fn latest_for_user(&self, user_id: UserId) -> Option<&Order<'a>> {
        self.history
            .get(&user_id)
            .and_then(|index| self.orders.get(*index))
    }

    /// Every placed order for `user_id`, oldest first.
    pub fn orders_for_user(&self, user_id: UserId) -> impl Iterator<Item = &Order<'a>> {
        self.orders
            .iter()
            .filter(move |order| order.user_id() == user_id)
    }

    /// All placed orders, oldest first.
    pub fn orders(&self) -> &[Order<'a>] {
        &self.orders
    }

    /// Number of placed orders
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether no orders have been placed
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{catalog::Catalog, orders::OrderStatus};

    use super::*;

    #[test]
    fn begin_order_assigns_sequential_ids() {
        let mut store = OrderStore::new();

        let first = store.begin_order(7, USD);
        let second = store.begin_order(8, USD);

        assert_eq!(first.id(), 1);
        assert_eq!(second.id(), 2);
        assert_eq!(second.user_id(), 8);
        assert_eq!(first.status(), OrderStatus::Collecting);
    }

    #[test]
    fn default_store_still_starts_at_one() {
        let mut store = OrderStore::default();

        assert_eq!(store.begin_order(1, USD).id(), 1);
    }

    #[test]
    fn place_records_order_and_marks_it_placed() -> TestResult {
        let mut catalog = Catalog::seed()?;
        let mut store = OrderStore::new();
        let laptop = catalog.key_at(1).ok_or("missing laptop")?;

        let mut order = store.begin_order(7, catalog.currency());
        order.add_product(&mut catalog, laptop, 1)?;

        let placed = store.place(order);

        assert_eq!(placed.status(), OrderStatus::Placed);
        assert_eq!(placed.total()?, Money::from_minor(90_000, USD));
        assert_eq!(store.len(), 1);

        Ok(())
    }

    #[test]
    fn history_keeps_only_latest_order_per_user() -> TestResult {
        let mut catalog = Catalog::seed()?;
        let mut store = OrderStore::new();
        let laptop = catalog.key_at(1).ok_or("missing laptop")?;
        let t_shirt = catalog.key_at(2).ok_or("missing t-shirt")?;

        let mut first = store.begin_order(7, catalog.currency());
        first.add_product(&mut catalog, laptop, 1)?;
        store.place(first);

        let mut second = store.begin_order(7, catalog.currency());
        second.add_product(&mut catalog, t_shirt, 1)?;
        store.place(second);

        let latest = store.latest_for_user(7).ok_or("missing history")?;

        assert_eq!(latest.total()?, Money::from_minor(1700, USD));
        assert_eq!(store.orders_for_user(7).count(), 2);
        assert_eq!(store.orders().len(), 2);

        Ok(())
    }

    #[test]
    fn latest_for_unknown_user_is_none() {
        let store = OrderStore::new();

        assert!(store.latest_for_user(99).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn empty_orders_are_recorded() -> TestResult {
        let mut store = OrderStore::new();

        let order = store.begin_order(3, USD);
        store.place(order);

        let latest = store.latest_for_user(3).ok_or("missing history")?;

        assert_eq!(latest.total()?, Money::from_minor(0, USD));

        Ok(())
    }
}
