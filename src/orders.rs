//! Orders

use std::fmt;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use thiserror::Error;

use crate::{
    catalog::Catalog,
    discounts::DiscountError,
    pricing::{PricingError, total_price},
    products::{ProductKey, StockError},
};

pub mod line_item;

pub use line_item::LineItem;

/// Order identifier
pub type OrderId = u32;

/// User identifier
pub type UserId = u32;

/// Errors raised while building or pricing an order.
#[derive(Debug, Error)]
pub enum OrderError {
    /// Not enough stock to build the line item.
    #[error(transparent)]
    OutOfStock(#[from] StockError),

    /// Line items must order at least one unit.
    #[error("Quantity must be at least 1.")]
    InvalidQuantity,

    /// The order has been placed and can no longer change.
    #[error("Order {0} has already been placed.")]
    AlreadyPlaced(OrderId),

    /// The product key does not belong to the catalog.
    #[error("Product not found: {0:?}")]
    ProductNotFound(ProductKey),

    /// Discount calculation failed.
    #[error(transparent)]
    Discount(#[from] DiscountError),

    /// Extending or totalling prices failed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

impl OrderError {
    /// Whether the user can recover by choosing a different product or quantity.
    pub fn is_rejected_request(&self) -> bool {
        matches!(
            self,
            OrderError::OutOfStock(_) | OrderError::InvalidQuantity
        )
    }
}

/// Where an order is in the placement workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    /// Line items are still being added.
    Collecting,

    /// The order has been recorded and is immutable.
    Placed,
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderStatus::Collecting => f.write_str("collecting"),
            OrderStatus::Placed => f.write_str("placed"),
        }
    }
}

/// Order
#[derive(Debug, Clone)]
pub struct Order<'a> {
    id: OrderId,
    user_id: UserId,
    status: OrderStatus,
    line_items: SmallVec<[LineItem<'a>; 4]>,
    currency: &'a Currency,
}

impl<'a> Order<'a> {
    /// Start a new order for `user_id`.
    pub fn new(id: OrderId, user_id: UserId, currency: &'a Currency) -> Self {
        Self {
            id,
            user_id,
            status: OrderStatus::Collecting,
            line_items: SmallVec::new(),
            currency,
        }
    }

    /// Append a line item. Duplicate products are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::AlreadyPlaced`] once the order has been placed.
    pub fn add_line_item(&mut self, line_item: LineItem<'a>) -> Result<(), OrderError> {
        self.ensure_collecting()?;

        self.line_items.push(line_item);

        Ok(())
    }

    /// Build the next line item from a catalog product and append it.
    ///
    /// # Errors
    ///
    /// - [`OrderError::AlreadyPlaced`]: the order has been placed; no stock is taken.
    /// - [`OrderError::ProductNotFound`]: `key` is not in the catalog.
    /// - Any error from [`LineItem::new`], in which case the order is unchanged.
    pub fn add_product(
        &mut self,
        catalog: &mut Catalog<'a>,
        key: ProductKey,
        quantity: u32,
    ) -> Result<(), OrderError> {
        self.ensure_collecting()?;

        let product = catalog
            .get_mut(key)
            .ok_or(OrderError::ProductNotFound(key))?;

        let line_item = LineItem::new(self.next_line_id(), self.id, key, product, quantity)?;

        self.line_items.push(line_item);

        Ok(())
    }

    /// Sum of line item subtotals, zero for an empty order.
    ///
    /// # Errors
    ///
    /// Returns [`OrderError::Pricing`] if a subtotal is in a different currency.
    pub fn total(&self) -> Result<Money<'a, Currency>, OrderError> {
        Ok(total_price(
            self.currency,
            self.line_items.iter().map(LineItem::subtotal),
        )?)
    }

    /// Order id
    pub fn id(&self) -> OrderId {
        self.id
    }

    /// Id of the user who placed the order
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Workflow status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Line items in the order they were added
    pub fn line_items(&self) -> &[LineItem<'a>] {
        &self.line_items
    }

    /// Number of line items
    pub fn len(&self) -> usize {
        self.line_items.len()
    }

    /// Whether the order has no line items
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }

    /// Currency the order is priced in
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    pub(crate) fn mark_placed(&mut self) {
        self.status = OrderStatus::Placed;
    }

    fn ensure_collecting(&self) -> Result<(), OrderError> {
        match self.status {
            OrderStatus::Collecting => Ok(()),
            OrderStatus::Placed => Err(OrderError::AlreadyPlaced(self.id)),
        }
    }

    fn next_line_id(&self) -> u32 {
        u32::try_from(self.line_items.len()).map_or(u32::MAX, |count| count.saturating_add(1))
    }
}
