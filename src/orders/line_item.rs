//! Line Items
//!
//! A line item binds one product and a quantity to an order. Building a line item is what
//! consumes stock, so a line item only exists if the stock was available.

use rusty_money::{Money, iso::Currency};
use tracing::{debug, warn};

use crate::{
    orders::{OrderError, OrderId},
    pricing,
    products::{Product, ProductKey},
};

/// An immutable order line, priced at the moment it was created.
#[derive(Debug, Clone, PartialEq)]
pub struct LineItem<'a> {
    id: u32,
    order_id: OrderId,
    product: ProductKey,
    product_id: u32,
    quantity: u32,
    unit_price: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    subtotal: Money<'a, Currency>,
}

impl<'a> LineItem<'a> {
    /// Prices `quantity` units of `product` and takes them out of stock.
    ///
    /// The price and discount are read once, here. Nothing is taken from stock unless the
    /// whole line can be built.
    ///
    /// # Errors
    ///
    /// - [`OrderError::InvalidQuantity`]: `quantity` is zero.
    /// - [`OrderError::OutOfStock`]: the product has fewer than `quantity` units left.
    /// - [`OrderError::Discount`] / [`OrderError::Pricing`] / [`OrderError::Money`]: the
    ///   subtotal cannot be represented.
    pub fn new(
        id: u32,
        order_id: OrderId,
        key: ProductKey,
        product: &mut Product<'a>,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity);
        }

        let unit_price = *product.price();
        let discount = product.discount()?;
        let subtotal = pricing::extended_price(&unit_price.sub(discount)?, quantity)?;

        product.reduce_stock(quantity).inspect_err(|err| {
            warn!(
                order_id,
                product_id = product.id(),
                requested = quantity,
                available = product.stock(),
                "{err}"
            );
        })?;

        debug!(
            order_id,
            line_item_id = id,
            product_id = product.id(),
            quantity,
            subtotal = %subtotal,
            remaining_stock = product.stock(),
            "line item created"
        );

        Ok(Self {
            id,
            order_id,
            product: key,
            product_id: product.id(),
            quantity,
            unit_price,
            discount,
            subtotal,
        })
    }

    /// Line item id, unique within its order
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Id of the owning order
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// Catalog key of the product
    pub fn product(&self) -> ProductKey {
        self.product
    }

    /// Id of the product
    pub fn product_id(&self) -> u32 {
        self.product_id
    }

    /// Units ordered
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price when the line was created
    pub fn unit_price(&self) -> Money<'a, Currency> {
        self.unit_price
    }

    /// Per-unit discount when the line was created
    pub fn discount(&self) -> Money<'a, Currency> {
        self.discount
    }

    /// Discounted unit price times quantity
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }
}
