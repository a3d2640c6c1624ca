//! Order Desk prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{Catalog, CatalogError},
    discounts::DiscountError,
    orders::{LineItem, Order, OrderError, OrderId, OrderStatus, UserId},
    pricing::PricingError,
    products::{Category, Product, ProductKey, StockError},
    receipt::{Receipt, ReceiptError},
    session::{MenuChoice, Session, SessionError},
    store::OrderStore,
};
