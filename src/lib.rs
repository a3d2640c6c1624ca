//! Order Desk
//!
//! An in-memory order desk: a fixed catalog of products with category discounts, orders
//! assembled from available stock, and per-user order history.

pub mod catalog;
pub mod config;
pub mod discounts;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
pub mod receipt;
pub mod session;
pub mod store;
