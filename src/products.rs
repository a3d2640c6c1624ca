//! Products

use std::fmt;

use decimal_percentage::Percentage;
use rusty_money::{Money, iso::Currency};
use slotmap::new_key_type;
use thiserror::Error;

use crate::discounts::{self, DiscountError};

new_key_type! {
    /// Product Key
    pub struct ProductKey;
}

/// Errors raised when consuming product stock.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// More units were requested than the product has in stock.
    #[error("Product {name} is out of stock.")]
    OutOfStock {
        /// Product name
        name: String,

        /// Units requested
        requested: u32,

        /// Units available at the time of the request
        available: u32,
    },
}

/// Product category, carrying the category-specific attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Electronics, discounted by 10%
    Electronics {
        /// Warranty period in months
        warranty_months: u32,
    },

    /// Clothing, discounted by 15%
    Clothing {
        /// Garment size label
        size: String,
    },
}

impl Category {
    /// Returns the flat discount rate for this category.
    pub fn discount_rate(&self) -> Percentage {
        match self {
            Category::Electronics { .. } => Percentage::from(0.10),
            Category::Clothing { .. } => Percentage::from(0.15),
        }
    }

    /// Returns the category's display name.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Electronics { .. } => "Electronics",
            Category::Clothing { .. } => "Clothing",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Electronics { warranty_months } => {
                write!(f, "{} ({warranty_months} month warranty)", self.name())
            }
            Category::Clothing { size } => write!(f, "{} (size {size})", self.name()),
        }
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product<'a> {
    id: u32,
    name: String,
    category: Category,
    price: Money<'a, Currency>,
    stock: u32,
}

impl<'a> Product<'a> {
    /// Creates a new product.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: Category,
        price: Money<'a, Currency>,
        stock: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category,
            price,
            stock,
        }
    }

    /// Creates a new electronics product.
    pub fn electronics(
        id: u32,
        name: impl Into<String>,
        price: Money<'a, Currency>,
        stock: u32,
        warranty_months: u32,
    ) -> Self {
        Self::new(
            id,
            name,
            Category::Electronics { warranty_months },
            price,
            stock,
        )
    }

    /// Creates a new clothing product.
    pub fn clothing(
        id: u32,
        name: impl Into<String>,
        price: Money<'a, Currency>,
        stock: u32,
        size: impl Into<String>,
    ) -> Self {
        Self::new(
            id,
            name,
            Category::Clothing { size: size.into() },
            price,
            stock,
        )
    }

    /// Product id
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Product name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product category
    pub fn category(&self) -> &Category {
        &self.category
    }

    /// Unit price before discount
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Units remaining in stock
    pub fn stock(&self) -> u32 {
        self.stock
    }

    /// Calculates the per-unit discount for this product's category.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the amount cannot be represented in minor units.
    pub fn discount(&self) -> Result<Money<'a, Currency>, DiscountError> {
        discounts::discount_on(&self.price, &self.category.discount_rate())
    }

    /// Calculates the per-unit price after the category discount.
    ///
    /// # Errors
    ///
    /// Returns a [`DiscountError`] if the discount cannot be calculated.
    pub fn discounted_price(&self) -> Result<Money<'a, Currency>, DiscountError> {
        discounts::discounted_price(&self.price, &self.category.discount_rate())
    }

    /// Removes `quantity` units from stock.
    ///
    /// This is the only way stock changes. A failed call leaves stock untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StockError::OutOfStock`] if `quantity` exceeds the remaining stock.
    pub fn reduce_stock(&mut self, quantity: u32) -> Result<(), StockError> {
        let remaining = self
            .stock
            .checked_sub(quantity)
            .ok_or_else(|| StockError::OutOfStock {
                name: self.name.clone(),
                requested: quantity,
                available: self.stock,
            })?;

        self.stock = remaining;

        Ok(())
    }
}
