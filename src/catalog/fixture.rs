//! Catalog Fixtures
//!
//! YAML representation of a catalog seed list.

use rust_decimal::{Decimal, prelude::ToPrimitive};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, USD},
};
use serde::Deserialize;

use crate::{
    catalog::CatalogError,
    products::{Category, Product},
};

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Products, in listing order
    pub products: Vec<ProductFixture>,
}

/// Product Fixture
#[derive(Debug, Deserialize)]
pub struct ProductFixture {
    /// Product id
    pub id: u32,

    /// Product name
    pub name: String,

    /// Product price (e.g., "1000 USD")
    pub price: String,

    /// Units in stock
    pub stock: u32,

    /// Category and its attribute
    pub category: CategoryFixture,
}

/// Category fixture from YAML
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CategoryFixture {
    /// Electronics
    Electronics {
        /// Warranty period in months
        warranty_months: u32,
    },

    /// Clothing
    Clothing {
        /// Garment size label
        size: String,
    },
}

impl From<CategoryFixture> for Category {
    fn from(fixture: CategoryFixture) -> Self {
        match fixture {
            CategoryFixture::Electronics { warranty_months } => {
                Category::Electronics { warranty_months }
            }
            CategoryFixture::Clothing { size } => Category::Clothing { size },
        }
    }
}

impl TryFrom<ProductFixture> for Product<'static> {
    type Error = CatalogError;

    fn try_from(fixture: ProductFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        Ok(Product::new(
            fixture.id,
            fixture.name,
            fixture.category.into(),
            Money::from_minor(minor_units, currency),
            fixture.stock,
        ))
    }
}

/// Parse price string (e.g., "2.99 USD") into minor units and currency
///
/// # Errors
///
/// Returns an error if the string is not in the format "AMOUNT CURRENCY", if the amount is
/// negative or not a decimal number, or if the currency code is not recognized.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), CatalogError> {
    let parts: Vec<&str> = s.split_whitespace().collect();

    let [amount, currency_code] = parts.as_slice() else {
        return Err(CatalogError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let amount = amount
        .parse::<Decimal>()
        .map_err(|_err| CatalogError::InvalidPrice(s.to_string()))?;

    if amount.is_sign_negative() {
        return Err(CatalogError::InvalidPrice(s.to_string()));
    }

    let minor_units = amount
        .checked_mul(Decimal::new(100, 0))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| CatalogError::InvalidPrice(s.to_string()))?;

    let currency = match *currency_code {
        "GBP" => GBP,
        "USD" => USD,
        "EUR" => EUR,
        other => return Err(CatalogError::UnknownCurrency(other.to_string())),
    };

    Ok((minor_units, currency))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parse_price_accepts_whole_and_fractional_amounts() -> TestResult {
        assert_eq!(parse_price("1000 USD")?, (100_000, USD));
        assert_eq!(parse_price("2.50 EUR")?, (250, EUR));

        Ok(())
    }

    #[test]
    fn parse_price_rejects_invalid_format() {
        let result = parse_price("2.99USD");

        assert!(matches!(result, Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_negative_amounts() {
        let result = parse_price("-1 USD");

        assert!(matches!(result, Err(CatalogError::InvalidPrice(_))));
    }

    #[test]
    fn parse_price_rejects_unknown_currency() {
        let result = parse_price("2.99 ABC");

        assert!(matches!(result, Err(CatalogError::UnknownCurrency(code)) if code == "ABC"));
    }

    #[test]
    fn product_fixture_converts_category() -> TestResult {
        let fixture = ProductFixture {
            id: 3,
            name: "Tablet".to_string(),
            price: "300 USD".to_string(),
            stock: 2,
            category: CategoryFixture::Electronics {
                warranty_months: 6,
            },
        };

        let product = Product::try_from(fixture)?;

        assert_eq!(
            product.category(),
            &Category::Electronics {
                warranty_months: 6
            }
        );
        assert_eq!(product.price(), &Money::from_minor(30_000, USD));

        Ok(())
    }
}
