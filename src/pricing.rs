//! Pricing

use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Errors that can occur while extending or totalling prices.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Multiplying a price by a quantity overflowed the minor unit range.
    #[error("price overflowed when multiplied by quantity {0}")]
    Overflow(u32),

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Multiplies a unit price by a quantity.
///
/// # Errors
///
/// Returns [`PricingError::Overflow`] if the result does not fit in minor units.
pub fn extended_price<'a>(
    unit_price: &Money<'a, Currency>,
    quantity: u32,
) -> Result<Money<'a, Currency>, PricingError> {
    let minor = unit_price
        .to_minor_units()
        .checked_mul(i64::from(quantity))
        .ok_or(PricingError::Overflow(quantity))?;

    Ok(Money::from_minor(minor, unit_price.currency()))
}

/// Calculates the total of a sequence of prices, starting from zero in `currency`.
///
/// # Errors
///
/// - [`PricingError::Money`]: a price is in a different currency.
pub fn total_price<'a, I>(
    currency: &'a Currency,
    prices: I,
) -> Result<Money<'a, Currency>, PricingError>
where
    I: IntoIterator<Item = Money<'a, Currency>>,
{
    let total = prices
        .into_iter()
        .try_fold(Money::from_minor(0, currency), |acc, price| acc.add(price))?;

    Ok(total)
}
