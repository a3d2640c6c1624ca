//! Discounts
//!
//! Percentage discount arithmetic shared by the product categories.

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{Money, MoneyError, iso::Currency};
use thiserror::Error;

/// Category discount errors
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    /// The discount does not fit in minor units.
    #[error("discount amount out of range")]
    PercentConversion,

    /// Money arithmetic failed.
    #[error(transparent)]
    Money(#[from] MoneyError),
}

/// Calculate the discount amount on a price for a percentage.
///
/// The amount is rounded to the currency's minor units, midpoint away from zero.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the amount cannot be represented in minor units.
pub fn discount_on<'a>(
    price: &Money<'a, Currency>,
    percent: &Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let discount_minor = percent_of_minor(percent, price.to_minor_units())?;

    Ok(Money::from_minor(discount_minor, price.currency()))
}

/// Subtract a percentage discount from a price.
///
/// # Errors
///
/// Returns an error if the discount cannot be calculated or subtracted.
pub fn discounted_price<'a>(
    price: &Money<'a, Currency>,
    percent: &Percentage,
) -> Result<Money<'a, Currency>, DiscountError> {
    let discount = discount_on(price, percent)?;

    Ok(price.sub(discount)?)
}

/// `percent` of an amount given in minor units, rounded to a whole minor unit.
///
/// # Errors
///
/// Returns [`DiscountError::PercentConversion`] if the product overflows.
pub fn percent_of_minor(percent: &Percentage, minor: i64) -> Result<i64, DiscountError> {
    let minor = Decimal::from_i64(minor).ok_or(DiscountError::PercentConversion)?;

    ((*percent) * Decimal::ONE) // the percentage type keeps its Decimal private
        .checked_mul(minor)
        .ok_or(DiscountError::PercentConversion)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or(DiscountError::PercentConversion)
}
