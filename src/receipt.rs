//! Receipt

use std::io;

use rusty_money::{Money, MoneyError, iso::Currency};
use smallvec::SmallVec;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    catalog::Catalog,
    orders::{Order, OrderError, OrderId, UserId},
    pricing::{PricingError, extended_price, total_price},
    products::ProductKey,
};

/// Errors that can occur when building or writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// A line item refers to a product the catalog does not have.
    #[error("Missing product")]
    MissingProduct(ProductKey),

    /// Error totalling the order.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// Error extending line prices.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// IO error
    #[error("IO error")]
    IO,
}

/// One printed receipt row.
#[derive(Debug, Clone)]
pub struct ReceiptLine<'a> {
    name: String,
    category: String,
    unit_price: Money<'a, Currency>,
    discount: Money<'a, Currency>,
    quantity: u32,
    subtotal: Money<'a, Currency>,
}

/// Receipt for a placed order.
#[derive(Debug, Clone)]
pub struct Receipt<'a> {
    order_id: OrderId,
    user_id: UserId,
    lines: SmallVec<[ReceiptLine<'a>; 4]>,

    /// Total cost before category discounts
    subtotal: Money<'a, Currency>,

    /// Total amount payable
    total: Money<'a, Currency>,
}

impl<'a> Receipt<'a> {
    /// Build a receipt for `order`, naming products from `catalog`.
    ///
    /// # Errors
    ///
    /// Returns an error if a product is missing from the catalog or the prices cannot be totalled.
    pub fn from_order(order: &Order<'a>, catalog: &Catalog<'a>) -> Result<Self, ReceiptError> {
        let lines = order
            .line_items()
            .iter()
            .map(|line| {
                let product = catalog
                    .get(line.product())
                    .ok_or(ReceiptError::MissingProduct(line.product()))?;

                Ok(ReceiptLine {
                    name: product.name().to_string(),
                    category: product.category().to_string(),
                    unit_price: line.unit_price(),
                    discount: line.discount(),
                    quantity: line.quantity(),
                    subtotal: line.subtotal(),
                })
            })
            .collect::<Result<SmallVec<[ReceiptLine<'a>; 4]>, ReceiptError>>()?;

        let full_prices = lines
            .iter()
            .map(|line| extended_price(&line.unit_price, line.quantity))
            .collect::<Result<SmallVec<[Money<'a, Currency>; 4]>, PricingError>>()?;

        Ok(Self {
            order_id: order.id(),
            user_id: order.user_id(),
            lines,
            subtotal: total_price(order.currency(), full_prices)?,
            total: order.total()?,
        })
    }

    /// Order the receipt is for
    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    /// User who placed the order
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Number of printed lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the receipt has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total cost before category discounts
    pub fn subtotal(&self) -> Money<'a, Currency> {
        self.subtotal
    }

    /// Total amount payable
    pub fn total(&self) -> Money<'a, Currency> {
        self.total
    }

    /// Calculate the savings made by category discounts.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] if the subtraction operation fails.
    pub fn savings(&self) -> Result<Money<'a, Currency>, MoneyError> {
        self.subtotal.sub(self.total)
    }

    /// Writes the receipt table and summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the receipt cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        let mut builder = Builder::default();

        builder.push_record([
            "", "Item", "Category", "Price", "Discount", "Qty", "Subtotal",
        ]);

        for (idx, line) in self.lines.iter().enumerate() {
            builder.push_record([
                format!("#{:<3}", idx + 1),
                line.name.clone(),
                line.category.clone(),
                format!("{}", line.unit_price),
                format!("-{}", line.discount),
                line.quantity.to_string(),
                format!("{}", line.subtotal),
            ]);
        }

        write_receipt_table(&mut out, builder)?;

        write_receipt_summary(&mut out, self)
    }
}

fn write_receipt_table(out: &mut impl io::Write, builder: Builder) -> Result<(), ReceiptError> {
    let mut table = builder.build();
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    table.with(theme);
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(3..7), Alignment::right());

    writeln!(out, "\n{table}").map_err(|_err| ReceiptError::IO)
}

fn write_receipt_summary(
    out: &mut impl io::Write,
    receipt: &Receipt<'_>,
) -> Result<(), ReceiptError> {
    let rows = [
        ("Subtotal:", format!("{}", receipt.subtotal())),
        ("Discounts:", format!("-{}", receipt.savings()?)),
        ("Total:", format!("{}", receipt.total())),
    ];

    let label_width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let value_width = rows.iter().map(|(_, value)| value.len()).max().unwrap_or(0);

    for (label, value) in rows {
        writeln!(out, " {label:>label_width$}  {value:>value_width$}")
            .map_err(|_err| ReceiptError::IO)?;
    }

    writeln!(out).map_err(|_err| ReceiptError::IO)
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::USD;
    use testresult::TestResult;

    use crate::store::OrderStore;

    use super::*;

    fn placed_receipt() -> Result<Receipt<'static>, Box<dyn std::error::Error>> {
        let mut catalog = Catalog::seed()?;
        let mut store = OrderStore::new();
        let laptop = catalog.key_at(1).ok_or("missing laptop")?;
        let t_shirt = catalog.key_at(2).ok_or("missing t-shirt")?;

        let mut order = store.begin_order(5, catalog.currency());
        order.add_product(&mut catalog, laptop, 2)?;
        order.add_product(&mut catalog, t_shirt, 1)?;

        let placed = store.place(order);

        Ok(Receipt::from_order(placed, &catalog)?)
    }

    #[test]
    fn from_order_totals_full_and_discounted_prices() -> TestResult {
        let receipt = placed_receipt()?;

        assert_eq!(receipt.len(), 2);
        assert_eq!(receipt.order_id(), 1);
        assert_eq!(receipt.user_id(), 5);
        assert_eq!(receipt.subtotal(), Money::from_minor(202_000, USD));
        assert_eq!(receipt.total(), Money::from_minor(181_700, USD));
        assert_eq!(receipt.savings()?, Money::from_minor(20_300, USD));

        Ok(())
    }

    #[test]
    fn from_order_errors_on_missing_product() -> TestResult {
        let mut catalog = Catalog::seed()?;
        let other = Catalog::new(USD);
        let mut store = OrderStore::new();
        let laptop = catalog.key_at(1).ok_or("missing laptop")?;

        let mut order = store.begin_order(5, catalog.currency());
        order.add_product(&mut catalog, laptop, 1)?;

        let result = Receipt::from_order(&order, &other);

        assert!(matches!(result, Err(ReceiptError::MissingProduct(key)) if key == laptop));

        Ok(())
    }

    #[test]
    fn write_to_renders_lines_and_summary() -> TestResult {
        let receipt = placed_receipt()?;
        let mut out = Vec::new();

        receipt.write_to(&mut out)?;

        let rendered = String::from_utf8(out)?;

        assert!(rendered.contains("Laptop"), "missing laptop row: {rendered}");
        assert!(rendered.contains("T-Shirt"), "missing t-shirt row: {rendered}");
        assert!(rendered.contains("Clothing (size M)"), "missing category: {rendered}");
        assert!(rendered.contains("Total:"), "missing total: {rendered}");
        assert!(rendered.contains("Discounts:"), "missing savings: {rendered}");

        Ok(())
    }

    #[test]
    fn write_to_handles_empty_orders() -> TestResult {
        let catalog = Catalog::seed()?;
        let order = Order::new(1, 1, catalog.currency());
        let receipt = Receipt::from_order(&order, &catalog)?;
        let mut out = Vec::new();

        receipt.write_to(&mut out)?;

        assert!(receipt.is_empty());
        assert!(String::from_utf8(out)?.contains("Total:"));

        Ok(())
    }
}
