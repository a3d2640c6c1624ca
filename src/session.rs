//! Session
//!
//! The console command loop: place orders, look up order history, exit.
//!
//! Input is read a line at a time. Malformed numbers and out-of-range product choices are
//! re-prompted here so the order types only ever see valid product keys.

use std::{
    io::{self, BufRead, Write},
    str::FromStr,
};

use thiserror::Error;
use tracing::debug;

use crate::{
    catalog::Catalog,
    orders::{Order, OrderError, UserId},
    products::ProductKey,
    receipt::{Receipt, ReceiptError},
    store::OrderStore,
};

/// Errors that end a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading input or writing output failed.
    #[error("console IO failed: {0}")]
    Io(#[from] io::Error),

    /// An order error the user cannot recover from.
    #[error(transparent)]
    Order(#[from] OrderError),

    /// The receipt could not be produced.
    #[error(transparent)]
    Receipt(#[from] ReceiptError),
}

/// A menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Place a new order
    PlaceOrder,

    /// Show the latest order total for a user
    ViewOrderHistory,

    /// Leave the session
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" => Ok(MenuChoice::PlaceOrder),
            "2" => Ok(MenuChoice::ViewOrderHistory),
            "3" => Ok(MenuChoice::Exit),
            _ => Err(()),
        }
    }
}

/// Interactive session over a catalog and an order store.
#[derive(Debug)]
pub struct Session<'s, 'a, R, W> {
    catalog: &'s mut Catalog<'a>,
    store: &'s mut OrderStore<'a>,
    input: R,
    output: W,
}

impl<'s, 'a, R: BufRead, W: Write> Session<'s, 'a, R, W> {
    /// Create a session reading commands from `input` and writing prompts to `output`.
    pub fn new(
        catalog: &'s mut Catalog<'a>,
        store: &'s mut OrderStore<'a>,
        input: R,
        output: W,
    ) -> Self {
        Self {
            catalog,
            store,
            input,
            output,
        }
    }

    /// Run the menu loop until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the console fails or an order cannot be priced.
    pub fn run(&mut self) -> Result<(), SessionError> {
        loop {
            writeln!(self.output, "1. Place Order\n2. View Order History\n3. Exit")?;

            let Some(line) = self.read_line()? else {
                return Ok(());
            };

            match line.parse::<MenuChoice>() {
                Ok(MenuChoice::PlaceOrder) => self.place_order()?,
                Ok(MenuChoice::ViewOrderHistory) => self.view_order_history()?,
                Ok(MenuChoice::Exit) => return Ok(()),
                Err(()) => writeln!(self.output, "Invalid choice.")?,
            }
        }
    }

    /// Collect line items for one user and place the order.
    ///
    /// If input ends part way through, whatever has been collected is placed, and an order
    /// with no line items is dropped.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the console fails or an order cannot be priced.
    pub fn place_order(&mut self) -> Result<(), SessionError> {
        let Some(user_id) = self.prompt_number::<UserId>("Enter User ID:")? else {
            return Ok(());
        };

        let mut order = self.store.begin_order(user_id, self.catalog.currency());

        let finished = self.collect_line_items(&mut order)?;

        if !finished && order.is_empty() {
            debug!(order_id = order.id(), user_id, "input ended; empty order dropped");
            return Ok(());
        }

        let placed = self.store.place(order);
        let receipt = Receipt::from_order(placed, self.catalog)?;

        writeln!(
            self.output,
            "Order placed successfully. Total: {}",
            receipt.total()
        )?;

        receipt.write_to(&mut self.output)?;

        Ok(())
    }

    /// Print the latest order total recorded for a user.
    ///
    /// # Errors
    ///
    /// Returns a [`SessionError`] if the console fails or the order cannot be totalled.
    pub fn view_order_history(&mut self) -> Result<(), SessionError> {
        let Some(user_id) = self.prompt_number::<UserId>("Enter User ID:")? else {
            return Ok(());
        };

        match self.store.latest_for_user(user_id) {
            Some(order) => {
                let total = order.total()?;
                writeln!(self.output, "Total: {total}")?;
            }
            None => writeln!(self.output, "No order history found.")?,
        }

        Ok(())
    }

    /// Returns `false` if input ended before the user finished.
    fn collect_line_items(&mut self, order: &mut Order<'a>) -> Result<bool, SessionError> {
        loop {
            let Some(key) = self.prompt_product()? else {
                return Ok(false);
            };

            let Some(quantity) = self.prompt_number::<u32>("Enter Quantity:")? else {
                return Ok(false);
            };

            match order.add_product(self.catalog, key, quantity) {
                Ok(()) => {}
                Err(err) if err.is_rejected_request() => writeln!(self.output, "{err}")?,
                Err(err) => return Err(err.into()),
            }

            writeln!(self.output, "Add more items? (yes/no)")?;

            match self.read_line()? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("yes") => {}
                Some(_) => return Ok(true),
                None => return Ok(false),
            }
        }
    }

    fn prompt_product(&mut self) -> Result<Option<ProductKey>, SessionError> {
        loop {
            writeln!(self.output, "Select Product:")?;

            for (position, (_, product)) in self.catalog.iter().enumerate() {
                writeln!(
                    self.output,
                    "{}. {} - {}",
                    position + 1,
                    product.name(),
                    product.price()
                )?;
            }

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            match line.trim().parse::<usize>().ok().and_then(|n| self.catalog.key_at(n)) {
                Some(key) => return Ok(Some(key)),
                None => writeln!(self.output, "Invalid product selection.")?,
            }
        }
    }

    fn prompt_number<T: FromStr>(&mut self, prompt: &str) -> Result<Option<T>, SessionError> {
        loop {
            writeln!(self.output, "{prompt}")?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            if let Ok(value) = line.trim().parse::<T>() {
                return Ok(Some(value));
            }

            writeln!(self.output, "Please enter a valid number.")?;
        }
    }

    /// Next input line, or `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>, SessionError> {
        self.output.flush()?;

        let mut line = String::new();

        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        Ok(Some(line))
    }
}
