//! Order Desk
//!
//! Interactive console for placing orders against the seeded catalog.

use std::{
    io::{self, BufWriter},
    process::ExitCode,
};

use clap::Parser;
use tracing::{error, info};

use order_desk::{config::Config, session::Session, store::OrderStore};

mod observability;

#[expect(clippy::print_stderr, reason = "fatal errors are reported on stderr")]
fn main() -> ExitCode {
    let config = Config::parse();

    if let Err(err) = observability::init_subscriber(&config.logging) {
        eprintln!("{err}");
        return ExitCode::FAILURE;
    }

    let mut catalog = match config.load_catalog() {
        Ok(catalog) => catalog,
        Err(err) => {
            error!(error = %err, "failed to load catalog");
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };

    info!(products = catalog.len(), "catalog ready");

    let mut store = OrderStore::new();
    let stdin = io::stdin();
    let stdout = io::stdout();

    let result = Session::new(
        &mut catalog,
        &mut store,
        stdin.lock(),
        BufWriter::new(stdout.lock()),
    )
    .run();

    match result {
        Ok(()) => {
            info!(orders = store.len(), "session ended");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(error = %err, "session failed");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
