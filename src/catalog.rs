//! Catalog
//!
//! The fixed set of purchasable products. The catalog owns every [`Product`]; everything else
//! refers to products by [`ProductKey`].

use std::{fs, path::Path};

use rustc_hash::FxHashMap;
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use slotmap::SlotMap;
use smallvec::SmallVec;
use thiserror::Error;

use crate::products::{Product, ProductKey};

pub mod fixture;

/// Catalog loading and seeding errors
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error reading a catalog fixture
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Product currency differs from the catalog currency
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(&'static str, &'static str),

    /// Two products share an id
    #[error("Duplicate product id: {0}")]
    DuplicateProduct(u32),

    /// The fixture defined no products
    #[error("Catalog contains no products")]
    Empty,
}

/// Catalog
#[derive(Debug)]
pub struct Catalog<'a> {
    products: SlotMap<ProductKey, Product<'a>>,

    /// Display order, as listed to the user
    listing: SmallVec<[ProductKey; 8]>,

    /// Product id -> key lookups
    ids: FxHashMap<u32, ProductKey>,

    currency: &'a Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'a Currency) -> Self {
        Self {
            products: SlotMap::with_key(),
            listing: SmallVec::new(),
            ids: FxHashMap::default(),
            currency,
        }
    }

    /// Add a product to the end of the listing.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::CurrencyMismatch`]: the product is priced in another currency.
    /// - [`CatalogError::DuplicateProduct`]: a product with the same id already exists.
    pub fn insert(&mut self, product: Product<'a>) -> Result<ProductKey, CatalogError> {
        let product_currency = product.price().currency();

        if product_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                self.currency.iso_alpha_code,
                product_currency.iso_alpha_code,
            ));
        }

        if self.ids.contains_key(&product.id()) {
            return Err(CatalogError::DuplicateProduct(product.id()));
        }

        let id = product.id();
        let key = self.products.insert(product);

        self.listing.push(key);
        self.ids.insert(id, key);

        Ok(key)
    }

    /// Get a product by key.
    pub fn get(&self, key: ProductKey) -> Option<&Product<'a>> {
        self.products.get(key)
    }

    /// Get a mutable product by key, for stock consumption.
    pub fn get_mut(&mut self, key: ProductKey) -> Option<&mut Product<'a>> {
        self.products.get_mut(key)
    }

    /// Look up a product key by product id.
    pub fn key_for_id(&self, id: u32) -> Option<ProductKey> {
        self.ids.get(&id).copied()
    }

    /// Look up a product key by its 1-based position in the listing.
    pub fn key_at(&self, position: usize) -> Option<ProductKey> {
        position
            .checked_sub(1)
            .and_then(|index| self.listing.get(index))
            .copied()
    }

    /// Iterate over products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = (ProductKey, &Product<'a>)> {
        self.listing
            .iter()
            .filter_map(|key| self.products.get(*key).map(|product| (*key, product)))
    }

    /// Number of products in the catalog
    pub fn len(&self) -> usize {
        self.listing.len()
    }

    /// Whether the catalog has no products
    pub fn is_empty(&self) -> bool {
        self.listing.is_empty()
    }

    /// Currency every product is priced in
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }
}

impl Catalog<'static> {
    /// The built-in seed: a laptop and a t-shirt, priced in USD.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the seed products conflict, which they do not.
    pub fn seed() -> Result<Self, CatalogError> {
        let mut catalog = Catalog::new(iso::USD);

        catalog.insert(Product::electronics(
            1,
            "Laptop",
            Money::from_minor(100_000, iso::USD),
            5,
            2,
        ))?;

        catalog.insert(Product::clothing(
            2,
            "T-Shirt",
            Money::from_minor(2000, iso::USD),
            10,
            "M",
        ))?;

        Ok(catalog)
    }

    /// Load a catalog from a YAML fixture file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if the products are invalid.
    pub fn from_fixture_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// Load a catalog from a YAML fixture string.
    ///
    /// The catalog currency is taken from the first product.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be parsed, the catalog is empty, or the products
    /// are invalid.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: fixture::CatalogFixture = serde_norway::from_str(yaml)?;

        let products = fixture
            .products
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let currency = products
            .first()
            .map(|product| product.price().currency())
            .ok_or(CatalogError::Empty)?;

        let mut catalog = Catalog::new(currency);

        for product in products {
            catalog.insert(product)?;
        }

        tracing::debug!(
            products = catalog.len(),
            currency = currency.iso_alpha_code,
            "loaded catalog fixture"
        );

        Ok(catalog)
    }
}
