//! Fixtures
//!
//! Catalog fixtures are YAML files under `<base>/catalog/<name>.yml`:
//!
//! ```yaml
//! items:
//!   - id: margherita
//!     name: Margherita Pizza
//!     category: Pizza
//!     price: 10.00 USD
//! ```

use std::{fs, path::Path};

use rusty_money::Money;
use serde::Deserialize;
use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, CatalogItem},
    money::{PriceError, parse_price},
};

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price or currency
    #[error(transparent)]
    Price(#[from] PriceError),

    /// Invalid catalog item or catalog
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// No items in the fixture, so the currency is unknown
    #[error("No items in catalog fixture; currency unknown")]
    NoItems,
}

/// Wrapper for catalog items in YAML
#[derive(Debug, Deserialize)]
pub struct CatalogFixture {
    /// Items in menu order
    pub items: Vec<CatalogItemFixture>,
}

/// Catalog Item Fixture
#[derive(Debug, Deserialize)]
pub struct CatalogItemFixture {
    /// Item identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: String,

    /// Category
    #[serde(default)]
    pub category: String,

    /// Price (e.g., "2.99 USD")
    pub price: String,

    /// Image reference
    #[serde(default)]
    pub image: Option<String>,
}

impl TryFrom<CatalogItemFixture> for CatalogItem<'static> {
    type Error = FixtureError;

    fn try_from(fixture: CatalogItemFixture) -> Result<Self, Self::Error> {
        let (minor_units, currency) = parse_price(&fixture.price)?;

        let item = CatalogItem::new(fixture.id, fixture.name, Money::from_minor(minor_units, currency))?
            .with_description(fixture.description)
            .with_category(fixture.category);

        Ok(match fixture.image {
            Some(image) => item.with_image_ref(image),
            None => item,
        })
    }
}

/// Parse a catalog from YAML.
///
/// The catalog currency is taken from the first item.
///
/// # Errors
///
/// Returns an error if the YAML is malformed, a price is invalid, items disagree on
/// currency, an id repeats, or there are no items.
pub fn parse_catalog(yaml: &str) -> Result<Catalog<'static>, FixtureError> {
    let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

    let items = fixture
        .items
        .into_iter()
        .map(CatalogItem::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    let currency = items
        .first()
        .map(|item| item.price().currency())
        .ok_or(FixtureError::NoItems)?;

    Ok(Catalog::with_items(items, currency)?)
}

/// Load the catalog fixture `<base_path>/catalog/<name>.yml`.
///
/// # Errors
///
/// Returns an error if the file cannot be read or fails to parse (see [`parse_catalog`]).
pub fn load_catalog(base_path: impl AsRef<Path>, name: &str) -> Result<Catalog<'static>, FixtureError> {
    let file_path = base_path.as_ref().join("catalog").join(format!("{name}.yml"));
    let contents = fs::read_to_string(file_path)?;

    parse_catalog(&contents)
}
