//! Catalog

use std::fmt::{Display, Formatter, Result as FmtResult};

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Catalog item identifier, as issued by the catalog read API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Errors raised when building catalog items.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Items must carry a non-empty identifier.
    #[error("catalog item id must not be empty")]
    EmptyId,

    /// Prices can't be below zero.
    #[error("catalog item {0} has a negative price")]
    NegativePrice(ItemId),

    /// Every item in a catalog must share the catalog currency (item, item currency, catalog currency).
    #[error("item {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(ItemId, &'static str, &'static str),

    /// Two items share an identifier.
    #[error("duplicate catalog item id: {0}")]
    DuplicateId(ItemId),
}

/// A purchasable item as fetched from the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogItem<'a> {
    id: ItemId,
    name: String,
    description: String,
    category: String,
    price: Money<'a, Currency>,
    image_ref: Option<String>,
}

impl<'a> CatalogItem<'a> {
    /// Create a catalog item with the minimum fields the cart needs.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyId`] for a blank id and [`CatalogError::NegativePrice`]
    /// when the price is below zero.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money<'a, Currency>,
    ) -> Result<Self, CatalogError> {
        let id = id.into();

        if id.as_str().trim().is_empty() {
            return Err(CatalogError::EmptyId);
        }

        if price.to_minor_units() < 0 {
            return Err(CatalogError::NegativePrice(id));
        }

        Ok(Self {
            id,
            name: name.into(),
            description: String::new(),
            category: String::new(),
            price,
            image_ref: None,
        })
    }

    /// Set the item description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the item category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the display image reference.
    #[must_use]
    pub fn with_image_ref(mut self, image_ref: impl Into<String>) -> Self {
        self.image_ref = Some(image_ref.into());
        self
    }

    /// Item identifier
    pub fn id(&self) -> &ItemId {
        &self.id
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Description
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Category
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Unit price
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Optional display image reference
    pub fn image_ref(&self) -> Option<&str> {
        self.image_ref.as_deref()
    }
}

/// An ordered, single-currency set of catalog items.
#[derive(Debug, Clone)]
pub struct Catalog<'a> {
    items: Vec<CatalogItem<'a>>,
    index: FxHashMap<ItemId, usize>,
    currency: &'static Currency,
}

impl<'a> Catalog<'a> {
    /// Create an empty catalog.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            items: Vec::new(),
            index: FxHashMap::default(),
            currency,
        }
    }

    /// Create a catalog from the given items, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on a currency mismatch or a duplicated id.
    pub fn with_items(
        items: impl IntoIterator<Item = CatalogItem<'a>>,
        currency: &'static Currency,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(currency);

        items
            .into_iter()
            .try_for_each(|item| catalog.insert(item))?;

        Ok(catalog)
    }

    /// Append an item.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] on a currency mismatch or a duplicated id.
    pub fn insert(&mut self, item: CatalogItem<'a>) -> Result<(), CatalogError> {
        let item_currency = item.price().currency();

        if item_currency != self.currency {
            return Err(CatalogError::CurrencyMismatch(
                item.id.clone(),
                item_currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        if self.index.contains_key(&item.id) {
            return Err(CatalogError::DuplicateId(item.id));
        }

        self.index.insert(item.id.clone(), self.items.len());
        self.items.push(item);

        Ok(())
    }

    /// Look up an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&CatalogItem<'a>> {
        self.index.get(id).and_then(|&idx| self.items.get(idx))
    }

    /// Items in the given category, case-insensitively.
    pub fn by_category<'c>(
        &'c self,
        category: &'c str,
    ) -> impl Iterator<Item = &'c CatalogItem<'a>> + 'c {
        self.items
            .iter()
            .filter(move |item| item.category.eq_ignore_ascii_case(category))
    }

    /// Iterate over all items.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem<'a>> {
        self.items.iter()
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Catalog currency
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}
