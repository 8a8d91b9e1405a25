//! Fixtures
//!
//! A fixture set is three YAML files sharing a name: `restaurants/<set>.yml`,
//! `orders/<set>.yml` and `accounts/<set>.yml` under a base directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::debug;

use crate::{
    cart::Cart,
    catalog::{CatalogError, CatalogStore, Restaurant, store::StaticCatalog},
    fixtures::{
        accounts::{Account, AccountsFixture},
        orders::OrdersFixture,
        restaurants::RestaurantsFixture,
    },
    orders::{Order, store::StaticOrderHistory},
    pricing::PricingPolicy,
};

pub mod accounts;
pub mod orders;
pub mod parse;
pub mod restaurants;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Invalid percentage format
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Currency mismatch between prices in a set
    #[error("Currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(String, String),

    /// No restaurants loaded yet
    #[error("No restaurants loaded yet; currency unknown")]
    NoCurrency,

    /// Account not found
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// Catalog rejected a restaurant
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,

    catalog: Option<StaticCatalog>,
    policy: PricingPolicy,
    order_history: StaticOrderHistory,
    accounts: FxHashMap<String, Account>,
}

impl Fixture {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: None,
            policy: PricingPolicy::default(),
            order_history: StaticOrderHistory::new(),
            accounts: FxHashMap::default(),
        }
    }

    fn read(&self, kind: &str, name: &str) -> Result<String, FixtureError> {
        let file_path = self.base_path.join(kind).join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "reading fixture");

        Ok(fs::read_to_string(&file_path)?)
    }

    /// Load restaurants, categories and pricing from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if prices use more
    /// than one currency.
    pub fn load_restaurants(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: RestaurantsFixture = serde_norway::from_str(&self.read("restaurants", name)?)?;

        if let Some(pricing) = fixture.pricing {
            self.policy = pricing.try_into()?;
        }

        let restaurants = fixture
            .restaurants
            .into_iter()
            .map(Restaurant::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut currency = self.catalog.as_ref().map(CatalogStore::currency);

        for item in restaurants.iter().flat_map(|restaurant| &restaurant.menu) {
            let item_currency = item.price.currency();

            match currency {
                Some(existing) if existing != item_currency => {
                    return Err(FixtureError::CurrencyMismatch(
                        existing.iso_alpha_code.to_string(),
                        item_currency.iso_alpha_code.to_string(),
                    ));
                }
                Some(_) => {}
                None => currency = Some(item_currency),
            }
        }

        let currency = currency.ok_or(FixtureError::NoCurrency)?;
        let mut catalog = match self.catalog.take() {
            Some(catalog) => catalog,
            None => StaticCatalog::new(currency),
        }
        .with_categories(fixture.categories);

        for restaurant in restaurants {
            catalog.insert(restaurant)?;
        }

        self.catalog = Some(catalog);

        Ok(self)
    }

    /// Load past and active orders from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a price is
    /// invalid.
    pub fn load_orders(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: OrdersFixture = serde_norway::from_str(&self.read("orders", name)?)?;

        for (user_id, user) in fixture.users {
            for order in user.orders {
                self.order_history
                    .record(user_id.clone(), Order::try_from(order)?);
            }

            if let Some(active) = user.active {
                self.order_history.set_active(user_id.clone(), active.into());
            }
        }

        Ok(self)
    }

    /// Load accounts from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_accounts(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let fixture: AccountsFixture = serde_norway::from_str(&self.read("accounts", name)?)?;

        self.accounts.extend(fixture.accounts);

        Ok(self)
    }

    /// Load a complete fixture set from the default base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        Self::from_set_in("./fixtures", name)
    }

    /// Load a complete fixture set (restaurants, orders and accounts with the same
    /// name) from a base path
    ///
    /// # Errors
    ///
    /// Returns an error if any of the fixture files cannot be loaded.
    pub fn from_set_in(base_path: impl AsRef<Path>, name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::with_base_path(base_path.as_ref());

        fixture
            .load_restaurants(name)?
            .load_orders(name)?
            .load_accounts(name)?;

        Ok(fixture)
    }

    /// Get the catalog
    ///
    /// # Errors
    ///
    /// Returns an error if no restaurants have been loaded yet.
    pub fn catalog(&self) -> Result<&StaticCatalog, FixtureError> {
        self.catalog.as_ref().ok_or(FixtureError::NoCurrency)
    }

    /// Get the pricing policy
    pub fn policy(&self) -> PricingPolicy {
        self.policy
    }

    /// Get the order history
    pub fn order_history(&self) -> &StaticOrderHistory {
        &self.order_history
    }

    /// Get an account by user id
    ///
    /// # Errors
    ///
    /// Returns an error if the account is not found.
    pub fn account(&self, user_id: &str) -> Result<&Account, FixtureError> {
        self.accounts
            .get(user_id)
            .ok_or_else(|| FixtureError::AccountNotFound(user_id.to_string()))
    }

    /// Get the currency
    ///
    /// # Errors
    ///
    /// Returns an error if no restaurants have been loaded yet.
    pub fn currency(&self) -> Result<&'static Currency, FixtureError> {
        Ok(self.catalog()?.currency())
    }

    /// Create a cart from `(restaurant id, dish id, quantity)` entries
    ///
    /// # Errors
    ///
    /// Returns an error if a restaurant or dish does not exist.
    pub fn cart(&self, entries: &[(&str, &str, u32)]) -> Result<Cart, FixtureError> {
        let catalog = self.catalog()?;
        let mut cart = Cart::new(catalog.currency());

        for (restaurant_id, dish_id, quantity) in entries {
            let restaurant = catalog
                .get(restaurant_id)
                .ok_or_else(|| CatalogError::RestaurantNotFound((*restaurant_id).to_string()))?;

            let dish = restaurant.require_dish(dish_id)?;

            cart.add_item(dish, *quantity, Some(&restaurant.name));
        }

        Ok(cart)
    }

    /// Split into the catalog, order history and accounts
    ///
    /// # Errors
    ///
    /// Returns an error if no restaurants have been loaded yet.
    pub fn into_parts(
        self,
    ) -> Result<(StaticCatalog, StaticOrderHistory, FxHashMap<String, Account>), FixtureError> {
        let catalog = self.catalog.ok_or(FixtureError::NoCurrency)?;

        Ok((catalog, self.order_history, self.accounts))
    }
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}
