//! Catalog
//!
//! Restaurants, their menus, and the [`CatalogStore`] seam the storefront reads them
//! through.

use mockall::automock;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{prices::Price, tags::string::StringTagSet};

pub mod store;

/// Category name that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// Errors raised while looking things up in the catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// No restaurant has the requested id.
    #[error("Restaurant with ID {0} not found.")]
    RestaurantNotFound(String),

    /// The restaurant exists but has no dish with the requested id.
    #[error("Dish {dish} not found on the menu of restaurant {restaurant}")]
    DishNotFound {
        /// Restaurant id
        restaurant: String,
        /// Dish id
        dish: String,
    },

    /// Restaurant ids must be unique.
    #[error("Duplicate restaurant id: {0}")]
    DuplicateRestaurant(String),

    /// A menu price differs from the catalog currency (dish id, dish currency, catalog currency).
    #[error("Dish {0} has currency {1}, but catalog has currency {2}")]
    CurrencyMismatch(String, &'static str, &'static str),
}

/// A dish on a restaurant's menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuItem {
    /// Dish id, unique within its restaurant
    pub id: String,

    /// Dish name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Unit price
    pub price: Price,

    /// Image location
    pub image_url: String,

    /// Dish labels ("Vegetarian", "Spicy", ...)
    pub tags: StringTagSet,
}

/// A restaurant with its full menu.
#[derive(Debug, Clone, PartialEq)]
pub struct Restaurant {
    /// Restaurant id
    pub id: String,

    /// Display name
    pub name: String,

    /// Listing image
    pub image_url: String,

    /// Cuisines in display order
    pub cuisines: Vec<String>,

    /// Average rating, if the restaurant has been rated
    pub rating: Option<f64>,

    /// Delivery time estimate, e.g. "25-35 min"
    pub delivery_time: String,

    /// Long description shown on the menu page
    pub description: String,

    /// Menu in display order
    pub menu: Vec<MenuItem>,
}

impl Restaurant {
    /// Find a dish on the menu.
    pub fn dish(&self, id: &str) -> Option<&MenuItem> {
        self.menu.iter().find(|item| item.id == id)
    }

    /// Find a dish on the menu or report which one is missing.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DishNotFound`] if no dish has the id.
    pub fn require_dish(&self, id: &str) -> Result<&MenuItem, CatalogError> {
        self.dish(id).ok_or_else(|| CatalogError::DishNotFound {
            restaurant: self.id.clone(),
            dish: id.to_string(),
        })
    }

    /// Union of every dish label on the menu.
    pub fn menu_tags(&self) -> StringTagSet {
        self.menu
            .iter()
            .fold(StringTagSet::default(), |acc, item| acc | item.tags.clone())
    }

    /// Listing projection of the restaurant.
    pub fn summary(&self) -> RestaurantSummary {
        RestaurantSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            image_url: self.image_url.clone(),
            cuisines: self.cuisines.clone(),
            rating: self.rating,
            delivery_time: self.delivery_time.clone(),
        }
    }
}

/// A restaurant as shown in the listing.
#[derive(Debug, Clone, PartialEq)]
pub struct RestaurantSummary {
    /// Restaurant id
    pub id: String,

    /// Display name
    pub name: String,

    /// Listing image
    pub image_url: String,

    /// Cuisines in display order
    pub cuisines: Vec<String>,

    /// Average rating, if any
    pub rating: Option<f64>,

    /// Delivery time estimate
    pub delivery_time: String,
}

/// Listing filter: a cuisine category and a free-text search term.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogFilter {
    category: Option<String>,
    search_term: Option<String>,
}

impl CatalogFilter {
    /// A filter that keeps every restaurant.
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a category. [`ALL_CATEGORIES`] clears the restriction.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.set_category(category);
        self
    }

    /// Restrict to a search term. An empty term clears the restriction.
    #[must_use]
    pub fn with_search_term(mut self, term: impl Into<String>) -> Self {
        self.set_search_term(term);
        self
    }

    /// Replace the category.
    pub fn set_category(&mut self, category: impl Into<String>) {
        let category = category.into();

        self.category = (category != ALL_CATEGORIES).then_some(category);
    }

    /// Replace the search term.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        let term = term.into();

        self.search_term = (!term.is_empty()).then_some(term);
    }

    /// Selected category, `None` meaning all.
    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    /// Search term, if any.
    pub fn search_term(&self) -> Option<&str> {
        self.search_term.as_deref()
    }

    /// Check whether a restaurant passes the filter.
    ///
    /// The category must be one of the restaurant's cuisines. The search term must
    /// appear, ignoring case, in the name or in any cuisine.
    pub fn matches(&self, restaurant: &RestaurantSummary) -> bool {
        if let Some(category) = &self.category
            && !restaurant.cuisines.iter().any(|cuisine| cuisine == category)
        {
            return false;
        }

        let Some(term) = &self.search_term else {
            return true;
        };

        let term = term.to_lowercase();

        restaurant.name.to_lowercase().contains(&term)
            || restaurant
                .cuisines
                .iter()
                .any(|cuisine| cuisine.to_lowercase().contains(&term))
    }
}

/// Read access to restaurants and menus.
#[automock]
pub trait CatalogStore {
    /// Look up a restaurant with its menu.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RestaurantNotFound`] for an unknown id.
    fn restaurant(&self, id: &str) -> Result<Restaurant, CatalogError>;

    /// List the restaurants that pass the filter, in catalog order.
    fn list_restaurants(&self, filter: &CatalogFilter) -> Vec<RestaurantSummary>;

    /// Cuisine categories offered as listing filters, starting with "All".
    fn categories(&self) -> Vec<String>;

    /// Currency every menu price is in.
    fn currency(&self) -> &'static Currency;
}
