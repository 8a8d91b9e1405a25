//! In-memory catalog store

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;
use slotmap::{SlotMap, new_key_type};

use crate::catalog::{
    ALL_CATEGORIES, CatalogError, CatalogFilter, CatalogStore, Restaurant, RestaurantSummary,
};

new_key_type! {
    /// Restaurant Key
    pub struct RestaurantKey;
}

/// Catalog held in memory, typically loaded from a fixture set.
#[derive(Debug)]
pub struct StaticCatalog {
    restaurants: SlotMap<RestaurantKey, Restaurant>,

    /// Restaurant id -> `SlotMap` key
    keys: FxHashMap<String, RestaurantKey>,

    /// Insertion order, used for listings
    order: Vec<RestaurantKey>,

    categories: Vec<String>,
    currency: &'static Currency,
}

impl StaticCatalog {
    /// Create an empty catalog priced in `currency`.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            restaurants: SlotMap::with_key(),
            keys: FxHashMap::default(),
            order: Vec::new(),
            categories: vec![ALL_CATEGORIES.to_string()],
            currency,
        }
    }

    /// Replace the listing categories. "All" is always offered first.
    #[must_use]
    pub fn with_categories(mut self, categories: impl IntoIterator<Item = String>) -> Self {
        self.categories = std::iter::once(ALL_CATEGORIES.to_string())
            .chain(
                categories
                    .into_iter()
                    .filter(|category| category != ALL_CATEGORIES),
            )
            .collect();

        self
    }

    /// Add a restaurant.
    ///
    /// # Errors
    ///
    /// Returns an error if the id is already taken or if a menu price is in another
    /// currency.
    pub fn insert(&mut self, restaurant: Restaurant) -> Result<RestaurantKey, CatalogError> {
        if self.keys.contains_key(&restaurant.id) {
            return Err(CatalogError::DuplicateRestaurant(restaurant.id));
        }

        if let Some(item) = restaurant
            .menu
            .iter()
            .find(|item| item.price.currency() != self.currency)
        {
            return Err(CatalogError::CurrencyMismatch(
                item.id.clone(),
                item.price.currency().iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        let id = restaurant.id.clone();
        let key = self.restaurants.insert(restaurant);

        self.keys.insert(id, key);
        self.order.push(key);

        Ok(key)
    }

    /// Borrow a restaurant without cloning it.
    pub fn get(&self, id: &str) -> Option<&Restaurant> {
        let key = self.keys.get(id)?;

        self.restaurants.get(*key)
    }

    /// Iterate over restaurants in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Restaurant> {
        self.order
            .iter()
            .filter_map(|key| self.restaurants.get(*key))
    }

    /// Number of restaurants.
    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    /// Check if the catalog has no restaurants.
    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }
}

impl CatalogStore for StaticCatalog {
    fn restaurant(&self, id: &str) -> Result<Restaurant, CatalogError> {
        self.get(id)
            .cloned()
            .ok_or_else(|| CatalogError::RestaurantNotFound(id.to_string()))
    }

    fn list_restaurants(&self, filter: &CatalogFilter) -> Vec<RestaurantSummary> {
        self.iter()
            .map(Restaurant::summary)
            .filter(|summary| filter.matches(summary))
            .collect()
    }

    fn categories(&self) -> Vec<String> {
        self.categories.clone()
    }

    fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{GBP, USD},
    };
    use testresult::TestResult;

    use crate::{catalog::MenuItem, tags::string::StringTagSet};

    use super::*;

    fn restaurant(id: &str, name: &str, cuisines: &[&str]) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: name.to_string(),
            image_url: String::new(),
            cuisines: cuisines.iter().map(ToString::to_string).collect(),
            rating: None,
            delivery_time: "20-30 min".to_string(),
            description: String::new(),
            menu: vec![MenuItem {
                id: format!("{id}-dish"),
                name: "Dish".to_string(),
                description: None,
                price: Money::from_minor(999, USD),
                image_url: String::new(),
                tags: StringTagSet::default(),
            }],
        }
    }

    fn catalog() -> Result<StaticCatalog, CatalogError> {
        let mut catalog = StaticCatalog::new(USD);

        catalog.insert(restaurant("1", "Pizza Palace", &["Pizza", "Italian"]))?;
        catalog.insert(restaurant("2", "Sushi Heaven", &["Sushi", "Japanese"]))?;
        catalog.insert(restaurant("3", "Burger Barn", &["Burgers", "American"]))?;

        Ok(catalog)
    }

    #[test]
    fn restaurant_lookup_by_id() -> TestResult {
        let catalog = catalog()?;

        assert_eq!(catalog.restaurant("2")?.name, "Sushi Heaven");
        assert_eq!(
            catalog.restaurant("99"),
            Err(CatalogError::RestaurantNotFound("99".to_string()))
        );
        assert_eq!(catalog.get("1").map(|r| r.name.as_str()), Some("Pizza Palace"));
        assert!(catalog.get("99").is_none());

        Ok(())
    }

    #[test]
    fn list_keeps_insertion_order_and_filters() -> TestResult {
        let catalog = catalog()?;

        let all: Vec<String> = catalog
            .list_restaurants(&CatalogFilter::new())
            .into_iter()
            .map(|summary| summary.name)
            .collect();

        assert_eq!(all, ["Pizza Palace", "Sushi Heaven", "Burger Barn"]);

        let sushi = catalog.list_restaurants(&CatalogFilter::new().with_category("Sushi"));

        assert_eq!(sushi.len(), 1);

        Ok(())
    }

    #[test]
    fn insert_rejects_duplicate_ids() -> TestResult {
        let mut catalog = catalog()?;
        let result = catalog.insert(restaurant("1", "Imposter", &[]));

        assert_eq!(
            result,
            Err(CatalogError::DuplicateRestaurant("1".to_string()))
        );
        assert_eq!(catalog.len(), 3);

        Ok(())
    }

    #[test]
    fn insert_rejects_foreign_currency() {
        let mut catalog = StaticCatalog::new(GBP);
        let result = catalog.insert(restaurant("1", "Pizza Palace", &[]));

        assert!(matches!(result, Err(CatalogError::CurrencyMismatch(_, "USD", "GBP"))));
        assert!(catalog.is_empty());
    }

    #[test]
    fn categories_always_start_with_all() {
        let catalog = StaticCatalog::new(USD)
            .with_categories(["Pizza".to_string(), "All".to_string(), "Vegan".to_string()]);

        assert_eq!(catalog.categories(), ["All", "Pizza", "Vegan"]);
        assert_eq!(catalog.currency(), USD);
    }
}
