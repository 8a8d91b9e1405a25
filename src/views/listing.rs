//! Restaurant listing

use std::time::Duration;

use tracing::debug;

use crate::{
    catalog::{CatalogFilter, CatalogStore, RestaurantSummary},
    loading::{DeferredLoad, LoadError},
    navigation::Intent,
};

/// The home page: category chips, a search box and the filtered restaurants.
#[derive(Debug)]
pub struct ListingView<'a, C> {
    store: &'a C,
    filter: CatalogFilter,
    categories: Vec<String>,
    load: DeferredLoad<()>,
}

impl<'a, C: CatalogStore> ListingView<'a, C> {
    /// Open the listing. Restaurants are hidden until `delay` has passed.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoRuntime`] outside a tokio runtime.
    pub fn open(store: &'a C, delay: Duration) -> Result<Self, LoadError> {
        Ok(Self {
            store,
            filter: CatalogFilter::new(),
            categories: store.categories(),
            load: DeferredLoad::after(delay, ())?,
        })
    }

    /// Category chips, "All" first.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Current filter.
    pub fn filter(&self) -> &CatalogFilter {
        &self.filter
    }

    /// Pick a category chip.
    pub fn select_category(&mut self, category: &str) {
        debug!(category, "listing category selected");

        self.filter.set_category(category);
    }

    /// Type into the search box.
    pub fn search(&mut self, term: &str) {
        self.filter.set_search_term(term);
    }

    /// Whether the listing is still loading.
    pub fn is_loading(&mut self) -> bool {
        self.load.poll_ready().is_none()
    }

    /// Restaurants that pass the filter, or `None` while loading.
    pub fn restaurants(&mut self) -> Option<Vec<RestaurantSummary>> {
        self.load.poll_ready()?;

        Some(self.store.list_restaurants(&self.filter))
    }

    /// Wait for the load and list the restaurants.
    ///
    /// # Errors
    ///
    /// Returns an error if the load was cancelled.
    pub async fn loaded(&mut self) -> Result<Vec<RestaurantSummary>, LoadError> {
        self.load.ready().await?;

        Ok(self.store.list_restaurants(&self.filter))
    }

    /// Open a restaurant's menu.
    pub fn open_restaurant(&self, id: &str) -> Intent {
        Intent::Restaurant(id.to_string())
    }
}
