//! Restaurant menu page

use std::time::Duration;

use tracing::{info, warn};

use crate::{
    cart::Cart,
    catalog::{CatalogError, CatalogStore, MenuItem, Restaurant},
    loading::{DeferredLoad, LoadError},
    navigation::Intent,
};

/// What the menu page shows.
#[derive(Debug, PartialEq)]
pub enum MenuState<'a> {
    /// Still loading
    Loading,

    /// The restaurant and its menu
    Loaded(&'a Restaurant),

    /// No restaurant has the id; offers a way back to the catalog.
    NotFound {
        /// The user-facing message
        message: String,

        /// Where to go instead
        back: Intent,
    },
}

/// The add-to-cart dialog for one dish.
#[derive(Debug, Clone, PartialEq)]
pub struct DishDialog {
    item: MenuItem,
    quantity: u32,
}

impl DishDialog {
    /// Open the dialog with a quantity of one.
    pub fn new(item: MenuItem) -> Self {
        Self { item, quantity: 1 }
    }

    /// The dish being added
    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    /// Chosen quantity, never below one
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Add one.
    pub fn increment(&mut self) {
        self.quantity = self.quantity.saturating_add(1);
    }

    /// Remove one, stopping at one.
    pub fn decrement(&mut self) {
        self.quantity = self.quantity.saturating_sub(1).max(1);
    }

    /// Set the quantity directly, clamped to at least one.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }
}

/// A restaurant's menu page.
#[derive(Debug)]
pub struct MenuView {
    restaurant_id: String,
    load: DeferredLoad<Result<Restaurant, CatalogError>>,
    dialog: Option<DishDialog>,
}

impl MenuView {
    /// Open the menu of a restaurant. The lookup result is shown after `delay`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoRuntime`] outside a tokio runtime.
    #[tracing::instrument(skip(store))]
    pub fn open<C: CatalogStore>(
        store: &C,
        restaurant_id: &str,
        delay: Duration,
    ) -> Result<Self, LoadError> {
        let restaurant = store.restaurant(restaurant_id);

        if let Err(err) = &restaurant {
            warn!(%err, "restaurant lookup failed");
        }

        Ok(Self {
            restaurant_id: restaurant_id.to_string(),
            load: DeferredLoad::after(delay, restaurant)?,
            dialog: None,
        })
    }

    /// Id from the route.
    pub fn restaurant_id(&self) -> &str {
        &self.restaurant_id
    }

    fn state_of(result: Option<&Result<Restaurant, CatalogError>>) -> MenuState<'_> {
        match result {
            None => MenuState::Loading,
            Some(Ok(restaurant)) => MenuState::Loaded(restaurant),
            Some(Err(err)) => MenuState::NotFound {
                message: err.to_string(),
                back: Intent::Catalog,
            },
        }
    }

    /// Current state without waiting.
    pub fn state(&mut self) -> MenuState<'_> {
        Self::state_of(self.load.poll_ready())
    }

    /// Wait for the load to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the load was cancelled.
    pub async fn loaded(&mut self) -> Result<MenuState<'_>, LoadError> {
        let result = self.load.ready().await?;

        Ok(Self::state_of(Some(result)))
    }

    /// Open the add-to-cart dialog for a dish.
    ///
    /// # Errors
    ///
    /// Returns an error if the menu is not loaded or has no such dish.
    pub fn choose_dish(&mut self, dish_id: &str) -> Result<&mut DishDialog, CatalogError> {
        let item = match self.load.poll_ready() {
            Some(Ok(restaurant)) => restaurant.require_dish(dish_id)?.clone(),
            Some(Err(err)) => return Err(err.clone()),
            None => {
                return Err(CatalogError::RestaurantNotFound(
                    self.restaurant_id.clone(),
                ));
            }
        };

        Ok(self.dialog.insert(DishDialog::new(item)))
    }

    /// The open dialog, if any.
    pub fn dialog(&self) -> Option<&DishDialog> {
        self.dialog.as_ref()
    }

    /// Adjust the open dialog.
    pub fn dialog_mut(&mut self) -> Option<&mut DishDialog> {
        self.dialog.as_mut()
    }

    /// Close the dialog without touching the cart.
    pub fn cancel_dialog(&mut self) {
        self.dialog = None;
    }

    /// Add the dialog's dish to the cart with the restaurant name, then close it.
    ///
    /// Returns the quantity added, or `None` if no dialog was open.
    pub fn confirm_add(&mut self, cart: &mut Cart) -> Option<u32> {
        let dialog = self.dialog.take()?;
        let restaurant = self
            .load
            .value()
            .and_then(|result| result.as_ref().ok())
            .map(|restaurant| restaurant.name.as_str());

        cart.add_item(dialog.item(), dialog.quantity(), restaurant);

        info!(
            item_id = %dialog.item().id,
            quantity = dialog.quantity(),
            "dish added to cart"
        );

        Some(dialog.quantity())
    }
}
