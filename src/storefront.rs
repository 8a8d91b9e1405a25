//! Storefront
//!
//! A shopping session: the injected catalog and order history stores, the user's
//! cart and the pricing policy applied to it.

use std::time::Duration;

use tracing::{debug, info};

use crate::{
    cart::{Cart, CartError},
    catalog::{CatalogError, CatalogFilter, CatalogStore, Restaurant, RestaurantSummary},
    checkout::{Checkout, CheckoutError, address::Address, payment::PaymentMethod},
    loading::LoadError,
    navigation::Intent,
    orders::{Order, OrderHistoryStore, tracking::OrderTracker},
    pricing::{PriceBreakdown, PricingPolicy},
    views::{listing::ListingView, menu::MenuView},
};

/// A user's shopping session.
#[derive(Debug)]
pub struct Storefront<C, O> {
    catalog: C,
    orders: O,
    user_id: String,
    cart: Cart,
    policy: PricingPolicy,
}

impl<C: CatalogStore, O: OrderHistoryStore> Storefront<C, O> {
    /// Start a session with an empty cart in the catalog's currency.
    pub fn new(catalog: C, orders: O, user_id: impl Into<String>, policy: PricingPolicy) -> Self {
        let cart = Cart::new(catalog.currency());

        Self {
            catalog,
            orders,
            user_id: user_id.into(),
            cart,
            policy,
        }
    }

    /// The catalog
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Signed-in user
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Pricing policy applied to the cart
    pub fn policy(&self) -> &PricingPolicy {
        &self.policy
    }

    /// Restaurants that pass a filter.
    pub fn restaurants(&self, filter: &CatalogFilter) -> Vec<RestaurantSummary> {
        self.catalog.list_restaurants(filter)
    }

    /// A restaurant with its menu.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::RestaurantNotFound`] for an unknown id.
    pub fn restaurant(&self, id: &str) -> Result<Restaurant, CatalogError> {
        self.catalog.restaurant(id)
    }

    /// Open the restaurant listing.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoRuntime`] outside a tokio runtime.
    pub fn open_listing(&self, delay: Duration) -> Result<ListingView<'_, C>, LoadError> {
        ListingView::open(&self.catalog, delay)
    }

    /// Open a restaurant's menu.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::NoRuntime`] outside a tokio runtime.
    pub fn open_menu(&self, restaurant_id: &str, delay: Duration) -> Result<MenuView, LoadError> {
        MenuView::open(&self.catalog, restaurant_id, delay)
    }

    /// Add a dish to the cart, tagged with its restaurant's name.
    ///
    /// # Errors
    ///
    /// Returns an error if the restaurant or dish does not exist.
    #[tracing::instrument(skip(self))]
    pub fn add_to_cart(
        &mut self,
        restaurant_id: &str,
        dish_id: &str,
        quantity: u32,
    ) -> Result<(), CatalogError> {
        let restaurant = self.catalog.restaurant(restaurant_id)?;
        let dish = restaurant.require_dish(dish_id)?;

        self.cart.add_item(dish, quantity, Some(&restaurant.name));

        Ok(())
    }

    /// The cart
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The cart, for quantity changes and removals.
    pub fn cart_mut(&mut self) -> &mut Cart {
        &mut self.cart
    }

    /// Current price breakdown of the cart.
    pub fn breakdown(&self) -> PriceBreakdown {
        self.cart.breakdown(&self.policy)
    }

    /// Enter checkout from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] if the cart has no lines.
    pub fn begin_checkout(
        &self,
        addresses: Vec<Address>,
        payment_methods: Vec<PaymentMethod>,
    ) -> Result<Checkout, CartError> {
        self.cart.proceed_to_checkout()?;

        debug!(addresses = addresses.len(), "checkout started");

        Ok(Checkout::new(addresses, payment_methods))
    }

    /// Place the order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns the checkout guard error if the order cannot be placed; the cart is
    /// left untouched in that case.
    pub fn place_order(&mut self, checkout: &mut Checkout) -> Result<(Order, [Intent; 2]), CheckoutError> {
        let confirmation = checkout.place_order(&self.cart, &self.policy)?;
        let placed = (confirmation.order().clone(), confirmation.next_intents());

        self.cart.clear();

        info!(order_id = %placed.0.id, "cart emptied after order");

        Ok(placed)
    }

    /// The user's past orders.
    pub fn order_history(&self) -> Vec<Order> {
        self.orders.list_orders(&self.user_id)
    }

    /// A tracker for the user's active order, if there is one.
    pub fn active_order(&self) -> Option<OrderTracker> {
        self.orders
            .active_order(&self.user_id)
            .map(|order| OrderTracker::from_active(&order))
    }
}
