//! Larder storefront session
//!
//! Runs one scripted shopping session against a fixture set: browse the listing,
//! open a menu, fill the cart, check out and follow the active order.
//!
//! Use `-f` to load a fixture set by name
//! Use `-a restaurant:dish[:quantity]` to add dishes (repeatable)
//! Use `--payment-method` to pick a payment method other than the default

use std::{
    io::{self, Write},
    time::Instant,
};

use anyhow::Result;
use humanize_duration::{Truncate, prelude::DurationExt};
use tracing::{info, warn};

use larder::{
    config::{AppConfig, CartEntry},
    fixtures::Fixture,
    observability,
    receipt::{CartReceipt, write_confirmation, write_order_history, write_restaurants, write_tracker},
    storefront::Storefront,
    views::menu::MenuState,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|err| err.exit());

    observability::init(&config.logging)?;

    let fixture = Fixture::from_set_in(&config.fixtures, &config.fixture)?;
    let account = fixture.account(&config.user)?.clone();
    let policy = fixture.policy();
    let (catalog, orders, _) = fixture.into_parts()?;

    let mut storefront = Storefront::new(catalog, orders, config.user.clone(), policy);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Welcome back, {}", account.profile.name)?;

    let start = Instant::now();
    let mut listing = storefront.open_listing(config.listing_delay())?;

    if let Some(category) = config.category.as_deref() {
        listing.select_category(category);
    }

    if let Some(term) = config.search.as_deref() {
        listing.search(term);
    }

    let restaurants = listing.loaded().await?;

    writeln!(
        out,
        "\nRestaurants in {} ({})",
        listing.filter().category().unwrap_or("All"),
        start.elapsed().human(Truncate::Nano)
    )?;
    write_restaurants(&mut out, &restaurants)?;

    let intent = listing.open_restaurant(&config.restaurant);

    info!(%intent, "opening menu");

    let start = Instant::now();
    let mut menu = storefront.open_menu(&config.restaurant, config.menu_delay())?;

    let first_dish = match menu.loaded().await? {
        MenuState::Loaded(restaurant) => {
            writeln!(
                out,
                "{}: {} dishes ({})",
                restaurant.name,
                restaurant.menu.len(),
                start.elapsed().human(Truncate::Nano)
            )?;

            restaurant.menu.first().map(|dish| dish.id.clone())
        }
        MenuState::NotFound { message, back } => {
            writeln!(out, "{message} Back to {back}")?;

            None
        }
        MenuState::Loading => None,
    };

    let entries = if config.add.is_empty() {
        first_dish
            .map(|dish_id| CartEntry {
                restaurant_id: config.restaurant.clone(),
                dish_id,
                quantity: 1,
            })
            .into_iter()
            .collect()
    } else {
        config.add.clone()
    };

    for entry in &entries {
        if entry.restaurant_id == menu.restaurant_id() {
            menu.choose_dish(&entry.dish_id)?.set_quantity(entry.quantity);
            menu.confirm_add(storefront.cart_mut());
        } else {
            storefront.add_to_cart(&entry.restaurant_id, &entry.dish_id, entry.quantity)?;
        }
    }

    writeln!(out, "\nYour cart ({} items)", storefront.cart().item_count())?;
    CartReceipt::new(storefront.cart(), storefront.policy()).write_to(&mut out)?;

    match storefront.begin_checkout(account.addresses.clone(), account.payment_methods.clone()) {
        Ok(mut checkout) => {
            if let Some(method) = config.payment_method.as_deref() {
                checkout.select_payment_method(method)?;
            }

            match storefront.place_order(&mut checkout) {
                Ok(_) => {
                    if let Some(confirmation) = checkout.confirmation() {
                        write_confirmation(&mut out, confirmation)?;
                    }
                }
                Err(err) => {
                    warn!(%err, stage = ?checkout.stage(), "order not placed");
                    writeln!(out, "Order not placed: {err}")?;
                }
            }
        }
        Err(err) => writeln!(out, "{err}")?,
    }

    writeln!(out, "Order history")?;
    write_order_history(&mut out, &storefront.order_history())?;

    if let Some(tracker) = storefront.active_order() {
        write_tracker(&mut out, &tracker)?;
    }

    Ok(())
}
