//! Larder
//!
//! Larder is the core of a food-ordering storefront: a restaurant catalog, a priced
//! cart, checkout, order history and live order tracking.

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod fixtures;
pub mod loading;
pub mod navigation;
pub mod observability;
pub mod orders;
pub mod prelude;
pub mod prices;
pub mod pricing;
pub mod profile;
pub mod receipt;
pub mod storefront;
pub mod tags;
pub mod views;
