//! Restaurant Fixtures

use serde::Deserialize;

use crate::{
    catalog::{MenuItem, Restaurant},
    fixtures::{
        FixtureError,
        parse::{parse_amount, parse_money, parse_percentage},
    },
    pricing::PricingPolicy,
    tags::string::StringTagSet,
};

/// Wrapper for restaurants in YAML
#[derive(Debug, Deserialize)]
pub struct RestaurantsFixture {
    /// Delivery fee and tax rate; the flat default policy when absent
    #[serde(default)]
    pub pricing: Option<PricingFixture>,

    /// Listing categories, "All" included or not
    #[serde(default)]
    pub categories: Vec<String>,

    /// Restaurants in listing order
    pub restaurants: Vec<RestaurantFixture>,
}

/// Pricing policy from YAML
#[derive(Debug, Deserialize)]
pub struct PricingFixture {
    /// Flat delivery fee in major units (e.g. "5.00")
    pub delivery_fee: String,

    /// Tax rate (e.g. "8%" or "0.08")
    pub tax_rate: String,
}

impl TryFrom<PricingFixture> for PricingPolicy {
    type Error = FixtureError;

    fn try_from(fixture: PricingFixture) -> Result<Self, Self::Error> {
        Ok(PricingPolicy::new(
            parse_amount(&fixture.delivery_fee)?,
            parse_percentage(&fixture.tax_rate)?,
        ))
    }
}

/// Restaurant fixture from YAML
#[derive(Debug, Deserialize)]
pub struct RestaurantFixture {
    /// Restaurant id
    pub id: String,

    /// Display name
    pub name: String,

    /// Listing image
    #[serde(default)]
    pub image_url: String,

    /// Cuisines
    #[serde(default)]
    pub cuisines: Vec<String>,

    /// Average rating
    #[serde(default)]
    pub rating: Option<f64>,

    /// Delivery time estimate
    pub delivery_time: String,

    /// Long description
    #[serde(default)]
    pub description: String,

    /// Menu
    #[serde(default)]
    pub menu: Vec<MenuItemFixture>,
}

/// Menu item fixture from YAML
#[derive(Debug, Deserialize)]
pub struct MenuItemFixture {
    /// Dish id
    pub id: String,

    /// Dish name
    pub name: String,

    /// Description
    #[serde(default)]
    pub description: Option<String>,

    /// Price string (e.g., "12.99 USD")
    pub price: String,

    /// Image location
    #[serde(default)]
    pub image_url: String,

    /// Dish labels
    #[serde(default)]
    pub tags: Vec<String>,
}

impl TryFrom<MenuItemFixture> for MenuItem {
    type Error = FixtureError;

    fn try_from(fixture: MenuItemFixture) -> Result<Self, Self::Error> {
        Ok(MenuItem {
            price: parse_money(&fixture.price)?,
            tags: fixture.tags.into_iter().collect::<StringTagSet>(),
            id: fixture.id,
            name: fixture.name,
            description: fixture.description,
            image_url: fixture.image_url,
        })
    }
}

impl TryFrom<RestaurantFixture> for Restaurant {
    type Error = FixtureError;

    fn try_from(fixture: RestaurantFixture) -> Result<Self, Self::Error> {
        let menu = fixture
            .menu
            .into_iter()
            .map(MenuItem::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Restaurant {
            id: fixture.id,
            name: fixture.name,
            image_url: fixture.image_url,
            cuisines: fixture.cuisines,
            rating: fixture.rating,
            delivery_time: fixture.delivery_time,
            description: fixture.description,
            menu,
        })
    }
}
