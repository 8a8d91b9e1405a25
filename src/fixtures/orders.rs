//! Order Fixtures

use jiff::civil::Date;
use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    fixtures::{FixtureError, parse::parse_money},
    orders::{ActiveOrder, Order, OrderLine, OrderStatus},
};

/// Wrapper for orders in YAML
#[derive(Debug, Deserialize)]
pub struct OrdersFixture {
    /// Map of user id -> that user's orders
    pub users: FxHashMap<String, UserOrdersFixture>,
}

/// A user's orders from YAML
#[derive(Debug, Default, Deserialize)]
pub struct UserOrdersFixture {
    /// Past orders
    #[serde(default)]
    pub orders: Vec<OrderFixture>,

    /// The order being tracked
    #[serde(default)]
    pub active: Option<ActiveOrderFixture>,
}

/// Order fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OrderFixture {
    /// Order id
    pub id: String,

    /// Date placed (e.g. 2023-10-26)
    pub date: Date,

    /// Total price string (e.g. "25.99 USD")
    pub total: String,

    /// Status
    pub status: OrderStatus,

    /// Restaurant name
    pub restaurant: String,

    /// Dishes
    #[serde(default)]
    pub items: Vec<OrderLineFixture>,

    /// Delivery address as shown
    #[serde(default)]
    pub delivery_address: String,
}

/// Order line fixture from YAML
#[derive(Debug, Deserialize)]
pub struct OrderLineFixture {
    /// Dish id
    pub id: String,

    /// Dish name
    pub name: String,

    /// Quantity
    pub quantity: u32,

    /// Unit price string
    pub price: String,
}

/// Active order fixture from YAML
#[derive(Debug, Deserialize)]
pub struct ActiveOrderFixture {
    /// Order id
    pub id: String,

    /// Status
    pub status: OrderStatus,

    /// Estimated delivery time
    #[serde(default)]
    pub estimated_delivery: Option<String>,
}

impl TryFrom<OrderFixture> for Order {
    type Error = FixtureError;

    fn try_from(fixture: OrderFixture) -> Result<Self, Self::Error> {
        let items = fixture
            .items
            .into_iter()
            .map(|line| {
                Ok(OrderLine {
                    unit_price: parse_money(&line.price)?,
                    id: line.id,
                    name: line.name,
                    quantity: line.quantity,
                })
            })
            .collect::<Result<Vec<_>, FixtureError>>()?;

        Ok(Order {
            id: fixture.id,
            date: fixture.date,
            total: parse_money(&fixture.total)?,
            status: fixture.status,
            restaurant: fixture.restaurant,
            items,
            delivery_address: fixture.delivery_address,
        })
    }
}

impl From<ActiveOrderFixture> for ActiveOrder {
    fn from(fixture: ActiveOrderFixture) -> Self {
        ActiveOrder {
            order_id: fixture.id,
            status: fixture.status,
            estimated_delivery: fixture.estimated_delivery,
        }
    }
}
