//! Orders
//!
//! Past orders, their status, and the [`OrderHistoryStore`] they are read from.

use std::fmt;

use jiff::civil::Date;
use mockall::automock;
use serde::Deserialize;

use crate::prices::Price;

pub mod store;
pub mod tracking;

/// Order status, shared by live tracking and the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Accepted by the restaurant
    Confirmed,

    /// Being prepared
    Preparing,

    /// On its way
    OutForDelivery,

    /// Handed over
    Delivered,

    /// Cancelled; never progresses
    Cancelled,
}

/// Badge style for a status in the history list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeVariant {
    /// Neutral, used for delivered orders
    Default,

    /// Muted, used for orders still in progress
    Secondary,

    /// Alarming, used for cancelled orders
    Destructive,
}

impl OrderStatus {
    /// Wire name of the status.
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "CONFIRMED",
            OrderStatus::Preparing => "PREPARING",
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY",
            OrderStatus::Delivered => "DELIVERED",
            OrderStatus::Cancelled => "CANCELLED",
        }
    }

    /// Whether no further transitions can happen.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Badge used when listing the order.
    pub fn badge(self) -> BadgeVariant {
        match self {
            OrderStatus::Delivered => BadgeVariant::Default,
            OrderStatus::Cancelled => BadgeVariant::Destructive,
            OrderStatus::Confirmed | OrderStatus::Preparing | OrderStatus::OutForDelivery => {
                BadgeVariant::Secondary
            }
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dish on an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLine {
    /// Dish id
    pub id: String,

    /// Dish name
    pub name: String,

    /// Quantity ordered
    pub quantity: u32,

    /// Unit price paid
    pub unit_price: Price,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Order id
    pub id: String,

    /// Date the order was placed
    pub date: Date,

    /// Amount charged
    pub total: Price,

    /// Current status
    pub status: OrderStatus,

    /// Restaurant the order was placed with
    pub restaurant: String,

    /// Dishes on the order
    pub items: Vec<OrderLine>,

    /// Delivery address, as shown to the user
    pub delivery_address: String,
}

/// An order currently being tracked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveOrder {
    /// Order id
    pub order_id: String,

    /// Current status
    pub status: OrderStatus,

    /// Estimated delivery time, e.g. "Approximately 15 minutes"
    pub estimated_delivery: Option<String>,
}

/// Read-only access to a user's orders.
#[automock]
pub trait OrderHistoryStore {
    /// Past orders of a user, newest first as stored.
    fn list_orders(&self, user_id: &str) -> Vec<Order>;

    /// The order currently being tracked for a user, if any.
    fn active_order(&self, user_id: &str) -> Option<ActiveOrder>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn status_deserializes_from_wire_names() -> TestResult {
        let statuses: Vec<OrderStatus> =
            serde_norway::from_str("[CONFIRMED, OUT_FOR_DELIVERY, CANCELLED]")?;

        assert_eq!(
            statuses,
            [
                OrderStatus::Confirmed,
                OrderStatus::OutForDelivery,
                OrderStatus::Cancelled
            ]
        );

        Ok(())
    }

    #[test]
    fn display_uses_wire_names() {
        assert_eq!(OrderStatus::OutForDelivery.to_string(), "OUT_FOR_DELIVERY");
    }

    #[test]
    fn terminal_statuses() {
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
        assert!(!OrderStatus::Preparing.is_terminal());
    }

    #[test]
    fn badges() {
        assert_eq!(OrderStatus::Delivered.badge(), BadgeVariant::Default);
        assert_eq!(OrderStatus::Cancelled.badge(), BadgeVariant::Destructive);
        assert_eq!(OrderStatus::Preparing.badge(), BadgeVariant::Secondary);
    }
}
