//! In-memory order history

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::orders::{ActiveOrder, Order, OrderHistoryStore};

/// Order history held in memory, keyed by user id.
#[derive(Debug, Clone, Default)]
pub struct StaticOrderHistory {
    orders: FxHashMap<String, Vec<Order>>,
    active: FxHashMap<String, ActiveOrder>,
}

impl StaticOrderHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a past order for a user.
    pub fn record(&mut self, user_id: impl Into<String>, order: Order) {
        let user_id = user_id.into();

        debug!(user_id, order_id = order.id, "recording order");

        self.orders.entry(user_id).or_default().push(order);
    }

    /// Set the order currently tracked for a user.
    pub fn set_active(&mut self, user_id: impl Into<String>, order: ActiveOrder) {
        self.active.insert(user_id.into(), order);
    }

    /// Stop tracking the active order of a user.
    pub fn clear_active(&mut self, user_id: &str) -> Option<ActiveOrder> {
        self.active.remove(user_id)
    }

    /// Number of orders stored for a user.
    pub fn len_for(&self, user_id: &str) -> usize {
        self.orders.get(user_id).map_or(0, Vec::len)
    }
}

impl OrderHistoryStore for StaticOrderHistory {
    fn list_orders(&self, user_id: &str) -> Vec<Order> {
        self.orders.get(user_id).cloned().unwrap_or_default()
    }

    fn active_order(&self, user_id: &str) -> Option<ActiveOrder> {
        self.active.get(user_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::{Money, iso::USD};

    use crate::orders::{OrderLine, OrderStatus};

    use super::*;

    fn order(id: &str, status: OrderStatus) -> Order {
        Order {
            id: id.to_string(),
            date: date(2023, 10, 26),
            total: Money::from_minor(2599, USD),
            status,
            restaurant: "Pizza Palace".to_string(),
            items: vec![OrderLine {
                id: "p1".to_string(),
                name: "Margherita Pizza".to_string(),
                quantity: 1,
                unit_price: Money::from_minor(1299, USD),
            }],
            delivery_address: "123 Main St, Anytown".to_string(),
        }
    }

    #[test]
    fn unknown_user_has_no_orders() {
        let history = StaticOrderHistory::new();

        assert!(history.list_orders("nobody").is_empty());
        assert_eq!(history.active_order("nobody"), None);
    }

    #[test]
    fn orders_are_listed_in_recorded_order() {
        let mut history = StaticOrderHistory::new();

        history.record("user-1", order("order123", OrderStatus::Delivered));
        history.record("user-1", order("order789", OrderStatus::Cancelled));
        history.record("user-2", order("order456", OrderStatus::Delivered));

        let ids: Vec<String> = history
            .list_orders("user-1")
            .into_iter()
            .map(|order| order.id)
            .collect();

        assert_eq!(ids, ["order123", "order789"]);
        assert_eq!(history.len_for("user-2"), 1);
    }

    #[test]
    fn active_order_can_be_set_and_cleared() {
        let mut history = StaticOrderHistory::new();
        let active = ActiveOrder {
            order_id: "activeOrder001".to_string(),
            status: OrderStatus::OutForDelivery,
            estimated_delivery: None,
        };

        history.set_active("user-1", active.clone());

        assert_eq!(history.active_order("user-1"), Some(active.clone()));
        assert_eq!(history.clear_active("user-1"), Some(active));
        assert_eq!(history.active_order("user-1"), None);
    }
}
