//! Live order tracking
//!
//! A tracker walks an order through a list of status steps. Progress is the
//! fraction of non-cancelled steps reached so far; a delivered order is always
//! complete and a cancelled one never progresses.

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use smallvec::SmallVec;

use crate::orders::{ActiveOrder, OrderStatus};

/// A labelled step in the tracker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusStep {
    /// Status the step represents
    pub status: OrderStatus,

    /// Label shown under the step
    pub label: String,
}

impl StatusStep {
    /// Create a step.
    pub fn new(status: OrderStatus, label: impl Into<String>) -> Self {
        Self {
            status,
            label: label.into(),
        }
    }
}

/// How a step is drawn relative to the current status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepState {
    /// Already passed
    Completed,

    /// The current status
    Current,

    /// Not reached yet
    Upcoming,

    /// The order was cancelled
    Inactive,
}

/// Default steps: confirmed, preparing, out for delivery, delivered.
pub fn default_steps() -> SmallVec<[StatusStep; 5]> {
    SmallVec::from_vec(vec![
        StatusStep::new(OrderStatus::Confirmed, "Order Confirmed"),
        StatusStep::new(OrderStatus::Preparing, "Preparing Food"),
        StatusStep::new(OrderStatus::OutForDelivery, "Out for Delivery"),
        StatusStep::new(OrderStatus::Delivered, "Delivered"),
    ])
}

/// Tracker for a single order.
#[derive(Debug, Clone)]
pub struct OrderTracker {
    order_id: String,
    status: OrderStatus,
    estimated_delivery: Option<String>,
    steps: SmallVec<[StatusStep; 5]>,
}

impl OrderTracker {
    /// Track an order with the default steps.
    pub fn new(order_id: impl Into<String>, status: OrderStatus) -> Self {
        Self {
            order_id: order_id.into(),
            status,
            estimated_delivery: None,
            steps: default_steps(),
        }
    }

    /// Track an active order with the default steps.
    pub fn from_active(order: &ActiveOrder) -> Self {
        Self::new(order.order_id.clone(), order.status)
            .with_estimated_delivery(order.estimated_delivery.clone())
    }

    /// Replace the steps.
    #[must_use]
    pub fn with_steps(mut self, steps: impl IntoIterator<Item = StatusStep>) -> Self {
        self.steps = steps.into_iter().collect();
        self
    }

    /// Set the estimated delivery time.
    #[must_use]
    pub fn with_estimated_delivery(mut self, estimate: Option<String>) -> Self {
        self.estimated_delivery = estimate;
        self
    }

    /// Order id
    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    /// First eight characters of the order id, for headings.
    pub fn short_id(&self) -> &str {
        self.order_id
            .char_indices()
            .nth(8)
            .and_then(|(idx, _)| self.order_id.get(..idx))
            .unwrap_or(&self.order_id)
    }

    /// Current status
    pub fn status(&self) -> OrderStatus {
        self.status
    }

    /// Move to another status.
    pub fn set_status(&mut self, status: OrderStatus) {
        self.status = status;
    }

    /// Steps that are drawn, i.e. every step except a cancelled one.
    pub fn visible_steps(&self) -> impl Iterator<Item = &StatusStep> {
        self.steps
            .iter()
            .filter(|step| step.status != OrderStatus::Cancelled)
    }

    fn current_index(&self) -> Option<usize> {
        self.visible_steps()
            .position(|step| step.status == self.status)
    }

    /// Progress through the visible steps, as a fraction of 1.
    pub fn progress(&self) -> Percentage {
        match self.status {
            OrderStatus::Delivered => return Percentage::from(Decimal::ONE),
            OrderStatus::Cancelled => return Percentage::from(Decimal::ZERO),
            _ => {}
        }

        let count = self.visible_steps().count();

        match self.current_index() {
            Some(idx) if count > 0 => {
                Percentage::from(Decimal::from(idx + 1) / Decimal::from(count))
            }
            _ => Percentage::from(Decimal::ZERO),
        }
    }

    /// Progress in percent points (0 to 100).
    pub fn progress_percent(&self) -> Decimal {
        self.progress() * Decimal::ONE_HUNDRED
    }

    /// Draw state of each visible step, paired with the step.
    pub fn step_states(&self) -> impl Iterator<Item = (&StatusStep, StepState)> {
        let current = self.current_index();
        let cancelled = self.status == OrderStatus::Cancelled;

        self.visible_steps().enumerate().map(move |(idx, step)| {
            let state = match current {
                _ if cancelled => StepState::Inactive,
                Some(current) if idx < current => StepState::Completed,
                Some(current) if idx == current => StepState::Current,
                _ => StepState::Upcoming,
            };

            (step, state)
        })
    }

    /// Estimated delivery time, hidden once the order is delivered or cancelled.
    pub fn estimated_delivery(&self) -> Option<&str> {
        if self.status.is_terminal() {
            return None;
        }

        self.estimated_delivery.as_deref()
    }

    /// Whether the tracker shows the cancelled banner instead of progress.
    pub fn is_cancelled(&self) -> bool {
        self.status == OrderStatus::Cancelled
    }
}
