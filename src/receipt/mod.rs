//! Receipt
//!
//! Terminal rendering for the cart summary, the restaurant listing, order history
//! and the live order tracker.

use std::{fmt::Write, io};

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use tabled::{
    builder::Builder,
    grid::config::HorizontalLine,
    settings::{
        Alignment, Color, Style, Theme,
        object::{Columns, Rows},
    },
};
use thiserror::Error;

use crate::{
    cart::Cart,
    catalog::RestaurantSummary,
    checkout::Confirmation,
    orders::{
        BadgeVariant, Order,
        tracking::{OrderTracker, StepState},
    },
    prices::Amount,
    pricing::{PriceBreakdown, PricingPolicy},
};

/// Errors that can occur when writing a receipt.
#[derive(Debug, Error)]
pub enum ReceiptError {
    /// IO error
    #[error("IO error")]
    IO,
}

/// Priced cart, ready to print.
#[derive(Debug, Clone)]
pub struct CartReceipt<'a> {
    cart: &'a Cart,
    policy: PricingPolicy,
    breakdown: PriceBreakdown,
}

impl<'a> CartReceipt<'a> {
    /// Price a cart for printing.
    pub fn new(cart: &'a Cart, policy: &PricingPolicy) -> Self {
        Self {
            cart,
            policy: *policy,
            breakdown: cart.breakdown(policy),
        }
    }

    /// The breakdown the receipt shows.
    pub fn breakdown(&self) -> &PriceBreakdown {
        &self.breakdown
    }

    /// Prints the cart lines and the price summary.
    ///
    /// # Errors
    ///
    /// Returns an error if the output cannot be written.
    pub fn write_to(&self, mut out: impl io::Write) -> Result<(), ReceiptError> {
        if self.cart.is_empty() {
            return writeln!(out, "\nYour cart is empty.\n").map_err(|_err| ReceiptError::IO);
        }

        let mut builder = Builder::default();

        builder.push_record(["", "Item", "Restaurant", "Qty", "Unit Price", "Line Total"]);

        for (idx, line) in self.cart.lines().iter().enumerate() {
            builder.push_record([
                format!("#{}", idx + 1),
                line.name().to_string(),
                line.restaurant().unwrap_or_default().to_string(),
                line.quantity().to_string(),
                line.unit_price().to_string(),
                line.total().to_string(),
            ]);
        }

        write_table(&mut out, builder, Columns::new(3..6))?;
        self.write_summary(&mut out)
    }

    fn write_summary(&self, out: &mut impl io::Write) -> Result<(), ReceiptError> {
        let tax_label = format!(
            " Tax ({}%):",
            percent_points(self.policy.tax_rate()).normalize()
        );

        let rows = [
            (" Subtotal:".to_string(), amount_cell(self.breakdown.subtotal())),
            (" Delivery Fee:".to_string(), amount_cell(self.breakdown.delivery_fee())),
            (tax_label, amount_cell(self.breakdown.tax())),
            (
                " \x1b[1mTotal:\x1b[0m".to_string(),
                format!("\x1b[1m{}\x1b[0m", amount_cell(self.breakdown.total())),
            ),
        ];

        let label_width = rows
            .iter()
            .map(|(label, _)| visible_width(label))
            .max()
            .unwrap_or_default();

        let value_width = rows
            .iter()
            .map(|(_, value)| visible_width(value))
            .max()
            .unwrap_or_default();

        for (label, value) in &rows {
            write_summary_line(out, label, value, label_width, value_width)?;
        }

        writeln!(out).map_err(|_err| ReceiptError::IO)
    }
}

/// Prints the restaurant listing.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_restaurants(
    mut out: impl io::Write,
    restaurants: &[RestaurantSummary],
) -> Result<(), ReceiptError> {
    if restaurants.is_empty() {
        return writeln!(out, "\nNo restaurants found. Try adjusting your search or filters.\n")
            .map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();

    builder.push_record(["Id", "Restaurant", "Cuisines", "Rating", "Delivery"]);

    for restaurant in restaurants {
        builder.push_record([
            restaurant.id.clone(),
            restaurant.name.clone(),
            restaurant.cuisines.join(", "),
            restaurant
                .rating
                .map_or_else(|| "-".to_string(), |rating| format!("{rating:.1}")),
            restaurant.delivery_time.clone(),
        ]);
    }

    write_table(&mut out, builder, Columns::new(3..4))
}

/// Prints the order history, newest entries as stored.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_order_history(mut out: impl io::Write, orders: &[Order]) -> Result<(), ReceiptError> {
    if orders.is_empty() {
        return writeln!(out, "\nYou have no past orders.\n").map_err(|_err| ReceiptError::IO);
    }

    let mut builder = Builder::default();
    let mut color_ops: Vec<(usize, usize, Color)> = Vec::with_capacity(orders.len());

    builder.push_record(["Order", "Date", "Restaurant", "Items", "Total", "Status"]);

    for (idx, order) in orders.iter().enumerate() {
        let items = order
            .items
            .iter()
            .map(|line| format!("{} x{}", line.name, line.quantity))
            .collect::<Vec<_>>()
            .join("\n");

        builder.push_record([
            order.id.clone(),
            order.date.to_string(),
            order.restaurant.clone(),
            items,
            order.total.to_string(),
            order.status.to_string(),
        ]);

        color_ops.push((idx + 1, 5, badge_color(order.status.badge())));
    }

    let mut table = builder.build();

    table.with(theme());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(Columns::new(4..5), Alignment::right());

    for (row, col, color) in color_ops {
        table.modify((row, col), color);
    }

    writeln!(out, "\n{}", colorize_borders(&table.to_string())).map_err(|_err| ReceiptError::IO)
}

/// Prints the live tracker for an order.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_tracker(mut out: impl io::Write, tracker: &OrderTracker) -> Result<(), ReceiptError> {
    let io_err = |_err| ReceiptError::IO;

    writeln!(out, "\nOrder #{}", tracker.short_id()).map_err(io_err)?;

    if tracker.is_cancelled() {
        return writeln!(out, "  \x1b[31mThis order has been cancelled.\x1b[0m\n").map_err(io_err);
    }

    for (step, state) in tracker.step_states() {
        let marker = match state {
            StepState::Completed => "\x1b[32m✓\x1b[0m",
            StepState::Current => "\x1b[1m●\x1b[0m",
            StepState::Upcoming | StepState::Inactive => "\x1b[90m○\x1b[0m",
        };

        writeln!(out, "  {marker} {}", step.label).map_err(io_err)?;
    }

    writeln!(out, "  Progress: {}%", tracker.progress_percent().round_dp(0)).map_err(io_err)?;

    if let Some(estimate) = tracker.estimated_delivery() {
        writeln!(out, "  Estimated delivery: {estimate}").map_err(io_err)?;
    }

    writeln!(out).map_err(io_err)
}

/// Prints an order confirmation and where to go next.
///
/// # Errors
///
/// Returns an error if the output cannot be written.
pub fn write_confirmation(
    mut out: impl io::Write,
    confirmation: &Confirmation,
) -> Result<(), ReceiptError> {
    let order = confirmation.order();
    let next = confirmation
        .next_intents()
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" or ");

    writeln!(
        out,
        "\n\x1b[1mOrder placed!\x1b[0m #{} on {}\n  Deliver to: {}\n  Pay with: {}\n  Total: {}\n  Next: {next}\n",
        order.id,
        order.date,
        confirmation.address(),
        confirmation.payment_method().name,
        order.total,
    )
    .map_err(|_err| ReceiptError::IO)
}

fn theme() -> Theme {
    let mut theme = Theme::from(Style::modern_rounded());
    let separator = HorizontalLine::new(Some('─'), Some('┼'), Some('├'), Some('┤'));

    theme.remove_horizontal_lines();
    theme.insert_horizontal_line(1, separator);

    theme
}

fn write_table(
    out: &mut impl io::Write,
    builder: Builder,
    right_aligned: Columns<std::ops::Range<usize>>,
) -> Result<(), ReceiptError> {
    let mut table = builder.build();

    table.with(theme());
    table.modify(Rows::first(), Color::BOLD);
    table.modify(right_aligned, Alignment::right());

    let table_str = colorize_borders(&table.to_string());

    writeln!(out, "\n{table_str}").map_err(|_err| ReceiptError::IO)
}

fn amount_cell(amount: Amount) -> String {
    format!("{amount}  ")
}

/// Converts a fractional percentage to percent points for display.
fn percent_points(percentage: Percentage) -> Decimal {
    (percentage * Decimal::ONE_HUNDRED).round_dp(2)
}

fn badge_color(badge: BadgeVariant) -> Color {
    match badge {
        BadgeVariant::Default => Color::FG_GREEN,
        BadgeVariant::Secondary => Color::FG_YELLOW,
        BadgeVariant::Destructive => Color::FG_RED,
    }
}

/// Wraps runs of UTF-8 box-drawing characters in ANSI dark-grey escape codes.
fn colorize_borders(table: &str) -> String {
    let mut out = String::with_capacity(table.len() + 256);
    let mut in_run = false;

    for ch in table.chars() {
        let box_char = ('\u{2500}'..='\u{257F}').contains(&ch);

        if box_char && !in_run {
            _ = out.write_str("\x1b[90m");
            in_run = true;
        } else if !box_char && in_run {
            _ = out.write_str("\x1b[0m");
            in_run = false;
        }

        out.push(ch);
    }

    if in_run {
        _ = out.write_str("\x1b[0m");
    }

    out
}

/// Returns the visible (non-ANSI) width of a string.
fn visible_width(s: &str) -> usize {
    let mut width = 0usize;
    let mut in_escape = false;

    for ch in s.chars() {
        if in_escape {
            if ch.is_ascii_alphabetic() {
                in_escape = false;
            }
        } else if ch == '\x1b' {
            in_escape = true;
        } else {
            width += 1;
        }
    }

    width
}

/// Writes a summary line with a right-aligned label and a fixed-width value column.
fn write_summary_line(
    out: &mut impl io::Write,
    label: &str,
    value: &str,
    label_col_width: usize,
    value_col_width: usize,
) -> Result<(), ReceiptError> {
    let label_pad = label_col_width.saturating_sub(visible_width(label));
    let value_pad = value_col_width.saturating_sub(visible_width(value));

    writeln!(
        out,
        "{:>label_pad$}{label}  {value_pad}{value}",
        "",
        value_pad = " ".repeat(value_pad)
    )
    .map_err(|_err| ReceiptError::IO)
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{
        catalog::MenuItem,
        orders::{OrderLine, OrderStatus},
        tags::string::StringTagSet,
    };

    use super::*;

    fn dish(id: &str, name: &str, minor: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            price: Money::from_minor(minor, USD),
            image_url: String::new(),
            tags: StringTagSet::default(),
        }
    }

    fn render(write: impl FnOnce(&mut Vec<u8>) -> Result<(), ReceiptError>) -> TestResult<String> {
        let mut out = Vec::new();

        write(&mut out)?;

        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn cart_receipt_shows_lines_and_rounded_totals() -> TestResult {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, Some("Pizza Palace"));
        cart.add_item(&dish("s2", "California Roll", 750), 2, Some("Sushi Heaven"));

        let receipt = CartReceipt::new(&cart, &PricingPolicy::default());
        let output = render(|out| receipt.write_to(out))?;

        assert!(output.contains("Margherita Pizza"));
        assert!(output.contains("Sushi Heaven"));
        assert!(output.contains("Tax (8%):"));
        assert!(output.contains("27.99"));
        assert!(output.contains("2.24"));
        assert!(output.contains("35.23"));

        Ok(())
    }

    #[test]
    fn empty_cart_receipt_says_so() -> TestResult {
        let cart = Cart::new(USD);
        let output = render(|out| CartReceipt::new(&cart, &PricingPolicy::default()).write_to(out))?;

        assert!(output.contains("Your cart is empty."));

        Ok(())
    }

    #[test]
    fn restaurants_table_lists_names_and_missing_ratings() -> TestResult {
        let restaurants = [RestaurantSummary {
            id: "4".to_string(),
            name: "Curry Corner".to_string(),
            image_url: String::new(),
            cuisines: vec!["Indian".to_string(), "Curry".to_string()],
            rating: None,
            delivery_time: "35-45 min".to_string(),
        }];

        let output = render(|out| write_restaurants(out, &restaurants))?;

        assert!(output.contains("Curry Corner"));
        assert!(output.contains("Indian, Curry"));

        let none = render(|out| write_restaurants(out, &[]))?;

        assert!(none.contains("No restaurants found."));

        Ok(())
    }

    #[test]
    fn order_history_shows_status() -> TestResult {
        let orders = [Order {
            id: "order789".to_string(),
            date: date(2023, 11, 1),
            total: Money::from_minor(3300, USD),
            status: OrderStatus::Cancelled,
            restaurant: "Burger Barn".to_string(),
            items: vec![OrderLine {
                id: "b1".to_string(),
                name: "Cheeseburger".to_string(),
                quantity: 2,
                unit_price: Money::from_minor(1650, USD),
            }],
            delivery_address: String::new(),
        }];

        let output = render(|out| write_order_history(out, &orders))?;

        assert!(output.contains("order789"));
        assert!(output.contains("2023-11-01"));
        assert!(output.contains("Cheeseburger x2"));
        assert!(output.contains("CANCELLED"));

        Ok(())
    }

    #[test]
    fn tracker_shows_progress_or_cancellation() -> TestResult {
        let tracker = OrderTracker::new("activeOrder001", OrderStatus::Preparing)
            .with_estimated_delivery(Some("Approximately 15 minutes".to_string()));

        let output = render(|out| write_tracker(out, &tracker))?;

        assert!(output.contains("Preparing Food"));
        assert!(output.contains("Progress: 50%"));
        assert!(output.contains("Approximately 15 minutes"));

        let cancelled = OrderTracker::new("order789", OrderStatus::Cancelled);
        let output = render(|out| write_tracker(out, &cancelled))?;

        assert!(output.contains("cancelled"));
        assert!(!output.contains("Progress"));

        Ok(())
    }

    #[test]
    fn visible_width_ignores_ansi_escapes() {
        assert_eq!(visible_width("\x1b[1mTotal:\x1b[0m"), 6);
    }
}
