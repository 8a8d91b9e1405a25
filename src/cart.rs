//! Cart

use rust_decimal::Decimal;
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    catalog::MenuItem,
    navigation::Intent,
    prices::{Amount, Price},
    pricing::{PriceBreakdown, PricingPolicy},
};

/// Errors related to cart construction or checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A line's currency differs from the cart currency (index, line currency, cart currency).
    #[error("Line {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(usize, &'static str, &'static str),

    /// A line appears twice.
    #[error("Duplicate cart line for item {0}")]
    DuplicateLine(String),

    /// A line was seeded with a zero quantity.
    #[error("Cart line for item {0} has zero quantity")]
    ZeroQuantity(String),

    /// Checkout needs at least one line.
    #[error("Your cart is empty. Please add items before proceeding to checkout.")]
    Empty,
}

/// One dish and quantity in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    item_id: String,
    name: String,
    unit_price: Price,
    quantity: u32,
    restaurant: Option<String>,
}

impl CartLine {
    /// Create a line. The price is copied, so later menu changes do not affect it.
    pub fn new(
        item_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: Price,
        quantity: u32,
        restaurant: Option<String>,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            name: name.into(),
            unit_price,
            quantity,
            restaurant,
        }
    }

    /// Create a line for a menu item.
    pub fn from_menu_item(item: &MenuItem, quantity: u32, restaurant: Option<&str>) -> Self {
        Self::new(
            item.id.clone(),
            item.name.clone(),
            item.price,
            quantity,
            restaurant.map(ToString::to_string),
        )
    }

    /// Id of the dish
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// Name of the dish
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit price copied when the line was created
    pub fn unit_price(&self) -> &Price {
        &self.unit_price
    }

    /// Quantity, always at least 1
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Name of the restaurant the dish came from
    pub fn restaurant(&self) -> Option<&str> {
        self.restaurant.as_deref()
    }

    /// Unit price times quantity, unrounded.
    pub fn total(&self) -> Amount {
        let unit = Amount::from_price(&self.unit_price);

        Amount::new(unit.value() * Decimal::from(self.quantity), unit.currency())
    }
}

/// Cart
#[derive(Debug, Clone)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart.
    pub fn new(currency: &'static Currency) -> Self {
        Cart {
            lines: Vec::new(),
            currency,
        }
    }

    /// Create a cart pre-seeded with lines.
    ///
    /// # Errors
    ///
    /// Returns a `CartError` if a line has another currency, a zero quantity, or
    /// repeats an item id.
    pub fn with_lines(
        lines: impl Into<Vec<CartLine>>,
        currency: &'static Currency,
    ) -> Result<Self, CartError> {
        let lines = lines.into();

        lines.iter().enumerate().try_for_each(|(i, line)| {
            let line_currency = line.unit_price.currency();

            if line_currency != currency {
                return Err(CartError::CurrencyMismatch(
                    i,
                    line_currency.iso_alpha_code,
                    currency.iso_alpha_code,
                ));
            }

            if line.quantity == 0 {
                return Err(CartError::ZeroQuantity(line.item_id.clone()));
            }

            if lines
                .iter()
                .take(i)
                .any(|earlier| earlier.item_id == line.item_id)
            {
                return Err(CartError::DuplicateLine(line.item_id.clone()));
            }

            Ok(())
        })?;

        Ok(Cart { lines, currency })
    }

    /// Add `quantity` of a menu item.
    ///
    /// An existing line for the same item grows in place; otherwise a new line is
    /// appended. Adding zero does nothing, and an item priced in another currency
    /// is skipped.
    pub fn add_item(&mut self, item: &MenuItem, quantity: u32, restaurant: Option<&str>) {
        if quantity == 0 {
            return;
        }

        if item.price.currency() != self.currency {
            warn!(
                item_id = %item.id,
                item_currency = item.price.currency().iso_alpha_code,
                cart_currency = self.currency.iso_alpha_code,
                "skipped item priced in another currency"
            );

            return;
        }

        if let Some(line) = self.line_mut(&item.id) {
            line.quantity = line.quantity.saturating_add(quantity);

            debug!(item_id = %item.id, quantity = line.quantity, "increased cart line");
        } else {
            self.lines
                .push(CartLine::from_menu_item(item, quantity, restaurant));

            debug!(item_id = %item.id, quantity, "added cart line");
        }
    }

    /// Set the quantity of a line. Below 1 the line is removed.
    ///
    /// Unknown ids are ignored.
    pub fn update_quantity(&mut self, item_id: &str, quantity: i64) {
        let Ok(quantity @ 1..) = u32::try_from(quantity) else {
            if quantity < 1 {
                self.remove_item(item_id);
            }

            return;
        };

        if let Some(line) = self.line_mut(item_id) {
            line.quantity = quantity;

            debug!(item_id, quantity, "updated cart line");
        }
    }

    /// Remove a line. Unknown ids are ignored.
    pub fn remove_item(&mut self, item_id: &str) {
        let before = self.lines.len();

        self.lines.retain(|line| line.item_id != item_id);

        if self.lines.len() < before {
            debug!(item_id, "removed cart line");
        }
    }

    /// Remove every line.
    pub fn clear(&mut self) {
        self.lines.clear();

        debug!("cleared cart");
    }

    /// Get a line by item id.
    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.item_id == item_id)
    }

    fn line_mut(&mut self, item_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.item_id == item_id)
    }

    /// Lines in the order they were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Calculate the subtotal of the cart.
    pub fn subtotal(&self) -> Amount {
        Amount::new(
            self.lines.iter().map(|line| line.total().value()).sum(),
            self.currency,
        )
    }

    /// Price the cart under a pricing policy.
    ///
    /// The breakdown is derived from the current lines on every call.
    pub fn breakdown(&self, policy: &PricingPolicy) -> PriceBreakdown {
        PriceBreakdown::calculate(self, policy)
    }

    /// The navigation intent for "proceed to checkout".
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Empty`] if there is nothing to check out.
    pub fn proceed_to_checkout(&self) -> Result<Intent, CartError> {
        if self.is_empty() {
            return Err(CartError::Empty);
        }

        debug!(lines = self.len(), "proceeding to checkout");

        Ok(Intent::Checkout)
    }

    /// Get the number of lines in the cart.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of every line's quantity.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{self, GBP, USD},
    };
    use testresult::TestResult;

    use crate::tags::string::StringTagSet;

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

    fn ids(cart: &Cart) -> Vec<&str> {
        cart.lines().iter().map(CartLine::item_id).collect()
    }

    #[test]
    fn new_cart_is_empty() {
        let cart = Cart::new(USD);

        assert!(cart.is_empty());
        assert_eq!(cart.currency(), USD);
        assert_eq!(cart.subtotal().value(), Decimal::ZERO);
    }

    #[test]
    fn add_item_twice_accumulates_in_first_position() {
        let mut cart = Cart::new(USD);
        let pizza = dish("p1", "Margherita Pizza", 1299);
        let roll = dish("s2", "California Roll", 750);

        cart.add_item(&pizza, 1, Some("Pizza Palace"));
        cart.add_item(&roll, 2, Some("Sushi Heaven"));
        cart.add_item(&pizza, 3, Some("Pizza Palace"));

        assert_eq!(ids(&cart), ["p1", "s2"]);
        assert_eq!(cart.line("p1").map(CartLine::quantity), Some(4));
        assert_eq!(cart.item_count(), 6);
    }

    #[test]
    fn add_zero_is_a_noop() {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 0, None);

        assert!(cart.is_empty());
    }

    #[test]
    fn added_line_copies_price_and_restaurant() {
        let mut cart = Cart::new(USD);
        let mut pizza = dish("p1", "Margherita Pizza", 1299);

        cart.add_item(&pizza, 1, Some("Pizza Palace"));
        pizza.price = Money::from_minor(1999, USD);

        let line = cart.line("p1");

        assert_eq!(
            line.map(CartLine::unit_price),
            Some(&Money::from_minor(1299, USD))
        );
        assert_eq!(line.and_then(CartLine::restaurant), Some("Pizza Palace"));
    }

    #[test]
    fn update_quantity_below_one_removes_line() {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 2, None);
        cart.add_item(&dish("s2", "California Roll", 750), 1, None);

        cart.update_quantity("p1", 0);

        assert_eq!(ids(&cart), ["s2"]);

        cart.update_quantity("s2", -3);

        assert!(cart.is_empty());
    }

    #[test]
    fn update_quantity_replaces_in_place() {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, None);
        cart.add_item(&dish("s2", "California Roll", 750), 1, None);
        cart.add_item(&dish("s3", "Spicy Tuna Roll", 800), 1, None);

        cart.update_quantity("s2", 5);

        assert_eq!(ids(&cart), ["p1", "s2", "s3"]);
        assert_eq!(cart.line("s2").map(CartLine::quantity), Some(5));
    }

    #[test]
    fn update_quantity_ignores_unknown_ids() {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, None);
        cart.update_quantity("nope", 4);

        assert_eq!(ids(&cart), ["p1"]);
        assert_eq!(cart.item_count(), 1);
    }

    #[test]
    fn update_quantity_beyond_u32_is_ignored() {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, None);
        cart.update_quantity("p1", i64::MAX);

        assert_eq!(cart.line("p1").map(CartLine::quantity), Some(1));
    }

    #[test]
    fn remove_item_absent_is_noop() {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, None);
        cart.remove_item("zzz");

        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn clear_empties_cart() {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, None);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn subtotal_sums_line_totals() {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, None);
        cart.add_item(&dish("s2", "California Roll", 750), 2, None);

        assert_eq!(cart.subtotal().value(), Decimal::new(2799, 2));
        assert_eq!(
            cart.line("s2").map(|line| line.total().value()),
            Some(Decimal::new(1500, 2))
        );
    }

    #[test]
    fn add_item_skips_other_currencies() -> TestResult {
        let mut cart = Cart::new(USD);
        let pounds = MenuItem {
            price: Money::from_minor(100, GBP),
            ..dish("x", "Scone", 100)
        };

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, None);
        cart.add_item(&pounds, 1, None);

        assert_eq!(ids(&cart), ["p1"]);
        assert!(cart.line("x").is_none());
        assert_eq!(cart.subtotal().value(), Decimal::new(1299, 2));
        assert_eq!(cart.subtotal().currency(), USD);

        Ok(())
    }

    #[test]
    fn with_lines_currency_mismatch_errors() {
        let lines = [
            CartLine::new("a", "A", Money::from_minor(100, GBP), 1, None),
            CartLine::new("b", "B", Money::from_minor(100, iso::USD), 1, None),
        ];

        let result = Cart::with_lines(lines, GBP);

        assert_eq!(
            result.map(|cart| cart.len()),
            Err(CartError::CurrencyMismatch(
                1,
                USD.iso_alpha_code,
                GBP.iso_alpha_code
            ))
        );
    }

    #[test]
    fn with_lines_rejects_duplicates_and_zero_quantities() {
        let duplicate = [
            CartLine::new("a", "A", Money::from_minor(100, USD), 1, None),
            CartLine::new("a", "A", Money::from_minor(100, USD), 2, None),
        ];
        let zero = [CartLine::new("a", "A", Money::from_minor(100, USD), 0, None)];

        assert_eq!(
            Cart::with_lines(duplicate, USD).map(|cart| cart.len()),
            Err(CartError::DuplicateLine("a".to_string()))
        );
        assert_eq!(
            Cart::with_lines(zero, USD).map(|cart| cart.len()),
            Err(CartError::ZeroQuantity("a".to_string()))
        );
    }

    #[test]
    fn with_lines_keeps_order() -> TestResult {
        let lines = [
            CartLine::new("s2", "California Roll", Money::from_minor(750, USD), 2, None),
            CartLine::new("p1", "Margherita Pizza", Money::from_minor(1299, USD), 1, None),
        ];

        let cart = Cart::with_lines(lines, USD)?;

        assert_eq!(ids(&cart), ["s2", "p1"]);

        Ok(())
    }

    #[test]
    fn proceed_to_checkout_requires_lines() {
        let mut cart = Cart::new(USD);

        assert_eq!(cart.proceed_to_checkout(), Err(CartError::Empty));

        cart.add_item(&dish("p1", "Margherita Pizza", 1299), 1, None);

        assert_eq!(cart.proceed_to_checkout(), Ok(Intent::Checkout));
    }
}
