//! Pricing

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::iso::Currency;

use crate::{
    cart::Cart,
    prices::{Amount, Price},
};

/// Flat delivery fee and tax rate applied to a cart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingPolicy {
    delivery_fee: Decimal,
    tax_rate: Percentage,
}

impl PricingPolicy {
    /// Create a policy from a delivery fee (in major units) and a tax rate.
    pub fn new(delivery_fee: Decimal, tax_rate: Percentage) -> Self {
        Self {
            delivery_fee,
            tax_rate,
        }
    }

    /// Delivery fee charged on any non-empty cart
    pub fn delivery_fee(&self) -> Decimal {
        self.delivery_fee
    }

    /// Tax rate as a fraction of the subtotal
    pub fn tax_rate(&self) -> Percentage {
        self.tax_rate
    }
}

impl Default for PricingPolicy {
    /// 5.00 delivery, 8% tax.
    fn default() -> Self {
        Self::new(Decimal::new(500, 2), Percentage::from(Decimal::new(8, 2)))
    }
}

/// Subtotal, delivery fee, tax and total for a cart.
///
/// Every figure keeps full precision; use [`Amount::rounded`] or the `Display`
/// impl when showing them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBreakdown {
    subtotal: Amount,
    delivery_fee: Amount,
    tax: Amount,
    total: Amount,
}

impl PriceBreakdown {
    /// Price a cart.
    pub fn calculate(cart: &Cart, policy: &PricingPolicy) -> Self {
        let currency = cart.currency();

        if cart.is_empty() {
            return Self::zero(currency);
        }

        let subtotal = cart.subtotal().value();
        let delivery_fee = policy.delivery_fee;
        let tax = policy.tax_rate * subtotal;

        Self {
            subtotal: Amount::new(subtotal, currency),
            delivery_fee: Amount::new(delivery_fee, currency),
            tax: Amount::new(tax, currency),
            total: Amount::new(subtotal + delivery_fee + tax, currency),
        }
    }

    /// The breakdown of an empty cart.
    pub fn zero(currency: &'static Currency) -> Self {
        Self {
            subtotal: Amount::zero(currency),
            delivery_fee: Amount::zero(currency),
            tax: Amount::zero(currency),
            total: Amount::zero(currency),
        }
    }

    /// Sum of line totals
    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    /// Delivery fee
    pub fn delivery_fee(&self) -> Amount {
        self.delivery_fee
    }

    /// Tax on the subtotal
    pub fn tax(&self) -> Amount {
        self.tax
    }

    /// Subtotal plus delivery fee plus tax
    pub fn total(&self) -> Amount {
        self.total
    }

    /// The total rounded for charging, if it fits in minor units.
    pub fn total_price(&self) -> Option<Price> {
        self.total.to_price()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::USD};
    use testresult::TestResult;

    use crate::{catalog::MenuItem, tags::string::StringTagSet};

    use super::*;

    fn dish(id: &str, minor: i64) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            name: id.to_string(),
            description: None,
            price: Money::from_minor(minor, USD),
            image_url: String::new(),
            tags: StringTagSet::default(),
        }
    }

    fn sample_cart() -> Cart {
        let mut cart = Cart::new(USD);

        cart.add_item(&dish("p1", 1299), 1, Some("Pizza Palace"));
        cart.add_item(&dish("s2", 750), 2, Some("Sushi Heaven"));

        cart
    }

    #[test]
    fn empty_cart_prices_to_zero() {
        let breakdown = Cart::new(USD).breakdown(&PricingPolicy::default());

        assert_eq!(breakdown, PriceBreakdown::zero(USD));
        assert_eq!(breakdown.delivery_fee().value(), Decimal::ZERO);
        assert_eq!(breakdown.total().value(), Decimal::ZERO);
    }

    #[test]
    fn sample_cart_breakdown_keeps_full_precision() -> TestResult {
        let breakdown = sample_cart().breakdown(&PricingPolicy::default());

        assert_eq!(breakdown.subtotal().value(), Decimal::new(2799, 2));
        assert_eq!(breakdown.delivery_fee().value(), Decimal::new(500, 2));
        assert_eq!(breakdown.tax().value(), Decimal::new(22_392, 4));
        assert_eq!(breakdown.total().value(), Decimal::new(352_292, 4));

        assert_eq!(breakdown.total().rounded(), Decimal::new(3523, 2));
        assert_eq!(
            breakdown
                .total_price()
                .ok_or("total should fit")?
                .to_minor_units(),
            3523
        );

        Ok(())
    }

    #[test]
    fn total_is_sum_of_parts_and_tax_is_rate_of_subtotal() {
        let policy = PricingPolicy::default();
        let mut cart = Cart::new(USD);

        for (idx, minor) in [1, 99, 1299, 333, 750, 4_999].into_iter().enumerate() {
            cart.add_item(&dish(&format!("d{idx}"), minor), 3, None);

            let breakdown = cart.breakdown(&policy);

            assert_eq!(
                breakdown.total().value(),
                breakdown.subtotal().value()
                    + breakdown.delivery_fee().value()
                    + breakdown.tax().value()
            );
            assert_eq!(
                breakdown.tax().value(),
                breakdown.subtotal().value() * Decimal::new(8, 2)
            );
        }
    }

    #[test]
    fn breakdown_follows_every_mutation() {
        let policy = PricingPolicy::default();
        let mut cart = sample_cart();

        cart.update_quantity("s2", 1);

        assert_eq!(
            cart.breakdown(&policy).subtotal().value(),
            Decimal::new(2049, 2)
        );

        cart.remove_item("p1");
        cart.remove_item("s2");

        assert_eq!(cart.breakdown(&policy), PriceBreakdown::zero(USD));
    }

    #[test]
    fn custom_policy_is_applied() {
        let policy = PricingPolicy::new(Decimal::new(299, 2), Percentage::from(Decimal::new(1, 1)));
        let breakdown = sample_cart().breakdown(&policy);

        assert_eq!(breakdown.delivery_fee().value(), Decimal::new(299, 2));
        assert_eq!(breakdown.tax().value(), Decimal::new(2799, 3));
        assert_eq!(policy.tax_rate(), Percentage::from(Decimal::new(1, 1)));
    }
}
