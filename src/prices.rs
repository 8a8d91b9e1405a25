//! Prices

use std::{fmt, ops::Deref};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};

/// A catalog price. Currencies are the static ISO table, so prices never borrow.
pub type Price = Money<'static, Currency>;

/// A monetary amount held at full precision.
///
/// Amounts only round to the currency's minor units when they are displayed, so
/// repeated arithmetic never compounds rounding error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Amount {
    value: Decimal,
    currency: &'static Currency,
}

impl Amount {
    /// Creates a new amount.
    pub fn new(value: Decimal, currency: &'static Currency) -> Self {
        Amount { value, currency }
    }

    /// Creates a zero amount in the given currency.
    pub fn zero(currency: &'static Currency) -> Self {
        Amount::new(Decimal::ZERO, currency)
    }

    /// Creates an exact amount from a price.
    pub fn from_price(price: &Price) -> Self {
        let currency = price.currency();

        Amount::new(
            Decimal::new(price.to_minor_units(), currency.exponent),
            currency,
        )
    }

    /// The unrounded value.
    pub fn value(&self) -> Decimal {
        self.value
    }

    /// Currency of the amount.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The value rounded half away from zero to the currency's minor units.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.value
            .round_dp_with_strategy(self.currency.exponent, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Converts the rounded value to a displayable price.
    ///
    /// Returns `None` if the amount does not fit in `i64` minor units.
    pub fn to_price(&self) -> Option<Price> {
        let scale = Decimal::from(10_i64.checked_pow(self.currency.exponent)?);
        let minor_units = self.rounded().checked_mul(scale)?.to_i64()?;

        Some(Money::from_minor(minor_units, self.currency))
    }
}

impl Deref for Amount {
    type Target = Decimal;

    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_price() {
            Some(price) => write!(f, "{price}"),
            None => write!(f, "{} {}", self.rounded(), self.currency.iso_alpha_code),
        }
    }
}
