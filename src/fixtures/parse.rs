//! Price and percentage parsing for fixture files

use std::str::FromStr;

use decimal_percentage::Percentage;
use rust_decimal::Decimal;
use rusty_money::{
    Money,
    iso::{self, Currency},
};

use crate::{fixtures::FixtureError, prices::Price};

/// Parse a price written as "AMOUNT CURRENCY", e.g. "12.99 USD".
///
/// Returns the amount in minor units and the currency.
///
/// # Errors
///
/// Returns an error if the amount is malformed, negative, more precise than the
/// currency allows, or the currency code is unknown.
pub fn parse_price(s: &str) -> Result<(i64, &'static Currency), FixtureError> {
    let invalid = || FixtureError::InvalidPrice(s.to_string());

    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(invalid());
    };

    let currency = iso::find(code).ok_or_else(|| FixtureError::UnknownCurrency(code.to_string()))?;
    let mut amount = Decimal::from_str(amount).map_err(|_err| invalid())?;

    if amount.is_sign_negative() || amount.scale() > currency.exponent {
        return Err(invalid());
    }

    amount.rescale(currency.exponent);

    let minor_units = i64::try_from(amount.mantissa()).map_err(|_err| invalid())?;

    Ok((minor_units, currency))
}

/// Parse a price straight into [`Money`].
///
/// # Errors
///
/// See [`parse_price`].
pub fn parse_money(s: &str) -> Result<Price, FixtureError> {
    let (minor_units, currency) = parse_price(s)?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse a plain decimal amount in major units, e.g. "5.00".
///
/// # Errors
///
/// Returns an error if the amount is malformed or negative.
pub fn parse_amount(s: &str) -> Result<Decimal, FixtureError> {
    match Decimal::from_str(s.trim()) {
        Ok(amount) if !amount.is_sign_negative() => Ok(amount),
        Ok(_) | Err(_) => Err(FixtureError::InvalidPrice(s.to_string())),
    }
}

/// Parse a percentage written as "8%" or as a fraction, "0.08".
///
/// # Errors
///
/// Returns an error if the value is malformed or outside 0% to 100%.
pub fn parse_percentage(s: &str) -> Result<Percentage, FixtureError> {
    let invalid = || FixtureError::InvalidPercentage(s.to_string());
    let trimmed = s.trim();

    let fraction = match trimmed.strip_suffix('%') {
        Some(points) => Decimal::from_str(points.trim()).map_err(|_err| invalid())? / Decimal::ONE_HUNDRED,
        None => Decimal::from_str(trimmed).map_err(|_err| invalid())?,
    };

    if fraction.is_sign_negative() || fraction > Decimal::ONE {
        return Err(invalid());
    }

    Ok(Percentage::from(fraction))
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::{GBP, JPY, USD};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn parses_prices_into_minor_units() -> TestResult {
        assert_eq!(parse_price("12.99 USD")?, (1299, USD));
        assert_eq!(parse_price("5 GBP")?, (500, GBP));
        assert_eq!(parse_price("7.5 USD")?, (750, USD));
        assert_eq!(parse_price("1200 JPY")?, (1200, JPY));

        Ok(())
    }

    #[test]
    fn rejects_malformed_prices() {
        assert!(matches!(parse_price("12.99"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("abc USD"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("-1.00 USD"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("1.999 USD"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("1.00 USD extra"), Err(FixtureError::InvalidPrice(_))));
        assert!(matches!(parse_price("1.00 ZZZ"), Err(FixtureError::UnknownCurrency(_))));
    }

    #[test]
    fn parses_percentages_in_both_forms() -> TestResult {
        let rate = Percentage::from(Decimal::new(8, 2));

        assert_eq!(parse_percentage("8%")?, rate);
        assert_eq!(parse_percentage("0.08")?, rate);
        assert!(matches!(parse_percentage("150%"), Err(FixtureError::InvalidPercentage(_))));
        assert!(matches!(parse_percentage("eight"), Err(FixtureError::InvalidPercentage(_))));

        Ok(())
    }

    #[test]
    fn parses_plain_amounts() -> TestResult {
        assert_eq!(parse_amount(" 5.00 ")?, Decimal::new(500, 2));
        assert!(parse_amount("-5").is_err());

        Ok(())
    }
}
