//! Payment methods

use std::fmt;

use serde::Deserialize;

/// Kind of payment method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// Credit or debit card
    Card,

    /// Digital wallet
    Wallet,

    /// Paid to the courier
    #[serde(alias = "cod")]
    CashOnDelivery,
}

impl fmt::Display for PaymentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PaymentKind::Card => "card",
            PaymentKind::Wallet => "wallet",
            PaymentKind::CashOnDelivery => "cash on delivery",
        })
    }
}

/// A payment method the user can pick at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PaymentMethod {
    /// Method id
    pub id: String,

    /// Display name, e.g. "Visa **** 1234"
    pub name: String,

    /// Kind of method
    pub kind: PaymentKind,
}

impl PaymentMethod {
    /// Create a payment method.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: PaymentKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
        }
    }
}

/// The sample card, wallet and cash-on-delivery methods.
pub fn default_methods() -> Vec<PaymentMethod> {
    vec![
        PaymentMethod::new("pm1", "Visa **** 1234", PaymentKind::Card),
        PaymentMethod::new("pm2", "PayPal", PaymentKind::Wallet),
        PaymentMethod::new("pm3", "Cash on Delivery", PaymentKind::CashOnDelivery),
    ]
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_methods_cover_every_kind() {
        let kinds: Vec<PaymentKind> = default_methods().iter().map(|method| method.kind).collect();

        assert_eq!(
            kinds,
            [
                PaymentKind::Card,
                PaymentKind::Wallet,
                PaymentKind::CashOnDelivery
            ]
        );
    }

    #[test]
    fn kinds_deserialize_from_snake_case() -> TestResult {
        let kinds: Vec<PaymentKind> = serde_norway::from_str("[card, wallet, cash_on_delivery, cod]")?;

        assert_eq!(kinds.last(), Some(&PaymentKind::CashOnDelivery));
        assert_eq!(kinds.len(), 4);

        Ok(())
    }
}
