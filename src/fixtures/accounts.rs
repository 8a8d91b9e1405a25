//! Account Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

use crate::{
    checkout::{address::Address, payment::PaymentMethod},
    profile::UserProfile,
};

/// Wrapper for accounts in YAML
#[derive(Debug, Deserialize)]
pub struct AccountsFixture {
    /// Map of user id -> account
    pub accounts: FxHashMap<String, Account>,
}

/// A user's profile, saved addresses and payment methods.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Account {
    /// Contact details
    pub profile: UserProfile,

    /// Saved delivery addresses, the first one being the default
    #[serde(default)]
    pub addresses: Vec<Address>,

    /// Payment methods, the first one being the default
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethod>,
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::checkout::payment::PaymentKind;

    use super::*;

    #[test]
    fn account_fixture_parses() -> TestResult {
        let fixture: AccountsFixture = serde_norway::from_str(
            r"
accounts:
  user-1:
    profile: { name: John Doe, email: john.doe@example.com }
    addresses:
      - { id: addr1, type: Home, line1: 123 Main St, city: Anytown, state: CA, zip: '90210', country: USA }
    payment_methods:
      - { id: pm3, name: Cash on Delivery, kind: cash_on_delivery }
",
        )?;

        let account = fixture.accounts.get("user-1").ok_or("account")?;

        assert_eq!(account.profile.phone, None);
        assert_eq!(account.addresses.first().and_then(|a| a.kind.as_deref()), Some("Home"));
        assert_eq!(
            account.payment_methods.first().map(|m| m.kind),
            Some(PaymentKind::CashOnDelivery)
        );

        Ok(())
    }
}
